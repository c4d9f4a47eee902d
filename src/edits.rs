//! Span-based text edits over the original module source.
//!
//! Rewriters never touch the syntax tree. They record `(start, end, text)`
//! replacements against the source the tree was parsed from, and the whole
//! list is applied once at the end. An insertion is a replacement of an empty
//! range.

use crate::error::{RewriteError, RewriteResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    pub fn new() -> Self {
        EditList::default()
    }

    pub fn replace(&mut self, start: u32, end: u32, text: impl Into<String>) {
        self.edits.push(Edit {
            start,
            end,
            text: text.into(),
        });
    }

    pub fn insert(&mut self, at: u32, text: impl Into<String>) {
        self.replace(at, at, text);
    }

    pub fn remove(&mut self, start: u32, end: u32) {
        self.replace(start, end, String::new());
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit to `source`.
    ///
    /// Edits are ordered by start offset; at the same offset insertions come
    /// first, in the order they were recorded.
    pub fn apply(mut self, source: &str) -> RewriteResult<String> {
        self.edits.sort_by_key(|edit| (edit.start, edit.end));

        let extra: usize = self.edits.iter().map(|edit| edit.text.len()).sum();
        let mut result = String::with_capacity(source.len() + extra);
        let mut cursor = 0u32;
        for edit in self.edits {
            if edit.start < cursor {
                return Err(RewriteError::OverlappingEdit {
                    start: edit.start,
                    end: edit.end,
                    previous_end: cursor,
                });
            }
            let (start, end) = (edit.start as usize, edit.end as usize);
            let chunk = source
                .get(cursor as usize..start)
                .ok_or_else(|| RewriteError::malformed("edit outside source bounds", edit.start))?;
            result.push_str(chunk);
            result.push_str(&edit.text);
            if end > source.len() {
                return Err(RewriteError::malformed("edit outside source bounds", edit.end));
            }
            cursor = edit.end;
        }
        result.push_str(source.get(cursor as usize..).unwrap_or_default());
        Ok(result)
    }
}
