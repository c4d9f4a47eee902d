use crate::bindings::{string_literal, BindingTable};
use crate::edits::EditList;
use crate::error::RewriteResult;
use crate::options::RewriteOptions;

/// Everything one module rewrite accumulates. Built per call and dropped
/// with it; nothing here is shared between modules.
#[derive(Debug)]
pub struct RewriteContext<'s> {
    pub source: &'s str,
    pub options: &'s RewriteOptions,
    pub bindings: BindingTable,
    pub edits: EditList,
    pub dependencies: Vec<String>,
    pub dynamic_dependencies: Vec<String>,
    pub exports: Vec<String>,
}

impl<'s> RewriteContext<'s> {
    pub fn new(source: &'s str, options: &'s RewriteOptions) -> Self {
        RewriteContext {
            source,
            options,
            bindings: BindingTable::new(options),
            edits: EditList::new(),
            dependencies: Vec::new(),
            dynamic_dependencies: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn add_dependency(&mut self, specifier: &str) {
        if !self.dependencies.iter().any(|d| d == specifier) {
            self.dependencies.push(specifier.to_string());
        }
    }

    pub fn add_dynamic_dependency(&mut self, specifier: &str) {
        if !self.dynamic_dependencies.iter().any(|d| d == specifier) {
            self.dynamic_dependencies.push(specifier.to_string());
        }
    }

    /// `const <alias> = await <importKey>("<source>");`
    pub fn import_statement(&self, alias: &str, source: &str) -> String {
        format!(
            "const {} = await {}({});",
            alias,
            self.options.import_key,
            string_literal(source)
        )
    }

    /// Whether the source text right before `end` is a `;`.
    pub fn ends_with_semicolon(&self, end: u32) -> bool {
        self.source
            .get(..end as usize)
            .is_some_and(|text| text.ends_with(';'))
    }

    pub fn slice(&self, start: u32, end: u32) -> &'s str {
        self.source
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    pub fn finish(self) -> RewriteResult<String> {
        self.edits.apply(self.source)
    }
}
