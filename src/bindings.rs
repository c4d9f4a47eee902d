use oxc_syntax::identifier::is_identifier_name;
use std::collections::HashMap;

use crate::error::{RewriteError, RewriteResult};
use crate::options::RewriteOptions;

// ═══════════════════════════════════════════════════════════════════════════════
// ACCESS PATHS
// ═══════════════════════════════════════════════════════════════════════════════

/// `object.property`, or `object["property"]` when the property is not a
/// plain identifier (string-named imports and exports).
pub fn member_access(object: &str, property: &str) -> String {
    if is_identifier_name(property) {
        format!("{}.{}", object, property)
    } else {
        format!("{}[{}]", object, string_literal(property))
    }
}

/// A double-quoted JavaScript string literal.
pub fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Where an imported local name points on its module's namespace object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    Default,
    Named(String),
    Namespace,
}

impl AccessPath {
    pub fn render(&self, alias: &str) -> String {
        match self {
            AccessPath::Default => format!("{}.default", alias),
            AccessPath::Named(name) => member_access(alias, name),
            AccessPath::Namespace => alias.to_string(),
        }
    }
}

/// What one import declaration turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub alias: String,
    pub source: String,
    pub bindings: Vec<(String, AccessPath)>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-module map from imported local names to their qualified paths.
#[derive(Debug, Clone)]
pub struct BindingTable {
    alias_prefix: String,
    alias_counter: u32,
    bindings: HashMap<String, String>,
    frozen: bool,
}

impl BindingTable {
    pub fn new(options: &RewriteOptions) -> Self {
        BindingTable {
            alias_prefix: options.import_alias_prefix.clone(),
            alias_counter: 0,
            bindings: HashMap::new(),
            frozen: false,
        }
    }

    /// Hands out the next `<prefix><n>__` alias.
    pub fn next_alias(&mut self) -> String {
        let alias = format!("{}{}__", self.alias_prefix, self.alias_counter);
        self.alias_counter += 1;
        alias
    }

    /// Records `name -> path`. Names carrying the alias prefix are the engine's
    /// own temporaries and are silently not tracked.
    pub fn add(&mut self, name: &str, path: String) -> RewriteResult<()> {
        if self.frozen {
            return Err(RewriteError::FrozenBindings(name.to_string()));
        }
        if name.starts_with(&self.alias_prefix) {
            return Ok(());
        }
        self.bindings.insert(name.to_string(), path);
        Ok(())
    }

    pub fn add_record(&mut self, record: &ImportRecord) -> RewriteResult<()> {
        for (local, path) in &record.bindings {
            self.add(local, path.render(&record.alias))?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
