use serde::{Deserialize, Serialize};

use crate::error::RewriteResult;

/// Names substituted verbatim into the generated runtime calls.
///
/// Every field is optional on the wire; missing keys fall back to the
/// `__esm_*` defaults. The older `key*` spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteOptions {
    /// The module's exports object.
    #[serde(alias = "keyModuleExport")]
    pub exports_key: String,
    #[serde(alias = "keyImport")]
    pub import_key: String,
    #[serde(alias = "keyDynamicImport")]
    pub dynamic_import_key: String,
    #[serde(alias = "keyExportAll")]
    pub export_all_key: String,
    #[serde(alias = "keyImportMeta")]
    pub import_meta_key: String,
    /// Synthesized aliases are `<prefix><n>__`.
    #[serde(alias = "keyImportBindingPrefix")]
    pub import_alias_prefix: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            exports_key: "__esm_exports__".to_string(),
            import_key: "__esm_import__".to_string(),
            dynamic_import_key: "__esm_dynamic_import__".to_string(),
            export_all_key: "__esm_export_all__".to_string(),
            import_meta_key: "__esm_import_meta__".to_string(),
            import_alias_prefix: "__esm_import_".to_string(),
        }
    }
}

impl RewriteOptions {
    pub fn from_json(json: &str) -> RewriteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `None` and blank strings both mean "all defaults".
    pub fn from_optional_json(json: Option<&str>) -> RewriteResult<Self> {
        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }
}
