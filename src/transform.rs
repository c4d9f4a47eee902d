//! Module rewrite driver.
//!
//! One call, one module: parse, bind scopes, rewrite import and export
//! declarations (which fills the binding table), freeze the table, rewrite
//! every remaining reference, then apply the collected edits.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::{Program, Statement};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::RewriteContext;
use crate::error::RewriteResult;
use crate::exports::{rewrite_export_all, rewrite_export_default, rewrite_export_named};
use crate::imports::rewrite_import;
use crate::options::RewriteOptions;
use crate::parse::parse_module;
use crate::renamer::ReferenceRewriter;
use crate::scope::ScopeTree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "napi", napi(object))]
pub struct TransformOutput {
    pub code: String,
    /// Static import and re-export sources, first occurrence wins.
    pub dependencies: Vec<String>,
    /// String-literal `import()` targets.
    pub dynamic_dependencies: Vec<String>,
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSource {
    pub filename: String,
    pub code: String,
}

/// Per-module outcome of a batch run; exactly one side is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<TransformOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
}

/// Imports first, then exports, each in source order. Alias numbering
/// follows the same order.
fn rewrite_declarations(program: &Program<'_>, ctx: &mut RewriteContext<'_>) -> RewriteResult<()> {
    for stmt in &program.body {
        if let Statement::ImportDeclaration(decl) = stmt {
            rewrite_import(decl, ctx)?;
        }
    }
    for stmt in &program.body {
        match stmt {
            Statement::ExportNamedDeclaration(decl) => rewrite_export_named(decl, ctx)?,
            Statement::ExportDefaultDeclaration(decl) => rewrite_export_default(decl, ctx)?,
            Statement::ExportAllDeclaration(decl) => rewrite_export_all(decl, ctx)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn transform_module(
    code: &str,
    filename: &str,
    options: &RewriteOptions,
) -> RewriteResult<TransformOutput> {
    let span = tracing::debug_span!("transform_module", filename = %filename);
    let _enter = span.enter();

    let allocator = Allocator::default();
    let program = parse_module(&allocator, code, filename)?;
    let scopes = ScopeTree::build(&program);

    let mut ctx = RewriteContext::new(code, options);
    rewrite_declarations(&program, &mut ctx)?;
    ctx.bindings.freeze();

    let rewritten = ReferenceRewriter::new(&mut ctx, &scopes).run(&program)?;
    tracing::debug!(
        target: "esm_rewrite",
        bindings = ctx.bindings.len(),
        scopes = scopes.len(),
        references = rewritten,
        edits = ctx.edits.len(),
        "module rewritten"
    );

    let dependencies = std::mem::take(&mut ctx.dependencies);
    let dynamic_dependencies = std::mem::take(&mut ctx.dynamic_dependencies);
    let exports = std::mem::take(&mut ctx.exports);
    let code = ctx.finish()?;

    Ok(TransformOutput {
        code,
        dependencies,
        dynamic_dependencies,
        exports,
    })
}

/// Rewrites independent modules in parallel. Results keep input order and
/// one failing module does not affect the others.
pub fn transform_modules(
    modules: &[ModuleSource],
    options: &RewriteOptions,
) -> Vec<RewriteResult<TransformOutput>> {
    modules
        .par_iter()
        .map(|module| transform_module(&module.code, &module.filename, options))
        .collect()
}

pub fn transform_batch(modules: &[ModuleSource], options: &RewriteOptions) -> Vec<BatchEntry> {
    let results = transform_modules(modules, options);
    modules
        .iter()
        .zip(results)
        .map(|(module, result)| match result {
            Ok(output) => BatchEntry {
                filename: module.filename.clone(),
                output: Some(output),
                error: None,
            },
            Err(err) => {
                tracing::warn!(
                    target: "esm_rewrite",
                    filename = %module.filename,
                    code = err.code(),
                    "module rewrite failed: {}",
                    err
                );
                BatchEntry {
                    filename: module.filename.clone(),
                    output: None,
                    error: Some(BatchError {
                        code: err.code().to_string(),
                        message: err.to_string(),
                        guarantee: err.guarantee().to_string(),
                    }),
                }
            }
        })
        .collect()
}

#[cfg(feature = "napi")]
fn to_napi_error(err: crate::error::RewriteError) -> napi::Error {
    napi::Error::from_reason(format!("[{}] {}", err.code(), err))
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_esm_native(
    code: String,
    filename: String,
    options_json: Option<String>,
) -> napi::Result<TransformOutput> {
    let options = RewriteOptions::from_optional_json(options_json.as_deref()).map_err(to_napi_error)?;
    transform_module(&code, &filename, &options).map_err(to_napi_error)
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_esm_batch_native(
    modules_json: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let modules: Vec<ModuleSource> = serde_json::from_str(&modules_json)
        .map_err(|e| napi::Error::from_reason(format!("Modules parse error: {}", e)))?;
    let options = RewriteOptions::from_optional_json(options_json.as_deref()).map_err(to_napi_error)?;
    let entries = transform_batch(&modules, &options);
    serde_json::to_string(&entries)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}
