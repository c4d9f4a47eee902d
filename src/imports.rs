//! Import declarations → awaited runtime import bindings.
//!
//! import foo from 'foo'        foo -> __esm_import_0__.default
//! import { baz } from 'foo'    baz -> __esm_import_0__.baz
//! import * as ok from 'foo'    ok  -> __esm_import_0__

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName};

use crate::bindings::{AccessPath, ImportRecord};
use crate::context::RewriteContext;
use crate::error::RewriteResult;

pub fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

/// Replaces `decl` with its alias binding and records one binding-table entry
/// per specifier.
pub fn rewrite_import(
    decl: &ImportDeclaration<'_>,
    ctx: &mut RewriteContext<'_>,
) -> RewriteResult<ImportRecord> {
    let alias = ctx.bindings.next_alias();
    let source = decl.source.value.to_string();

    let mut bindings = Vec::new();
    if let Some(specifiers) = &decl.specifiers {
        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => bindings.push((
                    s.local.name.to_string(),
                    AccessPath::Named(module_export_name(&s.imported)),
                )),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    bindings.push((s.local.name.to_string(), AccessPath::Default))
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    bindings.push((s.local.name.to_string(), AccessPath::Namespace))
                }
            }
        }
    }

    let record = ImportRecord {
        alias,
        source,
        bindings,
    };
    ctx.bindings.add_record(&record)?;
    ctx.add_dependency(&record.source);
    let statement = ctx.import_statement(&record.alias, &record.source);
    ctx.edits.replace(decl.span.start, decl.span.end, statement);

    tracing::trace!(
        target: "esm_rewrite::imports",
        alias = %record.alias,
        source = %record.source,
        bindings = record.bindings.len()
    );
    Ok(record)
}
