//! Export declarations → property registrations on the exports object.
//!
//! Every exported name becomes a live getter:
//!
//! ```text
//! Object.defineProperty(__esm_exports__, "name", { enumerable: true, configurable: true, get(){ return value }});
//! ```

use oxc_ast::ast::{
    Declaration, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, ModuleExportName,
};
use oxc_span::GetSpan;

use crate::bindings::{member_access, string_literal};
use crate::context::RewriteContext;
use crate::error::{RewriteError, RewriteResult};
use crate::imports::module_export_name;
use crate::scope::pattern_names;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub exported: String,
    pub value: String,
}

impl Registration {
    pub fn new(exported: impl Into<String>, value: impl Into<String>) -> Self {
        Registration {
            exported: exported.into(),
            value: value.into(),
        }
    }

    pub fn render(&self, exports_key: &str) -> String {
        format!(
            "Object.defineProperty({}, {}, {{ enumerable: true, configurable: true, get(){{ return {} }}}});",
            exports_key,
            string_literal(&self.exported),
            self.value
        )
    }
}

/// Names bound by an exported declaration, in source order.
pub fn declared_names(declaration: &Declaration<'_>) -> Vec<String> {
    match declaration {
        Declaration::VariableDeclaration(var) => var
            .declarations
            .iter()
            .flat_map(|declarator| pattern_names(&declarator.id))
            .collect(),
        Declaration::FunctionDeclaration(func) => {
            func.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::ClassDeclaration(class) => {
            class.id.iter().map(|id| id.name.to_string()).collect()
        }
        _ => Vec::new(),
    }
}

fn render_all(ctx: &mut RewriteContext<'_>, registrations: &[Registration]) -> Vec<String> {
    let key = ctx.options.exports_key.clone();
    registrations
        .iter()
        .map(|registration| {
            ctx.exports.push(registration.exported.clone());
            registration.render(&key)
        })
        .collect()
}

/// Drops the `export` (or `export default`) keyword in front of a declaration.
fn strip_export_keyword(
    ctx: &mut RewriteContext<'_>,
    export_start: u32,
    inner_start: u32,
) -> RewriteResult<()> {
    if inner_start < export_start {
        return Err(RewriteError::malformed(
            "exported declaration starts before its export keyword",
            inner_start,
        ));
    }
    ctx.edits.remove(export_start, inner_start);
    Ok(())
}

pub fn rewrite_export_named(
    decl: &ExportNamedDeclaration<'_>,
    ctx: &mut RewriteContext<'_>,
) -> RewriteResult<()> {
    if let Some(declaration) = &decl.declaration {
        let registrations: Vec<Registration> = declared_names(declaration)
            .into_iter()
            .map(|name| Registration::new(name.clone(), name))
            .collect();
        strip_export_keyword(ctx, decl.span.start, declaration.span().start)?;

        let mut text = String::new();
        if matches!(declaration, Declaration::VariableDeclaration(_))
            && !ctx.ends_with_semicolon(decl.span.end)
        {
            text.push(';');
        }
        for line in render_all(ctx, &registrations) {
            text.push('\n');
            text.push_str(&line);
        }
        ctx.edits.insert(decl.span.end, text);
        return Ok(());
    }

    let mut lines = Vec::new();
    let registrations = match &decl.source {
        Some(source) => {
            let alias = ctx.bindings.next_alias();
            let source = source.value.to_string();
            ctx.add_dependency(&source);
            lines.push(ctx.import_statement(&alias, &source));
            decl.specifiers
                .iter()
                .map(|spec| {
                    Registration::new(
                        module_export_name(&spec.exported),
                        member_access(&alias, &module_export_name(&spec.local)),
                    )
                })
                .collect::<Vec<_>>()
        }
        None => {
            let mut registrations = Vec::with_capacity(decl.specifiers.len());
            for spec in &decl.specifiers {
                if let ModuleExportName::StringLiteral(lit) = &spec.local {
                    return Err(RewriteError::malformed(
                        "string-named local in an export without a source",
                        lit.span.start,
                    ));
                }
                let local = module_export_name(&spec.local);
                let value = ctx
                    .bindings
                    .get(&local)
                    .map(str::to_string)
                    .unwrap_or(local);
                registrations.push(Registration::new(module_export_name(&spec.exported), value));
            }
            registrations
        }
    };
    lines.extend(render_all(ctx, &registrations));
    ctx.edits
        .replace(decl.span.start, decl.span.end, lines.join("\n"));
    Ok(())
}

pub fn rewrite_export_all(
    decl: &ExportAllDeclaration<'_>,
    ctx: &mut RewriteContext<'_>,
) -> RewriteResult<()> {
    let alias = ctx.bindings.next_alias();
    let source = decl.source.value.to_string();
    ctx.add_dependency(&source);

    let mut text = ctx.import_statement(&alias, &source);
    text.push('\n');
    match &decl.exported {
        Some(name) => {
            let registration = Registration::new(module_export_name(name), alias);
            text.push_str(&render_all(ctx, &[registration]).join("\n"));
        }
        None => {
            text.push_str(&format!("{}({});", ctx.options.export_all_key, alias));
        }
    }
    ctx.edits.replace(decl.span.start, decl.span.end, text);
    Ok(())
}

pub fn rewrite_export_default(
    decl: &ExportDefaultDeclaration<'_>,
    ctx: &mut RewriteContext<'_>,
) -> RewriteResult<()> {
    let named = match &decl.declaration {
        ExportDefaultDeclarationKind::FunctionDeclaration(func) => func
            .id
            .as_ref()
            .map(|id| (id.name.to_string(), func.span.start)),
        ExportDefaultDeclarationKind::ClassDeclaration(class) => class
            .id
            .as_ref()
            .map(|id| (id.name.to_string(), class.span.start)),
        _ => None,
    };

    match named {
        Some((name, inner_start)) => {
            strip_export_keyword(ctx, decl.span.start, inner_start)?;
            let line = render_all(ctx, &[Registration::new("default", name)]).join("\n");
            ctx.edits.insert(decl.span.end, format!("\n{}", line));
        }
        None => {
            let inner_start = decl.declaration.span().start;
            if inner_start < decl.span.start {
                return Err(RewriteError::malformed(
                    "default export value starts before its export keyword",
                    inner_start,
                ));
            }
            let prefix = format!("{} = ", member_access(&ctx.options.exports_key, "default"));
            ctx.edits.replace(decl.span.start, inner_start, prefix);
            if !ctx.ends_with_semicolon(decl.span.end) {
                ctx.edits.insert(decl.span.end, ";");
            }
            ctx.exports.push("default".to_string());
        }
    }
    Ok(())
}
