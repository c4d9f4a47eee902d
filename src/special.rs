//! The three rewrites that are not plain identifier substitution:
//! `import(...)`, `import.meta`, and classes extending an imported binding.

use oxc_ast::ast::{Expression, ImportExpression, MetaProperty};

use crate::context::RewriteContext;
use crate::error::{RewriteError, RewriteResult};

const IMPORT_KEYWORD: &str = "import";

/// `import(x)` → `<dynamicImportKey>(x)`. Only the keyword is replaced, so
/// the argument list keeps whatever the reference pass does to it.
pub fn rewrite_dynamic_import(
    expr: &ImportExpression<'_>,
    ctx: &mut RewriteContext<'_>,
) -> RewriteResult<()> {
    let start = expr.span.start;
    let end = start + IMPORT_KEYWORD.len() as u32;
    if ctx.slice(start, end) != IMPORT_KEYWORD {
        return Err(RewriteError::malformed(
            "import expression does not start with `import`",
            start,
        ));
    }
    let key = ctx.options.dynamic_import_key.clone();
    ctx.edits.replace(start, end, key);

    if let Expression::StringLiteral(lit) = &expr.source {
        ctx.add_dynamic_dependency(&lit.value);
    }
    Ok(())
}

pub fn is_import_meta(meta: &MetaProperty<'_>) -> bool {
    meta.meta.name == "import" && meta.property.name == "meta"
}

pub fn rewrite_import_meta(meta: &MetaProperty<'_>, ctx: &mut RewriteContext<'_>) {
    let key = ctx.options.import_meta_key.clone();
    ctx.edits.replace(meta.span.start, meta.span.end, key);
}

/// `const Base = <path>;` placed ahead of `class X extends Base`.
pub fn hoisted_superclass(name: &str, path: &str) -> String {
    format!("const {} = {};\n", name, path)
}
