//! Parse Module for the ESM rewriter
//!
//! Turns module source text into an oxc `Program`. Early errors reported by
//! `oxc_semantic` (redeclarations, duplicate exports, ...) are treated the
//! same as parse errors: the module is not rewritten.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use std::path::Path;

use crate::error::{RewriteError, RewriteResult};

/// Module source type for `filename`. Extension-less names are ES modules;
/// TypeScript is refused because the rewriter does not strip types.
pub fn source_type_for(filename: &str) -> RewriteResult<SourceType> {
    if Path::new(filename).extension().is_none() {
        return Ok(SourceType::mjs());
    }
    let source_type = SourceType::from_path(filename).map_err(|_| RewriteError::SourceType {
        file: filename.to_string(),
        reason: "unknown file extension".to_string(),
    })?;
    if source_type.is_typescript() {
        return Err(RewriteError::SourceType {
            file: filename.to_string(),
            reason: "TypeScript sources must be stripped of types first".to_string(),
        });
    }
    Ok(source_type.with_module(true))
}

pub fn parse_module<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    filename: &str,
) -> RewriteResult<Program<'a>> {
    let source_type = source_type_for(filename)?;
    let ret = Parser::new(allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let mut messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        if messages.is_empty() {
            messages.push("parser aborted".to_string());
        }
        return Err(RewriteError::Parse {
            file: filename.to_string(),
            messages,
        });
    }

    let program = ret.program;
    let messages: Vec<String> = {
        let semantic = SemanticBuilder::new()
            .with_check_syntax_error(true)
            .build(&program);
        semantic.errors.iter().map(|e| e.to_string()).collect()
    };
    if !messages.is_empty() {
        return Err(RewriteError::Parse {
            file: filename.to_string(),
            messages,
        });
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_module_parses() {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, "import a from 'a'; export { a };", "a.mjs").unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_extensionless_name_is_module() {
        let allocator = Allocator::default();
        assert!(parse_module(&allocator, "export default 1", "virtual-entry").is_ok());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let allocator = Allocator::default();
        let err = parse_module(&allocator, "import { from 'a'", "a.js").unwrap_err();
        assert_eq!(err.code(), "ESM-ERR-PARSE-001");
    }

    #[test]
    fn test_redeclared_import_is_early_error() {
        let allocator = Allocator::default();
        let err = parse_module(&allocator, "import a from 'a'; let a = 1;", "a.js").unwrap_err();
        assert_eq!(err.code(), "ESM-ERR-PARSE-001");
    }

    #[test]
    fn test_typescript_is_refused() {
        let err = source_type_for("component.ts").unwrap_err();
        assert_eq!(err.code(), "ESM-ERR-SOURCE-002");
    }

    #[test]
    fn test_jsx_extension_enables_jsx() {
        let allocator = Allocator::default();
        assert!(parse_module(&allocator, "export const el = <div />;", "view.jsx").is_ok());
    }
}
