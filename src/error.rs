use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_PARSE: &str = "ESM-ERR-PARSE-001";
pub const ERR_SOURCE_TYPE: &str = "ESM-ERR-SOURCE-002";
pub const ERR_MALFORMED_TREE: &str = "ESM-ERR-TREE-003";
pub const ERR_OVERLAPPING_EDIT: &str = "ESM-ERR-EDIT-004";
pub const ERR_FROZEN_BINDINGS: &str = "ESM-ERR-BINDING-005";
pub const ERR_OPTIONS: &str = "ESM-ERR-OPTIONS-006";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_PARSE => "Only syntactically valid modules are rewritten.",
        ERR_SOURCE_TYPE => "Input is plain JavaScript (optionally JSX); types are never stripped.",
        ERR_MALFORMED_TREE => "Every import/export node has the shape its kind requires.",
        ERR_OVERLAPPING_EDIT => "Text edits never overlap; each source byte is rewritten at most once.",
        ERR_FROZEN_BINDINGS => "The binding table is complete before any reference is rewritten.",
        ERR_OPTIONS => "Options are a JSON object with string-valued keys.",
        _ => "Unknown invariant.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REWRITE ERROR
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything that can stop a module from being rewritten.
///
/// Unresolvable specifiers, missing exports and circular imports are not
/// here: they surface at module-evaluation time inside the runtime loader.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("failed to parse {file}: {}", .messages.join("; "))]
    Parse { file: String, messages: Vec<String> },

    #[error("unsupported source type for {file}: {reason}")]
    SourceType { file: String, reason: String },

    #[error("malformed syntax tree at offset {offset}: {message}")]
    MalformedTree { message: String, offset: u32 },

    #[error("edit [{start}, {end}) overlaps an earlier edit ending at {previous_end}")]
    OverlappingEdit { start: u32, end: u32, previous_end: u32 },

    #[error("cannot add binding \"{0}\" after the binding table is frozen")]
    FrozenBindings(String),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

impl RewriteError {
    pub fn code(&self) -> &'static str {
        match self {
            RewriteError::Parse { .. } => ERR_PARSE,
            RewriteError::SourceType { .. } => ERR_SOURCE_TYPE,
            RewriteError::MalformedTree { .. } => ERR_MALFORMED_TREE,
            RewriteError::OverlappingEdit { .. } => ERR_OVERLAPPING_EDIT,
            RewriteError::FrozenBindings(_) => ERR_FROZEN_BINDINGS,
            RewriteError::Options(_) => ERR_OPTIONS,
        }
    }

    /// The invariant the failed check protects, for user-facing reports.
    pub fn guarantee(&self) -> &'static str {
        get_guarantee(self.code())
    }

    pub fn malformed(message: impl Into<String>, offset: u32) -> Self {
        RewriteError::MalformedTree {
            message: message.into(),
            offset,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
