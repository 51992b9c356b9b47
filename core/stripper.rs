pub mod blank_runs;
pub mod c_family;
pub mod common;
pub mod line_dialect;

pub use blank_runs::collapse_blank_runs;
pub use c_family::CFamilyOptions;
pub use common::{CommentKind, CommentSpan, RetainedKeywords, remove_spans};
pub use line_dialect::LineDialectOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Single-character marker comments to end of line (`#`).
    Line,
    /// `//` line comments and `/* */` block comments.
    CFamily,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOptions {
    pub line: LineDialectOptions,
    pub c_family: CFamilyOptions,
}

/// Strips one document. `preserve_header` only affects the line dialect.
pub fn strip_document(
    content: &str,
    dialect: Dialect,
    preserve_header: bool,
    options: &StripOptions,
) -> String {
    match dialect {
        Dialect::Line => line_dialect::strip(content, &options.line, preserve_header),
        Dialect::CFamily => c_family::strip(content, &options.c_family),
    }
}
