use super::blank_runs::{clear_blank_lines, collapse_blank_runs};
use super::common::{
    CommentKind, CommentSpan, Quote, Start, remove_spans, scan_comments, step_literal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDialectOptions {
    pub marker: char,
    pub max_blank_lines: usize,
    /// Write whitespace-only lines back as empty lines.
    pub clear_blank_lines: bool,
}

impl Default for LineDialectOptions {
    fn default() -> Self {
        LineDialectOptions {
            marker: '#',
            max_blank_lines: 1,
            clear_blank_lines: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Normal,
    InString { escaped: bool },
    InComment,
}
impl Start for ScanState {
    fn start() -> Self {
        ScanState::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseAction {
    Nothing,
    Content { width: usize },
    LineBreak,
    CommentStart,
    CommentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracker {
    // Byte offset just past the last non-whitespace character on the line.
    Code { content_end: usize },
    InComment { from: usize },
}
impl Start for Tracker {
    fn start() -> Self {
        Tracker::Code { content_end: 0 }
    }
}

pub(crate) fn transition(
    marker: char,
    from: ScanState,
    current_char: Option<char>,
) -> (ScanState, ParseAction) {
    let Some(c) = current_char else {
        return match from {
            ScanState::InComment => (ScanState::InComment, ParseAction::CommentEnd),
            _ => (from, ParseAction::Nothing),
        };
    };
    let content = ParseAction::Content {
        width: c.len_utf8(),
    };
    match from {
        ScanState::Normal => match c {
            '\n' => (ScanState::Normal, ParseAction::LineBreak),
            '"' => (ScanState::InString { escaped: false }, content),
            _ if c == marker => (ScanState::InComment, ParseAction::CommentStart),
            _ if c.is_whitespace() => (ScanState::Normal, ParseAction::Nothing),
            _ => (ScanState::Normal, content),
        },
        // Strings never span lines; a dangling quote is forgotten at the newline.
        ScanState::InString { escaped } => match c {
            '\n' => (ScanState::Normal, ParseAction::LineBreak),
            _ => match step_literal(Quote::Double, escaped, c) {
                Some(escaped) if c.is_whitespace() => {
                    (ScanState::InString { escaped }, ParseAction::Nothing)
                }
                Some(escaped) => (ScanState::InString { escaped }, content),
                None => (ScanState::Normal, content),
            },
        },
        ScanState::InComment => match c {
            '\n' => (ScanState::Normal, ParseAction::CommentEnd),
            _ => (ScanState::InComment, ParseAction::Nothing),
        },
    }
}

pub(crate) fn do_action(
    action: ParseAction,
    tracker: Tracker,
    position: usize,
    spans: &mut Vec<CommentSpan>,
) -> Tracker {
    match (action, tracker) {
        (ParseAction::Content { width }, Tracker::Code { .. }) => Tracker::Code {
            content_end: position + width,
        },
        (ParseAction::LineBreak, _) => Tracker::Code {
            content_end: position + 1,
        },
        (ParseAction::CommentStart, Tracker::Code { content_end }) => Tracker::InComment {
            from: content_end,
        },
        (ParseAction::CommentEnd, Tracker::InComment { from }) => {
            spans.push(CommentSpan {
                from,
                to: position,
                kind: CommentKind::Line,
            });
            Tracker::Code {
                content_end: position + 1,
            }
        }
        _ => tracker,
    }
}

/// Each span also covers the whitespace run that precedes the marker, so a
/// comment-only line collapses to its bare terminator.
pub fn find_comments(input: &str, marker: char) -> Vec<CommentSpan> {
    scan_comments(
        input,
        |s: ScanState, c: Option<char>| transition(marker, s, c),
        do_action,
    )
}

/// Byte offset where the leading run of comment and blank lines ends.
pub fn header_end(input: &str, marker: char) -> usize {
    let mut end = 0;
    for line in input.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(marker) {
            end += line.len();
        } else {
            break;
        }
    }
    end
}

pub fn strip(input: &str, options: &LineDialectOptions, preserve_header: bool) -> String {
    let split = if preserve_header {
        header_end(input, options.marker)
    } else {
        0
    };
    let (header, body) = input.split_at(split);
    let spans = find_comments(body, options.marker);

    let mut out = String::with_capacity(input.len());
    out.push_str(header);
    out.push_str(&remove_spans(body, &spans));
    if options.clear_blank_lines {
        out = clear_blank_lines(&out);
    }
    collapse_blank_runs(&out, options.max_blank_lines)
}
