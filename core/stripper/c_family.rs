use super::blank_runs::collapse_blank_runs;
use super::common::{
    CommentKind, CommentSpan, Quote, RetainedKeywords, Start, remove_spans, scan_comments,
    step_literal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CFamilyOptions {
    pub keywords: RetainedKeywords,
    pub max_blank_lines: usize,
}

impl Default for CFamilyOptions {
    fn default() -> Self {
        CFamilyOptions {
            keywords: RetainedKeywords::default(),
            max_blank_lines: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Normal,
    Slash,
    InString { escaped: bool },
    InChar { escaped: bool },
    InLineComment,
    InBlockComment { saw_star: bool },
}
impl Start for ScanState {
    fn start() -> Self {
        ScanState::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseAction {
    Nothing,
    SlashSeen,
    DismissSlash,
    LineStart,
    BlockStart,
    LineEnd,
    BlockEnd { closed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracker {
    Idle,
    Slash { at: usize },
    InLine { from: usize },
    InBlock { from: usize },
}
impl Start for Tracker {
    fn start() -> Self {
        Tracker::Idle
    }
}

fn literal(quote: Quote, escaped: bool) -> ScanState {
    match quote {
        Quote::Double => ScanState::InString { escaped },
        Quote::Single => ScanState::InChar { escaped },
    }
}

fn step(quote: Quote, escaped: bool, c: char) -> (ScanState, ParseAction) {
    match step_literal(quote, escaped, c) {
        Some(escaped) => (literal(quote, escaped), ParseAction::Nothing),
        None => (ScanState::Normal, ParseAction::Nothing),
    }
}

pub(crate) fn transition(from: ScanState, current_char: Option<char>) -> (ScanState, ParseAction) {
    match current_char {
        Some(c) => match from {
            ScanState::Normal => match c {
                '/' => (ScanState::Slash, ParseAction::SlashSeen),
                '"' => (literal(Quote::Double, false), ParseAction::Nothing),
                '\'' => (literal(Quote::Single, false), ParseAction::Nothing),
                _ => (ScanState::Normal, ParseAction::Nothing),
            },
            ScanState::Slash => match c {
                '/' => (ScanState::InLineComment, ParseAction::LineStart),
                '*' => (
                    ScanState::InBlockComment { saw_star: false },
                    ParseAction::BlockStart,
                ),
                '"' => (literal(Quote::Double, false), ParseAction::DismissSlash),
                '\'' => (literal(Quote::Single, false), ParseAction::DismissSlash),
                _ => (ScanState::Normal, ParseAction::DismissSlash),
            },
            ScanState::InString { escaped } => step(Quote::Double, escaped, c),
            ScanState::InChar { escaped } => step(Quote::Single, escaped, c),
            ScanState::InLineComment => match c {
                '\n' => (ScanState::Normal, ParseAction::LineEnd),
                _ => (ScanState::InLineComment, ParseAction::Nothing),
            },
            ScanState::InBlockComment { saw_star } => match c {
                '/' if saw_star => (ScanState::Normal, ParseAction::BlockEnd { closed: true }),
                '*' => (
                    ScanState::InBlockComment { saw_star: true },
                    ParseAction::Nothing,
                ),
                _ => (
                    ScanState::InBlockComment { saw_star: false },
                    ParseAction::Nothing,
                ),
            },
        },
        None => match from {
            ScanState::Slash => (ScanState::Normal, ParseAction::DismissSlash),
            ScanState::InLineComment => (ScanState::Normal, ParseAction::LineEnd),
            // Unterminated block comments run to the end of the document.
            ScanState::InBlockComment { .. } => {
                (ScanState::Normal, ParseAction::BlockEnd { closed: false })
            }
            _ => (from, ParseAction::Nothing),
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
        (ParseAction::Nothing, _) => tracker,
        (ParseAction::SlashSeen, Tracker::Idle) => Tracker::Slash { at: position },
        (ParseAction::LineStart, Tracker::Slash { at }) => Tracker::InLine { from: at },
        (ParseAction::BlockStart, Tracker::Slash { at }) => Tracker::InBlock { from: at },
        (ParseAction::LineEnd, Tracker::InLine { from }) => {
            spans.push(CommentSpan {
                from,
                to: position,
                kind: CommentKind::Line,
            });
            Tracker::Idle
        }
        (ParseAction::BlockEnd { closed }, Tracker::InBlock { from }) => {
            spans.push(CommentSpan {
                from,
                to: if closed { position + 1 } else { position },
                kind: CommentKind::Block,
            });
            Tracker::Idle
        }
        _ => Tracker::Idle,
    }
}

pub fn find_comments(input: &str) -> Vec<CommentSpan> {
    scan_comments(input, transition, do_action)
}

pub fn strip(input: &str, options: &CFamilyOptions) -> String {
    let dropped: Vec<CommentSpan> = find_comments(input)
        .into_iter()
        .filter(|span| !options.keywords.matches(span.text(input)))
        .collect();
    collapse_blank_runs(&remove_spans(input, &dropped), options.max_blank_lines)
}
