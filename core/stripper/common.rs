#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Half-open byte range `[from, to)` covering one comment, delimiters included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
    pub from: usize,
    pub to: usize,
    pub kind: CommentKind,
}

impl CommentSpan {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.from..self.to]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn delimiter(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

/// Inside a literal: feed one character, get back `None` once the literal closes.
/// `escaped` is true only for the character right after an unconsumed backslash.
pub fn step_literal(quote: Quote, escaped: bool, c: char) -> Option<bool> {
    if escaped {
        Some(false)
    } else if c == '\\' {
        Some(true)
    } else if c == quote.delimiter() {
        None
    } else {
        Some(false)
    }
}

pub trait Start: Sized {
    fn start() -> Self;
}

/// Drives a scanner over `input` one character at a time.
///
/// `transition` maps the parse state and the next character to a new state and
/// an action; `act` folds that action into the tracker, pushing finished spans.
/// The end of input is delivered once as `None` at position `input.len()`.
pub fn scan_comments<ParseState, ParseAction, Tracker, TransitionFn, ActFn>(
    input: &str,
    transition: TransitionFn,
    act: ActFn,
) -> Vec<CommentSpan>
where
    ParseState: Start + Copy,
    ParseAction: Copy,
    Tracker: Start + Copy,
    TransitionFn: Fn(ParseState, Option<char>) -> (ParseState, ParseAction),
    ActFn: Fn(ParseAction, Tracker, usize, &mut Vec<CommentSpan>) -> Tracker,
{
    let mut spans = Vec::new();
    let mut parse_state = ParseState::start();
    let mut tracker = Tracker::start();
    let mut char_indices = input.char_indices();

    loop {
        let char_info = char_indices.next();
        let current_char = char_info.map(|(_, c)| c);
        let position = char_info.map_or(input.len(), |(idx, _)| idx);

        let (next_parse_state, action) = transition(parse_state, current_char);
        tracker = act(action, tracker, position, &mut spans);
        parse_state = next_parse_state;

        if current_char.is_none() {
            break;
        }
    }
    exclude_carriage_returns(input, &mut spans);
    spans
}

// A span closed by `\n` must leave the `\r` of a CRLF pair in place.
fn exclude_carriage_returns(input: &str, spans: &mut [CommentSpan]) {
    let bytes = input.as_bytes();
    for span in spans.iter_mut() {
        if span.kind == CommentKind::Line
            && span.to > span.from
            && bytes.get(span.to) == Some(&b'\n')
            && bytes[span.to - 1] == b'\r'
        {
            span.to -= 1;
        }
    }
}

/// Returns `input` with every span removed. Spans must be sorted and disjoint,
/// which both scanners guarantee by construction.
pub fn remove_spans(input: &str, spans: &[CommentSpan]) -> String {
    if spans.is_empty() {
        return input.to_string();
    }
    debug_assert!(spans.windows(2).all(|w| w[0].to <= w[1].from));
    debug_assert!(spans.iter().all(|s| s.from <= s.to && s.to <= input.len()));

    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&input[cursor..span.from]);
        cursor = span.to;
    }
    out.push_str(&input[cursor..]);
    out
}

/// Marker tokens that keep a comment alive. Matching is a case-insensitive
/// substring test with no word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedKeywords {
    keywords: Vec<String>,
}

pub const DEFAULT_RETAINED_KEYWORDS: &[&str] = &["TODO", "FIXME", "NOTE", "HACK"];

impl RetainedKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for k in keywords {
            let k = k.as_ref().trim().to_uppercase();
            if !k.is_empty() && !out.contains(&k) {
                out.push(k);
            }
        }
        RetainedKeywords { keywords: out }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, comment: &str) -> bool {
        let upper = comment.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }
}

impl Default for RetainedKeywords {
    fn default() -> Self {
        RetainedKeywords::new(DEFAULT_RETAINED_KEYWORDS)
    }
}
