fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn is_blank(body: &str) -> bool {
    body.trim_end().is_empty()
}

/// Bounds every run of blank lines to at most `max_consecutive` lines.
///
/// A line is blank when nothing but whitespace precedes its terminator.
/// Lines within the bound are copied verbatim; only the excess is dropped.
pub fn collapse_blank_runs(text: &str, max_consecutive: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut consecutive_blank_lines = 0;

    for line in text.split_inclusive('\n') {
        let (body, _) = split_terminator(line);

        if is_blank(body) {
            consecutive_blank_lines += 1;
            if consecutive_blank_lines > max_consecutive {
                continue;
            }
        } else {
            consecutive_blank_lines = 0;
        }
        result.push_str(line);
    }

    result
}

/// Rewrites whitespace-only lines as their bare terminator. A whitespace-only
/// last line without a terminator is left alone.
pub fn clear_blank_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        if is_blank(body) && !terminator.is_empty() {
            result.push_str(terminator);
        } else {
            result.push_str(line);
        }
    }
    result
}
