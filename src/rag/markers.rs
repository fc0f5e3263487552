//! `[n]` citation markers in answer text

/// Ordinals of every well-formed `[n]` marker, in order of appearance
pub fn citation_markers(text: &str) -> Vec<usize> {
    let mut markers = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('[') {
        rest = &rest[start..];
        match parse_marker(rest) {
            Some((ordinal, len)) => {
                if let Some(ordinal) = ordinal {
                    markers.push(ordinal);
                }
                rest = &rest[len..];
            }
            None => rest = &rest[1..],
        }
    }

    markers
}

/// Remove markers that do not point at one of `count` citations
///
/// Returns the cleaned text and the number of markers removed. A space left
/// dangling before whitespace, punctuation or the end of the text is removed as well.
pub fn strip_invalid_markers(text: &str, count: usize) -> (String, usize) {
    let (mut cleaned, mut removed) = strip_pass(text, count);

    // Removing `[9]` from `[[9]1]` leaves a new marker behind; repeat until stable
    let mut last_removed = removed;
    while last_removed > 0 {
        let (next, n) = strip_pass(&cleaned, count);
        cleaned = next;
        removed += n;
        last_removed = n;
    }

    (cleaned, removed)
}

fn strip_pass(text: &str, count: usize) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut removed = 0;
    let mut rest = text;

    while let Some(start) = rest.find('[') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        match parse_marker(rest) {
            Some((Some(ordinal), len)) if (1..=count).contains(&ordinal) => {
                output.push_str(&rest[..len]);
                rest = &rest[len..];
            }
            Some((_, len)) => {
                removed += 1;
                rest = &rest[len..];
                let dangling = rest
                    .chars()
                    .next()
                    .map_or(true, |c| {
                        c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | '[')
                    });
                if dangling && output.ends_with(' ') {
                    output.pop();
                }
            }
            None => {
                output.push('[');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);

    (output, removed)
}

/// Parse `[digits]` at the start of `text`
///
/// Returns the ordinal (`None` when it does not fit in a `usize`) and the
/// byte length of the marker, or `None` when `text` does not start with a marker.
fn parse_marker(text: &str) -> Option<(Option<usize>, usize)> {
    let body = text.strip_prefix('[')?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || body.as_bytes().get(digits) != Some(&b']') {
        return None;
    }
    Some((body[..digits].parse().ok(), digits + 2))
}
