//! SQL text helpers shared by the monitor.

/// Skip leading whitespace, `--` and `/* */` comments, and opening
/// parentheses, returning the text from the statement's first word on.
pub(crate) fn strip_sql_prefix(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        let after = if let Some(comment) = rest.strip_prefix("--") {
            comment.split_once('\n').map_or("", |(_, tail)| tail)
        } else if let Some(comment) = rest.strip_prefix("/*") {
            comment.split_once("*/").map_or("", |(_, tail)| tail)
        } else if let Some(tail) = rest.strip_prefix('(') {
            tail
        } else {
            return rest;
        };
        rest = after.trim_start();
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// The word `s` starts with: the longest prefix of ASCII letters, digits
/// and `_`. Empty when `s` starts with anything else.
pub(crate) fn leading_word(s: &str) -> &str {
    let end = s.bytes().position(|b| !is_word_byte(b)).unwrap_or(s.len());
    &s[..end]
}

/// Words that sit outside every parenthesis, string literal and quoted
/// identifier, in order of appearance.
pub(crate) fn top_level_words(sql: &str) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            quote @ (b'\'' | b'"' | b'`') => {
                // A doubled quote stays inside the literal.
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == quote {
                        if bytes.get(i + 1) == Some(&quote) {
                            i += 1;
                        } else {
                            break;
                        }
                    }
                    i += 1;
                }
            }
            b if is_word_byte(b) => {
                let word = leading_word(&sql[i..]);
                if depth == 0 {
                    words.push(word);
                }
                i += word.len();
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    words
}

/// Longest prefix of at most `max_bytes` that ends on a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn clip_to_bytes(sql: &str, max_bytes: usize) -> &str {
    let end = (0..=max_bytes.min(sql.len()))
        .rev()
        .find(|&end| sql.is_char_boundary(end))
        .unwrap_or(0);
    &sql[..end]
}
