//! Separator-aware splitting for sequence values.

/// Split `s` on `sep`, ignoring separators that sit inside `()`, `[]` or `{}`
/// groups, inside `'`, `"` or `` ` `` quotes, or right after a backslash.
///
/// Escapes and quotes are kept verbatim in the output. Parts are trimmed and
/// empty parts dropped, so `"a;b;"` splits into `["a", "b"]`.
pub fn split_x(s: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return keep_non_empty([s]);
    }

    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut skip_until = 0;

    for (i, c) in s.char_indices() {
        if i < skip_until {
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }

        match (quote, c) {
            (_, '\\') => {
                escaped = true;
                continue;
            }
            (Some(q), c) if q == c => {
                quote = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, '\'' | '"' | '`') => {
                quote = Some(c);
                continue;
            }
            (None, '(' | '[' | '{') => {
                depth += 1;
                continue;
            }
            (None, ')' | ']' | '}') => {
                depth = depth.saturating_sub(1);
                continue;
            }
            _ => {}
        }

        if depth == 0 && s[i..].starts_with(sep) {
            parts.push(&s[start..i]);
            start = i + sep.len();
            skip_until = start;
        }
    }
    parts.push(&s[start..]);

    keep_non_empty(parts)
}

fn keep_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
