//! Field name to external key conversion.

/// Convert a field name to lower-camel form: `max_conns` → `maxConns`.
///
/// Words are split on `_`, `-` and spaces. The first word gets a lower-cased
/// first letter, later words an upper-cased one; all other letters keep their
/// case, so existing word boundaries (`bindAddr`) survive and the transform is
/// idempotent.
pub fn to_camel_lower(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut key = String::with_capacity(name.len());

    let words = name
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty());

    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                key.extend(first.to_lowercase());
            } else {
                key.extend(first.to_uppercase());
            }
            key.push_str(chars.as_str());
        }
    }

    key
}
