//! Field tag parsing: `"usage text,shorthand=p"`.

use std::collections::BTreeMap;

/// A parsed field tag: usage text plus trailing `key=value` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub main: String,
    pub opts: BTreeMap<String, String>,
}

impl Tag {
    /// Parse a tag string.
    ///
    /// Comma-separated segments are peeled off the end while they look like
    /// `key=value` with an alphanumeric key; whatever remains is the usage
    /// text, commas included.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<&str> = raw.split(',').collect();
        let mut opts = BTreeMap::new();

        while segments.len() > 1 {
            let Some(last) = segments.last() else { break };
            let Some((key, value)) = parse_opt(last) else {
                break;
            };
            opts.entry(key.to_string())
                .or_insert_with(|| value.to_string());
            segments.pop();
        }

        // A tag made of nothing but an option has no usage text.
        if segments.len() == 1
            && let Some((key, value)) = parse_opt(segments[0])
        {
            opts.entry(key.to_string())
                .or_insert_with(|| value.to_string());
            segments.clear();
        }

        Tag {
            main: segments.join(",").trim().to_string(),
            opts,
        }
    }

    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.opts.get(key).map(String::as_str)
    }
}

fn parse_opt(segment: &str) -> Option<(&str, &str)> {
    let (key, value) = segment.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_only() {
        let tag = Tag::parse("server name");
        assert_eq!(tag.main, "server name");
        assert!(tag.opts.is_empty());
    }

    #[test]
    fn usage_with_shorthand() {
        let tag = Tag::parse("listen port,shorthand=p");
        assert_eq!(tag.main, "listen port");
        assert_eq!(tag.get_opt("shorthand"), Some("p"));
    }

    #[test]
    fn usage_may_contain_commas() {
        let tag = Tag::parse("hosts, comma separated,shorthand=H");
        assert_eq!(tag.main, "hosts, comma separated");
        assert_eq!(tag.get_opt("shorthand"), Some("H"));
    }

    #[test]
    fn empty_usage_before_options() {
        let tag = Tag::parse(",shorthand=x");
        assert_eq!(tag.main, "");
        assert_eq!(tag.get_opt("shorthand"), Some("x"));
    }

    #[test]
    fn option_only_tag() {
        let tag = Tag::parse("shorthand=x");
        assert_eq!(tag.main, "");
        assert_eq!(tag.get_opt("shorthand"), Some("x"));
    }

    #[test]
    fn usage_with_equals_sign_not_an_option() {
        let tag = Tag::parse("set a=b pairs");
        assert_eq!(tag.main, "set a=b pairs");
        assert!(tag.opts.is_empty());
    }

    #[test]
    fn empty_tag() {
        assert_eq!(Tag::parse(""), Tag::default());
    }
}
