use std::collections::HashMap;

/// Snapshot of the environment variables under a prefix.
///
/// A key `maxConns` with prefix `myapp` is looked up as `MYAPP_MAXCONNS`.
/// Empty values count as unset.
///
/// Takes an iterator so tests can pass synthetic data instead of the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvLayer {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvLayer {
    pub fn capture(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let prefix = prefix.to_uppercase();
        let needle = format!("{prefix}_");
        let vars = vars
            .into_iter()
            .filter(|(name, value)| name.starts_with(&needle) && !value.is_empty())
            .collect();
        Self { prefix, vars }
    }

    /// Environment variable name for a config key.
    pub fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.to_uppercase())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&self.var_name(key)).map(String::as_str)
    }
}

/// The process environment, skipping variables that are not valid unicode.
pub fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn simple_key() {
        let env = EnvLayer::capture("MYAPP", vars(&[("MYAPP_HOST", "0.0.0.0")]));
        assert_eq!(env.get("host"), Some("0.0.0.0"));
    }

    #[test]
    fn camel_key_is_uppercased_whole() {
        let env = EnvLayer::capture("myapp", vars(&[("MYAPP_MAXCONNS", "10")]));
        assert_eq!(env.var_name("maxConns"), "MYAPP_MAXCONNS");
        assert_eq!(env.get("maxConns"), Some("10"));
    }

    #[test]
    fn other_prefix_ignored() {
        let env = EnvLayer::capture("MYAPP", vars(&[("OTHER_HOST", "x"), ("MYAPPHOST", "y")]));
        assert_eq!(env.get("host"), None);
    }

    #[test]
    fn empty_value_is_unset() {
        let env = EnvLayer::capture("MYAPP", vars(&[("MYAPP_HOST", "")]));
        assert_eq!(env.get("host"), None);
    }

    #[test]
    fn lowercase_var_not_matched() {
        let env = EnvLayer::capture("MYAPP", vars(&[("myapp_host", "x")]));
        assert_eq!(env.get("host"), None);
    }
}
