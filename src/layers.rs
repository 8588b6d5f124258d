//! The layered value source: one lookup over every configuration tier.
//!
//! ```text
//! Defaults            zero values registered with each flag
//!        ↑ overridden by
//! Environment vars    PREFIX_KEY (only when a prefix was registered)
//!        ↑ overridden by
//! Command-line flags  only flags the user actually passed
//!        ↑ overridden by
//! Overrides           .set()
//! ```
//!
//! Tiers are fixed when the source is built (usually by
//! [`FlagSet::parse_from`](crate::FlagSet::parse_from)); lookups only read.
//! Keys are case-insensitive.

use std::collections::HashMap;

use toml::Value;

use crate::env::EnvLayer;
use crate::split::split_x;

#[derive(Debug, Clone, Default)]
pub struct Layers {
    overrides: HashMap<String, Value>,
    flags: HashMap<String, Value>,
    env: Option<EnvLayer>,
    defaults: HashMap<String, Value>,
}

fn norm(key: &str) -> String {
    key.to_lowercase()
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the environment tier for `prefix`, reading from `vars`.
    pub fn with_env(
        mut self,
        prefix: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.env = Some(EnvLayer::capture(prefix, vars));
        self
    }

    /// Set a value above every other tier.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.overrides.insert(norm(key), value.into());
    }

    pub(crate) fn set_flag(&mut self, key: &str, value: Value) {
        self.flags.insert(norm(key), value);
    }

    pub(crate) fn set_default(&mut self, key: &str, value: Value) {
        self.defaults.insert(norm(key), value);
    }

    /// Highest-precedence value for `key`, if any tier has one.
    pub fn get(&self, key: &str) -> Option<Value> {
        let key = norm(key);
        if let Some(v) = self.overrides.get(&key).or_else(|| self.flags.get(&key)) {
            return Some(v.clone());
        }
        if let Some(v) = self.env.as_ref().and_then(|env| env.get(&key)) {
            return Some(Value::String(v.to_string()));
        }
        self.defaults.get(&key).cloned()
    }

    /// True when a tier above the defaults has a value for `key`.
    pub fn is_set(&self, key: &str) -> bool {
        let key = norm(key);
        self.overrides.contains_key(&key)
            || self.flags.contains_key(&key)
            || self.env.as_ref().is_some_and(|env| env.get(&key).is_some())
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key).map(|v| value_string(&v)).unwrap_or_default()
    }

    /// Integer value; unparsable strings read as 0.
    pub fn get_int(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Integer(i)) => i,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Boolean(b)) => i64::from(b),
            Some(Value::Float(f)) => f as i64,
            _ => 0,
        }
    }

    /// Boolean value; anything not recognizably true reads as false.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Boolean(b)) => b,
            Some(Value::String(s)) => parse_bool(s.trim()).unwrap_or(false),
            Some(Value::Integer(i)) => i != 0,
            _ => false,
        }
    }

    /// String value split with [`split_x`]; empty when unset.
    pub fn get_sequence(&self, key: &str, separator: &str) -> Vec<String> {
        split_x(self.get_string(key).trim(), separator)
    }
}

fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Array(items) => items.iter().map(value_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Accepts the usual spellings: `1 t T TRUE true True` and their false forms.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
