use tracing::debug;

use crate::layers::Layers;
use crate::types::Record;

/// Separator used when neither the layered source nor the record names one.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Reserved key for a global separator override.
pub const SEPARATOR_KEY: &str = "separator";

/// Pick the separator for `record`'s sequence fields.
///
/// 1. a non-empty value under [`SEPARATOR_KEY`] in the layered source,
/// 2. the record's own [`Record::separator`],
/// 3. `fallback`.
pub fn resolve_separator(layers: &Layers, record: &dyn Record, fallback: &str) -> String {
    let global = layers.get_string(SEPARATOR_KEY);
    let separator = if !global.is_empty() {
        global
    } else {
        match record.separator() {
            Some(custom) if !custom.is_empty() => custom.to_string(),
            _ => fallback.to_string(),
        }
    };
    debug!(event = "cnf.separator.resolved", separator = %separator);
    separator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{App, Hosts};

    #[test]
    fn fallback_when_nothing_else() {
        let layers = Layers::new();
        assert_eq!(resolve_separator(&layers, &App::default(), DEFAULT_SEPARATOR), ",");
        assert_eq!(resolve_separator(&layers, &App::default(), ":"), ":");
    }

    #[test]
    fn record_separator_beats_fallback() {
        let layers = Layers::new();
        assert_eq!(resolve_separator(&layers, &Hosts::default(), ","), "|");
    }

    #[test]
    fn global_override_beats_record() {
        let mut layers = Layers::new();
        layers.set(SEPARATOR_KEY, ";");
        assert_eq!(resolve_separator(&layers, &Hosts::default(), ","), ";");
        assert_eq!(resolve_separator(&layers, &App::default(), ","), ";");
    }

    #[test]
    fn global_from_env() {
        let layers = Layers::new().with_env(
            "APP",
            vec![("APP_SEPARATOR".to_string(), "#".to_string())],
        );
        assert_eq!(resolve_separator(&layers, &Hosts::default(), ","), "#");
    }

    #[test]
    fn empty_global_is_ignored() {
        let mut layers = Layers::new();
        layers.set(SEPARATOR_KEY, "");
        assert_eq!(resolve_separator(&layers, &Hosts::default(), ","), "|");
    }
}
