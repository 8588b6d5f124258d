//! Merge a TOML config file into records.
//!
//! The file is parsed once. Each target is serialized to a table, the
//! document is deep-merged on top and the result is deserialized back, so
//! keys the file does not mention keep whatever the record already held.
//! Key matching goes through serde field names, not the camelCase keys used
//! for flags and env.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::CnfError;
use crate::merge::merge_into;

/// A record the file decoder can merge a document into.
///
/// Implemented for every `T: Serialize + DeserializeOwned`.
pub trait FileDecode {
    /// Merge `doc` into `self`. Returns the document keys `self` did not
    /// consume, as dotted paths.
    fn merge_table(&mut self, doc: &Table) -> Result<Vec<String>, String>;
}

impl<T: Serialize + DeserializeOwned> FileDecode for T {
    fn merge_table(&mut self, doc: &Table) -> Result<Vec<String>, String> {
        let mut base = match Value::try_from(&*self).map_err(|e| e.to_string())? {
            Value::Table(table) => table,
            other => {
                return Err(format!(
                    "record serializes to {}, expected a table",
                    other.type_str()
                ));
            }
        };
        merge_into(&mut base, doc);

        let mut ignored = Vec::new();
        *self = serde_ignored::deserialize(Value::Table(base), |path| {
            ignored.push(path.to_string())
        })
        .map_err(|e| e.to_string())?;
        Ok(ignored)
    }
}

/// Read `path` and merge it into every target.
pub fn decode_file(path: &Path, targets: &mut [&mut dyn FileDecode]) -> Result<(), CnfError> {
    let content = std::fs::read_to_string(path).map_err(|e| CnfError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_str(&content, path, targets)?;
    Ok(())
}

/// Merge already-read `content` into every target. `path` is only used in
/// errors and logs.
///
/// Returns the document keys no target consumed. Each one is also logged at
/// `warn`; they are never an error.
pub fn decode_str(
    content: &str,
    path: &Path,
    targets: &mut [&mut dyn FileDecode],
) -> Result<Vec<String>, CnfError> {
    let doc: Table = content.parse().map_err(|e| CnfError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut unknown: Option<BTreeSet<String>> = None;
    for target in targets.iter_mut() {
        let ignored: BTreeSet<String> = target
            .merge_table(&doc)
            .map_err(|reason| CnfError::DecodeError {
                path: path.to_path_buf(),
                reason,
            })?
            .into_iter()
            .collect();
        unknown = Some(match unknown {
            Some(prev) => prev.intersection(&ignored).cloned().collect(),
            None => ignored,
        });
    }

    let unknown: Vec<String> = unknown.unwrap_or_default().into_iter().collect();
    for key in &unknown {
        warn!(event = "cnf.decode.unknown_key", path = %path.display(), key = %key);
    }
    debug!(
        event = "cnf.decode.merged",
        path = %path.display(),
        targets = targets.len()
    );
    Ok(unknown)
}
