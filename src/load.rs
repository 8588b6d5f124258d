//! Entry points that tie file discovery, decoding and binding together.
//!
//! ```text
//! find_file ─▶ decode_file ─▶ bind_all
//!  (path)      (file values)   (flag/env/override values win)
//! ```
//!
//! Records passed to these functions must be both a [`Record`] (for binding)
//! and serde-capable (for decoding). [`Configurable`] covers both.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bind::bind_all;
use crate::decode::{FileDecode, decode_file};
use crate::error::CnfError;
use crate::file::{expand_home, find_file, find_file_in};
use crate::flags::CNF_FLAG;
use crate::layers::Layers;
use crate::types::Record;

/// A record that can be both decoded from a file and bound from layers.
pub trait Configurable: Record + FileDecode {
    fn as_record(&mut self) -> &mut dyn Record;
    fn as_decode(&mut self) -> &mut dyn FileDecode;
}

impl<T: Record + FileDecode> Configurable for T {
    fn as_record(&mut self) -> &mut dyn Record {
        self
    }

    fn as_decode(&mut self) -> &mut dyn FileDecode {
        self
    }
}

/// Locate the config file for `path` and merge it into every record.
///
/// Any failure propagates, including [`CnfError::NotFound`]. Returns the
/// path that was read.
pub fn load_e(path: &Path, records: &mut [&mut dyn Configurable]) -> Result<PathBuf, CnfError> {
    let found = find_file(path)?;
    decode_records(&found, records)?;
    Ok(found)
}

/// Load the config file, then bind `layers` on top.
///
/// A missing file is logged and skipped; the records are still bound. Any
/// other file error propagates before binding. Returns the path read, if any.
pub fn load(
    layers: &Layers,
    path: &Path,
    records: &mut [&mut dyn Configurable],
) -> Result<Option<PathBuf>, CnfError> {
    load_found(layers, find_file(path), records)
}

/// Like [`load`] with explicit fallback directories; see [`find_file_in`].
pub fn load_in(
    layers: &Layers,
    path: &Path,
    cwd: Option<&Path>,
    exe_dir: Option<&Path>,
    records: &mut [&mut dyn Configurable],
) -> Result<Option<PathBuf>, CnfError> {
    load_found(layers, find_file_in(path, cwd, exe_dir), records)
}

fn load_found(
    layers: &Layers,
    found: Result<PathBuf, CnfError>,
    records: &mut [&mut dyn Configurable],
) -> Result<Option<PathBuf>, CnfError> {
    let found = match found {
        Ok(found) => {
            decode_records(&found, records)?;
            Some(found)
        }
        Err(err) if err.is_not_found() => {
            warn!(event = "cnf.load.file_not_found", error = %err);
            None
        }
        Err(err) => return Err(err),
    };

    let mut targets: Vec<&mut dyn Record> = records.iter_mut().map(|r| r.as_record()).collect();
    bind_all(layers, &mut targets);
    Ok(found)
}

fn decode_records(path: &Path, records: &mut [&mut dyn Configurable]) -> Result<(), CnfError> {
    let mut targets: Vec<&mut dyn FileDecode> =
        records.iter_mut().map(|r| r.as_decode()).collect();
    decode_file(path, &mut targets)?;
    info!(event = "cnf.load.file_loaded", path = %path.display());
    Ok(())
}

/// [`load`] with the path taken from the `--cnf` flag. A leading `~` is
/// expanded to the home directory.
pub fn load_by_flag(
    layers: &Layers,
    records: &mut [&mut dyn Configurable],
) -> Result<Option<PathBuf>, CnfError> {
    let path = expand_home(layers.get_string(CNF_FLAG).trim());
    load(layers, &path, records)
}

impl Layers {
    /// See [`bind_all`].
    pub fn bind_all(&self, records: &mut [&mut dyn Record]) {
        bind_all(self, records);
    }

    /// See [`load`].
    pub fn load(
        &self,
        path: &Path,
        records: &mut [&mut dyn Configurable],
    ) -> Result<Option<PathBuf>, CnfError> {
        load(self, path, records)
    }

    /// See [`load_by_flag`].
    pub fn load_by_flag(
        &self,
        records: &mut [&mut dyn Configurable],
    ) -> Result<Option<PathBuf>, CnfError> {
        load_by_flag(self, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::DEFAULT_FILE_NAME;
    use crate::fixtures::test::{App, Hosts, Server};
    use crate::flags::FlagSet;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn parse(record: &mut dyn Record, args: &[&str]) -> Layers {
        let mut flags = FlagSet::new("app");
        flags.declare_cnf().unwrap();
        flags.declare(record).unwrap();
        flags.parse_with_env(args.iter().copied(), Vec::new()).unwrap()
    }

    #[test]
    fn flags_override_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "app.toml",
            r#"
            name = "from-file"
            tags = ["f1", "f2"]
            port = 80
            "#,
        );
        let mut app = App::default();
        let cnf = format!("--cnf={}", path.display());
        let layers = parse(&mut app, &["app", &cnf, "--port=8080"]);

        let found = load_by_flag(&layers, &mut [&mut app]).unwrap();
        assert_eq!(found, Some(path));
        assert_eq!(
            app,
            App {
                name: "from-file".into(),
                tags: vec!["f1".into(), "f2".into()],
                port: 8080,
            }
        );
    }

    #[test]
    fn missing_file_still_binds() {
        let dir = TempDir::new().unwrap();
        let mut app = App::default();
        let layers = parse(&mut app, &["app", "--name=x", "--tags=a,b"]);

        let missing = dir.path().join("absent.toml");
        let found =
            load_in(&layers, &missing, Some(dir.path()), None, &mut [&mut app]).unwrap();
        assert_eq!(found, None);
        assert_eq!(app.name, "x");
        assert_eq!(app.tags, vec!["a", "b"]);
    }

    #[test]
    fn load_in_falls_back_to_cwd_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, DEFAULT_FILE_NAME, "name = \"cwd\"\nport = 5");
        let mut app = App::default();
        let layers = parse(&mut app, &["app", "--port=6"]);

        let found =
            load_in(&layers, Path::new(""), Some(dir.path()), None, &mut [&mut app]).unwrap();
        assert_eq!(found, Some(path));
        assert_eq!(app.name, "cwd");
        assert_eq!(app.port, 6);
    }

    #[test]
    fn parse_error_propagates_before_binding() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cnf.toml", "name = ");
        let mut app = App::default();
        let layers = parse(&mut app, &["app", "--name=x"]);

        let err = load(&layers, &path, &mut [&mut app]).unwrap_err();
        assert!(matches!(err, CnfError::ParseError { .. }));
        assert_eq!(app.name, "");
    }

    #[test]
    fn load_e_returns_resolved_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "custom.toml", "port = 7");
        let mut app = App::default();
        assert_eq!(load_e(&path, &mut [&mut app]).unwrap(), path);
        assert_eq!(app.port, 7);
    }

    #[test]
    fn several_records_from_one_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "cnf.toml",
            r#"
            name = "srv"
            hosts = ["a", "b"]

            [listener]
            bind_addr = "127.0.0.1"
            "#,
        );
        let mut layers = Layers::new();
        layers.set("hosts", "x|y");
        layers.set("maxConns", 12);

        let mut server = Server::default();
        let mut hosts = Hosts::default();
        layers
            .load(&path, &mut [&mut server, &mut hosts])
            .unwrap();

        assert_eq!(server.name, "srv");
        assert_eq!(server.listener.bind_addr, "127.0.0.1");
        assert_eq!(server.listener.max_conns, 12);
        assert_eq!(hosts.hosts, vec!["x", "y"]);
    }

    #[test]
    fn zero_flag_values_keep_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cnf.toml", "debug = true\nport = 443");
        let mut server = Server::default();
        let layers = parse(&mut server, &["app", "--debug=false", "--port=0"]);

        layers.load(&path, &mut [&mut server]).unwrap();
        assert!(server.debug);
        assert_eq!(server.port, 443);
    }

    #[test]
    fn env_sits_between_file_and_flags() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cnf.toml", "name = \"file\"\nport = 1");
        let mut app = App::default();
        let mut flags = FlagSet::new("app").env_prefix("APP");
        flags.declare(&mut app).unwrap();
        let layers = flags
            .parse_with_env(
                ["app", "--port=3"],
                vec![
                    ("APP_NAME".to_string(), "env".to_string()),
                    ("APP_PORT".to_string(), "2".to_string()),
                ],
            )
            .unwrap();

        layers.load(&path, &mut [&mut app]).unwrap();
        assert_eq!(app.name, "env");
        assert_eq!(app.port, 3);
    }

    #[test]
    fn bind_all_method_delegates() {
        let mut layers = Layers::new();
        layers.set("name", "m");
        let mut app = App::default();
        layers.bind_all(&mut [&mut app]);
        assert_eq!(app.name, "m");
    }
}
