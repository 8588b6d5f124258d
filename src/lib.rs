//! Struct-driven configuration binding. Describe a record, declare its
//! flags, and fill it from a TOML file, environment variables and the
//! command line.
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct App {
//!     name: String,
//!     tags: Vec<String>,
//!     port: i32,
//! }
//!
//! cnf::record!(App { name, tags, port = "listen port,shorthand=p" });
//!
//! let mut app = App::default();
//! let mut flags = FlagSet::new("app").env_prefix("APP");
//! flags.declare_cnf()?;
//! flags.declare(&mut app)?;
//! let layers = flags.parse_or_exit(std::env::args_os());
//! layers.load_by_flag(&mut [&mut app])?;
//! ```
//!
//! `./app --cnf=app.toml --tags=a,b -p 8080` reads `app.toml` into `app`,
//! then overwrites `tags` and `port` from the command line.
//!
//! # Records
//!
//! A record implements [`Record`], usually through the [`record!`] macro.
//! Only the fields it lists participate in flags and env; the file decoder
//! goes through serde and sees every field. A listed field whose type is
//! itself a record is flattened: its leaves share the outer key space with
//! no prefix.
//!
//! Supported leaf kinds are `String`, every primitive integer, `bool` and
//! `Vec<String>`.
//!
//! # Keys
//!
//! A field's external key is its name in lower camel case (`max_conns` →
//! `maxConns`). That key names the long flag (`--maxConns`) and, with env
//! prefix `APP`, the variable `APP_MAXCONNS`. Lookups ignore case.
//!
//! # Precedence
//!
//! ```text
//! Record's own values   whatever the caller initialised
//!        ↑ overridden by
//! Config file           cnf.toml, merged key by key
//!        ↑ overridden by
//! Environment vars      PREFIX_KEY
//!        ↑ overridden by
//! Command-line flags    only those actually passed
//!        ↑ overridden by
//! Overrides             Layers::set()
//! ```
//!
//! The last three tiers live in [`Layers`] and only ever write non-zero
//! values: an empty string, `0` or `false` leaves the field as the file (or
//! the record) had it.
//!
//! # Sequences
//!
//! `Vec<String>` fields are split with [`split_x`], which respects brackets,
//! quotes and backslash escapes. The separator is the `separator` key if set,
//! else the record's own separator (`record!(... separator = ";")`), else
//! `,`.
//!
//! # File discovery
//!
//! [`find_file`] tries the given path, then `cnf.toml` in the working
//! directory, then `cnf.toml` next to the executable. [`load`] treats a
//! missing file as a warning; [`load_e`] returns it as
//! [`CnfError::NotFound`].
//!
//! # Logging
//!
//! The crate emits [`tracing`] events with an `event` field
//! (`cnf.file.found`, `cnf.load.file_not_found`, ...). Install a subscriber
//! to see them.

pub mod error;
pub mod types;

mod bind;
mod case;
mod declare;
mod decode;
mod env;
mod file;
mod flags;
mod layers;
mod load;
pub(crate) mod merge;
mod separator;
mod split;
mod tag;
mod walk;

#[cfg(test)]
mod fixtures;

pub use bind::{bind, bind_all};
pub use case::to_camel_lower;
pub use declare::declare_flags;
pub use decode::{FileDecode, decode_file, decode_str};
pub use error::CnfError;
pub use file::{DEFAULT_FILE_NAME, expand_home, find_file, find_file_in};
pub use flags::{CNF_FLAG, FlagKind, FlagSet};
pub use layers::Layers;
pub use load::{Configurable, load, load_by_flag, load_e, load_in};
pub use separator::{DEFAULT_SEPARATOR, SEPARATOR_KEY, resolve_separator};
pub use split::split_x;
pub use tag::Tag;
pub use types::{Field, FieldKind, IntField, IntoSlot, Record, Slot};
pub use walk::{FieldDescriptor, keys, walk};
