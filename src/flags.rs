//! Command-line flag registry backed by a runtime-built clap [`Command`].
//!
//! Flags are declared first (by hand or with [`FlagSet::declare`]), then
//! [`FlagSet::parse_from`] consumes the registry and produces the
//! [`Layers`] that binding reads from. The declare → parse → bind order is
//! therefore enforced by ownership.
//!
//! Only flags the user actually passes land in the flag tier; every declared
//! flag also registers its zero value in the defaults tier.

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use toml::Value;
use tracing::debug;

use crate::env;
use crate::error::CnfError;
use crate::layers::Layers;
use crate::types::Record;

/// Reserved flag naming the config file (`--cnf`, `-c`).
pub const CNF_FLAG: &str = "cnf";

const HELP_FLAG: &str = "help";
const REST_ARGS: &str = "__rest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Int,
    Bool,
}

impl FlagKind {
    fn zero(self) -> Value {
        match self {
            FlagKind::String => Value::String(String::new()),
            FlagKind::Int => Value::Integer(0),
            FlagKind::Bool => Value::Boolean(false),
        }
    }
}

#[derive(Debug, Clone)]
struct FlagDef {
    key: String,
    short: Option<char>,
    usage: String,
    kind: FlagKind,
}

impl FlagDef {
    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.key.clone())
            .long(self.key.clone())
            .help(self.usage.clone());
        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        match self.kind {
            FlagKind::String => arg.action(ArgAction::Set).value_name("string"),
            FlagKind::Int => arg
                .action(ArgAction::Set)
                .value_name("int")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true),
            // `--debug` and `--debug=false` both work.
            FlagKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new()),
        }
    }

    /// The value given on the command line, if this flag was passed.
    fn explicit_value(&self, matches: &ArgMatches) -> Option<Value> {
        if matches.value_source(&self.key) != Some(ValueSource::CommandLine) {
            return None;
        }
        match self.kind {
            FlagKind::String => matches
                .get_one::<String>(&self.key)
                .cloned()
                .map(Value::String),
            FlagKind::Int => matches
                .get_one::<i64>(&self.key)
                .copied()
                .map(Value::Integer),
            FlagKind::Bool => matches
                .get_one::<bool>(&self.key)
                .copied()
                .map(Value::Boolean),
        }
    }
}

fn is_valid_short(c: char) -> bool {
    c != '-' && !c.is_whitespace() && !c.is_control()
}

/// Declared flags plus the settings needed to finalize them into [`Layers`].
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    env_prefix: Option<String>,
    defs: Vec<FlagDef>,
}

impl FlagSet {
    /// `name` is the program name shown in usage text.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            env_prefix: None,
            defs: Vec::new(),
        }
    }

    /// Enable the environment tier: key `port` reads `{PREFIX}_PORT`.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Declare the reserved `--cnf`/`-c` config file flag.
    pub fn declare_cnf(&mut self) -> Result<(), CnfError> {
        self.string(CNF_FLAG, Some('c'), "cnf file path")
    }

    /// Declare one flag per leaf field of `record`.
    pub fn declare(&mut self, record: &mut dyn Record) -> Result<(), CnfError> {
        crate::declare::declare_flags(self, record)
    }

    pub fn string(&mut self, key: &str, short: Option<char>, usage: &str) -> Result<(), CnfError> {
        self.add(key, short, usage, FlagKind::String)
    }

    pub fn int(&mut self, key: &str, short: Option<char>, usage: &str) -> Result<(), CnfError> {
        self.add(key, short, usage, FlagKind::Int)
    }

    pub fn bool(&mut self, key: &str, short: Option<char>, usage: &str) -> Result<(), CnfError> {
        self.add(key, short, usage, FlagKind::Bool)
    }

    /// Register a flag. Redefining a key or a shorthand fails, as does a
    /// shorthand clap cannot parse (`-`, whitespace, control characters).
    pub fn add(
        &mut self,
        key: &str,
        short: Option<char>,
        usage: &str,
        kind: FlagKind,
    ) -> Result<(), CnfError> {
        if key.eq_ignore_ascii_case(HELP_FLAG)
            || self.defs.iter().any(|d| d.key.eq_ignore_ascii_case(key))
        {
            return Err(CnfError::DuplicateFlag(key.to_string()));
        }
        if let Some(c) = short
            && !is_valid_short(c)
        {
            return Err(CnfError::InvalidShorthand {
                key: key.to_string(),
                shorthand: c.to_string(),
            });
        }
        if let Some(c) = short
            && self.defs.iter().any(|d| d.short == Some(c))
        {
            return Err(CnfError::DuplicateFlag(format!("-{c}")));
        }

        self.defs.push(FlagDef {
            key: key.to_string(),
            short,
            usage: usage.to_string(),
            kind,
        });
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.defs.iter().any(|d| d.key.eq_ignore_ascii_case(key))
    }

    pub fn kind_of(&self, key: &str) -> Option<FlagKind> {
        self.defs
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(key))
            .map(|d| d.kind)
    }

    /// Build the clap command for the declared flags.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .disable_help_flag(true)
            .args_override_self(true)
            .arg(
                Arg::new(HELP_FLAG)
                    .long(HELP_FLAG)
                    .action(ArgAction::Help)
                    .help("Print help"),
            )
            .arg(
                Arg::new(REST_ARGS)
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .hide(true),
            );
        for def in &self.defs {
            cmd = cmd.arg(def.to_arg());
        }
        cmd
    }

    /// Usage text listing every declared flag.
    pub fn usage(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parse `args` (program name first) against the process environment.
    pub fn parse_from<I, T>(self, args: I) -> Result<Layers, CnfError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.parse_with_env(args, env::process_vars())
    }

    /// Like [`parse_from`](Self::parse_from) with explicit environment variables.
    ///
    /// Leftover positional arguments fail with [`CnfError::UnknownArgs`].
    pub fn parse_with_env<I, T>(
        self,
        args: I,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Layers, CnfError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = self.command();
        let matches = cmd.try_get_matches_from_mut(args)?;

        let rest: Vec<String> = matches
            .get_many::<String>(REST_ARGS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        if !rest.is_empty() {
            return Err(CnfError::UnknownArgs {
                args: rest,
                usage: cmd.render_help().to_string(),
            });
        }

        let mut layers = Layers::new();
        if let Some(prefix) = &self.env_prefix {
            layers = layers.with_env(prefix, vars);
        }

        let mut explicit = 0;
        for def in &self.defs {
            layers.set_default(&def.key, def.kind.zero());
            if let Some(value) = def.explicit_value(&matches) {
                layers.set_flag(&def.key, value);
                explicit += 1;
            }
        }

        debug!(
            event = "cnf.flags.parsed",
            declared = self.defs.len(),
            explicit = explicit,
            env_prefix = self.env_prefix.as_deref().unwrap_or("")
        );
        Ok(layers)
    }

    /// Parse like [`parse_from`](Self::parse_from) and terminate the process on failure.
    ///
    /// Leftover positional arguments print `Unknown args ...` and the usage
    /// text, then exit with status 1. Clap errors (including `--help`) exit
    /// through clap.
    pub fn parse_or_exit<I, T>(self, args: I) -> Layers
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.parse_from(args) {
            Ok(layers) => layers,
            Err(CnfError::UnknownArgs { args, usage }) => {
                println!("Unknown args {}", args.join(" "));
                println!("{usage}");
                std::process::exit(1);
            }
            Err(CnfError::Cli(e)) => e.exit(),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
