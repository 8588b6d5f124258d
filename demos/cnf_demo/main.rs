//! # cnf demo application
//!
//! A sample CLI that wires a record through flags, environment and a config
//! file, then prints what it resolved.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example cnf_demo
//! cargo run --example cnf_demo -- --cnf=demo.toml --tags=a,b -p 9000
//! CNF_DEMO_HOST=0.0.0.0 cargo run --example cnf_demo -- --verbose
//! RUST_LOG=cnf=debug cargo run --example cnf_demo
//! ```
//!
//! Without `--cnf` the demo looks for `cnf.toml` in the working directory,
//! then next to the built binary. A missing file is only a warning.

mod config;

use cnf::FlagSet;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::DemoConfig;

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cnf=warn")))
        .init();
}

fn main() {
    init_logging();

    let mut config = DemoConfig::default();
    let mut flags = FlagSet::new("cnf-demo").env_prefix("CNF_DEMO");
    if let Err(e) = flags.declare_cnf().and_then(|()| flags.declare(&mut config)) {
        eprintln!("Failed to declare flags:\n{e}");
        std::process::exit(1);
    }

    let layers = flags.parse_or_exit(std::env::args_os());
    let file = layers
        .load_by_flag(&mut [&mut config])
        .unwrap_or_else(|e| {
            eprintln!("Failed to load config:\n{e}");
            std::process::exit(1);
        });

    if config.verbose {
        match &file {
            Some(path) => println!("[verbose] config file: {}", path.display()),
            None => println!("[verbose] no config file"),
        }
        println!();
    }

    let entries = [
        ("name", config.name.clone()),
        ("tags", config.tags.join(", ")),
        ("verbose", config.verbose.to_string()),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        ("server.max_conns", config.server.max_conns.to_string()),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{key:<width$}  {value}");
    }
}
