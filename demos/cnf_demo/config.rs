//! Records for the cnf demo application.
//!
//! [`DemoConfig`] holds the top-level keys and flattens [`ServerConfig`]
//! into the same key space, so `server.max_conns` in the file is `--maxConns`
//! on the command line and `CNF_DEMO_MAXCONNS` in the environment.
//!
//! | Flag          | Env var             | File key             |
//! |---------------|---------------------|----------------------|
//! | `--name`/`-n` | `CNF_DEMO_NAME`     | `name`               |
//! | `--tags`      | `CNF_DEMO_TAGS`     | `tags`               |
//! | `--verbose`   | `CNF_DEMO_VERBOSE`  | `verbose`            |
//! | `--host`      | `CNF_DEMO_HOST`     | `server.host`        |
//! | `--port`/`-p` | `CNF_DEMO_PORT`     | `server.port`        |
//! | `--maxConns`  | `CNF_DEMO_MAXCONNS` | `server.max_conns`   |

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DemoConfig {
    pub name: String,
    pub tags: Vec<String>,
    pub verbose: bool,
    pub server: ServerConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: "cnf-demo".into(),
            tags: Vec::new(),
            verbose: false,
            server: ServerConfig::default(),
        }
    }
}

cnf::record!(DemoConfig {
    name = "application name,shorthand=n",
    tags = "labels printed with the banner",
    verbose = "report which config file was read",
    server,
});

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_conns: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            max_conns: 100,
        }
    }
}

cnf::record!(ServerConfig {
    host = "bind address",
    port = "listen port,shorthand=p",
    max_conns = "connection limit",
});
