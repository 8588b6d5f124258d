#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    /// The three-field record used by the end-to-end scenarios.
    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct App {
        pub name: String,
        pub tags: Vec<String>,
        pub port: i32,
    }

    crate::record!(App { name, tags, port });

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct Server {
        pub name: String,
        pub tags: Vec<String>,
        pub port: u16,
        pub debug: bool,
        pub listener: Listener,
        /// Not listed in `record!`, so never bound or declared.
        pub secret: String,
    }

    crate::record!(Server {
        name = "server name,shorthand=n",
        tags,
        port = "listen port,shorthand=p",
        debug = "verbose logging",
        listener,
    });

    // -- Nested record with its own separator ----------------------------------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct Listener {
        pub bind_addr: String,
        pub max_conns: i32,
        pub aliases: Vec<String>,
        pub internal: String,
    }

    crate::record!(Listener { bind_addr, max_conns, aliases } separator = ";");

    // -- Record with a separator, for precedence tests -------------------------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(default)]
    pub struct Hosts {
        pub hosts: Vec<String>,
    }

    crate::record!(Hosts { hosts } separator = "|");
}
