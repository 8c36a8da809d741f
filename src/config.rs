//! Process configuration.
//!
//! Every setting is a command-line flag with an environment-variable
//! fallback, so `showtrack --port 9000` and `SHOWTRACK_PORT=9000 showtrack`
//! mean the same thing.

use clap::Parser;

/// A tiny JSON CRUD service for keeping track of the shows you watch.
#[derive(Clone, Debug, Parser)]
#[command(name = "showtrack")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to bind to
    #[arg(long, env = "SHOWTRACK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "SHOWTRACK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Start with no shows instead of the demo catalogue
    #[arg(long)]
    pub empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_owned(), port: 8080, empty: false }
    }
}

impl Config {
    /// The `host:port` string handed to [`Server::bind`](crate::Server::bind).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
