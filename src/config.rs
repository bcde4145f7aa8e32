//! Configuration from CLI arguments, environment variables and `.env`

use std::time::Duration;

use clap::Parser;

use crate::db::DatabaseConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "coffeeshop-api")]
#[command(about = "A small HTTP API for managing a catalog of coffee products")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Postgres connection string
    #[arg(long, env = "DSN")]
    pub dsn: String,

    /// Deadline for a single database operation, in seconds
    #[arg(
        long,
        env = "DB_TIMEOUT",
        default_value = "3",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub db_timeout: u64,

    /// Maximum number of open database connections
    #[arg(long, default_value = "10")]
    pub max_open_conns: u32,

    /// Database connections kept open while idle
    #[arg(long, default_value = "5")]
    pub max_idle_conns: u32,

    /// Maximum lifetime of a database connection, in seconds
    #[arg(long, default_value = "300")]
    pub conn_max_lifetime: u64,

    /// Apply the embedded schema migrations before serving
    #[arg(long)]
    pub migrate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout)
    }

    /// Pool settings for `db::connect`
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            dsn: self.dsn.clone(),
            max_open_conns: self.max_open_conns,
            max_idle_conns: self.max_idle_conns,
            conn_max_lifetime: Duration::from_secs(self.conn_max_lifetime),
        }
    }
}
