use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Catalogue of books and covers served as HTML pages.
#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "BOOKSHELF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to SQLite database (overrides config).
    #[arg(long, env = "DATABASE_PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Address to bind the server to (overrides config).
    #[arg(short, long, env = "BOOKSHELF_BIND", global = true)]
    pub bind: Option<SocketAddr>,

    /// Port to listen on, keeping the configured host.
    #[arg(short, long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve,

    /// Cover catalogue commands.
    Cover {
        /// Cover subcommand action.
        #[command(subcommand)]
        action: CoverCommand,
    },

    /// Initialize database and create default config.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Cover catalogue subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CoverCommand {
    /// Add a cover.
    Add {
        /// Book title.
        title: String,
        /// Author name.
        #[arg(short, long)]
        author: String,
        /// Cover image URL.
        #[arg(short, long)]
        image_url: Option<String>,
        /// Rating.
        #[arg(short, long)]
        rating: Option<f64>,
        /// Note to attach.
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Attach or replace the note of a cover.
    Note {
        /// Cover ID.
        id: i64,
        /// Note text.
        text: String,
    },

    /// List all covers.
    List,
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Site title shown in the header.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            title: default_title(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        3000,
    )
}

fn default_title() -> String {
    "My Books".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/bookshelf.db")
}

fn default_pool_size() -> usize {
    4
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        toml::from_str(content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("bookshelf.toml"),
            dirs::config_dir()
                .map(|p| p.join("bookshelf").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/bookshelf/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Apply command-line and environment overrides.
    pub fn apply_overrides(
        &mut self,
        database: Option<PathBuf>,
        bind: Option<SocketAddr>,
        port: Option<u16>,
    ) {
        if let Some(path) = database {
            self.database.path = path;
        }
        if let Some(addr) = bind {
            self.server.bind = addr;
        }
        if let Some(port) = port {
            self.server.bind.set_port(port);
        }
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# bookshelf configuration

[server]
bind = "0.0.0.0:3000"
title = "My Books"

[database]
# path = "/var/lib/bookshelf/bookshelf.db"
# Number of pooled SQLite connections
pool_size = 4
"#
        .to_string()
    }
}
