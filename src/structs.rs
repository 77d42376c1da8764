use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,
    /// Create the config file if it does not exist or is broken.
    #[arg(long)]
    pub create_config: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List configured caches with their effective settings.
    List,
    /// Show the effective configuration of one cache.
    Show {
        cache: String,
    },
    /// Flush every cache, persistent ones only with --force.
    Flush {
        #[arg(long)]
        force: bool,
    },
    /// Flush a single cache.
    FlushOne {
        cache: String,
    },
    /// Flush entries carrying a tag in every cache.
    FlushByTag {
        tag: String,
        #[arg(long)]
        force: bool,
    },
    /// Remove expired entries from every cache.
    CollectGarbage,
    /// Freeze a cache; it stays read-only until flushed.
    Freeze {
        cache: String,
    },
    /// Print the identifiers of every live entry of a cache.
    Entries {
        cache: String,
    },
}
