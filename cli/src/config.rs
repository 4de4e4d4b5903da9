use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_DATABASE: &str = "iron_chef_japan.db";
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Settings shared by every subcommand. Each flag falls back to an
/// environment variable, then to a default.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// SQLite database file
    #[arg(long = "database", global = true, env = "IRONCHEF_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database_path: PathBuf,

    /// Directory that receives the `exports/` folder
    #[arg(long, global = true, env = "IRONCHEF_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Maximum pooled database connections
    #[arg(long, global = true, env = "IRONCHEF_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,

    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
