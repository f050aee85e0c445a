//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Stockroom inventory API
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Load role names and address reference data
    Seed,

    /// Create the first superuser account
    CreateSuperuser(CreateSuperuserArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop everything and re-run all migrations
    Fresh,
}

#[derive(Parser, Debug)]
pub struct CreateSuperuserArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "SUPERUSER_PASSWORD")]
    pub password: String,

    #[arg(long, default_value = "Admin")]
    pub first_name: String,

    #[arg(long, default_value = "Stockroom")]
    pub last_names: String,
}
