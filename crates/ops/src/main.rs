//! Deployment utilities for the Atelier backend.
//!
//! ```text
//! atelier-ops seed --database-url <url>
//! atelier-ops copy --source <url> --dest <url>
//! ```

use clap::{Parser, Subcommand};

use atelier_api::telemetry::init_tracing;
use atelier_ops::{copy, seed};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply migrations, upsert the admin and default configs, and add demo
    /// content to empty tables.
    Seed {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Copy every entity from one database into another.
    Copy {
        #[arg(long, env = "SOURCE_DATABASE_URL")]
        source: String,
        #[arg(long, env = "DEST_DATABASE_URL")]
        dest: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("atelier_ops=info,sqlx=warn");

    match Cli::parse().command {
        Command::Seed { database_url } => seed::run(&database_url).await,
        Command::Copy { source, dest } => copy::run(&source, &dest).await,
    }
}
