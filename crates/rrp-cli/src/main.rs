mod catalog;
mod commissions;
mod price;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogCommands;
use crate::commissions::CommissionsCommands;
use crate::price::PriceArgs;

#[derive(Debug, Parser)]
#[command(name = "rrp-cli")]
#[command(about = "Recommended retail price calculator for marketplace retailers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Product catalog stored in Postgres
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Per-retailer commission schedules
    Commissions {
        #[command(subcommand)]
        command: CommissionsCommands,
    },
    /// Price a catalog for one retailer and export the results as CSV
    Price(PriceArgs),
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

/// Parse a delimiter flag: a single ASCII character, or `tab` / `\t`.
pub(crate) fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => u8::try_from(c).map_err(|e| e.to_string()),
                _ => Err(format!(
                    "delimiter must be a single ASCII character or 'tab', got '{raw}'"
                )),
            }
        }
    }
}

async fn connect(config: &rrp_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    Ok(rrp_db::connect_pool_from_config(config).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = rrp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    rrp_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = rrp_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Catalog { command }) => {
            let pool = connect(&config).await?;
            catalog::run(&pool, &config, command).await?;
        }
        Some(Commands::Commissions { command }) => {
            let pool = connect(&config).await?;
            commissions::run(&pool, &config, command).await?;
        }
        Some(Commands::Price(args)) => price::run(&config, args).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
