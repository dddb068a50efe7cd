//! Commission schedule command handlers for the CLI.

use std::fs::File;
use std::path::PathBuf;

use clap::Subcommand;
use rrp_core::{AppConfig, RetailerOptions};
use rrp_pricing::commission::{from_delimited, from_document_rows};
use rrp_pricing::{retailer_from_id, CommissionSchedule, RetailerProfile};
use rrp_remote::{DocumentClient, RemoteError};

/// Retailers whose schedule is published as a downloadable document.
const DOCUMENT_RETAILERS: &[&str] = &["mvideo"];

/// Sub-commands available under `commissions`.
#[derive(Debug, Subcommand)]
pub enum CommissionsCommands {
    /// Replace a retailer's schedule with the contents of a delimited file
    Import {
        #[arg(long)]
        retailer: String,
        /// Two columns: category name, percentage
        path: PathBuf,
        #[arg(long, default_value = ",", value_parser = crate::parse_delimiter)]
        delimiter: u8,
    },
    /// Download the retailer's published commission document
    Sync {
        #[arg(long, default_value = "mvideo")]
        retailer: String,
        /// Text table (tab, `|` or `;` separated) to download; overrides
        /// RRP_MVIDEO_COMMISSIONS_URL. PDF documents are not supported.
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the schedule a pricing run would use
    Show {
        #[arg(long)]
        retailer: String,
    },
}

fn profile(retailer: &str) -> anyhow::Result<Box<dyn RetailerProfile>> {
    Ok(retailer_from_id(retailer, &RetailerOptions::default())?)
}

/// Stored schedule, or the retailer's builtin one when nothing is stored.
pub(crate) async fn effective_schedule(
    pool: &sqlx::PgPool,
    retailer: &dyn RetailerProfile,
) -> anyhow::Result<(CommissionSchedule, &'static str)> {
    let stored = rrp_db::load_commission_schedule(pool, retailer.id()).await?;
    if stored.is_empty() {
        Ok((retailer.builtin_schedule(), "builtin"))
    } else {
        Ok((stored, "stored"))
    }
}

/// `--url` wins over the configured document URL; one of them must be set.
fn document_url(flag: Option<String>, config: &AppConfig) -> anyhow::Result<String> {
    flag.or_else(|| config.mvideo_commissions_url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no commission document URL; pass --url or set RRP_MVIDEO_COMMISSIONS_URL"
            )
        })
}

pub(crate) async fn run(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    command: CommissionsCommands,
) -> anyhow::Result<()> {
    match command {
        CommissionsCommands::Import {
            retailer,
            path,
            delimiter,
        } => {
            let retailer = profile(&retailer)?;
            let file = File::open(&path)
                .map_err(|e| anyhow::anyhow!("cannot open {}: {e}", path.display()))?;
            let import = from_delimited(file, delimiter)?;
            if import.schedule.is_empty() {
                anyhow::bail!(
                    "no commission rows found in {}; schedule left unchanged",
                    path.display()
                );
            }
            let written =
                rrp_db::replace_commission_schedule(pool, retailer.id(), &import.schedule).await?;
            println!(
                "{}: stored {written} categories, skipped {} row(s)",
                retailer.display_name(),
                import.skipped
            );
        }
        CommissionsCommands::Sync { retailer, url } => {
            let retailer = profile(&retailer)?;
            if !DOCUMENT_RETAILERS.contains(&retailer.id()) {
                anyhow::bail!(
                    "{} publishes no commission document; use `commissions import`",
                    retailer.id()
                );
            }
            let url = document_url(url, config)?;
            let client = DocumentClient::new(config.classifier_timeout_secs)?.with_retry(
                config.classifier_max_retries,
                config.classifier_retry_backoff_base_ms,
            );

            let rows = match client.fetch_rows(&url).await {
                Ok(rows) => rows,
                Err(RemoteError::UnsupportedDocument { url, kind }) => {
                    tracing::warn!(
                        url = %url,
                        kind = %kind,
                        "commission document is not a text table; convert it and use `commissions import`"
                    );
                    println!("schedule unchanged");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "commission document sync failed");
                    return Err(e.into());
                }
            };

            let import = from_document_rows(&rows);
            if import.schedule.is_empty() {
                tracing::warn!(url = %url, rows = rows.len(), "no commission rows recognised in document");
                println!("schedule unchanged");
                return Ok(());
            }
            let written =
                rrp_db::replace_commission_schedule(pool, retailer.id(), &import.schedule).await?;
            println!(
                "{}: synced {written} categories from {url}",
                retailer.display_name()
            );
        }
        CommissionsCommands::Show { retailer } => {
            let retailer = profile(&retailer)?;
            let (schedule, origin) = effective_schedule(pool, retailer.as_ref()).await?;

            println!("{} ({origin} schedule)", retailer.display_name());
            println!(
                "default commission: {:.1}%",
                retailer.default_commission_pct()
            );
            if schedule.is_empty() {
                println!("no categories; run `commissions sync` or `commissions import`");
                return Ok(());
            }
            println!("{:>7}  CATEGORY", "PCT");
            for entry in schedule.entries() {
                println!("{:>6.2}%  {}", entry.pct, entry.category);
            }
        }
    }

    Ok(())
}
