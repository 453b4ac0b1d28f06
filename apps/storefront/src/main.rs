//! # MyCoffee Storefront
//!
//! Console front-end for the MyCoffee HAL backend.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. tracing-subscriber (RUST_LOG, default "info")                      │
//! │  2. ClientConfig::load  defaults → storefront.toml → MYCOFFEE_* env    │
//! │  3. --base-url override, then HalClient::new (validates)               │
//! │  4. StaticCredentials from [credentials]                               │
//! │  5. run the subcommand against Storefront                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mycoffee_hal::auth::StaticCredentials;
use mycoffee_hal::{ClientConfig, HalClient};
use mycoffee_services::Storefront;

#[derive(Parser, Debug)]
#[command(author, version, about = "MyCoffee storefront console")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured backend URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the catalog
    Products,
    /// Shows who the configured credentials belong to
    Whoami,
    /// Basket commands
    #[command(subcommand)]
    Basket(BasketCommand),
    /// Inventory board commands (business accounts)
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Lists records owned by the signed-in user
    Records,
    /// Writes the effective configuration to the config file
    SaveConfig,
}

#[derive(Subcommand, Debug)]
enum BasketCommand {
    /// Adds a product to your basket, creating the basket if needed
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Shows a basket with prices and total (yours when no id is given)
    Show { basket_id: Option<String> },
}

#[derive(Subcommand, Debug)]
enum InventoryCommand {
    /// Lists your inventories
    List,
    /// Changes the stock of the inventory at HREF by DELTA
    Adjust {
        href: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let mut config = ClientConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    if let Command::SaveConfig = cli.command {
        config.save(cli.config).context("saving configuration")?;
        return Ok(());
    }

    let auth = Arc::new(StaticCredentials::from_config(&config.credentials));
    let client = HalClient::new(config, auth).context("building HAL client")?;
    info!(base_url = %client.config().base_url(), "Storefront ready");

    let storefront = Storefront::new(client);

    match cli.command {
        Command::Products => commands::products(&storefront).await,
        Command::Whoami => commands::whoami(&storefront).await,
        Command::Basket(BasketCommand::Add {
            product_id,
            quantity,
        }) => commands::basket_add(&storefront, &product_id, quantity).await,
        Command::Basket(BasketCommand::Show { basket_id }) => {
            commands::basket_show(&storefront, basket_id.as_deref()).await
        }
        Command::Inventory(InventoryCommand::List) => commands::inventory_list(&storefront).await,
        Command::Inventory(InventoryCommand::Adjust { href, delta }) => {
            commands::inventory_adjust(&storefront, &href, delta).await
        }
        Command::Records => commands::records(&storefront).await,
        Command::SaveConfig => Ok(()),
    }
}
