//! Storefront CLI - shop against the storefront API from the terminal.
//!
//! Commands:
//! - `storefront cart` - Inspect and edit the persisted cart
//! - `storefront checkout` - Pick address and payment, apply coupons, place the order
//! - `storefront orders` - Order history
//! - `storefront addresses` - Saved addresses
//! - `storefront cards` - Saved payment cards
//! - `storefront products` - Browse the catalog
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AddressesArgs, CardsArgs, CartArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductsArgs,
};

/// Storefront CLI - cart, checkout and orders for the storefront API
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the cart
    Cart(CartArgs),

    /// Prepare and submit the order
    Checkout(CheckoutArgs),

    /// Order history
    Orders(OrdersArgs),

    /// Saved addresses
    Addresses(AddressesArgs),

    /// Saved payment cards
    Cards(CardsArgs),

    /// Browse products
    Products(ProductsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn setup_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("storefront=debug,storefront_cart=debug,storefront_data=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Addresses(args) => commands::addresses::run(args, &ctx).await,
        Commands::Cards(args) => commands::cards::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
