//! CLI command implementations.

pub mod addresses;
pub mod cards;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show lines and totals.
    Show,
    /// Add a product from the catalog.
    Add {
        /// Product ID.
        product: u64,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        product: u64,
    },
    /// Set a line's quantity; zero or less removes it.
    Qty {
        /// Product ID.
        product: u64,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Decrease a line's quantity by one, never below one.
    Dec {
        /// Product ID.
        product: u64,
    },
    /// Flip whether a line is included in the order.
    Toggle {
        /// Product ID.
        product: u64,
    },
    /// Select every line, or deselect all if every line is selected.
    ToggleAll,
    /// Empty the cart and forget checkout selections.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Ship to a saved address.
    Address {
        /// Address ID.
        id: u64,
    },
    /// Bill to a different saved address.
    Billing {
        /// Address ID.
        id: u64,
    },
    /// Bill to the shipping address.
    SameBilling {
        /// Whether billing follows shipping.
        #[arg(action = clap::ArgAction::Set)]
        same: bool,
    },
    /// Pay with a saved card.
    Payment {
        /// Card ID.
        id: u64,
        /// Skip 3-D Secure.
        #[arg(long)]
        no_3ds: bool,
    },
    /// Apply or remove a coupon.
    Coupon {
        /// Coupon code.
        #[arg(required_unless_present = "remove")]
        code: Option<String>,
        /// Remove the applied coupon.
        #[arg(long, conflicts_with = "code")]
        remove: bool,
    },
    /// Place the order for the selected lines.
    Submit {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List past orders.
    List,
    /// Show one order.
    Show {
        /// Order ID.
        id: u64,
    },
}

/// Arguments for the addresses command.
#[derive(Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: Option<AddressesCommand>,
}

#[derive(Subcommand)]
pub enum AddressesCommand {
    /// List saved addresses.
    List,
    /// Delete a saved address.
    Delete {
        /// Address ID.
        id: u64,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the cards command.
#[derive(Args)]
pub struct CardsArgs {
    #[command(subcommand)]
    pub command: Option<CardsCommand>,
}

#[derive(Subcommand)]
pub enum CardsCommand {
    /// List saved cards.
    List,
    /// Delete a saved card.
    Delete {
        /// Card ID.
        id: u64,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,

    /// Only products in this category.
    #[arg(long, global = true)]
    pub category: Option<u64>,

    /// Free-text filter.
    #[arg(short, long, global = true)]
    pub filter: Option<String>,

    /// Sort order (price:asc, price:desc, rating:asc, rating:desc).
    #[arg(short, long, global = true)]
    pub sort: Option<String>,

    /// Page size.
    #[arg(short, long, global = true, default_value = "25")]
    pub limit: u32,

    /// Results to skip.
    #[arg(long, global = true)]
    pub offset: Option<u32>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products.
    List,
    /// Show one product.
    Show {
        /// Product ID.
        id: u64,
    },
    /// List categories.
    Categories,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Ask before a destructive step unless `yes` was given.
pub(crate) fn confirm(prompt: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
