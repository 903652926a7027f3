//! Cart commands.

use anyhow::{bail, Result};
use storefront_cart::{CartSnapshot, CartStore};
use storefront_commerce::ids::ProductId;
use storefront_commerce::Currency;

use super::{confirm, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_discount, phase_badge};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let store = ctx.cart_store(&backend)?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product, quantity } => {
            let spinner = ctx.output.spinner("Fetching product...");
            let added = store
                .add_from_catalog(&backend.catalog, ProductId::new(product), quantity)
                .await;
            spinner.finish_and_clear();
            added?;
            ensure_saved(&store, true)?;
            ctx.output
                .success(&format!("Added {} x product #{}", quantity, product));
        }
        CartCommand::Remove { product } => {
            let changed = store.remove_item(ProductId::new(product))?;
            report(ctx, &store, changed, product, "Removed")?;
        }
        CartCommand::Qty { product, quantity } => {
            let verb = if quantity <= 0 { "Removed" } else { "Updated" };
            let changed = store.update_quantity(ProductId::new(product), quantity)?;
            report(ctx, &store, changed, product, verb)?;
        }
        CartCommand::Dec { product } => {
            let changed = store.decrement(ProductId::new(product))?;
            report(ctx, &store, changed, product, "Decreased")?;
        }
        CartCommand::Toggle { product } => {
            let changed = store.toggle_selected(ProductId::new(product))?;
            report(ctx, &store, changed, product, "Toggled")?;
        }
        CartCommand::ToggleAll => {
            let changed = store.toggle_all_selected()?;
            ensure_saved(&store, changed)?;
            if !changed {
                ctx.output.info("Cart is empty.");
            }
        }
        CartCommand::Clear { yes } => {
            if !confirm("Empty the cart?", yes)? {
                ctx.output.warn("Cancelled");
                return Ok(());
            }
            store.clear()?;
            ensure_saved(&store, true)?;
            ctx.output.success("Cart cleared");
        }
    }

    print_cart(ctx, &store);
    Ok(())
}

fn report(ctx: &Context, store: &CartStore, changed: bool, product: u64, verb: &str) -> Result<()> {
    ensure_saved(store, changed)?;
    if changed {
        ctx.output.success(&format!("{} product #{}", verb, product));
    } else {
        ctx.output
            .warn(&format!("Product #{} is not in the cart or already at its limit", product));
    }
    Ok(())
}

/// Fail when the last change to the cart never reached disk.
///
/// The store keeps a change in memory even when writing it fails; the
/// next command would not see it.
pub(crate) fn ensure_saved(store: &CartStore, changed: bool) -> Result<()> {
    if !changed {
        return Ok(());
    }
    match store.last_persistence_error() {
        Some(error) => bail!("Cart change was not saved: {}", error),
        None => Ok(()),
    }
}

/// Print the cart and its totals.
pub(crate) fn print_cart(ctx: &Context, store: &CartStore) {
    let snapshot = store.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return;
    }

    print_snapshot(ctx, &snapshot, store.policy().currency);
}

fn print_snapshot(ctx: &Context, snapshot: &CartSnapshot, currency: Currency) {
    let cart = &snapshot.cart;
    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `storefront cart add <product-id>` to add a product.");
        return;
    }

    let widths = [3, 8, 36, 5, 12];
    ctx.output.table_row(&["SEL", "ID", "PRODUCT", "QTY", "LINE TOTAL"], &widths);
    for item in &cart.items {
        let selected = if item.selected { "[x]" } else { "[ ]" };
        let id = item.product_id().to_string();
        let quantity = item.quantity.to_string();
        let total = item
            .line_total()
            .map(|t| currency.format(t))
            .unwrap_or_else(|_| "overflow".to_string());
        ctx.output.table_row(
            &[selected, &id, &item.product.detail(), &quantity, &total],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Status", &phase_badge(snapshot.phase));

    let Some(totals) = &snapshot.totals else {
        ctx.output.warn("Totals could not be computed");
        return;
    };

    ctx.output.kv(
        "Selected",
        &format!(
            "{} item(s) in {} line(s)",
            totals.selected_item_count, totals.selected_line_count
        ),
    );
    ctx.output.kv("Subtotal", &currency.format(totals.selected_subtotal));
    ctx.output.kv("Shipping", &currency.format(totals.shipping_cost));
    ctx.output.kv(
        "Shipping discount",
        &format_discount(currency, totals.shipping_discount),
    );
    if let Some(coupon) = &cart.coupon {
        ctx.output.kv(
            &format!("Coupon {}", coupon.code),
            &format_discount(currency, totals.coupon_discount),
        );
    }
    ctx.output.kv("Total", &currency.format(totals.grand_total));

    let remaining = totals.amount_to_free_shipping();
    if totals.checkout_enabled() && remaining.is_positive() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            currency.format(remaining)
        ));
    }
    if !totals.checkout_enabled() {
        ctx.output.warn("Select at least one line to check out");
    }
}
