//! Checkout commands.

use anyhow::{anyhow, bail, Result};
use storefront_cart::CartStore;
use storefront_commerce::checkout::{missing_for_submission, OrderConfirmation};
use storefront_commerce::ids::{AddressId, OrderId, PaymentMethodId};
use storefront_data::{AddressBook, PaymentMethods};

use super::cart::{ensure_saved, print_cart};
use super::{confirm, CheckoutArgs, CheckoutCommand};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let store = ctx.cart_store(&backend)?;

    match args.command {
        CheckoutCommand::Address { id } => {
            let address = backend
                .addresses
                .find(AddressId::new(id))
                .await?
                .ok_or_else(|| anyhow!("Address #{} not found", id))?;
            store.set_shipping_address(address.reference())?;
            ensure_saved(&store, true)?;
            ctx.output
                .success(&format!("Shipping to {}", address.one_line()));
        }
        CheckoutCommand::Billing { id } => {
            let address = backend
                .addresses
                .find(AddressId::new(id))
                .await?
                .ok_or_else(|| anyhow!("Address #{} not found", id))?;
            store.set_billing_address(address.reference())?;
            ensure_saved(&store, true)?;
            ctx.output
                .success(&format!("Billing to {}", address.one_line()));
        }
        CheckoutCommand::SameBilling { same } => {
            store.set_same_billing_address(same)?;
            ensure_saved(&store, true)?;
            if same {
                ctx.output.success("Billing address follows the shipping address");
            } else {
                ctx.output.success("Billing address can be set separately");
            }
        }
        CheckoutCommand::Payment { id, no_3ds } => {
            let card = backend
                .cards
                .find(PaymentMethodId::new(id))
                .await?
                .ok_or_else(|| anyhow!("Card #{} not found", id))?;
            let masked = card.masked_number.clone();
            store.set_payment(card, !no_3ds)?;
            ensure_saved(&store, true)?;
            ctx.output.success(&format!(
                "Paying with {}{}",
                masked,
                if no_3ds { "" } else { " (3-D Secure)" }
            ));
        }
        CheckoutCommand::Coupon { remove: true, .. } => {
            let removed = store.remove_coupon()?;
            ensure_saved(&store, removed)?;
            if removed {
                ctx.output.success("Coupon removed");
            } else {
                ctx.output.info("No coupon applied");
            }
        }
        CheckoutCommand::Coupon { code, .. } => {
            let code = code.unwrap_or_default();
            let spinner = ctx.output.spinner("Checking coupon...");
            let applied = store.apply_coupon(&code).await;
            spinner.finish_and_clear();
            let coupon = applied?;
            ensure_saved(&store, true)?;
            ctx.output.success(&format!(
                "Applied {} ({})",
                coupon.code,
                coupon.value.label()
            ));
        }
        CheckoutCommand::Submit { yes } => return submit(yes, &store, ctx).await,
    }

    print_cart(ctx, &store);
    Ok(())
}

async fn submit(yes: bool, store: &CartStore, ctx: &Context) -> Result<()> {
    print_cart(ctx, store);

    // Incomplete checkouts go straight to the store so the error names what is missing.
    let missing = missing_for_submission(&store.cart());
    if missing.is_empty() {
        let total = store.totals()?.grand_total;
        let prompt = format!("Place order for {}?", store.policy().currency.format(total));
        if !confirm(&prompt, yes || ctx.output.is_json())? {
            ctx.output.warn("Order not placed");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = store.submit_order().await;
    spinner.finish_and_clear();
    let confirmation = result?;

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
    } else {
        print_confirmation(&confirmation, store, ctx);
    }

    ensure_cleared(store, confirmation.id)
}

/// Fail when the emptied cart behind a placed order never reached disk.
/// The next run would load the old cart and could submit it twice.
fn ensure_cleared(store: &CartStore, order: OrderId) -> Result<()> {
    match store.last_persistence_error() {
        Some(error) => bail!(
            "Order #{} was placed but the emptied cart was not saved ({}). \
             Run `storefront cart clear` before ordering again.",
            order,
            error
        ),
        None => Ok(()),
    }
}

fn print_confirmation(confirmation: &OrderConfirmation, store: &CartStore, ctx: &Context) {
    ctx.output
        .success(&format!("Order #{} placed", confirmation.id));
    if let Some(price) = confirmation.price {
        ctx.output
            .kv("Charged", &store.policy().currency.format(price));
    }
    if let Some(date) = &confirmation.order_date {
        ctx.output.kv("Date", date);
    }
    ctx.output.info("Run `storefront orders` to see your order history.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{test_store, unwritable_test_store};

    #[test]
    fn test_unsaved_order_cart_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = unwritable_test_store(dir.path());
        store.clear().unwrap();

        let err = ensure_cleared(&store, OrderId::new(1001)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Order #1001 was placed"));
        assert!(message.contains("storefront cart clear"));
    }

    #[test]
    fn test_saved_order_cart_passes() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());
        store.clear().unwrap();
        ensure_cleared(&store, OrderId::new(1001)).unwrap();
    }
}
