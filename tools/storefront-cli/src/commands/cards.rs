//! Saved card commands.

use anyhow::Result;
use storefront_commerce::ids::PaymentMethodId;
use storefront_data::PaymentMethods;

use super::{confirm, CardsArgs, CardsCommand};
use crate::context::Context;

/// Run the cards command.
pub async fn run(args: CardsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CardsCommand::List) {
        CardsCommand::List => list_cards(ctx).await,
        CardsCommand::Delete { id, yes } => delete_card(id, yes, ctx).await,
    }
}

async fn list_cards(ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading cards...");
    let cards = backend.cards.list().await;
    spinner.finish_and_clear();
    let cards = cards?;

    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    ctx.output.header("Cards");
    if cards.is_empty() {
        ctx.output.info("No saved cards.");
        return Ok(());
    }

    let widths = [6, 22, 24, 7];
    ctx.output
        .table_row(&["ID", "NUMBER", "NAME", "EXPIRES"], &widths);
    for card in &cards {
        let id = card.id.to_string();
        ctx.output.table_row(
            &[&id, &card.masked_number, &card.name_on_card, &card.expiry_label()],
            &widths,
        );
    }
    Ok(())
}

async fn delete_card(id: u64, yes: bool, ctx: &Context) -> Result<()> {
    if !confirm(&format!("Delete card #{}?", id), yes)? {
        ctx.output.warn("Cancelled");
        return Ok(());
    }

    let backend = ctx.backend()?;
    backend.cards.delete(PaymentMethodId::new(id)).await?;
    ctx.output.success(&format!("Deleted card #{}", id));
    Ok(())
}
