//! Saved address commands.

use anyhow::Result;
use storefront_commerce::ids::AddressId;
use storefront_data::AddressBook;

use super::{confirm, AddressesArgs, AddressesCommand};
use crate::context::Context;

/// Run the addresses command.
pub async fn run(args: AddressesArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(AddressesCommand::List) {
        AddressesCommand::List => list_addresses(ctx).await,
        AddressesCommand::Delete { id, yes } => delete_address(id, yes, ctx).await,
    }
}

async fn list_addresses(ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading addresses...");
    let addresses = backend.addresses.list().await;
    spinner.finish_and_clear();
    let addresses = addresses?;

    if ctx.output.is_json() {
        ctx.output.json(&addresses);
        return Ok(());
    }

    ctx.output.header("Addresses");
    if addresses.is_empty() {
        ctx.output.info("No saved addresses.");
        return Ok(());
    }

    let widths = [6, 14, 22, 13, 40];
    ctx.output
        .table_row(&["ID", "TITLE", "RECIPIENT", "PHONE", "ADDRESS"], &widths);
    for address in &addresses {
        let id = address.id.to_string();
        ctx.output.table_row(
            &[
                &id,
                &address.title,
                &address.full_name(),
                &address.phone,
                &address.one_line(),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn delete_address(id: u64, yes: bool, ctx: &Context) -> Result<()> {
    if !confirm(&format!("Delete address #{}?", id), yes)? {
        ctx.output.warn("Cancelled");
        return Ok(());
    }

    let backend = ctx.backend()?;
    backend.addresses.delete(AddressId::new(id)).await?;
    ctx.output.success(&format!("Deleted address #{}", id));
    Ok(())
}
