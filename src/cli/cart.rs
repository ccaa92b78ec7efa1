use std::io;

use clap::Args;
use storefront::{context::StorefrontContext, products::ProductId, views};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog product id
    id: ProductId,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Product id of the cart line
    id: ProductId,
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    /// Product id of the cart line
    id: ProductId,

    /// New quantity; zero or less removes the line
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn add(args: AddArgs, context: &mut StorefrontContext) -> Result<(), String> {
    let products = context
        .products
        .load()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;

    let product = products
        .iter()
        .find(|product| product.id == args.id)
        .ok_or_else(|| format!("no product with id {}", args.id))?;

    context.engine.add_item(product);

    show(context)
}

pub(crate) fn remove(args: &RemoveArgs, context: &mut StorefrontContext) -> Result<(), String> {
    context.engine.remove_item(args.id);

    show(context)
}

pub(crate) fn set(args: &SetArgs, context: &mut StorefrontContext) -> Result<(), String> {
    context.engine.set_quantity(args.id, args.quantity);

    show(context)
}

pub(crate) fn clear(context: &mut StorefrontContext) -> Result<(), String> {
    context.engine.clear();

    show(context)
}

pub(crate) fn show(context: &StorefrontContext) -> Result<(), String> {
    views::write_cart(io::stdout().lock(), context.engine.cart()).map_err(output_error)
}
