use std::io;

use clap::Args;
use storefront::{cart::Cart, context::StorefrontContext, orders::OrderId, views};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    /// Show a single order with its items
    #[arg(long)]
    id: Option<String>,
}

pub(crate) fn run(args: &OrdersArgs, context: &StorefrontContext) -> Result<(), String> {
    let mut out = io::stdout().lock();

    let Some(id) = args.id.as_deref() else {
        let mut orders = context.storage.load_orders();
        orders.reverse();

        return views::write_orders(&mut out, &orders).map_err(output_error);
    };

    let order = context
        .storage
        .find_order(&OrderId::from(id))
        .ok_or_else(|| format!("no order with id {id}"))?;

    views::write_orders(&mut out, std::slice::from_ref(&order)).map_err(output_error)?;
    views::write_cart(&mut out, &Cart::from(order.items)).map_err(output_error)
}
