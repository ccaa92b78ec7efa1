use std::io;

use storefront::{context::StorefrontContext, views};

use super::output_error;

pub(crate) async fn run(context: &StorefrontContext) -> Result<(), String> {
    let products = context
        .products
        .load()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;

    views::write_products(io::stdout().lock(), &products).map_err(output_error)
}
