use clap::Args;
use storefront::{context::StorefrontContext, orders::CustomerInfo, pricing::format_money};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// Postal code
    #[arg(long)]
    zip_code: String,

    /// Phone number
    #[arg(long)]
    phone: String,
}

impl From<CheckoutArgs> for CustomerInfo {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            address: args.address,
            city: args.city,
            zip_code: args.zip_code,
            phone: args.phone,
        }
    }
}

pub(crate) async fn run(args: CheckoutArgs, context: &mut StorefrontContext) -> Result<(), String> {
    let order = context
        .checkout
        .submit(&mut context.engine, args.into())
        .await
        .map_err(|error| format!("checkout refused: {error}"))?;

    println!("order_id: {}", order.id);
    println!("items: {}", order.item_count());
    println!("total: {}", format_money(order.total));
    println!("status: {}", order.status);

    Ok(())
}
