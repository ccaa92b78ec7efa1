use std::io;

use clap::{Parser, Subcommand};
use storefront::{config::StorefrontConfig, context::StorefrontContext, views};

mod cart;
mod checkout;
mod orders;
mod products;
mod theme;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog
    Products,

    /// Add one unit of a product to the cart
    Add(cart::AddArgs),

    /// Remove a product from the cart
    Remove(cart::RemoveArgs),

    /// Set the quantity of a product in the cart
    Set(cart::SetArgs),

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// List placed orders, newest first
    Orders(orders::OrdersArgs),

    /// Show or select the theme
    Theme(theme::ThemeArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let mut context = StorefrontContext::from_config(&self.config)
            .map_err(|error| format!("failed to start storefront: {error}"))?;

        let result = match self.command {
            Commands::Products => products::run(&context).await,
            Commands::Add(args) => cart::add(args, &mut context).await,
            Commands::Remove(args) => cart::remove(&args, &mut context),
            Commands::Set(args) => cart::set(&args, &mut context),
            Commands::Cart => cart::show(&context),
            Commands::Clear => cart::clear(&mut context),
            Commands::Checkout(args) => checkout::run(args, &mut context).await,
            Commands::Orders(args) => orders::run(&args, &context),
            Commands::Theme(args) => theme::run(args, &context),
        };

        context.engine.flush_effects();

        views::write_notifications(io::stderr().lock(), &context.bus.active())
            .map_err(output_error)?;

        result
    }
}

pub(crate) fn output_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}
