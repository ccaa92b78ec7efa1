//! Terminal views
//!
//! Plain renderers for the command-line front-end. Each writes to any [`io::Write`] so the
//! output can be captured in tests.

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    cart::Cart,
    notifications::{Notification, Severity},
    orders::Order,
    pricing::format_money,
    products::Product,
    themes::ThemeId,
};

/// Writes the catalog as a table.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products available.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Product", "Category", "Rating", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.category.clone(),
            format!("{:.1} ({})", product.rating.rate, product.rating.count),
            format_money(product.price),
        ]);
    }

    write_table(&mut out, builder, 3..5)
}

/// Writes the cart lines followed by the price breakdown.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Item", "Qty", "Price", "Total"]);

    for item in cart.items() {
        builder.push_record([
            item.id.to_string(),
            item.title.clone(),
            item.quantity.to_string(),
            format_money(item.unit_price),
            format_money(item.line_total()),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;

    let summary = cart.summary();

    let shipping = if summary.has_free_shipping() {
        "FREE".to_string()
    } else {
        format_money(summary.shipping)
    };

    let lines = [
        ("Items:", cart.total_item_count().to_string()),
        ("Subtotal:", format_money(summary.subtotal)),
        ("Shipping:", shipping),
        ("Tax:", format_money(summary.tax)),
        ("Total:", format_money(summary.total)),
    ];

    let value_width = lines
        .iter()
        .map(|(_, value)| value.len())
        .max()
        .unwrap_or_default();

    for (label, value) in lines {
        writeln!(out, " {label:<10}{value:>value_width$}")?;
    }

    Ok(())
}

/// Writes orders in the order given.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[Order]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders yet.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Placed", "Items", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.created_at.strftime("%Y-%m-%d %H:%M UTC").to_string(),
            order.item_count().to_string(),
            format_money(order.total),
            order.status.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..4)
}

/// Writes one line per active notification.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_notifications(
    mut out: impl io::Write,
    notifications: &[Notification],
) -> io::Result<()> {
    for notification in notifications {
        let marker = match notification.severity {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Warning => "!",
            Severity::Info => "i",
        };

        match &notification.description {
            Some(description) => writeln!(out, "{marker} {}: {description}", notification.title)?,
            None => writeln!(out, "{marker} {}", notification.title)?,
        }
    }

    Ok(())
}

/// Writes the theme menu, marking the selected one.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_themes(mut out: impl io::Write, selected: ThemeId) -> io::Result<()> {
    for theme in ThemeId::ALL {
        let marker = if theme == selected { "*" } else { " " };

        writeln!(out, "{marker} {theme}  {}", theme.name())?;
    }

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Range<usize>,
) -> io::Result<()> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "{table}")
}
