//! Integration tests for cart engine and notification bus behaviour

use std::{sync::Arc, time::Duration};

use rust_decimal::Decimal;
use storefront::prelude::*;

fn session() -> (CartEngine, NotificationBus, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let bus = NotificationBus::new(clock.clone(), NotificationSettings::default());
    let engine = CartEngine::new(Storage::in_memory(), bus.clone());

    (engine, bus, clock)
}

#[test]
fn repeated_adds_keep_one_line_per_product() {
    let (mut engine, _, _) = session();
    let widget = Product::new(1, "Widget", Decimal::new(10, 0));

    for _ in 0..5 {
        engine.add_item(&widget);
    }

    assert_eq!(engine.items().len(), 1);
    assert_eq!(engine.total_item_count(), 5);
    assert_eq!(engine.total_price(), Decimal::new(50, 0));
}

#[test]
fn remove_is_idempotent() {
    let (mut engine, _, _) = session();
    engine.add_item(&Product::new(1, "Widget", Decimal::new(10, 0)));
    engine.add_item(&Product::new(2, "Gadget", Decimal::new(3, 0)));

    engine.remove_item(1);
    let once = engine.cart().clone();

    engine.remove_item(1);

    assert_eq!(engine.cart(), &once);
    assert_eq!(engine.total_price(), Decimal::new(3, 0));
}

#[test]
fn totals_stay_exact_over_many_mutations() {
    let (mut engine, _, _) = session();
    let cheap = Product::new(1, "Sticker", Decimal::new(1, 1));

    for _ in 0..10 {
        engine.add_item(&cheap);
    }

    assert_eq!(engine.total_price(), Decimal::ONE);

    engine.set_quantity(1, 3);

    assert_eq!(engine.total_price(), Decimal::new(3, 1));
}

#[test]
fn pricing_examples() {
    let above = PriceSummary::from_subtotal(Decimal::new(60, 0));
    let below = PriceSummary::from_subtotal(Decimal::new(40, 0));

    assert_eq!(above.total, Decimal::new(6480, 2));
    assert_eq!(below.total, Decimal::new(5319, 2));
    assert_eq!(format_money(below.total), "$53.19");
}

#[test]
fn same_notification_collapses_within_window() {
    let (_, bus, clock) = session();
    let request = NotificationRequest::success("Saved").with_description("Profile saved");

    let first = bus.publish(request.clone());
    clock.advance(Duration::from_millis(999));
    let second = bus.publish(request.clone());

    assert!(first.is_some());
    assert!(second.is_none());

    clock.advance(Duration::from_millis(1));

    assert!(bus.publish(request).is_some());
    assert_eq!(bus.active().len(), 2);
}

#[test]
fn different_severity_is_not_a_duplicate() {
    let (_, bus, _) = session();

    bus.publish(NotificationRequest::success("Heads up"));
    bus.publish(NotificationRequest::warning("Heads up"));

    assert_eq!(bus.active().len(), 2);
}

#[test]
fn cart_notifications_wait_for_flush() {
    let (mut engine, bus, _) = session();
    let receiver = bus.subscribe();

    engine.add_item(&Product::new(1, "Widget", Decimal::new(10, 0)));

    assert!(receiver.borrow().is_empty());

    engine.flush_effects();

    let titles: Vec<String> = receiver.borrow().iter().map(|n| n.title.clone()).collect();

    assert_eq!(titles, vec!["Added to Cart"]);
}
