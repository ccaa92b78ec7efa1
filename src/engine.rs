//! Cart engine
//!
//! Sole owner of the cart. Every mutation applies synchronously and then queues its side
//! effects (persist the new cart, publish a notification). Nothing leaves the engine until
//! the caller drains the queue with [`CartEngine::flush_effects`] after its own update step,
//! so a notification can never be dispatched while the mutation that caused it is still
//! in progress.

use std::{collections::VecDeque, time::Duration};

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use crate::{
    cart::{Added, Cart},
    items::LineItem,
    notifications::{NotificationBus, NotificationRequest},
    pricing::PriceSummary,
    products::{Product, ProductId},
    storage::Storage,
};

/// Suppression window used for cart notifications.
pub const CART_SUPPRESSION_WINDOW: Duration = Duration::from_millis(500);

const CHANGE_TTL: Duration = Duration::from_millis(3000);
const QUANTITY_TTL: Duration = Duration::from_millis(2000);

/// Side effect queued by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write this cart snapshot to storage.
    Persist(Cart),

    /// Publish this notification.
    Notify(NotificationRequest),
}

/// Authoritative cart state and its mutation operations.
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    storage: Storage,
    bus: NotificationBus,
    suppression_window: Duration,
    effects: VecDeque<Effect>,
    sender: watch::Sender<Cart>,
}

impl CartEngine {
    /// Creates an engine holding the cart found in `storage`.
    pub fn new(storage: Storage, bus: NotificationBus) -> Self {
        Self::with_suppression_window(storage, bus, CART_SUPPRESSION_WINDOW)
    }

    /// Creates an engine whose notifications use `window` for duplicate suppression.
    pub fn with_suppression_window(
        storage: Storage,
        bus: NotificationBus,
        window: Duration,
    ) -> Self {
        let cart = storage.load_cart();
        let (sender, _) = watch::channel(cart.clone());

        debug!(lines = cart.len(), "cart loaded");

        Self {
            cart,
            storage,
            bus,
            suppression_window: window,
            effects: VecDeque::new(),
            sender,
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current line items.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of line totals, unrounded.
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Shipping, tax and total for the current cart.
    pub fn summary(&self) -> PriceSummary {
        self.cart.summary()
    }

    /// Receiver holding the latest cart, updated as soon as a mutation applies.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.sender.subscribe()
    }

    /// Adds one unit of `product`; a line already at `u32::MAX` is left alone.
    pub fn add_item(&mut self, product: &Product) {
        let notification = match self.cart.add(product) {
            Added::New => NotificationRequest::success("Added to Cart")
                .with_description(format!("{} has been added to your cart", product.title)),
            Added::Incremented(quantity) => NotificationRequest::success("Item Updated")
                .with_description(format!(
                    "{} quantity increased to {quantity}",
                    product.title
                )),
            Added::Unchanged => return,
        };

        self.commit(notification.with_ttl(CHANGE_TTL));
    }

    /// Removes the line for `id`; absent ids are ignored.
    pub fn remove_item(&mut self, id: ProductId) {
        let Some(removed) = self.cart.remove(id) else {
            return;
        };

        self.commit(
            NotificationRequest::info("Item Removed")
                .with_description(format!("{} has been removed from your cart", removed.title))
                .with_ttl(CHANGE_TTL),
        );
    }

    /// Sets the quantity for `id`; zero or less removes the line.
    ///
    /// Quantities above `u32::MAX` are clamped to `u32::MAX`.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);

            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(item) = self.cart.set_quantity(id, quantity) else {
            return;
        };

        let notification = NotificationRequest::success("Quantity Updated")
            .with_description(format!("{} quantity changed to {quantity}", item.title))
            .with_ttl(QUANTITY_TTL);

        self.commit(notification);
    }

    /// Empties the cart; clearing an empty cart does nothing.
    pub fn clear(&mut self) {
        if self.cart.clear() == 0 {
            return;
        }

        self.commit(
            NotificationRequest::warning("Cart Cleared")
                .with_description("All items have been removed from your cart")
                .with_ttl(CHANGE_TTL),
        );
    }

    /// Effects queued since the last flush, oldest first.
    pub fn pending_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Applies queued effects in order, returning how many ran.
    pub fn flush_effects(&mut self) -> usize {
        let mut applied = 0;

        while let Some(effect) = self.effects.pop_front() {
            match effect {
                Effect::Persist(cart) => self.storage.save_cart(&cart),
                Effect::Notify(request) => {
                    self.bus.publish_within(request, self.suppression_window);
                }
            }

            applied += 1;
        }

        applied
    }

    fn commit(&mut self, notification: NotificationRequest) {
        self.sender.send_replace(self.cart.clone());

        self.effects.push_back(Effect::Persist(self.cart.clone()));
        self.effects.push_back(Effect::Notify(notification));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        clock::ManualClock,
        notifications::{NotificationSettings, Severity},
    };

    use super::*;

    struct Harness {
        engine: CartEngine,
        storage: Storage,
        bus: NotificationBus,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let clock = Arc::new(ManualClock::default());
        let bus = NotificationBus::new(clock.clone(), NotificationSettings::default());
        let storage = Storage::in_memory();
        let engine = CartEngine::new(storage.clone(), bus.clone());

        Harness {
            engine,
            storage,
            bus,
            clock,
        }
    }

    fn widget() -> Product {
        Product::new(1, "Widget", Decimal::new(10, 0))
    }

    fn titles(bus: &NotificationBus) -> Vec<String> {
        bus.active().into_iter().map(|n| n.title).collect()
    }

    #[test]
    fn add_twice_gives_quantity_two() {
        let mut h = harness();

        h.engine.add_item(&widget());
        h.engine.add_item(&widget());
        h.engine.flush_effects();

        assert_eq!(h.engine.items().len(), 1);
        assert_eq!(h.engine.cart().get(1).map(|item| item.quantity), Some(2));
        assert_eq!(h.engine.total_price(), Decimal::new(2000, 2));
        assert_eq!(titles(&h.bus), vec!["Added to Cart", "Item Updated"]);
    }

    #[test]
    fn item_updated_carries_new_quantity() {
        let mut h = harness();

        h.engine.add_item(&widget());
        h.engine.add_item(&widget());
        h.engine.add_item(&widget());
        h.engine.flush_effects();

        let last = h.bus.active().pop().and_then(|n| n.description);

        assert_eq!(last.as_deref(), Some("Widget quantity increased to 3"));
    }

    #[test]
    fn state_is_visible_before_effects_run() {
        let mut h = harness();

        h.engine.add_item(&widget());

        assert_eq!(h.engine.total_item_count(), 1);
        assert!(h.bus.active().is_empty());
        assert!(h.storage.load_cart().is_empty());
        assert_eq!(h.engine.pending_effects().count(), 2);

        assert_eq!(h.engine.flush_effects(), 2);
        assert_eq!(h.bus.active().len(), 1);
        assert_eq!(h.storage.load_cart().total_item_count(), 1);
        assert_eq!(h.engine.pending_effects().count(), 0);
    }

    #[test]
    fn second_remove_is_silent() {
        let mut h = harness();
        h.engine.add_item(&widget());
        h.engine.flush_effects();
        h.bus.clear();

        h.engine.remove_item(1);
        h.engine.flush_effects();

        assert!(h.engine.cart().is_empty());
        assert_eq!(titles(&h.bus), vec!["Item Removed"]);

        h.engine.remove_item(1);

        assert_eq!(h.engine.pending_effects().count(), 0);
    }

    #[test]
    fn removed_notification_names_item() {
        let mut h = harness();
        h.engine.add_item(&widget());
        h.engine.remove_item(1);
        h.engine.flush_effects();

        let removed = h
            .bus
            .active()
            .into_iter()
            .find(|n| n.title == "Item Removed");

        assert_eq!(removed.map(|n| n.severity), Some(Severity::Info));
    }

    #[test]
    fn set_quantity_zero_matches_remove() {
        let mut by_set = harness();
        let mut by_remove = harness();

        for h in [&mut by_set, &mut by_remove] {
            h.engine.add_item(&widget());
            h.engine.add_item(&Product::new(2, "Gadget", Decimal::new(5, 0)));
        }

        by_set.engine.set_quantity(1, 0);
        by_remove.engine.remove_item(1);

        assert_eq!(by_set.engine.cart(), by_remove.engine.cart());

        by_set.engine.set_quantity(2, -3);

        assert!(by_set.engine.cart().get(2).is_none());
    }

    #[test]
    fn unchanged_quantity_is_a_no_op() {
        let mut h = harness();
        h.engine.add_item(&widget());
        h.engine.flush_effects();

        h.engine.set_quantity(1, 1);
        h.engine.set_quantity(99, 4);

        assert_eq!(h.engine.pending_effects().count(), 0);

        h.engine.set_quantity(1, 5);
        h.engine.flush_effects();

        assert_eq!(h.engine.total_item_count(), 5);
        assert!(titles(&h.bus).contains(&"Quantity Updated".to_string()));
    }

    #[test]
    fn oversized_quantity_is_clamped() {
        let mut h = harness();
        h.engine.add_item(&widget());
        h.engine.set_quantity(1, i64::MAX);
        h.engine.flush_effects();

        assert_eq!(h.engine.total_item_count(), u64::from(u32::MAX));

        let last = h.bus.active().pop().and_then(|n| n.description);

        assert_eq!(
            last,
            Some(format!("Widget quantity changed to {}", u32::MAX))
        );
    }

    #[test]
    fn add_at_max_quantity_is_silent() {
        let mut h = harness();
        h.engine.add_item(&widget());
        h.engine.set_quantity(1, i64::from(u32::MAX));
        h.engine.flush_effects();

        h.engine.add_item(&widget());

        assert_eq!(h.engine.pending_effects().count(), 0);
        assert_eq!(h.engine.total_item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn clearing_empty_cart_is_silent() {
        let mut h = harness();

        h.engine.clear();

        assert_eq!(h.engine.pending_effects().count(), 0);

        h.engine.add_item(&widget());
        h.engine.clear();
        h.engine.flush_effects();

        assert!(h.engine.cart().is_empty());
        assert!(titles(&h.bus).contains(&"Cart Cleared".to_string()));
        assert!(h.storage.load_cart().is_empty());
    }

    #[test]
    fn add_then_remove_restores_total_exactly() {
        let mut h = harness();
        h.engine.add_item(&Product::new(5, "Tea", Decimal::new(333, 2)));
        let before = h.engine.total_price();

        h.engine.add_item(&Product::new(6, "Cup", Decimal::new(1, 1)));
        h.engine.remove_item(6);

        assert_eq!(h.engine.total_price(), before);
    }

    #[test]
    fn cart_duplicates_use_shorter_window() {
        let mut h = harness();

        h.engine.add_item(&widget());
        h.engine.remove_item(1);
        h.engine.flush_effects();

        h.clock.advance(Duration::from_millis(600));

        h.engine.add_item(&widget());
        h.engine.flush_effects();

        let added = titles(&h.bus)
            .into_iter()
            .filter(|title| title == "Added to Cart")
            .count();

        assert_eq!(added, 2);
    }

    #[test]
    fn engine_starts_from_stored_cart() {
        let h = harness();
        let mut first = CartEngine::new(h.storage.clone(), h.bus.clone());
        first.add_item(&widget());
        first.add_item(&widget());
        first.flush_effects();

        let second = CartEngine::new(h.storage.clone(), h.bus.clone());

        assert_eq!(second.cart(), first.cart());
    }

    #[test]
    fn subscribers_see_mutations_immediately() {
        let mut h = harness();
        let receiver = h.engine.subscribe();

        h.engine.add_item(&widget());

        assert_eq!(receiver.borrow().total_item_count(), 1);
    }
}
