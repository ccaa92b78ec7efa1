//! Order submission
//!
//! `Idle → Submitting → Completed`. A submission validates the customer details, waits out the
//! simulated payment, records the order, empties the cart and announces the result.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    clock::Clock,
    engine::CartEngine,
    notifications::{NotificationBus, NotificationRequest},
    orders::{CustomerInfo, Order, OrderId, OrderStatus},
    storage::Storage,
};

/// Simulated payment processing time.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(3000);

const PROCESSING_TTL: Duration = Duration::from_millis(3000);
const SUCCESS_TTL: Duration = Duration::from_millis(4000);

/// Reasons a submission is refused before any payment starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required customer field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// This checkout has already been submitted.
    #[error("order already submitted")]
    AlreadySubmitted,
}

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// Waiting for the customer to submit.
    #[default]
    Idle,

    /// Payment in progress.
    Submitting,

    /// Order recorded.
    Completed(OrderId),
}

/// One checkout session.
#[derive(Debug)]
pub struct Checkout {
    storage: Storage,
    bus: NotificationBus,
    clock: Arc<dyn Clock>,
    processing_delay: Duration,
    state: CheckoutState,
}

impl Checkout {
    /// Creates an idle checkout.
    pub fn new(
        storage: Storage,
        bus: NotificationBus,
        clock: Arc<dyn Clock>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            storage,
            bus,
            clock,
            processing_delay,
            state: CheckoutState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Submits the cart held by `engine` as an order for `customer`.
    ///
    /// Failing to record the order is logged and does not stop the flow; the cart is still
    /// emptied and the order returned.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] without side effects if this checkout was already
    /// submitted, the cart is empty or a customer field is blank.
    pub async fn submit(
        &mut self,
        engine: &mut CartEngine,
        customer: CustomerInfo,
    ) -> Result<Order, CheckoutError> {
        if self.state != CheckoutState::Idle {
            return Err(CheckoutError::AlreadySubmitted);
        }

        if engine.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(field) = customer.missing_field() {
            return Err(CheckoutError::MissingField(field));
        }

        self.state = CheckoutState::Submitting;

        self.bus.publish(
            NotificationRequest::info("Processing Payment")
                .with_description("Please wait while we process your payment...")
                .with_ttl(PROCESSING_TTL),
        );

        let items = engine.items().to_vec();
        let total = engine.summary().total;

        tokio::time::sleep(self.processing_delay).await;

        let created_at = self.clock.now();

        let order = Order {
            id: self.next_order_id(created_at.as_millisecond()),
            items,
            total,
            customer_info: customer,
            status: OrderStatus::Processing,
            created_at,
        };

        if let Err(error) = self.storage.append_order(&order) {
            warn!(%error, order_id = %order.id, "failed to record order");
        }

        engine.clear();
        engine.flush_effects();

        self.bus.publish(
            NotificationRequest::success("Payment Successful!")
                .with_description(format!("Order {} has been placed successfully", order.id))
                .with_ttl(SUCCESS_TTL),
        );

        info!(order_id = %order.id, items = order.item_count(), total = %order.total, "order placed");

        self.state = CheckoutState::Completed(order.id.clone());

        Ok(order)
    }

    /// Id for an order placed at `millis`, moved past any id already in the log.
    fn next_order_id(&self, millis: i64) -> OrderId {
        let latest = self
            .storage
            .load_orders()
            .iter()
            .filter_map(|order| order.id.millis())
            .max();

        match latest {
            Some(latest) if latest >= millis => OrderId::from_millis(latest.saturating_add(1)),
            _ => OrderId::from_millis(millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tokio::time::Instant;

    use crate::{clock::ManualClock, notifications::NotificationSettings, products::Product};

    use super::*;

    struct Harness {
        engine: CartEngine,
        checkout: Checkout,
        storage: Storage,
        bus: NotificationBus,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let clock = Arc::new(ManualClock::default());
        let bus = NotificationBus::new(clock.clone(), NotificationSettings::default());
        let storage = Storage::in_memory();
        let engine = CartEngine::new(storage.clone(), bus.clone());
        let checkout = Checkout::new(
            storage.clone(),
            bus.clone(),
            clock.clone(),
            DEFAULT_PROCESSING_DELAY,
        );

        Harness {
            engine,
            checkout,
            storage,
            bus,
            clock,
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.test".to_string(),
            address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            zip_code: "N1 9GU".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submission_records_one_order_and_clears_cart() -> TestResult {
        let mut h = harness();
        h.engine.add_item(&Product::new(1, "Widget", Decimal::new(20, 0)));
        h.engine.add_item(&Product::new(1, "Widget", Decimal::new(20, 0)));
        h.engine.flush_effects();

        let started = Instant::now();
        let order = h.checkout.submit(&mut h.engine, customer()).await?;

        assert!(started.elapsed() >= DEFAULT_PROCESSING_DELAY);
        assert_eq!(order.total, Decimal::new(5319, 2));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.status, OrderStatus::Processing);

        assert_eq!(h.storage.load_orders(), vec![order.clone()]);
        assert!(h.engine.cart().is_empty());
        assert!(h.storage.load_cart().is_empty());
        assert_eq!(h.checkout.state(), &CheckoutState::Completed(order.id));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn announces_processing_and_success() -> TestResult {
        let mut h = harness();
        h.engine.add_item(&Product::new(1, "Widget", Decimal::new(60, 0)));
        h.engine.flush_effects();
        h.bus.clear();

        let mut checkout = Checkout::new(
            h.storage.clone(),
            h.bus.clone(),
            h.clock.clone(),
            Duration::from_millis(1000),
        );

        let order = checkout.submit(&mut h.engine, customer()).await?;

        let active = h.bus.active();
        let titles: Vec<&str> = active.iter().map(|n| n.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["Processing Payment", "Cart Cleared", "Payment Successful!"]
        );

        let expected = format!("Order {} has been placed successfully", order.id);

        let success = active.last().ok_or("nothing announced")?;

        assert_eq!(success.description.as_deref(), Some(expected.as_str()));
        assert_eq!(order.total, Decimal::new(6480, 2));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn processing_notice_expires_during_long_payment() -> TestResult {
        let mut h = harness();
        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));
        h.engine.flush_effects();
        h.bus.clear();

        let mut checkout = Checkout::new(
            h.storage.clone(),
            h.bus.clone(),
            h.clock.clone(),
            PROCESSING_TTL + Duration::from_millis(500),
        );

        checkout.submit(&mut h.engine, customer()).await?;

        let titles: Vec<String> = h.bus.active().into_iter().map(|n| n.title).collect();

        assert_eq!(titles, vec!["Cart Cleared", "Payment Successful!"]);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn order_id_comes_from_clock() -> TestResult {
        let mut h = harness();
        h.clock.advance(Duration::from_millis(1_718_000_000_000));
        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));

        let order = h.checkout.submit(&mut h.engine, customer()).await?;

        assert_eq!(order.id.as_str(), "ORDER-1718000000000");
        assert_eq!(order.created_at.as_millisecond(), 1_718_000_000_000);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn same_millisecond_orders_get_distinct_ids() -> TestResult {
        let mut h = harness();

        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));
        let first = h.checkout.submit(&mut h.engine, customer()).await?;

        let mut second_checkout = Checkout::new(
            h.storage.clone(),
            h.bus.clone(),
            h.clock.clone(),
            DEFAULT_PROCESSING_DELAY,
        );

        h.engine.add_item(&Product::new(2, "Gadget", Decimal::ONE));
        let second = second_checkout.submit(&mut h.engine, customer()).await?;

        assert_eq!(first.id.as_str(), "ORDER-0");
        assert_eq!(second.id.as_str(), "ORDER-1");
        assert_eq!(h.storage.load_orders().len(), 2);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn empty_cart_is_refused() {
        let mut h = harness();

        let result = h.checkout.submit(&mut h.engine, customer()).await;

        assert_eq!(result, Err(CheckoutError::EmptyCart));
        assert_eq!(h.checkout.state(), &CheckoutState::Idle);
        assert!(h.storage.load_orders().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_field_is_refused_without_side_effects() {
        let mut h = harness();
        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));

        let customer = CustomerInfo {
            email: String::new(),
            ..customer()
        };

        let result = h.checkout.submit(&mut h.engine, customer).await;

        assert_eq!(result, Err(CheckoutError::MissingField("email")));
        assert_eq!(h.engine.total_item_count(), 1);
        assert!(h.storage.load_orders().is_empty());
        assert_eq!(h.checkout.state(), &CheckoutState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_checkout_refuses_resubmission() -> TestResult {
        let mut h = harness();
        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));
        h.checkout.submit(&mut h.engine, customer()).await?;

        h.engine.add_item(&Product::new(1, "Widget", Decimal::ONE));

        let result = h.checkout.submit(&mut h.engine, customer()).await;

        assert_eq!(result, Err(CheckoutError::AlreadySubmitted));
        assert_eq!(h.storage.load_orders().len(), 1);

        Ok(())
    }
}
