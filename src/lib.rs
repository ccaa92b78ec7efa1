//! Storefront
//!
//! Storefront is the core of a small online shop: a cart engine with an explicit effect queue,
//! a notification bus with duplicate suppression, local persistence for the cart, order log
//! and theme, and a simulated checkout that turns the cart into an order.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod context;
pub mod engine;
pub mod items;
pub mod notifications;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod themes;
pub mod views;
