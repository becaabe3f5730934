//! # State Module
//!
//! Session state for the console. The cart is the only mutable state; the
//! configuration is read-only after startup and passed by reference.

mod cart;

pub use cart::CartState;
