//! # Commands Module
//!
//! Functions the view calls to read and change the cart. Each takes the
//! session's [`CartState`](crate::state::CartState) and returns a
//! serializable response or an [`ApiError`](crate::error::ApiError).

pub mod cart;

pub use cart::{
    add_to_cart, clear_cart, get_cart, remove_from_cart, remove_from_cart_by_key,
    update_cart_item, update_cart_item_by_key, CartResponse,
};
