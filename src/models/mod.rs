//! Domain records shared by the stores and the HTTP surface.
//!
//! Responses serialise with camelCase field names. Incoming JSON is matched
//! case-insensitively through [`wire::from_slice_ignore_case`], so every
//! deserialisable record names its fields in folded form (lowercase, no
//! separators).

mod cart;
mod order;
mod product;
pub mod wire;

pub use cart::{Cart, CartItem};
pub use order::{order_number, Order, OrderItem, OrderStatus, UnknownOrderStatus};
pub use product::Product;

/// Product identifier assigned at catalog load.
pub type ProductId = i32;

/// Order identifier assigned sequentially by the order recorder.
pub type OrderId = i32;
