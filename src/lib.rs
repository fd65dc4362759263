//! Gift Palette - gift shop service
//!
//! Product catalog, per-session shopping carts, order history and a chat
//! assistant that can act on the cart, served over a JSON HTTP API.

pub mod api;
pub mod cart;
pub mod chat;
pub mod config;
pub mod inventory;
pub mod models;
pub mod orders;
pub mod utils;
