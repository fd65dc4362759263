use uuid::Uuid;

/// Prefix of every issued cart identifier.
pub const CART_ID_PREFIX: &str = "cart-";

/// Issues opaque cart identifiers, one per shopping session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartIdIssuer;

impl CartIdIssuer {
    pub fn new() -> Self {
        Self
    }

    /// A fresh identifier, unique for the life of the process.
    pub fn issue(&self) -> String {
        format!("{}{}", CART_ID_PREFIX, Uuid::new_v4().simple())
    }
}
