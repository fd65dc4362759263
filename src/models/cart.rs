use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{Product, ProductId};

/// A cart line.
///
/// Name, price and image are captured when the line is created so the line
/// keeps rendering after the product is withdrawn or repriced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CartItem {
    #[serde(rename(deserialize = "productid"))]
    pub product_id: ProductId,
    #[serde(rename(deserialize = "productname"))]
    pub product_name: String,
    #[serde(rename(deserialize = "price"))]
    pub price: Decimal,
    #[serde(rename(deserialize = "quantity"))]
    pub quantity: u32,
    #[serde(rename(deserialize = "imageurl"), default)]
    pub image_url: String,
}

impl CartItem {
    /// Capture a new line from the product's current listing.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A shopping cart keyed by an opaque cart identifier.
///
/// `totalAmount` and `totalItems` are derived: they are written on
/// serialisation and ignored on input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cart {
    #[serde(rename(deserialize = "cartid"))]
    pub cart_id: String,
    #[serde(rename(deserialize = "items"), default)]
    pub items: Vec<CartItem>,
    #[serde(rename(deserialize = "createdat"))]
    pub created_at: DateTime<Utc>,
    #[serde(rename(deserialize = "updatedat"))]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(cart_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            cart_id: cart_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of price x quantity across all lines.
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Cart", 6)?;
        state.serialize_field("cartId", &self.cart_id)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.serialize_field("totalAmount", &self.total_amount())?;
        state.serialize_field("totalItems", &self.total_items())?;
        state.end()
    }
}
