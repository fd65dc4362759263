//! Cart access for the chat assistant.
//!
//! [`HttpCartClient`] calls the cart API over the network; [`LocalCartClient`]
//! goes straight to an in-process store when the assistant runs next to it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{join_segments, parse_base_url, ChatError};
use crate::cart::CartStore;
use crate::models::wire::{from_slice_ignore_case, CartLineRequest, ClearCartResponse};
use crate::models::{Cart, ProductId};

/// Cart operations the assistant can perform.
#[async_trait]
pub trait CartClient: Send + Sync {
    async fn get_cart(&self, cart_id: &str) -> Result<Cart, ChatError>;

    async fn add(&self, cart_id: &str, product_id: ProductId, quantity: i32)
        -> Result<Cart, ChatError>;

    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Result<Cart, ChatError>;

    async fn clear(&self, cart_id: &str) -> Result<bool, ChatError>;
}

/// Cart API client over HTTP.
pub struct HttpCartClient {
    client: Client,
    base_url: Url,
}

impl HttpCartClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// `/api/cart/{cart_id}` followed by `rest`, one encoded segment each.
    fn cart_url(&self, cart_id: &str, rest: &[&str]) -> Result<Url, ChatError> {
        let mut segments = vec!["api", "cart", cart_id];
        segments.extend_from_slice(rest);
        join_segments(&self.base_url, &segments)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&CartLineRequest>,
    ) -> Result<T, ChatError> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(%method, url = %url, bytes = bytes.len(), "cart API call succeeded");
        Ok(from_slice_ignore_case(&bytes)?)
    }
}

#[async_trait]
impl CartClient for HttpCartClient {
    async fn get_cart(&self, cart_id: &str) -> Result<Cart, ChatError> {
        self.call(Method::GET, self.cart_url(cart_id, &[])?, None)
            .await
    }

    async fn add(
        &self,
        cart_id: &str,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Cart, ChatError> {
        let body = CartLineRequest {
            product_id,
            quantity,
        };
        self.call(
            Method::POST,
            self.cart_url(cart_id, &["add"])?,
            Some(&body),
        )
        .await
    }

    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Result<Cart, ChatError> {
        let product = product_id.to_string();
        self.call(
            Method::DELETE,
            self.cart_url(cart_id, &["remove", &product])?,
            None,
        )
        .await
    }

    async fn clear(&self, cart_id: &str) -> Result<bool, ChatError> {
        let response: ClearCartResponse = self
            .call(Method::DELETE, self.cart_url(cart_id, &["clear"])?, None)
            .await?;
        Ok(response.success)
    }
}

/// Cart access without a network hop.
pub struct LocalCartClient {
    store: Arc<dyn CartStore>,
}

impl LocalCartClient {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartClient for LocalCartClient {
    async fn get_cart(&self, cart_id: &str) -> Result<Cart, ChatError> {
        Ok(self.store.get_or_create(cart_id).await)
    }

    async fn add(
        &self,
        cart_id: &str,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Cart, ChatError> {
        Ok(self.store.add(cart_id, product_id, quantity).await)
    }

    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Result<Cart, ChatError> {
        Ok(self.store.remove(cart_id, product_id).await)
    }

    async fn clear(&self, cart_id: &str) -> Result<bool, ChatError> {
        Ok(self.store.clear(cart_id).await)
    }
}
