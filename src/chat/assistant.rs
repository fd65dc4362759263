//! The chat facade.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use super::canned::CannedResponder;
use super::cart_client::CartClient;
use super::intent::{CartIntent, IntentRecognizer};
use super::summary::render_cart_summary;
use super::{AgentBackend, ChatError};
use crate::models::{Cart, ProductId};

/// Reply when the agent cannot be reached.
pub const AGENT_FAILURE_REPLY: &str = "エラーが発生しました。もう一度お試しください。";

/// Reply when a cart action fails in transit.
pub const CART_FAILURE_REPLY: &str =
    "申し訳ございません。カートの操作中にエラーが発生しました。しばらくしてからもう一度お試しください。";

const ASK_PRODUCT_TO_ADD: &str =
    "どの商品をカートに追加しますか？商品名を含めてもう一度お知らせください。";
const ASK_PRODUCT_TO_REMOVE: &str =
    "どの商品をカートから削除しますか？商品名を含めてもう一度お知らせください。";

/// Routes messages to cart actions, the agent, or canned replies.
pub struct ChatAssistant {
    agent: Option<Arc<dyn AgentBackend>>,
    cart: Arc<dyn CartClient>,
    intents: IntentRecognizer,
    canned: CannedResponder,
}

impl ChatAssistant {
    /// `agent` is `None` when no agent is configured; canned replies are used.
    pub fn new(
        agent: Option<Arc<dyn AgentBackend>>,
        cart: Arc<dyn CartClient>,
        canned: CannedResponder,
    ) -> Result<Self, ChatError> {
        Ok(Self {
            agent,
            cart,
            intents: IntentRecognizer::new()?,
            canned,
        })
    }

    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    /// A thread from the agent, or a local id when the agent is absent or
    /// unreachable.
    pub async fn create_thread(&self) -> String {
        if let Some(agent) = &self.agent {
            match agent.create_thread().await {
                Ok(thread_id) => return thread_id,
                Err(e) => warn!(error = %e, "agent thread creation failed, using local thread"),
            }
        }
        Uuid::new_v4().to_string()
    }

    /// Answer one message.
    ///
    /// With a cart id, cart commands are recognised first and carried out
    /// without consulting the agent.
    pub async fn send_message(&self, text: &str, thread_id: &str, cart_id: Option<&str>) -> String {
        if let Some(cart_id) = cart_id.filter(|id| !id.trim().is_empty()) {
            if let Some(intent) = self.intents.recognize(text) {
                debug!(cart_id = %cart_id, ?intent, "cart intent recognised");
                return match self.perform(intent, cart_id).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        error!(cart_id = %cart_id, error = %e, "cart action from chat failed");
                        CART_FAILURE_REPLY.to_string()
                    }
                };
            }
        }

        match &self.agent {
            Some(agent) => match agent.send_message(thread_id, text).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(thread_id = %thread_id, error = %e, "agent message failed");
                    AGENT_FAILURE_REPLY.to_string()
                }
            },
            None => self.canned.reply(text).await,
        }
    }

    async fn perform(&self, intent: CartIntent, cart_id: &str) -> Result<String, ChatError> {
        match intent {
            CartIntent::Add {
                product_id: None, ..
            } => Ok(ASK_PRODUCT_TO_ADD.to_string()),
            CartIntent::Add {
                product_id: Some(product_id),
                quantity,
            } => self.add(cart_id, product_id, quantity).await,
            CartIntent::Show => {
                let cart = self.cart.get_cart(cart_id).await?;
                Ok(render_cart_summary(&cart))
            }
            CartIntent::Remove { product_id: None } => Ok(ASK_PRODUCT_TO_REMOVE.to_string()),
            CartIntent::Remove {
                product_id: Some(product_id),
            } => self.remove(cart_id, product_id).await,
            CartIntent::Clear => {
                if self.cart.clear(cart_id).await? {
                    Ok("カートを空にしました。".to_string())
                } else {
                    Ok(CART_FAILURE_REPLY.to_string())
                }
            }
        }
    }

    async fn add(
        &self,
        cart_id: &str,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<String, ChatError> {
        let before = line_quantity(&self.cart.get_cart(cart_id).await?, product_id);
        let cart = self.cart.add(cart_id, product_id, quantity).await?;
        let after = line_quantity(&cart, product_id);

        let reply = match cart.item(product_id) {
            Some(item) if after > before => format!(
                "「{}」を{}個カートに追加しました。\n\n{}",
                item.product_name,
                quantity,
                render_cart_summary(&cart)
            ),
            _ => format!(
                "申し訳ございません。在庫が不足しているか、現在お取り扱いのない商品のため、カートに追加できませんでした。\n\n{}",
                render_cart_summary(&cart)
            ),
        };
        Ok(reply)
    }

    async fn remove(&self, cart_id: &str, product_id: ProductId) -> Result<String, ChatError> {
        let before = self.cart.get_cart(cart_id).await?;
        let Some(item) = before.item(product_id) else {
            return Ok(format!(
                "その商品はカートに入っていません。\n\n{}",
                render_cart_summary(&before)
            ));
        };
        let name = item.product_name.clone();

        let cart = self.cart.remove(cart_id, product_id).await?;
        Ok(format!(
            "「{}」をカートから削除しました。\n\n{}",
            name,
            render_cart_summary(&cart)
        ))
    }
}

fn line_quantity(cart: &Cart, product_id: ProductId) -> u32 {
    cart.item(product_id).map(|item| item.quantity).unwrap_or(0)
}
