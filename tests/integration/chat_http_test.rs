//! Chat assistant talking to the cart API and an agent over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use gift_palette::chat::{
    AgentBackend, CannedResponder, ChatAssistant, Conversation, HttpAgentClient,
    HttpAgentConfig, HttpCartClient, AGENT_FAILURE_REPLY, CART_FAILURE_REPLY,
};

use crate::common::{inventory, spawn, spawn_api, state_with};

/// Mock agent: answers 503 to the first `failures` message calls.
#[derive(Clone, Default)]
struct MockAgent {
    failures: usize,
    calls: Arc<AtomicUsize>,
}

async fn create_thread(State(_): State<MockAgent>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "threadId": format!("thread-for-{}", body["agentId"].as_str().unwrap_or("")) }))
}

async fn post_message(
    State(agent): State<MockAgent>,
    Path(thread_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let call = agent.calls.fetch_add(1, Ordering::SeqCst);
    if call < agent.failures {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!({
        "Reply": format!("{}: {}", thread_id, body["message"].as_str().unwrap_or(""))
    })))
}

async fn spawn_agent(agent: MockAgent) -> String {
    let app = Router::new()
        .route("/threads", post(create_thread))
        .route("/threads/:thread_id/messages", post(post_message))
        .with_state(agent);
    spawn(app).await
}

fn agent_config(endpoint: String) -> HttpAgentConfig {
    HttpAgentConfig {
        endpoint,
        agent_id: "gift-agent".to_string(),
        timeout: Duration::from_secs(5),
        ..HttpAgentConfig::default()
    }
}

fn http_cart(base: &str) -> Arc<HttpCartClient> {
    Arc::new(HttpCartClient::new(base, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_cart_intents_over_http() {
    let state = state_with(inventory(), None);
    let carts = state.carts.clone();
    let base = spawn_api(state).await;

    let chat = ChatAssistant::new(None, http_cart(&base), CannedResponder::default()).unwrap();

    let reply = chat
        .send_message("キャンドルを3個カートに追加して", "t1", Some("web-cart"))
        .await;
    assert!(reply.starts_with("「アロマキャンドルセット」を3個カートに追加しました。"));
    assert!(reply.contains("合計: 3点 ¥9,600"));
    assert_eq!(carts.get_or_create("web-cart").await.total_items(), 3);

    let reply = chat
        .send_message("キャンドルをカートから削除", "t1", Some("web-cart"))
        .await;
    assert!(reply.starts_with("「アロマキャンドルセット」をカートから削除しました。"));

    chat.send_message("マグカップをカートに入れて", "t1", Some("web-cart"))
        .await;
    let reply = chat
        .send_message("カートを空にして", "t1", Some("web-cart"))
        .await;
    assert_eq!(reply, "カートを空にしました。");
    assert!(carts.get_or_create("web-cart").await.is_empty());
}

#[tokio::test]
async fn test_unreachable_cart_api() {
    let chat = ChatAssistant::new(
        None,
        http_cart("http://127.0.0.1:1"),
        CannedResponder::default(),
    )
    .unwrap();

    let reply = chat.send_message("カートを見せて", "t1", Some("c1")).await;
    assert_eq!(reply, CART_FAILURE_REPLY);
}

#[tokio::test]
async fn test_agent_thread_and_reply() {
    let endpoint = spawn_agent(MockAgent::default()).await;
    let agent = Arc::new(HttpAgentClient::new(agent_config(endpoint)).unwrap());

    assert_eq!(
        agent.create_thread().await.unwrap(),
        "thread-for-gift-agent"
    );

    let chat = Arc::new(
        ChatAssistant::new(
            Some(agent),
            http_cart("http://127.0.0.1:1"),
            CannedResponder::default(),
        )
        .unwrap(),
    );
    let mut conversation = Conversation::new(chat, None);
    let reply = conversation.send("母の日のプレゼント").await;
    assert_eq!(reply, "thread-for-gift-agent: 母の日のプレゼント");
}

#[tokio::test]
async fn test_agent_retried_after_unavailable() {
    let mock = MockAgent {
        failures: 2,
        ..MockAgent::default()
    };
    let calls = mock.calls.clone();
    let endpoint = spawn_agent(mock).await;
    let agent = HttpAgentClient::new(agent_config(endpoint)).unwrap();

    let reply = agent.send_message("t1", "こんにちは").await.unwrap();
    assert_eq!(reply, "t1: こんにちは");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_agent_down_gives_apology() {
    let config = HttpAgentConfig {
        max_retries: 0,
        ..agent_config("http://127.0.0.1:1".to_string())
    };
    let chat = ChatAssistant::new(
        Some(Arc::new(HttpAgentClient::new(config).unwrap())),
        http_cart("http://127.0.0.1:1"),
        CannedResponder::default(),
    )
    .unwrap();

    assert_eq!(
        chat.send_message("おすすめは？", "t1", None).await,
        AGENT_FAILURE_REPLY
    );
    // Thread creation falls back to a local id
    assert!(uuid::Uuid::parse_str(&chat.create_thread().await).is_ok());
}

#[tokio::test]
async fn test_cart_id_stays_one_segment_over_http() {
    let state = state_with(inventory(), None);
    let carts = state.carts.clone();
    let base = spawn_api(state).await;
    carts.add("victim", 1, 1).await;

    let chat = ChatAssistant::new(None, http_cart(&base), CannedResponder::default()).unwrap();

    let reply = chat
        .send_message("カートを空にして", "t1", Some("mine/../victim"))
        .await;
    assert_eq!(reply, "カートを空にしました。");
    assert_eq!(carts.get_or_create("victim").await.total_items(), 1);

    let reply = chat
        .send_message("カートを見せて", "t1", Some("victim#x"))
        .await;
    assert_eq!(reply, "カートは空です。");

    chat.send_message("マグカップをカートに追加", "t1", Some("victim?a=1"))
        .await;
    assert_eq!(carts.get_or_create("victim?a=1").await.total_items(), 1);
    assert_eq!(carts.get_or_create("victim").await.total_items(), 1);
}

#[tokio::test]
async fn test_thread_id_stays_one_segment() {
    let endpoint = spawn_agent(MockAgent::default()).await;
    let agent = HttpAgentClient::new(agent_config(endpoint)).unwrap();

    let reply = agent
        .send_message("t/../other#frag?x=1", "こんにちは")
        .await
        .unwrap();
    assert_eq!(reply, "t/../other#frag?x=1: こんにちは");
}

async fn stall() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({}))
}

#[tokio::test]
async fn test_slow_agent_times_out_to_apology() {
    let endpoint = spawn(
        Router::new()
            .route("/threads", post(stall))
            .route("/threads/:thread_id/messages", post(stall)),
    )
    .await;
    let config = HttpAgentConfig {
        timeout: Duration::from_millis(200),
        max_retries: 0,
        ..agent_config(endpoint)
    };
    let chat = ChatAssistant::new(
        Some(Arc::new(HttpAgentClient::new(config).unwrap())),
        http_cart("http://127.0.0.1:1"),
        CannedResponder::default(),
    )
    .unwrap();

    let started = Instant::now();
    let reply = chat.send_message("おすすめは？", "t1", None).await;
    assert_eq!(reply, AGENT_FAILURE_REPLY);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_slow_cart_api_times_out_to_apology() {
    let base = spawn(Router::new().route("/api/cart/:cart_id", get(stall))).await;
    let cart = Arc::new(HttpCartClient::new(&base, Duration::from_millis(200)).unwrap());
    let chat = ChatAssistant::new(None, cart, CannedResponder::default()).unwrap();

    let started = Instant::now();
    let reply = chat.send_message("カートを見せて", "t1", Some("c1")).await;
    assert_eq!(reply, CART_FAILURE_REPLY);
    assert!(started.elapsed() < Duration::from_secs(3));
}
