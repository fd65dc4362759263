//! End-to-end shopping over HTTP.

use serde_json::{json, Value};

use crate::common::{inventory, spawn_api, state_with};

async fn get(client: &reqwest::Client, url: String) -> Value {
    client.get(url).send().await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn test_issue_shop_and_checkout() {
    let base = spawn_api(state_with(inventory(), None)).await;
    let client = reqwest::Client::new();

    let issued = get(&client, format!("{}/api/cart/issue", base)).await;
    let cart_id = issued["cartId"].as_str().unwrap().to_string();

    let cart: Value = client
        .post(format!("{}/api/cart/{}/add", base, cart_id))
        .json(&json!({"productId": 1, "quantity": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["totalItems"], 2);

    let cart: Value = client
        .post(format!("{}/api/cart/{}/add", base, cart_id))
        .json(&json!({"PRODUCTID": 3, "Quantity": 1}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["totalItems"], 3);
    assert_eq!(cart["totalAmount"].as_f64(), Some(7160.0));

    let cart: Value = client
        .put(format!("{}/api/cart/{}/update", base, cart_id))
        .json(&json!({"productId": 3, "quantity": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["totalAmount"].as_f64(), Some(10360.0));

    let check: Value = client
        .post(format!("{}/api/inventory/check", base))
        .json(&json!({"productId": 1, "quantity": 5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(check["isInStock"], true);

    let response = client
        .post(format!("{}/api/orders", base))
        .json(&json!({
            "cartId": cart_id,
            "customerName": "佐藤太郎",
            "customerEmail": "taro@example.com",
            "shippingAddress": "大阪府大阪市北区1-1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["totalAmount"].as_f64(), Some(10360.0));
    assert_eq!(order["status"], "Pending");

    let cart = get(&client, format!("{}/api/cart/{}", base, cart_id)).await;
    assert_eq!(cart["totalItems"], 0);

    let mug = get(&client, format!("{}/api/products/1", base)).await;
    assert_eq!(mug["stock"], 3);

    let history = get(&client, format!("{}/api/orders", base)).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["orderNumber"], order["orderNumber"]);
}

#[tokio::test]
async fn test_concurrent_adds_respect_stock() {
    let base = spawn_api(state_with(inventory(), None)).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/cart/shared/add", base);

    // Product 6 has two in stock; ten clients race to add one each
    let mut tasks = Vec::new();
    for _ in 0..10 {
        let client = client.clone();
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({"productId": 6, "quantity": 1}))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_success());
    }

    let cart = get(&client, format!("{}/api/cart/shared", base)).await;
    assert_eq!(cart["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let base = spawn_api(state_with(inventory(), None)).await;
    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/api/products", base))
        .header("Origin", "http://shop.example")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
