//! Sample order history shown on a fresh instance.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::{order_number, Order, OrderId, OrderItem, OrderStatus, ProductId};

fn item(product_id: ProductId, name: &str, price: i64, quantity: u32) -> OrderItem {
    OrderItem {
        product_id,
        product_name: name.to_string(),
        price: Decimal::from(price),
        quantity,
        image_url: format!("/images/{:03}.png", product_id),
    }
}

struct Sample {
    id: OrderId,
    days_ago: i64,
    customer_name: &'static str,
    customer_email: &'static str,
    shipping_address: &'static str,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

/// Four historical orders (ids 1-4) placed 10, 5, 2 and 1 days before `now`.
pub fn sample_history(now: DateTime<Utc>) -> Vec<Order> {
    let samples = vec![
        Sample {
            id: 1,
            days_ago: 10,
            customer_name: "田中 花子",
            customer_email: "hanako.tanaka@example.com",
            shipping_address: "〒150-0001\n東京都渋谷区神宮前1-1-1\nアパートメント101",
            status: OrderStatus::Delivered,
            items: vec![
                item(3, "アロマキャンドルセット", 3500, 1),
                item(4, "花柄ハンドクリームセット", 2400, 2),
            ],
        },
        Sample {
            id: 2,
            days_ago: 5,
            customer_name: "佐藤 太郎",
            customer_email: "taro.sato@example.com",
            shipping_address: "〒530-0001\n大阪府大阪市北区梅田1-1-1\nマンション202",
            status: OrderStatus::Shipped,
            items: vec![
                item(10, "多機能スマートウォッチ", 15800, 1),
                item(34, "スマートフォンスタンド", 1800, 1),
            ],
        },
        Sample {
            id: 3,
            days_ago: 2,
            customer_name: "山田 美咲",
            customer_email: "misaki.yamada@example.com",
            shipping_address: "〒220-0001\n神奈川県横浜市西区みなとみらい1-1-1\nタワー1001",
            status: OrderStatus::Processing,
            items: vec![
                item(24, "アロマ入浴剤セット", 2400, 1),
                item(41, "バスローブ", 6200, 1),
                item(6, "ユニコーンスリッパ", 2200, 1),
            ],
        },
        Sample {
            id: 4,
            days_ago: 1,
            customer_name: "鈴木 健一",
            customer_email: "kenichi.suzuki@example.com",
            shipping_address: "〒450-0001\n愛知県名古屋市中村区名駅1-1-1\nビル501",
            status: OrderStatus::Pending,
            items: vec![
                item(9, "レザービジネス手帳", 8500, 1),
                item(21, "メンズシルバーネックレス", 9800, 1),
            ],
        },
    ];

    samples
        .into_iter()
        .map(|sample| {
            let created_at = now - Duration::days(sample.days_ago);
            let completed_at = (sample.status == OrderStatus::Delivered)
                .then(|| created_at + Duration::days(3));
            let total_amount = sample
                .items
                .iter()
                .map(|i| i.price * Decimal::from(i.quantity))
                .sum();
            Order {
                id: sample.id,
                order_number: order_number(created_at, sample.id),
                customer_name: sample.customer_name.to_string(),
                customer_email: sample.customer_email.to_string(),
                shipping_address: sample.shipping_address.to_string(),
                items: sample.items,
                total_amount,
                status: sample.status,
                created_at,
                completed_at,
            }
        })
        .collect()
}
