use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Cart;

/// Yen amount with thousands separators, e.g. `¥12,800`.
pub fn format_yen(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}

/// Line-by-line cart listing with subtotals and the grand total.
pub fn render_cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return "カートは空です。".to_string();
    }

    let mut lines = vec!["【カートの中身】".to_string()];
    for item in &cart.items {
        lines.push(format!(
            "・{} × {} = {}",
            item.product_name,
            item.quantity,
            format_yen(item.subtotal())
        ));
    }
    lines.push(format!(
        "合計: {}点 {}",
        cart.total_items(),
        format_yen(cart.total_amount())
    ));
    lines.join("\n")
}
