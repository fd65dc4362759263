//! Cart intent recognition.
//!
//! An ordered rule list evaluated top to bottom; the first rule with a
//! matching keyword wins. Product and quantity are pulled out of the text
//! for the intents that need them.

use regex::Regex;

use super::ChatError;
use crate::models::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Clear,
    Remove,
    Add,
    Show,
}

/// A recognised cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    /// `product_id` is `None` when no product keyword was found.
    Add {
        product_id: Option<ProductId>,
        quantity: i32,
    },
    Show,
    Remove {
        product_id: Option<ProductId>,
    },
    Clear,
}

/// Keywords that select one intent.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub kind: IntentKind,
    pub keywords: &'static [&'static str],
}

/// Evaluated in order. Clear precedes remove so "全部削除" empties the cart.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        kind: IntentKind::Clear,
        keywords: &[
            "カートを空",
            "カートをクリア",
            "全部削除",
            "すべて削除",
            "clear cart",
            "empty cart",
            "empty my cart",
        ],
    },
    IntentRule {
        kind: IntentKind::Remove,
        keywords: &[
            "カートから削除",
            "カートから外",
            "を削除",
            "を取り消",
            "remove from cart",
            "remove",
        ],
    },
    IntentRule {
        kind: IntentKind::Add,
        keywords: &[
            "カートに追加",
            "カートに入れ",
            "を追加",
            "追加して",
            "add to cart",
            "add to my cart",
        ],
    },
    IntentRule {
        kind: IntentKind::Show,
        keywords: &[
            "カートを見",
            "カートの中",
            "カートを確認",
            "カート確認",
            "カートを表示",
            "show cart",
            "show my cart",
            "view cart",
            "what's in my cart",
        ],
    },
];

/// Product keywords, longest and most specific first.
const PRODUCT_KEYWORDS: &[(&str, ProductId)] = &[
    ("シルバーネックレス", 21),
    ("ネックレス", 2),
    ("マグカップ", 1),
    ("キャンドルメイキング", 33),
    ("キャンドル", 3),
    ("ハンドクリーム", 4),
    ("ブランケット", 5),
    ("スリッパ", 6),
    ("手鏡", 7),
    ("ノート", 8),
    ("手帳", 9),
    ("スマートウォッチ", 10),
    ("コーヒー", 11),
    ("フィットネストラッカー", 12),
    ("ディフューザー", 13),
    ("スピーカー", 14),
    ("エプロン", 15),
    ("ヨガマット", 16),
    ("ブックスタンド", 17),
    ("充電器", 18),
    ("タンブラー", 19),
    ("整理トレー", 20),
    ("ガーデニング", 22),
    ("電子書籍", 23),
    ("入浴剤", 24),
    ("ボードゲーム", 25),
    ("ランタン", 26),
    ("万年筆", 27),
    ("マッサージ", 28),
    ("釣り", 29),
    ("ワイングラス", 30),
    ("写真立て", 31),
    ("テニス", 32),
    ("スマートフォンスタンド", 34),
    ("ハーブティー", 35),
    ("キーホルダー", 36),
    ("パズル", 37),
    ("バックパック", 38),
    ("お香", 39),
    ("フォトフレーム", 40),
    ("バスローブ", 41),
    ("木製時計", 42),
    ("スケッチブック", 43),
    ("タオル", 44),
    ("ルームフレグランス", 45),
    ("チェア", 46),
    ("カードゲーム", 47),
    ("プランター", 48),
    ("silver necklace", 21),
    ("necklace", 2),
    ("mug", 1),
    ("candle", 3),
    ("smartwatch", 10),
    ("coffee", 11),
    ("yoga mat", 16),
];

/// Counts carry a counter suffix ("2個") or a multiplier ("×2"). A number
/// standing alone between spaces ("add 2 mug") also counts.
const QUANTITY_PATTERN: &str = concat!(
    r"(?:^|\D)(\d{1,4})\s*(?:個|つ|点|本|枚|冊|台|セット|pcs?)",
    r"|[x×]\s*(\d{1,4})(?:\D|$)",
    r"|(?:^|\s)(\d{1,4})(?:\s|$)",
);

/// Amounts of money, never counts.
const CURRENCY_MARKERS: &[&str] = &["円", "yen", "ドル"];

/// Matches free text against [`INTENT_RULES`].
#[derive(Debug, Clone)]
pub struct IntentRecognizer {
    quantity: Regex,
}

impl IntentRecognizer {
    pub fn new() -> Result<Self, ChatError> {
        Ok(Self {
            quantity: Regex::new(QUANTITY_PATTERN)?,
        })
    }

    /// First matching rule's intent, or `None` when no rule applies.
    pub fn recognize(&self, text: &str) -> Option<CartIntent> {
        let normalized = normalize(text);
        let rule = INTENT_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| normalized.contains(k)))?;

        Some(match rule.kind {
            IntentKind::Clear => CartIntent::Clear,
            IntentKind::Show => CartIntent::Show,
            IntentKind::Remove => CartIntent::Remove {
                product_id: product_in(&normalized),
            },
            IntentKind::Add => CartIntent::Add {
                product_id: product_in(&normalized),
                quantity: self.quantity_in(&normalized),
            },
        })
    }

    /// First count in the text, 1 when there is none or it is zero.
    fn quantity_in(&self, text: &str) -> i32 {
        self.quantity
            .captures_iter(text)
            .filter_map(|caps| caps.iter().skip(1).flatten().next())
            .find(|m| {
                let rest = text[m.end()..].trim_start();
                !CURRENCY_MARKERS.iter().any(|c| rest.starts_with(c))
            })
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .filter(|q| *q > 0)
            .unwrap_or(1)
    }
}

fn product_in(text: &str) -> Option<ProductId> {
    PRODUCT_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, id)| *id)
}

/// Lowercase and fold full-width digits to ASCII.
fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}
