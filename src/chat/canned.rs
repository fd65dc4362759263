//! Keyword-triggered replies used when no agent is configured.

use std::time::Duration;

/// A topic and the reply it triggers.
#[derive(Debug, Clone, Copy)]
pub struct CannedRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Evaluated in order; the first rule with a keyword in the message wins.
pub const CANNED_RULES: &[CannedRule] = &[
    CannedRule {
        topic: "greeting",
        keywords: &["こんにちは", "こんばんは", "おはよう", "はじめまして", "hello", "hi there"],
        reply: "こんにちは！Gift Paletteへようこそ。ギフト選びのお手伝いをいたします。どなたへの贈り物をお探しですか？",
    },
    CannedRule {
        topic: "recommendation",
        keywords: &["おすすめ", "ギフト", "プレゼント", "recommend"],
        reply: "こんにちは！ギフト選びのお手伝いをさせていただきます。どのような方への贈り物をお探しですか？年代や性別、ご予算などを教えていただけると、最適な商品をご提案いたします！",
    },
    CannedRule {
        topic: "budget",
        keywords: &["予算", "価格", "値段", "budget", "price"],
        reply: "ご予算に応じて幅広い商品をご用意しております。1,600円～15,800円の範囲で様々なギフトアイテムがございます。具体的なご予算を教えていただけますでしょうか？",
    },
    CannedRule {
        topic: "for-women",
        keywords: &["女性", "女の人", "彼女", "母"],
        reply: "女性向けのギフトでしたら、アクセサリーや美容・リラックス用品、インテリア雑貨などが人気です。特にネックレスやアロマキャンドル、おしゃれなマグカップなどはよくお選びいただいております。",
    },
    CannedRule {
        topic: "for-men",
        keywords: &["男性", "男の人", "彼氏", "父"],
        reply: "男性向けのギフトでしたら、テクノロジー関連商品やスポーツ用品、実用的なアイテムが喜ばれることが多いです。スマートウォッチやワイヤレス充電器などはいかがでしょうか？",
    },
    CannedRule {
        topic: "shipping",
        keywords: &["配送", "届け", "送料", "shipping", "delivery"],
        reply: "配送については、最短翌日お届けが可能です。お急ぎの場合はお気軽にお申し付けください。大切な記念日にも間に合うよう配送いたします。",
    },
    CannedRule {
        topic: "returns",
        keywords: &["返品", "交換", "キャンセル", "return", "refund"],
        reply: "商品到着後7日以内であれば、未使用品に限り返品・交換を承っております。注文履歴から該当のご注文をお知らせください。",
    },
];

/// Picks a canned reply for a message.
#[derive(Debug, Clone, Default)]
pub struct CannedResponder {
    latency: Duration,
}

impl CannedResponder {
    /// `latency` is waited before each reply to mimic a remote agent.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The rule matching `message`, if any.
    pub fn matching_rule(message: &str) -> Option<&'static CannedRule> {
        let lower = message.to_lowercase();
        CANNED_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
    }

    /// Reply without the simulated latency.
    pub fn reply_now(message: &str) -> String {
        match Self::matching_rule(message) {
            Some(rule) => rule.reply.to_string(),
            None => format!(
                "ご質問ありがとうございます。「{}」について詳しくご案内いたします。より具体的にお聞かせいただけると、より良いアドバイスができます。商品選びや配送についてなど、何でもお気軽にお尋ねください！",
                message
            ),
        }
    }

    pub async fn reply(&self, message: &str) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Self::reply_now(message)
    }
}
