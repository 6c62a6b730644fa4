//! Last-resort canned responder
//!
//! A smaller cascade than the full assistant: greetings, spending questions,
//! budget or saving questions, and everything else. Replies carry no
//! suggestions and a flat confidence.

use rand::Rng;

use super::compose::{money, variant, UNKNOWN_CATEGORY};
use super::intent::{Intent, IntentClassifier, IntentRule};
use super::response::{AIResponse, Reply, ResponseSource};
use super::Responder;
use crate::context::FinancialContext;
use crate::error::Result;

/// Confidence attached to every canned reply
pub const CANNED_CONFIDENCE: f64 = 0.50;

const GREETING_PATTERN: &str = r"^(hi|hello|hey|sup|good|morning|afternoon|evening)";
const SPENDING_KEYWORDS: &[&str] = &["spending", "expense", "spent", "money"];
const BUDGET_KEYWORDS: &[&str] = &["budget", "save", "saving"];

/// Template responder used when the full assistant is not wanted
#[derive(Debug, Clone)]
pub struct CannedResponder {
    classifier: IntentClassifier,
    currency: String,
}

impl CannedResponder {
    pub fn new(currency: impl Into<String>) -> Result<Self> {
        let classifier = IntentClassifier::from_rules(vec![
            IntentRule::pattern(Intent::Greeting, GREETING_PATTERN)?,
            IntentRule::keywords(Intent::Spending, SPENDING_KEYWORDS),
            IntentRule::keywords(Intent::Budget, BUDGET_KEYWORDS),
        ]);
        Ok(Self {
            classifier,
            currency: currency.into(),
        })
    }

    /// Greeting, Spending, Budget or Fallback
    pub fn classify(&self, message: &str) -> Intent {
        self.classifier.classify(message)
    }

    pub fn respond_with<R: Rng + ?Sized>(
        &self,
        message: &str,
        ctx: &FinancialContext,
        rng: &mut R,
    ) -> AIResponse {
        self.compose(self.classify(message), ctx, rng)
    }

    fn compose<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        ctx: &FinancialContext,
        rng: &mut R,
    ) -> AIResponse {
        let m = |amount: f64| money(&self.currency, amount);
        let total = m(ctx.total_spent);
        let daily = m(ctx.daily_average);
        let (top, top_amount) = ctx
            .top_category()
            .map(|c| (c.category.as_str(), m(c.amount)))
            .unwrap_or((UNKNOWN_CATEGORY, m(0.0)));

        let text = match (intent, variant(rng, 3)) {
            (Intent::Greeting, 0) => format!(
                "👋 Hi there! I'm your AI financial advisor. You've spent {} in the last 30 days. What would you like to know?",
                total
            ),
            (Intent::Greeting, 1) => format!(
                "Hello! 🌟 I'm here to help with your finances. Your top spending category is {} ({}). What's on your mind?",
                top, top_amount
            ),
            (Intent::Greeting, _) => format!(
                "Hey! 💫 Ready to dive into your finances? You're averaging {}/day in spending. How can I help?",
                daily
            ),
            (Intent::Spending, 0) => format!(
                "📊 Your spending snapshot: {} total (last 30 days), averaging {}/day. {} is your biggest category at {}.",
                total, daily, top, top_amount
            ),
            (Intent::Spending, 1) => format!(
                "💸 You've spent {} recently. That's about {} per day. Your main expense? {} at {}. Not bad!",
                total, daily, top, top_amount
            ),
            (Intent::Spending, _) => format!(
                "📈 Here's the breakdown: {} total spending, {}/day average. {} leads at {}. Want to optimize any category?",
                total, daily, top, top_amount
            ),
            (Intent::Budget, 0) => format!(
                "💡 Budget tip: Try the 50/30/20 rule with your {} monthly spending. Aim to save {} per month!",
                total,
                m(ctx.total_spent * 0.2)
            ),
            (Intent::Budget, 1) => format!(
                "🎯 Smart saving: With {}/day spending, try setting a daily limit of {} to save 10% automatically!",
                daily,
                m(ctx.daily_average * 0.9)
            ),
            (Intent::Budget, _) => format!(
                "💰 Budget strategy: Your current {}/month could include {} for savings. Start small, think big!",
                total,
                m(ctx.total_spent * 0.2)
            ),
            (_, 0) => format!(
                "🤔 Interesting! Based on your {} spending pattern, I can help with budgets, category analysis, or saving tips. What's your main concern?",
                total
            ),
            (_, 1) => format!(
                "💭 I see you're thinking about finances! Your {} spending ({}) caught my eye. Want to explore that or something else?",
                top, top_amount
            ),
            (_, _) => format!(
                "✨ Good question! With your {}/day spending average, there's always room to optimize. What aspect of your finances interests you most?",
                daily
            ),
        };

        AIResponse::new(text, CANNED_CONFIDENCE)
    }
}

impl Responder for CannedResponder {
    fn source(&self) -> ResponseSource {
        ResponseSource::Fallback
    }

    fn reply(&self, message: &str, ctx: &FinancialContext) -> Reply {
        let intent = self.classify(message);
        let response = self.compose(intent, ctx, &mut rand::thread_rng());
        tracing::debug!(intent = intent.as_str(), "Canned reply");
        Reply {
            intent,
            source: self.source(),
            response,
        }
    }
}
