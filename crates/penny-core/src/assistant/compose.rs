//! Response composition
//!
//! One function per intent. Each reads the context fields it needs, picks one
//! of a few pre-written templates with the caller's RNG and interpolates
//! amounts (two decimals) and percentages (one decimal).
//!
//! Every function is total. A missing top category is rendered as
//! [`UNKNOWN_CATEGORY`] at `0.00` or replaced by neutral wording, and every
//! division by the total goes through [`FinancialContext::share_of_total`].

use rand::Rng;

use super::intent::Intent;
use super::knowledge::KnowledgeBase;
use super::response::AIResponse;
use crate::context::FinancialContext;

/// Placeholder for a missing top category
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Weeks per month used for weekly figures
const WEEKS_PER_MONTH: f64 = 4.3;

const BUDGET_SUGGESTIONS: &[&str] = &[
    "Set up automatic savings",
    "Use budgeting apps",
    "Review monthly",
    "Track daily expenses",
];

const PREDICTION_SUGGESTIONS: &[&str] = &[
    "Monitor weekly totals",
    "Set spending alerts",
    "Plan for variations",
];

const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Ask about budgeting",
    "Explore saving tips",
    "Analyze categories",
    "Get predictions",
];

/// Map NaN, infinities and negative zero to 0 so they never reach the text
pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// Currency amount with two decimals, e.g. `৳12.50`
pub(crate) fn money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, finite(amount))
}

/// Percentage with one decimal, e.g. `50.0%`
pub(crate) fn percent(value: f64) -> String {
    format!("{:.1}%", finite(value))
}

/// Uniform pick of one of `n` template variants
pub(crate) fn variant<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    rng.gen_range(0..n)
}

/// Top category name and amount, with the neutral placeholder when absent
fn top_or_unknown(ctx: &FinancialContext) -> (&str, f64) {
    ctx.top_category()
        .map(|c| (c.category.as_str(), finite(c.amount)))
        .unwrap_or((UNKNOWN_CATEGORY, 0.0))
}

/// Fills per-intent templates from a context snapshot
#[derive(Debug, Clone)]
pub struct Composer {
    currency: String,
    knowledge: &'static KnowledgeBase,
}

impl Composer {
    pub fn new(currency: impl Into<String>, knowledge: &'static KnowledgeBase) -> Self {
        Self {
            currency: currency.into(),
            knowledge,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn knowledge(&self) -> &'static KnowledgeBase {
        self.knowledge
    }

    fn money(&self, amount: f64) -> String {
        money(&self.currency, amount)
    }

    /// Compose the response for an already classified intent
    pub fn compose<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        ctx: &FinancialContext,
        rng: &mut R,
    ) -> AIResponse {
        match intent {
            Intent::Greeting => self.greeting(ctx, rng),
            Intent::Spending => self.spending(ctx, rng),
            Intent::Budget => self.budget(ctx, rng),
            Intent::Saving => self.saving(ctx, rng),
            Intent::Category => self.category(ctx, rng),
            Intent::Prediction => self.prediction(ctx, rng),
            Intent::Comparison => self.comparison(ctx, rng),
            Intent::Fallback => self.fallback(ctx, rng),
        }
    }

    pub fn greeting<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let total = self.money(ctx.total_spent);

        let message = match (variant(rng, 3), ctx.top_category()) {
            (0, _) => format!(
                "👋 Hello! I'm your personal financial AI. You've spent {} recently, averaging {}/day. Ready to optimize your finances?",
                total,
                self.money(ctx.daily_average)
            ),
            (1, Some(top)) => format!(
                "Hi there! 🌟 I see your biggest expense category is {} at {}. Let's make your money work smarter!",
                top.category,
                self.money(top.amount)
            ),
            (1, None) => format!(
                "Hi there! 🌟 You've spent {} so far and no category stands out yet. Let's make your money work smarter!",
                total
            ),
            _ => format!(
                "Hey! 💰 Your financial snapshot shows {} in recent spending. I'm here to help you make every coin count!",
                total
            ),
        };

        AIResponse::new(message, Intent::Greeting.confidence())
            .with_follow_up("Ask me about budgeting, saving tips, or spending analysis!")
    }

    pub fn spending<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let (category, amount) = top_or_unknown(ctx);
        let top_amount = self.money(amount);
        let share = percent(ctx.share_of_total(amount));
        let trend = ctx.monthly_trend.remark();

        let message = match variant(rng, 3) {
            0 => format!(
                "📊 Your spending breakdown: {} total, {}/day average. {} leads at {} ({} of total). {}",
                self.money(ctx.total_spent),
                self.money(ctx.daily_average),
                category,
                top_amount,
                share,
                trend
            ),
            1 => {
                let benchmark = self
                    .knowledge
                    .classify(category, amount)
                    .map(|band| band.remark())
                    .unwrap_or("This category varies widely by lifestyle.");
                format!(
                    "💸 Financial analysis: You're spending {} daily on average. {} dominates your budget at {} ({} of total). {} {}",
                    self.money(ctx.daily_average),
                    category,
                    top_amount,
                    share,
                    benchmark,
                    trend
                )
            }
            _ => format!(
                "📈 Money flow report: {} outflow, distributed across {} categories. {} takes {} of your budget at {}. {}",
                self.money(ctx.total_spent),
                ctx.top_categories.len(),
                category,
                share,
                top_amount,
                trend
            ),
        };

        let top_name = ctx.top_category().map(|c| c.category.as_str());
        AIResponse::new(message, Intent::Spending.confidence())
            .with_suggestions(self.knowledge.spending_suggestions(top_name))
            .with_follow_up("Want specific tips for your top spending category?")
    }

    pub fn budget<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let strategy = self.knowledge.random_strategy(rng);
        let total = ctx.total_spent;
        let weekly = self.money(finite(total) / WEEKS_PER_MONTH);

        let message = match variant(rng, 3) {
            0 => format!(
                "💡 Budget strategy: {}. With your {} monthly spending, aim for: {} needs, {} wants, {} savings.",
                strategy,
                self.money(total),
                self.money(total * 0.5),
                self.money(total * 0.3),
                self.money(total * 0.2)
            ),
            1 => format!(
                "🎯 Smart budgeting: {}. Your current {} spending suggests a weekly budget of {} works well.",
                strategy,
                self.money(total),
                weekly
            ),
            _ => format!(
                "📋 Budget recommendation: {}. Consider tracking weekly: you're at {}/week currently.",
                strategy, weekly
            ),
        };

        AIResponse::new(message, Intent::Budget.confidence())
            .with_suggestions(BUDGET_SUGGESTIONS.iter().copied())
            .with_follow_up("Need help setting up specific budget categories?")
    }

    pub fn saving<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let tip = self.knowledge.random_saving_tip(rng);
        let top = ctx.top_category();

        // 15% of the top category, or 10% of everything when nothing is ranked
        let (focus, rate, potential) = match top {
            Some(c) => (c.category.as_str(), 15, c.amount * 0.15),
            None => ("overall", 10, ctx.total_spent * 0.1),
        };
        let potential = self.money(potential);

        let message = match variant(rng, 3) {
            0 => format!(
                "💰 Saving opportunity: {}. Focus on your {} spending - a {}% reduction saves {}/month!",
                tip, focus, rate, potential
            ),
            1 => format!(
                "🌟 Smart saving: {}. Your {} spending has the most potential - try cutting 10-20% there.",
                tip, focus
            ),
            _ => format!(
                "⚡ Quick win: {}. Target your {} spending for maximum impact - even {}/month adds up!",
                tip, focus, potential
            ),
        };

        let top_name = top.map(|c| c.category.as_str());
        AIResponse::new(message, Intent::Saving.confidence())
            .with_suggestions(self.knowledge.saving_suggestions(top_name))
            .with_follow_up("Want specific strategies for your biggest expense category?")
    }

    pub fn category<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let breakdown = if ctx.top_categories.is_empty() {
            "no categorized spending recorded yet".to_string()
        } else {
            ctx.top_categories
                .iter()
                .take(3)
                .map(|c| {
                    format!(
                        "{}: {} ({})",
                        c.category,
                        self.money(c.amount),
                        percent(ctx.share_of_total(c.amount))
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        let top_name = ctx.top_category().map(|c| c.category.as_str());
        let insight = self
            .knowledge
            .insight_for(top_name.unwrap_or(UNKNOWN_CATEGORY));

        let message = match variant(rng, 2) {
            0 => format!("📈 Category breakdown: {}. {}", breakdown, insight),
            _ => format!("🗂️ Where your money goes: {}. {}", breakdown, insight),
        };

        AIResponse::new(message, Intent::Category.confidence())
            .with_suggestions(self.knowledge.category_suggestions(top_name))
            .with_follow_up("Which category would you like to optimize first?")
    }

    pub fn prediction<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let trend = ctx.monthly_trend;
        let predicted = self.money(finite(ctx.total_spent) * trend.multiplier());

        let message = match variant(rng, 2) {
            0 => format!(
                "🔮 Prediction: Based on your {} spending trend, next month you'll likely spend around {}. Your current pattern suggests {}.",
                trend,
                predicted,
                trend.advice()
            ),
            _ => format!(
                "🔭 Forecast: With a {} trend, expect roughly {} next month. Your current pattern suggests {}.",
                trend,
                predicted,
                trend.advice()
            ),
        };

        AIResponse::new(message, Intent::Prediction.confidence())
            .with_suggestions(PREDICTION_SUGGESTIONS.iter().copied())
            .with_follow_up("Want tips to influence this prediction positively?")
    }

    pub fn comparison<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let (category, amount) = top_or_unknown(ctx);
        let band = self.knowledge.classify(category, amount);
        let verdict = band.map(|b| b.verdict()).unwrap_or("within normal ranges");
        let status = band.map(|b| b.status()).unwrap_or("in normal range");
        let daily = self.money(ctx.daily_average);
        let top_amount = self.money(amount);

        let message = match variant(rng, 2) {
            0 => format!(
                "📊 Comparison: Your {}/day spending is {}. {} at {} is {} compared to typical ranges.",
                daily, verdict, category, top_amount, status
            ),
            _ => format!(
                "⚖️ Benchmark check: {} at {} is {} compared to typical ranges, and your {}/day spending is {}.",
                category, top_amount, status, daily, verdict
            ),
        };

        AIResponse::new(message, Intent::Comparison.confidence())
            .with_follow_up("Want specific recommendations based on these comparisons?")
    }

    pub fn fallback<R: Rng + ?Sized>(&self, ctx: &FinancialContext, rng: &mut R) -> AIResponse {
        let message = match (variant(rng, 3), ctx.top_category()) {
            (0, _) => format!(
                "🤔 I understand you're asking about finances. With your {} spending pattern, I can help with budgeting, saving strategies, or category optimization.",
                self.money(ctx.total_spent)
            ),
            (1, Some(top)) => format!(
                "💭 Interesting question! Your {} spending ({}) stands out. Want to explore that or ask about something else?",
                top.category,
                self.money(top.amount)
            ),
            (1, None) => "💭 Interesting question! No spending category stands out yet. Want to explore budgeting or ask about something else?".to_string(),
            _ => format!(
                "✨ Good point! Your {}/day average suggests room for optimization. What aspect interests you most?",
                self.money(ctx.daily_average)
            ),
        };

        AIResponse::new(message, Intent::Fallback.confidence())
            .with_suggestions(FALLBACK_SUGGESTIONS.iter().copied())
            .with_follow_up("I'm here to help with any financial questions!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Trend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn composer() -> Composer {
        Composer::new("$", KnowledgeBase::builtin())
    }

    fn sample_context() -> FinancialContext {
        FinancialContext::new(1000.0, 33.33, Trend::Increasing)
            .with_category("Food & Dining", 500.0)
            .with_category("Shopping", 300.0)
            .with_category("Travel", 150.0)
            .with_category("Other", 50.0)
    }

    fn all_variants<F>(compose: F) -> Vec<AIResponse>
    where
        F: Fn(&mut StdRng) -> AIResponse,
    {
        (0..40)
            .map(|seed| compose(&mut StdRng::seed_from_u64(seed)))
            .collect()
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(money("$", 12.5), "$12.50");
        assert_eq!(money("$", f64::NAN), "$0.00");
        assert_eq!(money("$", -0.0), "$0.00");
        assert_eq!(percent(f64::INFINITY), "0.0%");
        assert_eq!(percent(12.345), "12.3%");
    }

    #[test]
    fn test_spending_cites_top_amount_and_share() {
        let c = composer();
        let ctx = sample_context();
        for response in all_variants(|rng| c.spending(&ctx, rng)) {
            assert!(response.message.contains("$500.00"), "{}", response.message);
            assert!(response.message.contains("50.0%"), "{}", response.message);
            assert_eq!(
                response.suggestions.as_deref().unwrap()[0],
                "Try meal planning"
            );
        }
    }

    #[test]
    fn test_budget_split() {
        let c = composer();
        let ctx = FinancialContext::new(430.0, 0.0, Trend::Stable);
        let messages: Vec<String> = all_variants(|rng| c.budget(&ctx, rng))
            .into_iter()
            .map(|r| r.message)
            .collect();

        assert!(messages
            .iter()
            .any(|m| m.contains("$215.00 needs, $129.00 wants, $86.00 savings")));
        assert!(messages.iter().any(|m| m.contains("$100.00/week")));
    }

    #[test]
    fn test_saving_potential() {
        let c = composer();
        let ctx = sample_context();
        for response in all_variants(|rng| c.saving(&ctx, rng)) {
            let m = &response.message;
            assert!(m.contains("Food & Dining"), "{}", m);
            if m.contains("reduction saves") || m.contains("even") {
                assert!(m.contains("$75.00"), "{}", m);
            }
        }

        let no_top = FinancialContext::new(200.0, 0.0, Trend::Stable);
        for response in all_variants(|rng| c.saving(&no_top, rng)) {
            let m = &response.message;
            assert!(!m.contains(UNKNOWN_CATEGORY), "{}", m);
            if m.contains("reduction saves") {
                assert!(m.contains("10% reduction saves $20.00"), "{}", m);
            }
        }
    }

    #[test]
    fn test_category_lists_top_three() {
        let c = composer();
        let response = c.category(&sample_context(), &mut StdRng::seed_from_u64(1));
        let m = &response.message;
        assert!(m.contains("Food & Dining: $500.00 (50.0%)"));
        assert!(m.contains("Shopping: $300.00 (30.0%)"));
        assert!(m.contains("Travel: $150.00 (15.0%)"));
        assert!(!m.contains("Other"));
        assert!(m.ends_with("Food spending suggests you value convenience or dining experiences."));
    }

    #[test]
    fn test_prediction_uses_trend_multiplier() {
        let c = composer();
        let up = FinancialContext::new(200.0, 0.0, Trend::Increasing);
        let down = FinancialContext::new(200.0, 0.0, Trend::Decreasing);
        for response in all_variants(|rng| c.prediction(&up, rng)) {
            assert!(response.message.contains("$220.00"));
            assert!(response.message.contains("manage growth"));
        }
        for response in all_variants(|rng| c.prediction(&down, rng)) {
            assert!(response.message.contains("$180.00"));
        }
    }

    #[test]
    fn test_comparison_bands() {
        let c = composer();
        let above = FinancialContext::new(900.0, 30.0, Trend::Stable).with_category("Shopping", 600.0);
        let response = c.comparison(&above, &mut StdRng::seed_from_u64(0));
        assert!(response.message.contains("above average (room for optimization)"));
        assert!(response.message.contains("higher than typical"));
        assert!(response.suggestions.is_none());

        let unknown = FinancialContext::new(900.0, 30.0, Trend::Stable).with_category("Travel", 600.0);
        let response = c.comparison(&unknown, &mut StdRng::seed_from_u64(0));
        assert!(response.message.contains("within normal ranges"));
        assert!(response.message.contains("in normal range"));
    }

    #[test]
    fn test_empty_context_uses_neutral_wording() {
        let c = composer();
        let ctx = FinancialContext::default();
        for intent in Intent::all() {
            for response in all_variants(|rng| c.compose(*intent, &ctx, rng)) {
                let m = &response.message;
                assert!(!m.is_empty());
                assert!(!m.contains("NaN") && !m.contains("$inf"), "{}", m);
                assert!(!m.contains("inf%"), "{}", m);
                assert_eq!(response.confidence, intent.confidence());
            }
        }
    }

    #[test]
    fn test_greeting_without_category() {
        let c = composer();
        let ctx = FinancialContext::default();
        for response in all_variants(|rng| c.greeting(&ctx, rng)) {
            assert!(!response.message.contains(UNKNOWN_CATEGORY));
            assert!(response.suggestions.is_none());
        }
    }

    #[test]
    fn test_greeting_wording_is_currency_neutral() {
        let c = composer();
        let ctx = sample_context();
        for response in all_variants(|rng| c.greeting(&ctx, rng)) {
            assert!(!response.message.contains("taka"), "{}", response.message);
            assert!(response.message.contains('$'), "{}", response.message);
        }
    }
}
