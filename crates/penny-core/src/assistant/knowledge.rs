//! Static financial knowledge base
//!
//! Budgeting strategies, saving tips and per-category tips, benchmarks and
//! insights. Everything is a `'static` constant table built at compile time,
//! so the knowledge base can be read from any number of threads at once.
//!
//! Only a few categories carry benchmarks. Lookups for other categories
//! return `None` (benchmarks, bands) or a generic value (tips, insight).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const BUDGETING_STRATEGIES: &[&str] = &[
    "50/30/20 rule: 50% needs, 30% wants, 20% savings",
    "Zero-based budgeting: Every dollar has a purpose",
    "Envelope method: Allocate specific amounts for categories",
    "Pay yourself first: Save before spending",
    "Automate savings: Set up automatic transfers",
];

const SAVING_TIPS: &[&str] = &[
    "Track every expense for increased awareness",
    "Use the 24-hour rule for non-essential purchases",
    "Cook at home more often to reduce food costs",
    "Review subscriptions monthly and cancel unused ones",
    "Set specific savings goals with deadlines",
];

const GENERIC_TIPS: &[&str] = &[
    "Track expenses",
    "Set limits",
    "Compare alternatives",
    "Review regularly",
];

const GENERIC_INSIGHT: &str = "This category reflects your lifestyle priorities.";

const SAVING_EXTRAS: &[&str] = &["Try 10% reduction", "Use cashback apps", "Compare prices"];

const CATEGORY_EXTRAS: &[&str] = &["Set category budgets", "Track weekly", "Find alternatives"];

const CATEGORIES: &[CategoryKnowledge] = &[
    CategoryKnowledge {
        category: "Food & Dining",
        tips: &[
            "Try meal planning",
            "Cook in batches",
            "Use grocery lists",
            "Compare prices",
        ],
        benchmarks: Benchmarks::new(250.0, 400.0, 600.0),
        insight: "Food spending suggests you value convenience or dining experiences.",
    },
    CategoryKnowledge {
        category: "Transportation",
        tips: &[
            "Use public transport",
            "Carpool when possible",
            "Combine errands",
            "Walk/bike short distances",
        ],
        benchmarks: Benchmarks::new(200.0, 350.0, 500.0),
        insight: "Transport costs indicate mobility priorities - consider alternatives.",
    },
    CategoryKnowledge {
        category: "Shopping",
        tips: &[
            "Make shopping lists",
            "Compare prices online",
            "Use cashback apps",
            "Avoid impulse buying",
        ],
        benchmarks: Benchmarks::new(150.0, 300.0, 500.0),
        insight: "Shopping patterns show lifestyle preferences - review necessity vs wants.",
    },
    CategoryKnowledge {
        category: "Entertainment",
        tips: &[
            "Look for free events",
            "Use streaming instead of theaters",
            "Happy hour specials",
            "Group discounts",
        ],
        benchmarks: Benchmarks::new(100.0, 200.0, 350.0),
        insight: "Entertainment spending reflects work-life balance priorities.",
    },
];

/// The process-wide knowledge base
pub static KNOWLEDGE_BASE: KnowledgeBase = KnowledgeBase {
    budgeting_strategies: BUDGETING_STRATEGIES,
    saving_tips: SAVING_TIPS,
    categories: CATEGORIES,
};

/// Typical monthly spending thresholds for a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub low: f64,
    pub medium: f64,
    /// Reference only; anything above `medium` is already `Above`
    pub high: f64,
}

impl Benchmarks {
    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    /// NaN counts as nothing spent
    pub fn band(&self, amount: f64) -> Band {
        if amount.is_nan() || amount <= self.low {
            Band::Below
        } else if amount <= self.medium {
            Band::Typical
        } else {
            Band::Above
        }
    }
}

/// Where an amount sits against its category benchmarks (best to worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Below,
    Typical,
    Above,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Below => "below",
            Band::Typical => "typical",
            Band::Above => "above",
        }
    }

    /// Verdict on overall spending, e.g. "is below average (great job!)"
    pub fn verdict(&self) -> &'static str {
        match self {
            Band::Below => "below average (great job!)",
            Band::Typical => "typical for most people",
            Band::Above => "above average (room for optimization)",
        }
    }

    /// Status of the category amount itself
    pub fn status(&self) -> &'static str {
        match self {
            Band::Below => "excellently managed",
            Band::Typical => "reasonably controlled",
            Band::Above => "higher than typical",
        }
    }

    /// Standalone sentence used in spending analyses
    pub fn remark(&self) -> &'static str {
        match self {
            Band::Below => "You're doing great - below average spending!",
            Band::Typical => "You're in the typical range for this category.",
            Band::Above => "This is above average - consider optimizing here.",
        }
    }
}

/// Everything the knowledge base knows about one category
#[derive(Debug, Clone, Copy)]
pub struct CategoryKnowledge {
    pub category: &'static str,
    pub tips: &'static [&'static str],
    pub benchmarks: Benchmarks,
    pub insight: &'static str,
}

/// Read-only reference data for composing responses
#[derive(Debug)]
pub struct KnowledgeBase {
    budgeting_strategies: &'static [&'static str],
    saving_tips: &'static [&'static str],
    categories: &'static [CategoryKnowledge],
}

impl KnowledgeBase {
    /// The built-in knowledge base
    pub fn builtin() -> &'static KnowledgeBase {
        &KNOWLEDGE_BASE
    }

    pub fn budgeting_strategies(&self) -> &'static [&'static str] {
        self.budgeting_strategies
    }

    pub fn saving_tips(&self) -> &'static [&'static str] {
        self.saving_tips
    }

    /// Categories that carry tips and benchmarks
    pub fn known_categories(&self) -> impl Iterator<Item = &'static str> {
        self.categories.iter().map(|c| c.category)
    }

    pub fn random_strategy<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.budgeting_strategies
            .choose(rng)
            .copied()
            .unwrap_or_default()
    }

    pub fn random_saving_tip<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.saving_tips.choose(rng).copied().unwrap_or_default()
    }

    pub fn lookup(&self, category: &str) -> Option<&'static CategoryKnowledge> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn benchmarks_for(&self, category: &str) -> Option<Benchmarks> {
        self.lookup(category).map(|c| c.benchmarks)
    }

    /// Category tips, or generic tips when the category is unknown
    pub fn tips_for(&self, category: &str) -> &'static [&'static str] {
        self.lookup(category).map(|c| c.tips).unwrap_or(GENERIC_TIPS)
    }

    /// One-line insight, or a generic sentence when the category is unknown
    pub fn insight_for(&self, category: &str) -> &'static str {
        self.lookup(category)
            .map(|c| c.insight)
            .unwrap_or(GENERIC_INSIGHT)
    }

    /// Band of `amount` against the category benchmarks, if it has any
    pub fn classify(&self, category: &str, amount: f64) -> Option<Band> {
        self.benchmarks_for(category).map(|b| b.band(amount))
    }

    pub fn spending_suggestions(&self, category: Option<&str>) -> Vec<String> {
        let tips = category.map(|c| self.tips_for(c)).unwrap_or(GENERIC_TIPS);
        tips.iter().map(|t| t.to_string()).collect()
    }

    pub fn saving_suggestions(&self, category: Option<&str>) -> Vec<String> {
        let mut suggestions = self.spending_suggestions(category);
        suggestions.extend(SAVING_EXTRAS.iter().map(|t| t.to_string()));
        suggestions
    }

    pub fn category_suggestions(&self, category: Option<&str>) -> Vec<String> {
        let mut suggestions = self.spending_suggestions(category);
        suggestions.extend(CATEGORY_EXTRAS.iter().map(|t| t.to_string()));
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_benchmark_bands() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.classify("Food & Dining", 250.0), Some(Band::Below));
        assert_eq!(kb.classify("Food & Dining", 250.01), Some(Band::Typical));
        assert_eq!(kb.classify("Food & Dining", 400.0), Some(Band::Typical));
        assert_eq!(kb.classify("Food & Dining", 401.0), Some(Band::Above));
        // `high` is not a further cutoff
        assert_eq!(kb.classify("Food & Dining", 10_000.0), Some(Band::Above));
        assert_eq!(kb.classify("Healthcare", 10.0), None);
    }

    #[test]
    fn test_nan_amount_is_below_band() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.classify("Food & Dining", f64::NAN), Some(Band::Below));
        assert_eq!(kb.classify("Shopping", f64::INFINITY), Some(Band::Above));
    }

    #[test]
    fn test_bands_are_monotonic() {
        let kb = KnowledgeBase::builtin();
        for category in kb.known_categories() {
            let mut previous = Band::Below;
            for step in 0..1000 {
                let band = kb.classify(category, step as f64).unwrap();
                assert!(band >= previous, "{} regressed at {}", category, step);
                previous = band;
            }
        }
    }

    #[test]
    fn test_unknown_category_fallbacks() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.benchmarks_for("Travel"), None);
        assert_eq!(kb.tips_for("Travel"), GENERIC_TIPS);
        assert_eq!(kb.insight_for("Travel"), GENERIC_INSIGHT);
        assert!(kb.insight_for("Shopping").starts_with("Shopping patterns"));
    }

    #[test]
    fn test_suggestion_lists() {
        let kb = KnowledgeBase::builtin();
        let saving = kb.saving_suggestions(Some("Transportation"));
        assert_eq!(saving.len(), 7);
        assert_eq!(saving[0], "Use public transport");
        assert_eq!(saving[4], "Try 10% reduction");

        let category = kb.category_suggestions(None);
        assert_eq!(category[0], "Track expenses");
        assert_eq!(category.last().unwrap(), "Find alternatives");
    }

    #[test]
    fn test_random_picks_come_from_tables() {
        let kb = KnowledgeBase::builtin();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(kb.budgeting_strategies().contains(&kb.random_strategy(&mut rng)));
            assert!(kb.saving_tips().contains(&kb.random_saving_tip(&mut rng)));
        }
    }
}
