//! Intent classification
//!
//! A message is lower-cased and tested against an ordered list of rules. The
//! first matching rule wins, so a message mentioning both "budget" and "save"
//! is a budget question. Rules live in a `Vec`, never a map, to keep that
//! precedence fixed.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Greeting words, anchored at the start of the message
const GREETING_PATTERN: &str = r"^(hi|hello|hey|good|morning|afternoon|evening|sup|yo)";

const SPENDING_KEYWORDS: &[&str] = &["spend", "expense", "cost", "money"];
const BUDGET_KEYWORDS: &[&str] = &["budget", "plan", "allocate"];
const SAVING_KEYWORDS: &[&str] = &["save", "saving", "cut", "reduce"];
const CATEGORY_KEYWORDS: &[&str] = &["category", "categories", "breakdown"];
const PREDICTION_KEYWORDS: &[&str] = &["predict", "forecast", "next", "future"];
const COMPARISON_KEYWORDS: &[&str] = &["compare", "vs", "versus", "average"];

/// Classified purpose of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Spending,
    Budget,
    Saving,
    Category,
    Prediction,
    Comparison,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Spending => "spending",
            Intent::Budget => "budget",
            Intent::Saving => "saving",
            Intent::Category => "category",
            Intent::Prediction => "prediction",
            Intent::Comparison => "comparison",
            Intent::Fallback => "fallback",
        }
    }

    /// Fixed confidence attached to every response for this intent
    pub fn confidence(&self) -> f64 {
        match self {
            Intent::Greeting => 0.95,
            Intent::Category => 0.92,
            Intent::Spending => 0.90,
            Intent::Saving => 0.88,
            Intent::Budget => 0.85,
            Intent::Comparison => 0.80,
            Intent::Prediction => 0.75,
            Intent::Fallback => 0.70,
        }
    }

    pub fn all() -> &'static [Intent] {
        &[
            Intent::Greeting,
            Intent::Spending,
            Intent::Budget,
            Intent::Saving,
            Intent::Category,
            Intent::Prediction,
            Intent::Comparison,
            Intent::Fallback,
        ]
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Intent::all()
            .iter()
            .find(|i| i.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}

/// How a rule recognizes a message
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Regular expression tested against the lower-cased message
    Pattern(Regex),
    /// Any keyword appearing as a substring
    Keywords(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(text),
            Matcher::Keywords(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

/// One step of the classification cascade
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub matcher: Matcher,
}

impl IntentRule {
    pub fn pattern(intent: Intent, pattern: &str) -> Result<Self> {
        Ok(Self {
            intent,
            matcher: Matcher::Pattern(Regex::new(pattern)?),
        })
    }

    pub fn keywords(intent: Intent, words: &'static [&'static str]) -> Self {
        Self {
            intent,
            matcher: Matcher::Keywords(words),
        }
    }
}

/// Ordered first-match-wins intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Build the assistant's standard cascade
    pub fn new() -> Result<Self> {
        Ok(Self::from_rules(vec![
            IntentRule::pattern(Intent::Greeting, GREETING_PATTERN)?,
            IntentRule::keywords(Intent::Spending, SPENDING_KEYWORDS),
            IntentRule::keywords(Intent::Budget, BUDGET_KEYWORDS),
            IntentRule::keywords(Intent::Saving, SAVING_KEYWORDS),
            IntentRule::keywords(Intent::Category, CATEGORY_KEYWORDS),
            IntentRule::keywords(Intent::Prediction, PREDICTION_KEYWORDS),
            IntentRule::keywords(Intent::Comparison, COMPARISON_KEYWORDS),
        ]))
    }

    /// Build a classifier from an explicit, ordered rule list
    pub fn from_rules(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Classify a message; unmatched messages are `Fallback`
    pub fn classify(&self, message: &str) -> Intent {
        let lower = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(&lower))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Fallback)
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new().unwrap()
    }

    #[test]
    fn test_each_intent() {
        let c = classifier();
        assert_eq!(c.classify("hello"), Intent::Greeting);
        assert_eq!(c.classify("Good morning!"), Intent::Greeting);
        assert_eq!(c.classify("how much did I spend"), Intent::Spending);
        assert_eq!(c.classify("help me allocate funds"), Intent::Budget);
        assert_eq!(c.classify("where can I cut back"), Intent::Saving);
        assert_eq!(c.classify("show the breakdown"), Intent::Category);
        assert_eq!(c.classify("predict next month"), Intent::Prediction);
        assert_eq!(c.classify("how do I compare"), Intent::Comparison);
        assert_eq!(c.classify("tell me a joke"), Intent::Fallback);
    }

    #[test]
    fn test_precedence_budget_before_saving() {
        let c = classifier();
        assert_eq!(c.classify("should I save or budget"), Intent::Budget);
        assert_eq!(c.classify("save money"), Intent::Spending);
    }

    #[test]
    fn test_greeting_must_be_anchored() {
        let c = classifier();
        assert_eq!(c.classify("hi, what's my budget"), Intent::Greeting);
        assert_eq!(c.classify("ok hi what's my budget"), Intent::Budget);
        // Prefix match, not a word match
        assert_eq!(c.classify("yours truly"), Intent::Greeting);
    }

    #[test]
    fn test_case_insensitive() {
        let c = classifier();
        assert_eq!(c.classify("FORECAST please"), Intent::Prediction);
        assert_eq!(c.classify("HELLO"), Intent::Greeting);
    }

    #[test]
    fn test_keywords_match_substrings() {
        let c = classifier();
        // "explain" contains "plan"
        assert_eq!(c.classify("explain this"), Intent::Budget);
        assert_eq!(c.classify("food vs rent"), Intent::Comparison);
    }

    #[test]
    fn test_empty_message_is_fallback() {
        assert_eq!(classifier().classify(""), Intent::Fallback);
    }

    #[test]
    fn test_confidence_table() {
        assert_eq!(Intent::Greeting.confidence(), 0.95);
        assert_eq!(Intent::Category.confidence(), 0.92);
        assert_eq!(Intent::Spending.confidence(), 0.90);
        assert_eq!(Intent::Saving.confidence(), 0.88);
        assert_eq!(Intent::Budget.confidence(), 0.85);
        assert_eq!(Intent::Comparison.confidence(), 0.80);
        assert_eq!(Intent::Prediction.confidence(), 0.75);
        assert_eq!(Intent::Fallback.confidence(), 0.70);
    }

    #[test]
    fn test_intent_from_str() {
        assert_eq!("saving".parse::<Intent>().unwrap(), Intent::Saving);
        assert!("shopping".parse::<Intent>().is_err());
    }

    #[test]
    fn test_custom_rules_keep_order() {
        let c = IntentClassifier::from_rules(vec![
            IntentRule::keywords(Intent::Saving, &["save"]),
            IntentRule::keywords(Intent::Budget, &["budget"]),
        ]);
        assert_eq!(c.classify("save within budget"), Intent::Saving);
    }
}
