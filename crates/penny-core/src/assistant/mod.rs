//! Local rule-based financial assistant
//!
//! `message + context -> classify -> compose -> AIResponse`. Nothing here does
//! I/O or holds mutable state; the only shared data is the static
//! [`KnowledgeBase`], so one assistant can serve any number of concurrent
//! requests.
//!
//! Template choice is random. Use [`FinancialAssistant::respond_with`] with a
//! seeded RNG, or set a seed in the config, for repeatable output.

mod canned;
mod compose;
mod intent;
mod knowledge;
mod response;

pub use canned::{CannedResponder, CANNED_CONFIDENCE};
pub use compose::{Composer, UNKNOWN_CATEGORY};
pub use intent::{Intent, IntentClassifier, IntentRule, Matcher};
pub use knowledge::{Band, Benchmarks, CategoryKnowledge, KnowledgeBase, KNOWLEDGE_BASE};
pub use response::{AIResponse, Reply, ResponseSource};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AssistantConfig;
use crate::context::FinancialContext;
use crate::error::Result;

/// Anything that turns a message and a context into a tagged reply
pub trait Responder: Send + Sync {
    /// Which responder kind produced the reply
    fn source(&self) -> ResponseSource;

    fn reply(&self, message: &str, ctx: &FinancialContext) -> Reply;
}

/// The full assistant: intent classifier, composer and knowledge base
#[derive(Debug, Clone)]
pub struct FinancialAssistant {
    classifier: IntentClassifier,
    composer: Composer,
    seed: Option<u64>,
}

impl FinancialAssistant {
    /// Assistant with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&AssistantConfig::default())
    }

    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        Ok(Self {
            classifier: IntentClassifier::new()?,
            composer: Composer::new(config.currency_symbol.clone(), KnowledgeBase::builtin()),
            seed: config.seed,
        })
    }

    pub fn classify(&self, message: &str) -> Intent {
        self.classifier.classify(message)
    }

    pub fn knowledge(&self) -> &'static KnowledgeBase {
        self.composer.knowledge()
    }

    pub fn currency(&self) -> &str {
        self.composer.currency()
    }

    /// Respond using the configured seed, or the thread RNG when unseeded
    pub fn respond(&self, message: &str, ctx: &FinancialContext) -> AIResponse {
        self.compose_seeded(self.classify(message), ctx)
    }

    /// Respond with a caller-supplied RNG
    pub fn respond_with<R: Rng + ?Sized>(
        &self,
        message: &str,
        ctx: &FinancialContext,
        rng: &mut R,
    ) -> AIResponse {
        self.compose(self.classify(message), ctx, rng)
    }

    fn compose_seeded(&self, intent: Intent, ctx: &FinancialContext) -> AIResponse {
        match self.seed {
            Some(seed) => self.compose(intent, ctx, &mut StdRng::seed_from_u64(seed)),
            None => self.compose(intent, ctx, &mut rand::thread_rng()),
        }
    }

    fn compose<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        ctx: &FinancialContext,
        rng: &mut R,
    ) -> AIResponse {
        let response = self.composer.compose(intent, ctx, rng);
        tracing::debug!(
            intent = intent.as_str(),
            confidence = response.confidence,
            "Composed assistant response"
        );
        response
    }
}

impl Responder for FinancialAssistant {
    fn source(&self) -> ResponseSource {
        ResponseSource::LocalAi
    }

    fn reply(&self, message: &str, ctx: &FinancialContext) -> Reply {
        let intent = self.classify(message);
        Reply {
            intent,
            source: self.source(),
            response: self.compose_seeded(intent, ctx),
        }
    }
}
