//! Response types returned by responders

use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// A composed answer to one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIResponse {
    pub message: String,
    /// Fixed per intent, in [0, 1]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl AIResponse {
    pub fn new(message: impl Into<String>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            confidence,
            suggestions: None,
            follow_up: None,
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_follow_up(mut self, follow_up: impl Into<String>) -> Self {
        self.follow_up = Some(follow_up.into());
        self
    }
}

/// Which responder produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    LocalAi,
    Fallback,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::LocalAi => "local_ai",
            ResponseSource::Fallback => "fallback",
        }
    }
}

/// A response tagged with its intent and source, as relayed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub intent: Intent,
    pub source: ResponseSource,
    #[serde(flatten)]
    pub response: AIResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(AIResponse::new("hi", 0.95)).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hi", "confidence": 0.95}));
    }

    #[test]
    fn test_follow_up_is_camel_case() {
        let response = AIResponse::new("hi", 0.95)
            .with_suggestions(["a", "b"])
            .with_follow_up("next?");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["followUp"], "next?");
        assert_eq!(json["suggestions"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_reply_flattens_response() {
        let reply = Reply {
            intent: Intent::Saving,
            source: ResponseSource::LocalAi,
            response: AIResponse::new("cut back", 0.88),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["intent"], "saving");
        assert_eq!(json["source"], "local_ai");
        assert_eq!(json["message"], "cut back");
        assert!(json.get("response").is_none());
    }
}
