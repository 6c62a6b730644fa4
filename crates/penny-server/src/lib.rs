//! Penny Web Server
//!
//! Axum-based REST API that relays chat messages to the financial assistant.
//! The server keeps no state between requests: every call carries its own
//! financial context (or the expenses to build one from).
//!
//! Security features:
//! - Restrictive CORS policy
//! - Security headers on every response
//! - Sanitized error responses

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use penny_core::{
    AssistantConfig, CannedResponder, ContextAssembler, FinancialAssistant, Responder,
};

mod handlers;

/// Which responder answers chat requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponderKind {
    /// Full rule-based assistant
    #[default]
    Local,
    /// Small canned template set
    Canned,
}

impl ResponderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponderKind::Local => "local",
            ResponderKind::Canned => "canned",
        }
    }
}

impl FromStr for ResponderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(ResponderKind::Local),
            "canned" => Ok(ResponderKind::Canned),
            _ => Err(format!("Unknown responder: {} (use local or canned)", s)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Responder used for chat requests
    pub responder: ResponderKind,
}

impl ServerConfig {
    /// Read `PENNY_ALLOWED_ORIGINS` (comma-separated) and `PENNY_RESPONDER`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(origins) = std::env::var("PENNY_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        if let Ok(kind) = std::env::var("PENNY_RESPONDER") {
            match kind.parse() {
                Ok(kind) => config.responder = kind,
                Err(e) => tracing::warn!("{}, using local", e),
            }
        }

        config
    }
}

/// Shared application state
pub struct AppState {
    /// Answers chat requests
    pub responder: Box<dyn Responder>,
    /// Full assistant, used for classification
    pub assistant: FinancialAssistant,
    pub assembler: ContextAssembler,
    pub assistant_config: AssistantConfig,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(assistant_config: AssistantConfig, config: ServerConfig) -> anyhow::Result<Self> {
        let assistant = FinancialAssistant::from_config(&assistant_config)?;
        let responder: Box<dyn Responder> = match config.responder {
            ResponderKind::Local => Box::new(assistant.clone()),
            ResponderKind::Canned => Box::new(CannedResponder::new(
                assistant_config.currency_symbol.clone(),
            )?),
        };

        Ok(Self {
            responder,
            assistant,
            assembler: ContextAssembler::from_config(&assistant_config),
            assistant_config,
            config,
        })
    }
}

/// Create the application router
pub fn create_router(
    assistant_config: AssistantConfig,
    config: ServerConfig,
) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::new(assistant_config, config)?);
    info!(
        responder = state.config.responder.as_str(),
        currency = %state.assistant_config.currency_symbol,
        "Assistant ready"
    );

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Assistant
        .route("/assistant/chat", post(handlers::chat))
        .route("/assistant/chat/expenses", post(handlers::chat_with_expenses))
        .route("/assistant/classify", post(handlers::classify))
        // Insights
        .route("/insights/summary", post(handlers::spending_summary));

    // Build CORS layer
    let cors = if state.config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // Security headers
    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ));

    Ok(Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(security_headers))
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    assistant_config: AssistantConfig,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(assistant_config, config)?;
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
