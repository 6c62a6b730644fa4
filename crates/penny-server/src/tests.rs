//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    setup_app_with(ServerConfig::default())
}

fn setup_app_with(config: ServerConfig) -> Router {
    let assistant_config = AssistantConfig {
        seed: Some(7),
        ..Default::default()
    };
    create_router(assistant_config, config).unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ========== Chat ==========

#[tokio::test]
async fn test_chat_spending() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/assistant/chat",
            serde_json::json!({
                "message": "how much did I spend",
                "context": {
                    "totalSpent": 1000,
                    "dailyAverage": 33.33,
                    "topCategories": [{"category": "Food & Dining", "amount": 500}],
                    "recentExpenses": [],
                    "monthlyTrend": "increasing"
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "spending");
    assert_eq!(json["source"], "local_ai");
    assert_eq!(json["confidence"], 0.90);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("500.00"));
    assert!(message.contains("50.0%"));
    assert_eq!(
        json["followUp"],
        "Want specific tips for your top spending category?"
    );
    assert!(json["suggestions"].is_array());
}

#[tokio::test]
async fn test_chat_without_context_greets() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/assistant/chat",
            serde_json::json!({"message": "hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "greeting");
    assert_eq!(json["confidence"], 0.95);
    assert!(!json["message"].as_str().unwrap().is_empty());
    // Greetings carry no suggestions
    assert!(json.get("suggestions").is_none());
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    for body in [
        serde_json::json!({"message": ""}),
        serde_json::json!({"message": "   "}),
        serde_json::json!({"context": {}}),
    ] {
        let app = setup_test_app();
        let response = app
            .oneshot(post_json("/api/assistant/chat", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_body_json(response).await;
        assert_eq!(json["error"], "Message is required");
    }
}

#[tokio::test]
async fn test_chat_with_canned_responder() {
    let app = setup_app_with(ServerConfig {
        responder: ResponderKind::Canned,
        ..Default::default()
    });

    let response = app
        .oneshot(post_json(
            "/api/assistant/chat",
            serde_json::json!({"message": "predict next month", "context": {"totalSpent": 90}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["intent"], "fallback");
    assert_eq!(json["confidence"], 0.5);
}

#[tokio::test]
async fn test_chat_with_expenses() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/assistant/chat/expenses",
            serde_json::json!({
                "message": "predict next month",
                "today": "2024-06-30",
                "expenses": [
                    {"amount": 150.0, "category": "Shopping", "date": "2024-06-20"},
                    {"amount": 50.0, "category": "Transportation", "date": "2024-06-10T09:00:00.000Z"},
                    {"amount": 999.0, "category": "Travel", "date": "2023-01-01"}
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "prediction");
    assert_eq!(json["confidence"], 0.75);
    // 200 in the window, nothing in the previous one, so the trend is stable
    assert!(json["message"].as_str().unwrap().contains("৳200.00"));
}

#[tokio::test]
async fn test_chat_with_negative_expense() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/assistant/chat/expenses",
            serde_json::json!({
                "message": "how much did I spend",
                "expenses": [{"amount": -10.0, "category": "Shopping", "date": "2024-06-20"}]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Classify ==========

#[tokio::test]
async fn test_classify() {
    let cases = [
        ("should I save or budget", "budget", 0.85),
        ("hi, what's my budget", "greeting", 0.95),
        ("tell me a joke", "fallback", 0.70),
    ];

    for (message, intent, confidence) in cases {
        let app = setup_test_app();
        let response = app
            .oneshot(post_json(
                "/api/assistant/classify",
                serde_json::json!({"message": message}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        assert_eq!(json["intent"], intent, "{}", message);
        assert_eq!(json["confidence"], confidence, "{}", message);
    }
}

// ========== Insights ==========

#[tokio::test]
async fn test_spending_summary() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/insights/summary",
            serde_json::json!({
                "period": "week",
                "today": "2024-06-13",
                "expenses": [
                    {"amount": 40.0, "category": "Groceries", "date": "2024-06-10"},
                    {"amount": 20.0, "category": "Entertainment", "date": "2024-06-12"},
                    {"amount": 500.0, "category": "Travel", "date": "2024-06-01"}
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["period"], "week");
    assert_eq!(json["expenseCount"], 2);
    assert_eq!(json["totalSpent"], 60.0);
    assert_eq!(json["topCategory"], "Groceries");
    assert_eq!(json["kind"], "recommendation");
    assert_eq!(
        json["summary"],
        "You spent ৳60.00 this week, averaging ৳12.00 per day."
    );
}

#[tokio::test]
async fn test_spending_summary_empty() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/insights/summary",
            serde_json::json!({"expenses": []}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["period"], "month");
    assert_eq!(json["kind"], "tip");
    assert!(json["topCategory"].is_null());
}

// ========== Config ==========

#[test]
fn test_responder_kind_parse() {
    assert_eq!("Canned".parse::<ResponderKind>().unwrap(), ResponderKind::Canned);
    assert_eq!(" local ".parse::<ResponderKind>().unwrap(), ResponderKind::Local);
    assert!("openai".parse::<ResponderKind>().is_err());
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let app = setup_app_with(ServerConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        ..Default::default()
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:3000"
    );
}
