//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(AnalysisConfig::default(), ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn intake() -> serde_json::Value {
    serde_json::json!({
        "name": "Acme Supplies",
        "sector": "Commercial Representation",
        "company_size": "Small",
        "budget": "$5,001 - $15,000",
        "challenges": ["Low lead generation", "Low conversion"],
        "current_channels": ["Email marketing"],
        "primary_objective": "Increase sales",
        "deadline": "6-12 months",
        "growth_target": 40
    })
}

const CSV: &str = "spend,leads,channel\n1,2,Email\n2,4,Ads\n3,6,Email\n4,8,Ads\n100,9,Email\n";

// ========== Health & Knowledge Tests ==========

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
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_get_knowledge() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/knowledge")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let sectors = json["sectors"].as_array().unwrap();
    assert!(!sectors.is_empty());
    assert_eq!(sectors[0]["sector"], "Commercial Representation");
}

// ========== Client Workflow Tests ==========

#[tokio::test]
async fn test_build_profile() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/profile", intake()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["name"], "Acme Supplies");
    assert_eq!(json["budget"], "$5,001 - $15,000");
    assert_eq!(json["growth_target"], 40);
}

#[tokio::test]
async fn test_build_profile_rejects_non_object() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/profile", serde_json::json!(["not", "an", "object"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("JSON object"));
}

#[tokio::test]
async fn test_analyze() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/analyze", intake()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let insights = json["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 6);
    assert_eq!(insights[0]["priority"], "High");
    assert_eq!(json["scores"]["success_probability"], "95%");
}

#[tokio::test]
async fn test_create_proposal_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/proposals", intake()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["proposal_id"].as_str().unwrap().starts_with("PROP-AS-"));
    assert_eq!(json["total_investment"], "$80,000");
    assert_eq!(json["investment_breakdown"]["total_6_months"], 80000);
    assert_eq!(json["strategies"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_proposal_markdown() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/proposals?format=markdown", intake()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/markdown"));
    let text = get_body_text(response).await;
    assert!(text.starts_with("# Marketing Proposal: Acme Supplies"));
}

#[tokio::test]
async fn test_create_proposal_unknown_format() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/proposals?format=pdf", intake()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Statistics Tests ==========

#[tokio::test]
async fn test_descriptive() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/descriptive",
            serde_json::json!({ "csv": CSV }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let stats = json["statistics"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["column"], "spend");
    assert_eq!(stats[0]["count"], 5);
    assert_eq!(json["quality"]["total_rows"], 5);
}

#[tokio::test]
async fn test_descriptive_unknown_column() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/descriptive",
            serde_json::json!({ "csv": CSV, "columns": ["revenue"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_csv_is_bad_request() {
    let app = setup_test_app();

    for body in [serde_json::json!({}), serde_json::json!({ "csv": "  " })] {
        let response = app
            .clone()
            .oneshot(post_json("/api/stats/outliers", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("csv"));
    }
}

#[tokio::test]
async fn test_outliers_iqr() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/outliers",
            serde_json::json!({ "csv": CSV, "method": "iqr" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["method"], "iqr");
    let spend = &json["columns"][0];
    assert_eq!(spend["column"], "spend");
    assert_eq!(spend["indices"], serde_json::json!([4]));
}

#[tokio::test]
async fn test_outliers_unknown_method() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/outliers",
            serde_json::json!({ "csv": CSV, "method": "dbscan" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_correlation() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/correlation",
            serde_json::json!({ "csv": CSV, "method": "spearman" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["method"], "spearman");
    assert_eq!(json["matrix"]["columns"], serde_json::json!(["spend", "leads"]));
    // Both columns increase monotonically
    assert_eq!(json["strong"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_categorical() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/categorical",
            serde_json::json!({ "csv": CSV }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json[0]["column"], "channel");
    assert_eq!(json[0]["most_frequent"], "Email");
}

#[tokio::test]
async fn test_dataset_report() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/stats/report",
            serde_json::json!({ "csv": CSV, "title": "Leads" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = get_body_text(response).await;
    assert!(text.starts_with("# Leads"));
    assert!(text.contains("## Numeric Summary"));
}
