use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sea_orm::{ActiveValue, Database, EntityTrait};
use serde_json::{Value, json};
use tower::ServiceExt;

use std::sync::Arc;

use engine::users;
use migration::MigratorTrait;
use server::ServerState;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let user = users::ActiveModel {
        username: ActiveValue::Set("alice".to_string()),
        email: ActiveValue::Set("alice@example.com".to_string()),
        password_hash: ActiveValue::Set("password".to_string()),
        ..Default::default()
    };
    users::Entity::insert(user).exec(&db).await.unwrap();

    let state = ServerState {
        engine: Arc::new(engine::Engine::builder().database(db.clone()).build()),
        db,
    };
    server::router(state)
}

fn alice() -> String {
    format!("Basic {}", STANDARD.encode("alice:password"))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn ping_needs_no_auth() {
    let router = test_router().await;

    let (status, body) = send(&router, "GET", "/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));
}

#[tokio::test]
async fn missing_or_wrong_credentials_are_unauthorized() {
    let router = test_router().await;

    let (status, _) = send(&router, "GET", "/expenses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = format!("Basic {}", STANDARD.encode("alice:nope"));
    let (status, _) = send(&router, "GET", "/expenses", Some(&wrong), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expense_roundtrip() {
    let router = test_router().await;
    let auth = alice();

    let (status, created) = send(
        &router,
        "POST",
        "/expenses",
        Some(&auth),
        Some(json!({
            "description": "Lunch",
            "amount": 12.5,
            "category": "Food",
            "rule_category": "Needs"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "Food");
    assert_eq!(created["rule_category"], "Needs");

    // No category falls back to the default bucket.
    let (status, fallback) = send(
        &router,
        "POST",
        "/expenses",
        Some(&auth),
        Some(json!({
            "description": "Something",
            "amount": 3.0,
            "category": null,
            "rule_category": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fallback["category"], "Uncategorized");

    let (status, list) = send(&router, "GET", "/expenses", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let id = created["id"].as_i64().unwrap();
    let (status, _) = send(
        &router,
        "DELETE",
        &format!("/expenses/{id}"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_rule_category_is_unprocessable() {
    let router = test_router().await;
    let auth = alice();

    let (status, body) = send(
        &router,
        "POST",
        "/expenses",
        Some(&auth),
        Some(json!({
            "description": "Lunch",
            "amount": 12.5,
            "category": "Food",
            "rule_category": "Luxuries"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn deleting_missing_expense_is_not_found() {
    let router = test_router().await;
    let auth = alice();

    let (status, body) = send(&router, "DELETE", "/expenses/999", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn budget_upsert_is_idempotent_per_key() {
    let router = test_router().await;
    let auth = alice();

    let payload = |amount: f64| {
        json!({
            "category": "Food",
            "amount": amount,
            "month": 6,
            "year": 2026
        })
    };
    let (status, first) = send(&router, "POST", "/budgets", Some(&auth), Some(payload(100.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = send(&router, "POST", "/budgets", Some(&auth), Some(payload(150.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["amount"], json!(150.0));

    let (status, list) = send(
        &router,
        "GET",
        "/budgets?year=2026&month=6",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["amount"], json!(150.0));
}

#[tokio::test]
async fn invalid_month_query_is_unprocessable() {
    let router = test_router().await;
    let auth = alice();

    let (status, body) = send(
        &router,
        "GET",
        "/budgets?year=2026&month=13",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn budget_status_tracks_current_month_spending() {
    let router = test_router().await;
    let auth = alice();

    // No explicit period: both the upsert default-free body and the status
    // query land on the current month.
    let today = chrono::Utc::now().date_naive();
    let (status, _) = send(
        &router,
        "POST",
        "/budgets",
        Some(&auth),
        Some(json!({
            "category": "Food",
            "amount": 100.0,
            "month": chrono::Datelike::month(&today),
            "year": chrono::Datelike::year(&today)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &router,
        "POST",
        "/expenses",
        Some(&auth),
        Some(json!({
            "description": "Groceries",
            "amount": 120.0,
            "category": "Food",
            "rule_category": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, "GET", "/budget-status", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["category"], "Food");
    assert_eq!(entries[0]["spent_amount"], json!(120.0));
    assert_eq!(entries[0]["remaining_amount"], json!(-20.0));
    assert_eq!(entries[0]["percentage_spent"], json!(120.0));
}

#[tokio::test]
async fn rules_status_reports_current_month() {
    let router = test_router().await;
    let auth = alice();

    let (status, _) = send(
        &router,
        "POST",
        "/incomes",
        Some(&auth),
        Some(json!({
            "description": "Salary",
            "amount": 1000.0,
            "source": "Employer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for (description, amount, rule) in [
        ("Rent", 400.0, Some("Needs")),
        ("Concert", 200.0, Some("Wants")),
        ("Deposit", 100.0, Some("Savings")),
        ("Mystery", 50.0, None),
    ] {
        let (status, _) = send(
            &router,
            "POST",
            "/expenses",
            Some(&auth),
            Some(json!({
                "description": description,
                "amount": amount,
                "category": null,
                "rule_category": rule
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, "GET", "/budget-rules-status", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_income"], json!(1000.0));
    assert_eq!(body["needs"]["budgeted_percent"], json!(50));
    assert_eq!(body["needs"]["spent_percent"], json!(40.0));
    assert_eq!(body["wants"]["spent_percent"], json!(20.0));
    assert_eq!(body["savings_expenses"]["spent_percent"], json!(10.0));
    assert_eq!(body["unclassified_amount"], json!(50.0));
}

#[tokio::test]
async fn weekly_focus_set_and_clear() {
    let router = test_router().await;
    let auth = alice();

    let (status, body) = send(
        &router,
        "POST",
        "/weekly-focus",
        Some(&auth),
        Some(json!({ "focusText": "Cook at home" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["focus"]["focus_text"], "Cook at home");

    let (status, snapshot) = send(&router, "GET", "/weekly-snapshot", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["current_focus"], "Cook at home");

    let (status, body) = send(
        &router,
        "POST",
        "/weekly-focus",
        Some(&auth),
        Some(json!({ "focusText": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["focus"], Value::Null);

    let (_, snapshot) = send(&router, "GET", "/weekly-snapshot", Some(&auth), None).await;
    assert_eq!(snapshot["current_focus"], Value::Null);
}

#[tokio::test]
async fn weekly_snapshot_totals_cover_the_last_week() {
    let router = test_router().await;
    let auth = alice();

    for (uri, payload) in [
        ("/incomes", json!({ "description": "Salary", "amount": 100.0, "source": null })),
        ("/expenses", json!({ "description": "Groceries", "amount": 30.0, "category": "Food", "rule_category": null })),
        ("/expenses", json!({ "description": "Takeaway", "amount": 20.0, "category": "Food", "rule_category": null })),
    ] {
        let (status, _) = send(&router, "POST", uri, Some(&auth), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, snapshot) = send(&router, "GET", "/weekly-snapshot", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["total_income_last_period"], json!(100.0));
    assert_eq!(snapshot["total_expenses_last_period"], json!(50.0));
    assert_eq!(snapshot["net_flow_last_period"], json!(50.0));
    assert_eq!(snapshot["biggest_expense"]["description"], "Groceries");
    assert_eq!(snapshot["top_spending_categories"][0]["category"], "Food");
    assert_eq!(snapshot["top_spending_categories"][0]["amount"], json!(50.0));
}
