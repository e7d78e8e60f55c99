//! Integration tests for the REST gateway against a mock CRM API.
//!
//! Covers request construction, lenient amount parsing, the
//! refresh-once-and-retry policy, and the mapping of API rejections onto
//! the error taxonomy. The pure domain rules have their own inline tests;
//! here we only care that the gateway enforces them at the boundary.

use loyalty_desk::api::{AuthTokens, Gateway, Session};
use loyalty_desk::config::AppConfig;
use loyalty_desk::errors::Error;
use loyalty_desk::models::{
    Customer, SupportTicket, TicketCategory, TicketPriority, TicketStatus,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base_url: server.uri(),
        ..AppConfig::default()
    }
}

fn authed_gateway(server: &MockServer, access: &str) -> Gateway {
    let session = Arc::new(Session::with_tokens(AuthTokens {
        access: access.to_string(),
        refresh: "refresh-1".to_string(),
    }));
    Gateway::new(&test_config(server), session).expect("gateway build")
}

fn customer_json(id: i64, company: &str, billing_amount: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "first_name": "Asha",
        "last_name": "Rao",
        "email": "asha@example.com",
        "company_name": company,
        "billing_amount": billing_amount,
        "billing_transactions": [],
    })
}

fn ticket_in_status(id: i64, status: TicketStatus) -> SupportTicket {
    SupportTicket {
        id,
        customer: 1,
        subject: "Invoice mismatch".to_string(),
        description: None,
        category: TicketCategory::Billing,
        priority: TicketPriority::Medium,
        status,
        comments: Vec::new(),
        created_at: None,
    }
}

// ── request construction and parsing ─────────────────────────────────────

#[tokio::test]
async fn list_customers_sends_bearer_and_parses_decimal_strings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            customer_json(1, "Titan", serde_json::json!("2500.50")),
            customer_json(2, "Bata", serde_json::json!(null)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let customers = gateway.list_customers().await.expect("list");

    assert_eq!(customers.len(), 2);
    assert!((customers[0].billing_amount - 2500.50).abs() < f64::EPSILON);
    assert!((customers[1].billing_amount - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn billing_transactions_are_filtered_by_customer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/billing-transactions/"))
        .and(query_param("customer", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 9, "customer": 3, "amount": "150.25" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let transactions = gateway.list_billing_transactions(3).await.expect("list");
    assert_eq!(transactions.len(), 1);
    assert!((transactions[0].amount - 150.25).abs() < f64::EPSILON);
}

// ── refresh-once-and-retry policy ────────────────────────────────────────

#[tokio::test]
async fn expired_token_is_refreshed_once_and_the_request_retried() {
    let server = MockServer::start().await;

    // First attempt with the stale token is rejected once.
    Mock::given(method("GET"))
        .and(path("/api/customers/"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(serde_json::json!({ "refresh": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "fresh",
            "refresh": "refresh-2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The retry must carry the fresh token.
    Mock::given(method("GET"))
        .and(path("/api/customers/"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([customer_json(1, "Titan", 100.into())])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "stale");
    let customers = gateway.list_customers().await.expect("retried list");
    assert_eq!(customers.len(), 1);

    // The rotated pair is installed in the session.
    assert_eq!(
        gateway.session().access_token().await.as_deref(),
        Some("fresh")
    );
    assert_eq!(
        gateway.session().refresh_token().await.as_deref(),
        Some("refresh-2")
    );
}

#[tokio::test]
async fn failed_refresh_surfaces_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Token is invalid or expired",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "stale");
    let err = gateway.list_customers().await.expect_err("must fail");
    assert!(matches!(err, Error::SessionExpired), "got {err:?}");
}

#[tokio::test]
async fn second_rejection_after_refresh_is_terminal() {
    let server = MockServer::start().await;

    // Both the original attempt and the retry come back 401.
    Mock::given(method("GET"))
        .and(path("/api/customers/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "fresh",
            "refresh": "refresh-2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "stale");
    let err = gateway.list_customers().await.expect_err("must fail");
    assert!(matches!(err, Error::SessionExpired), "got {err:?}");
}

#[tokio::test]
async fn unreachable_api_is_a_transient_error() {
    // Port 1 is never listening.
    let config = AppConfig {
        api_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
        ..AppConfig::default()
    };
    let session = Arc::new(Session::with_tokens(AuthTokens {
        access: "access-1".to_string(),
        refresh: "refresh-1".to_string(),
    }));
    let gateway = Gateway::new(&config, session).expect("gateway build");

    let err = gateway.list_customers().await.expect_err("must fail");
    assert!(matches!(err, Error::Transient { .. }), "got {err:?}");
}

// ── credential lifecycle ─────────────────────────────────────────────────

#[tokio::test]
async fn login_installs_the_issued_token_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(serde_json::json!({
            "email": "desk@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "access-1",
            "refresh": "refresh-1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(Session::new());
    let gateway =
        Gateway::new(&test_config(&server), Arc::clone(&session)).expect("gateway build");

    gateway.login("desk@example.com", "hunter2").await.expect("login");
    assert!(session.is_authenticated().await);
    assert_eq!(session.access_token().await.as_deref(), Some("access-1"));
}

#[tokio::test]
async fn rejected_login_is_a_validation_error_with_the_api_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "No active account found with the given credentials",
        })))
        .mount(&server)
        .await;

    let session = Arc::new(Session::new());
    let gateway = Gateway::new(&test_config(&server), session).expect("gateway build");

    let err = gateway
        .login("desk@example.com", "wrong")
        .await
        .expect_err("must fail");
    match err {
        Error::Validation { detail } => assert!(detail.contains("No active account")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    let gateway = authed_gateway(&server, "access-1");
    gateway.logout().await.expect("logout");
    assert!(!gateway.session().is_authenticated().await);
}

// ── error taxonomy mapping ───────────────────────────────────────────────

#[tokio::test]
async fn validation_rejections_surface_inline_and_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/customers/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "email": ["customer with this email already exists."],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let draft = loyalty_desk::models::CustomerDraft {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.com".to_string(),
        company_name: "Titan".to_string(),
        billing_amount: 100.0,
        ..loyalty_desk::models::CustomerDraft::default()
    };

    let err = gateway.create_customer(&draft).await.expect_err("must fail");
    assert!(err.is_validation(), "got {err:?}");
}

// ── loyalty program uniqueness ───────────────────────────────────────────

#[tokio::test]
async fn duplicate_loyalty_program_conflicts_before_any_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/loyalty-programs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "customer": 7, "tier": "silver", "total_points": 900, "points_balance": 900 },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // The create endpoint must never be hit.
    Mock::given(method("POST"))
        .and(path("/api/loyalty-programs/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let customer: Customer =
        serde_json::from_value(customer_json(7, "Titan", 6000.into())).expect("fixture");

    let err = gateway
        .create_loyalty_program(&customer)
        .await
        .expect_err("must conflict");
    assert!(err.is_conflict(), "got {err:?}");
}

#[tokio::test]
async fn loyalty_program_is_created_with_frozen_tier_and_points() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/loyalty-programs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    // 18000 base + 2100 in transactions = 20100 total: gold, 3015 points.
    Mock::given(method("POST"))
        .and(path("/api/loyalty-programs/"))
        .and(body_json(serde_json::json!({
            "customer": 7,
            "tier": "gold",
            "total_points": 3015,
            "points_balance": 3015,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "customer": 7,
            "tier": "gold",
            "total_points": 3015,
            "points_balance": 3015,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut raw = customer_json(7, "Titan", 18_000.into());
    raw["billing_transactions"] = serde_json::json!([
        { "id": 1, "customer": 7, "amount": 2000 },
        { "id": 2, "customer": 7, "amount": "100.00" },
    ]);
    let customer: Customer = serde_json::from_value(raw).expect("fixture");

    let gateway = authed_gateway(&server, "access-1");
    let program = gateway
        .create_loyalty_program(&customer)
        .await
        .expect("create");
    assert_eq!(program.total_points, 3015);
}

#[tokio::test]
async fn api_uniqueness_rejection_maps_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/loyalty-programs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/loyalty-programs/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "customer": ["loyalty program with this customer already exists."],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let customer: Customer =
        serde_json::from_value(customer_json(7, "Titan", 6000.into())).expect("fixture");

    let err = gateway
        .create_loyalty_program(&customer)
        .await
        .expect_err("must conflict");
    assert!(matches!(err, Error::Conflict { .. }), "got {err:?}");
}

// ── ticket lifecycle at the boundary ─────────────────────────────────────

#[tokio::test]
async fn illegal_ticket_transition_never_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let closed = ticket_in_status(5, TicketStatus::Closed);

    let err = gateway
        .update_ticket_status(&closed, TicketStatus::Open)
        .await
        .expect_err("closed is terminal");
    assert!(matches!(err, Error::InvalidTransition { .. }), "got {err:?}");

    let open = ticket_in_status(6, TicketStatus::Open);
    let err = gateway
        .update_ticket_status(&open, TicketStatus::Open)
        .await
        .expect_err("no-op must be rejected");
    assert!(matches!(err, Error::NoOpTransition { .. }), "got {err:?}");
}

#[tokio::test]
async fn resolving_ticket_persists_the_legal_transition() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/support-tickets/5/"))
        .and(body_json(serde_json::json!({ "status": "closed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "customer": 1,
            "subject": "Invoice mismatch",
            "category": "billing",
            "priority": "medium",
            "status": "closed",
            "comments": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let resolved = ticket_in_status(5, TicketStatus::Resolved);
    let updated = gateway
        .update_ticket_status(&resolved, TicketStatus::Closed)
        .await
        .expect("resolved -> closed is legal");
    assert_eq!(updated.status, TicketStatus::Closed);
}

#[tokio::test]
async fn comments_on_resolved_tickets_are_blocked_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ticket-comments/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let resolved = ticket_in_status(5, TicketStatus::Resolved);

    let err = gateway
        .add_ticket_comment(&resolved, "still broken?")
        .await
        .expect_err("must be blocked");
    assert!(matches!(err, Error::CommentsClosed { .. }), "got {err:?}");
}

#[tokio::test]
async fn comments_post_to_the_comments_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ticket-comments/"))
        .and(body_json(serde_json::json!({
            "ticket": 6,
            "comment_text": "Looking into it",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 99,
            "ticket": 6,
            "comment_text": "Looking into it",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    let open = ticket_in_status(6, TicketStatus::Open);
    let comment = gateway
        .add_ticket_comment(&open, "Looking into it")
        .await
        .expect("comment");
    assert_eq!(comment.ticket, 6);
}

#[tokio::test]
async fn deletes_are_settled_on_204() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/support-tickets/5/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = authed_gateway(&server, "access-1");
    gateway.delete_support_ticket(5).await.expect("delete");
}
