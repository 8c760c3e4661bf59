//! End-to-end API flows over the in-process router (tower oneshot)
//!
//! Covers onboarding, ordering with frozen totals, the status state
//! machine, the subscription gate, and menu soft-delete, all through
//! the HTTP surface.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tandoor_server::{AppState, Config, api};
use tower::ServiceExt;

fn test_state(dir: &tempfile::TempDir) -> AppState {
    let config = Config {
        host: "127.0.0.1".into(),
        http_port: 0,
        data_dir: dir.path().join("data").to_string_lossy().into_owned(),
        timezone: chrono_tz::Asia::Kolkata,
        log_level: "info".into(),
        log_dir: None,
    };
    AppState::initialize(&config).unwrap()
}

async fn send(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Onboard a tenant and return its id
async fn onboard(router: &Router, name: &str, slug: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/restaurants",
        Some(json!({ "name": name, "slug": slug })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().unwrap().to_string()
}

/// Create a category and a menu item, returning (category_id, item_id)
async fn seed_menu(router: &Router, restaurant_id: &str) -> (String, String) {
    let (status, category) = send(
        router,
        "POST",
        &format!("/api/restaurants/{restaurant_id}/categories"),
        Some(json!({ "name": "Mains" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{category}");
    let category_id = category["id"].as_str().unwrap().to_string();

    let (status, item) = send(
        router,
        "POST",
        "/api/menu-items",
        Some(json!({
            "restaurant_id": restaurant_id,
            "category_id": category_id,
            "name": "Butter Chicken",
            "price": "100.00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{item}");
    (category_id, item["id"].as_str().unwrap().to_string())
}

fn dine_in_order(tenant_id: &str) -> Value {
    json!({
        "tenant_id": tenant_id,
        "order_type": "dine-in",
        "table_number": "12",
        "items": [
            { "item_id": "m1", "name": "Butter Chicken", "price": "100.00", "quantity": 2 },
            { "item_id": "m2", "name": "Garlic Naan", "price": "50.00", "quantity": 1 },
        ],
    })
}

#[tokio::test]
async fn dine_in_order_freezes_totals_and_is_retrievable_by_number() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let (status, order) = send(&router, "POST", "/api/orders", Some(dine_in_order(&tenant))).await;
    assert_eq!(status, StatusCode::OK, "{order}");

    // 250 subtotal, 10% service charge, 5% tax on the charged amount.
    assert_eq!(order["subtotal"], "250.00");
    assert_eq!(order["service_charge_amount"], "25.00");
    assert_eq!(order["tax_amount"], "13.75");
    assert_eq!(order["total"], "288.75");
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["table_number"], "12");
    assert!(order["order_number"].as_str().unwrap().starts_with("ORD-"));

    // Receipt lookup treats the number as an opaque key.
    let number = order["order_number"].as_str().unwrap();
    let (status, fetched) = send(
        &router,
        "GET",
        &format!("/api/orders/by-number/{number}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], order["id"]);

    // Raising the tax rate afterwards never rewrites stored orders.
    let (status, _) = send(
        &router,
        "PATCH",
        &format!("/api/restaurants/{tenant}"),
        Some(json!({ "tax_rate": "18.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, fetched) = send(
        &router,
        "GET",
        &format!("/api/orders/by-number/{number}"),
        None,
    )
    .await;
    assert_eq!(fetched["total"], "288.75");
}

#[tokio::test]
async fn order_validation_errors_map_to_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    // Dine-in without a table number.
    let mut order = dine_in_order(&tenant);
    order["table_number"] = Value::Null;
    let (status, body) = send(&router, "POST", "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    // Empty item list.
    let mut order = dine_in_order(&tenant);
    order["items"] = json!([]);
    let (status, body) = send(&router, "POST", "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    // Malformed price.
    let mut order = dine_in_order(&tenant);
    order["items"][0]["price"] = json!("free");
    let (status, body) = send(&router, "POST", "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);

    // Unknown tenant.
    let (status, body) = send(&router, "POST", "/api/orders", Some(dine_in_order("ghost"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn status_transitions_walk_the_state_machine() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let (_, order) = send(&router, "POST", "/api/orders", Some(dine_in_order(&tenant))).await;
    let id = order["id"].as_str().unwrap();
    let status_path = format!("/api/orders/{id}/status");

    // Staff accepts, then a regression attempt is rejected without effect.
    let (status, body) = send(
        &router,
        "PATCH",
        &status_path,
        Some(json!({ "status": "PREPARING" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PREPARING");

    let (status, body) = send(
        &router,
        "PATCH",
        &status_path,
        Some(json!({ "status": "PENDING" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    // Still PREPARING afterwards, and the happy path continues.
    let (_, listed) = send(
        &router,
        "GET",
        &format!("/api/restaurants/{tenant}/orders?status=PREPARING"),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    for next in ["READY", "COMPLETED"] {
        let (status, body) = send(
            &router,
            "PATCH",
            &status_path,
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], next);
    }

    // Terminal state: nothing moves, not even cancel.
    let (status, body) = send(
        &router,
        "PATCH",
        &status_path,
        Some(json!({ "status": "CANCELLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn expired_trial_blocks_orders_until_activation() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;
    let subscription_path = format!("/api/restaurants/{tenant}/subscription");

    let (status, body) = send(
        &router,
        "POST",
        &subscription_path,
        Some(json!({ "action": "expire_trial" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
    assert_eq!(body["plan_type"], "expired");

    let (status, body) = send(&router, "POST", "/api/orders", Some(dine_in_order(&tenant))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3002);

    let (status, body) = send(
        &router,
        "POST",
        &subscription_path,
        Some(json!({ "action": "activate" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);

    // The exact same request now goes through.
    let (status, _) = send(&router, "POST", "/api/orders", Some(dine_in_order(&tenant))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn upgrade_switches_plan_and_reactivates() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/api/restaurants/{tenant}/subscription"),
        Some(json!({ "action": "suspend" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (status, body) = send(
        &router,
        "POST",
        &format!("/api/restaurants/{tenant}/upgrade"),
        Some(json!({ "plan_type": "premium" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan_type"], "premium");
    assert_eq!(body["is_active"], true);
    assert!(body["subscription_end"].as_i64().unwrap() > shared::util::now_millis());
}

#[tokio::test]
async fn restaurant_patch_updates_profile_and_normalizes_rates() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let (status, body) = send(
        &router,
        "PATCH",
        &format!("/api/restaurants/{tenant}"),
        Some(json!({ "name": "Tandoor Palace & Bar", "service_charge": "12.5" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tandoor Palace & Bar");
    assert_eq!(body["service_charge"], "12.50");
    // Untouched fields keep their defaults.
    assert_eq!(body["tax_rate"], "5.00");
    assert_eq!(body["table_count"], 15);

    let (status, body) = send(
        &router,
        "PATCH",
        &format!("/api/restaurants/{tenant}"),
        Some(json!({ "tax_rate": "150" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, _) = send(
        &router,
        "PATCH",
        "/api/restaurants/ghost",
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/restaurants",
        Some(json!({ "name": "Imposter", "slug": "tandoor-palace" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4);
}

#[tokio::test]
async fn menu_soft_delete_hides_the_item_from_listings() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;
    let (category_id, item_id) = seed_menu(&router, &tenant).await;

    let menu_path = format!("/api/restaurants/{tenant}/menu");
    let (_, listed) = send(&router, "GET", &menu_path, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, deleted) = send(
        &router,
        "DELETE",
        &format!("/api/menu-items/{item_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["is_available"], false);

    let (_, listed) = send(&router, "GET", &menu_path, None).await;
    assert!(listed.as_array().unwrap().is_empty());

    // The category filter path also skips the hidden item.
    let (_, listed) = send(
        &router,
        "GET",
        &format!("{menu_path}?category={category_id}"),
        None,
    )
    .await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn menu_item_update_is_sparse_and_gated() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;
    let (_, item_id) = seed_menu(&router, &tenant).await;

    let (status, body) = send(
        &router,
        "PATCH",
        &format!("/api/menu-items/{item_id}"),
        Some(json!({ "price": "149.5", "is_popular": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "149.50");
    assert_eq!(body["is_popular"], true);
    assert_eq!(body["name"], "Butter Chicken");

    // Once the trial is expired, catalog mutations are denied.
    let (_, _) = send(
        &router,
        "POST",
        &format!("/api/restaurants/{tenant}/subscription"),
        Some(json!({ "action": "expire_trial" })),
    )
    .await;
    let (status, body) = send(
        &router,
        "PATCH",
        &format!("/api/menu-items/{item_id}"),
        Some(json!({ "price": "199.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, _) = send(
        &router,
        "POST",
        "/api/menu-items",
        Some(json!({
            "restaurant_id": tenant,
            "category_id": "whatever",
            "name": "Late Addition",
            "price": "99.00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stats_endpoint_aggregates_todays_orders() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));
    let tenant = onboard(&router, "Tandoor Palace", "tandoor-palace").await;

    let stats_path = format!("/api/restaurants/{tenant}/stats");
    let (status, empty) = send(&router, "GET", &stats_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["order_count"], 0);
    assert_eq!(empty["revenue"], "0.00");
    assert!(empty["popular_items"].as_array().unwrap().is_empty());

    for _ in 0..2 {
        let (status, _) =
            send(&router, "POST", "/api/orders", Some(dine_in_order(&tenant))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = send(&router, "GET", &stats_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["order_count"], 2);
    assert_eq!(stats["revenue"], "577.50");
    assert_eq!(stats["avg_prep_time_minutes"], 12);
    // Butter Chicken (2×2) beats Garlic Naan (1×2).
    let popular = stats["popular_items"].as_array().unwrap();
    assert_eq!(popular[0]["name"], "Butter Chicken");
    assert_eq!(popular[0]["count"], 4);
    assert_eq!(popular[1]["count"], 2);

    // top query parameter truncates the list.
    let (_, stats) = send(&router, "GET", &format!("{stats_path}?top=1"), None).await;
    assert_eq!(stats["popular_items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let router = api::create_router(test_state(&dir));

    let (status, body) = send(&router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tandoor-server");
}
