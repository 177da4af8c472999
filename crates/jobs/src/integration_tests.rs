//! End-to-end query tests against an in-memory store with a pinned clock.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value as JsonValue, json};

use stockwatch_core::{
    AlertRecord, AnalyticsError, JobName, JobParams, MovementKind, MovementRecord, ProductRecord,
};
use stockwatch_engine::AnalyticsContext;
use stockwatch_store::InMemoryStore;

use crate::dispatch::run_job;
use crate::error::JobError;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
}

fn ctx(store: InMemoryStore) -> AnalyticsContext {
    AnalyticsContext::with_now(Arc::new(store), fixed_now())
}

fn product(id: &str, category: &str, quantity: i64) -> JsonValue {
    serde_json::to_value(ProductRecord {
        product_id: id.to_string(),
        name: Some(format!("Product {id}")),
        description: None,
        category: category.to_string(),
        current_stock: Some(quantity),
        quantity,
        price: None,
        min_stock_alert: None,
    })
    .unwrap()
}

fn movement(product_id: &str, kind: MovementKind, quantity: i64, date: DateTime<Utc>) -> JsonValue {
    serde_json::to_value(MovementRecord {
        product_id: product_id.to_string(),
        kind,
        quantity,
        date,
        user_id: None,
        user_name: None,
    })
    .unwrap()
}

fn alert(message: &str, date: DateTime<Utc>) -> JsonValue {
    serde_json::to_value(AlertRecord {
        product_id: Some("p-1".to_string()),
        message: Some(message.to_string()),
        date,
        resolved: Some(false),
    })
    .unwrap()
}

fn string_field(row: &JsonValue, field: &str) -> String {
    row[field].as_str().unwrap_or_else(|| panic!("no {field} in {row}")).to_string()
}

fn int_field(row: &JsonValue, field: &str) -> i64 {
    row[field].as_i64().unwrap_or_else(|| panic!("no {field} in {row}"))
}

#[tokio::test]
async fn low_stock_uses_strict_threshold() {
    let store = InMemoryStore::new().with_collection(
        "products",
        vec![
            product("empty", "a", 0),
            product("nine", "a", 9),
            product("ten", "a", 10),
            product("plenty", "a", 15),
        ],
    );

    let rows = run_job(&ctx(store), JobName::LowStock, &JobParams::new())
        .await
        .unwrap();

    let mut ids: Vec<String> = rows.iter().map(|r| string_field(r, "productId")).collect();
    ids.sort();
    assert_eq!(ids, vec!["empty", "nine"]);
}

#[tokio::test]
async fn low_stock_returns_full_product_records() {
    let store = InMemoryStore::new()
        .with_collection("products", vec![product("1", "a", 5), product("2", "a", 15)]);

    let rows = run_job(&ctx(store), JobName::LowStock, &JobParams::new())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["productId"], "1");
    assert_eq!(rows[0]["quantity"], 5);
    assert_eq!(rows[0]["name"], "Product 1");
}

#[tokio::test]
async fn low_stock_on_empty_collection_is_empty() {
    let store = InMemoryStore::new().with_collection("products", vec![]);

    let rows = run_job(&ctx(store), JobName::LowStock, &JobParams::new())
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn top_sellers_sums_exits_sorts_and_limits() {
    let date = fixed_now() - Duration::days(1);
    let mut movements = Vec::new();
    for i in 1..=11 {
        movements.push(movement(&format!("p{i:02}"), MovementKind::Exit, i, date));
    }
    // Highest total split across two movements to exercise the sum.
    movements.push(movement("p12", MovementKind::Exit, 5, date));
    movements.push(movement("p12", MovementKind::Exit, 7, date));
    // Entries never count towards total_sold.
    movements.push(movement("p11", MovementKind::Entry, 100, date));
    movements.push(movement("entry-only", MovementKind::Entry, 50, date));

    let store = InMemoryStore::new().with_collection("movements", movements);
    let rows = run_job(&ctx(store), JobName::TopSellers, &JobParams::new())
        .await
        .unwrap();

    assert_eq!(rows.len(), 10);

    let totals: Vec<i64> = rows.iter().map(|r| int_field(r, "total_sold")).collect();
    assert_eq!(totals, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
    assert_eq!(string_field(&rows[0], "productId"), "p12");

    let ids: Vec<String> = rows.iter().map(|r| string_field(r, "productId")).collect();
    assert!(!ids.contains(&"entry-only".to_string()));
    assert!(!ids.contains(&"p01".to_string()));
    assert!(!ids.contains(&"p02".to_string()));
}

#[tokio::test]
async fn inactive_products_anti_joins_on_recent_activity() {
    let now = fixed_now();
    let store = InMemoryStore::new()
        .with_collection(
            "products",
            vec![
                product("p-recent", "a", 1),
                product("p-edge", "a", 2),
                product("p-old", "a", 3),
                product("p-never", "a", 4),
            ],
        )
        .with_collection(
            "movements",
            vec![
                movement("p-recent", MovementKind::Exit, 1, now - Duration::days(5)),
                // Exactly on the cutoff: still active (inclusive bound).
                movement("p-edge", MovementKind::Entry, 1, now - Duration::days(30)),
                movement("p-old", MovementKind::Exit, 1, now - Duration::days(40)),
            ],
        );

    let rows = run_job(&ctx(store), JobName::InactiveProducts, &JobParams::new())
        .await
        .unwrap();

    let mut ids: Vec<String> = rows.iter().map(|r| string_field(r, "productId")).collect();
    ids.sort();
    assert_eq!(ids, vec!["p-never", "p-old"]);
}

#[tokio::test]
async fn total_movements_groups_by_type() {
    let date = fixed_now() - Duration::days(2);
    let store = InMemoryStore::new().with_collection(
        "movements",
        vec![
            movement("px", MovementKind::Exit, 3, date),
            movement("px", MovementKind::Exit, 7, date),
            movement("px", MovementKind::Entry, 4, date),
            movement("py", MovementKind::Exit, 100, date),
        ],
    );

    let mut params = JobParams::new();
    params.insert("productId".to_string(), json!("px"));

    let rows = run_job(&ctx(store), JobName::TotalMovements, &params)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    let total_for = |kind: &str| {
        rows.iter()
            .find(|r| r["type"] == kind)
            .map(|r| int_field(r, "total"))
            .unwrap_or_else(|| panic!("no {kind} row"))
    };
    assert_eq!(total_for("exit"), 10);
    assert_eq!(total_for("entry"), 4);
}

#[tokio::test]
async fn total_movements_for_unknown_product_is_empty() {
    let date = fixed_now() - Duration::days(2);
    let store = InMemoryStore::new()
        .with_collection("movements", vec![movement("px", MovementKind::Exit, 3, date)]);

    let mut params = JobParams::new();
    params.insert("productId".to_string(), json!("ghost"));

    let rows = run_job(&ctx(store), JobName::TotalMovements, &params)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn total_movements_without_product_id_fails_fast() {
    let store = InMemoryStore::new().with_collection("movements", vec![]);

    let err = run_job(&ctx(store), JobName::TotalMovements, &JobParams::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JobError::Domain(AnalyticsError::MissingParam("productId"))
    ));
}

#[tokio::test]
async fn total_movements_rejects_non_string_product_id() {
    let store = InMemoryStore::new().with_collection("movements", vec![]);

    let mut params = JobParams::new();
    params.insert("productId".to_string(), json!(42));

    let err = run_job(&ctx(store), JobName::TotalMovements, &params)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JobError::Domain(AnalyticsError::InvalidParam { name: "productId", .. })
    ));
}

#[tokio::test]
async fn recent_alerts_window_is_inclusive() {
    let now = fixed_now();
    let store = InMemoryStore::new().with_collection(
        "alerts",
        vec![
            alert("fresh", now - Duration::days(1)),
            alert("edge", now - Duration::days(7)),
            alert("stale", now - Duration::days(8)),
        ],
    );

    let rows = run_job(&ctx(store), JobName::RecentAlerts, &JobParams::new())
        .await
        .unwrap();

    let mut messages: Vec<String> = rows.iter().map(|r| string_field(r, "message")).collect();
    messages.sort();
    assert_eq!(messages, vec!["edge", "fresh"]);
}

#[tokio::test]
async fn stock_by_category_sums_and_sorts_ascending() {
    let store = InMemoryStore::new().with_collection(
        "products",
        vec![
            product("1", "B", 1),
            product("2", "A", 3),
            product("3", "A", 4),
        ],
    );

    let rows = run_job(&ctx(store), JobName::StockByCategory, &JobParams::new())
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![
            json!({"category": "A", "total_stock": 7}),
            json!({"category": "B", "total_stock": 1}),
        ]
    );
}

#[tokio::test]
async fn missing_collection_fails_the_job() {
    let store = InMemoryStore::new();

    let err = run_job(&ctx(store), JobName::RecentAlerts, &JobParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, JobError::Engine(_)));
}
