//! Integration tests for the cart API and cart persistence.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use giftshop_integration_tests::TestContext;
use giftshop_storefront::{cart::CART_STORAGE_KEY, storage::KeyValueStorage};
use serde_json::{Value, json};

async fn add(ctx: &TestContext, body: Value) -> Value {
    let (status, cart) = ctx.post("/api/cart/add", &body).await;
    assert_eq!(status, StatusCode::OK, "add failed: {cart}");
    cart
}

#[tokio::test]
async fn test_empty_cart() {
    let ctx = TestContext::new();

    let (status, cart) = ctx.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"], json!([]));
    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["total"], "$0.00");

    let (_, count) = ctx.get("/api/cart/count").await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_adding_same_options_merges_lines() {
    let ctx = TestContext::new();

    add(&ctx, json!({ "product_id": "prod-grad-teddy-1" })).await;
    let cart = add(&ctx, json!({ "product_id": "prod-grad-teddy-1", "quantity": 2 })).await;

    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 3);
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["total"], "$74.97");
}

#[tokio::test]
async fn test_different_options_are_separate_lines() {
    let ctx = TestContext::new();

    add(&ctx, json!({ "product_id": "prod-rom-gift-3" })).await;
    add(&ctx, json!({ "product_id": "prod-rom-gift-3", "gift_wrapping": false })).await;
    add(&ctx, json!({ "product_id": "prod-rom-gift-3", "gift_wrapping": true })).await;
    let cart = add(
        &ctx,
        json!({ "product_id": "prod-rom-gift-3", "custom_message": "Love you" }),
    )
    .await;

    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].get("gift_wrapping").is_none());
    assert_eq!(lines[1]["gift_wrapping"], false);
    assert_eq!(lines[2]["gift_wrapping"], true);
    assert_eq!(lines[3]["custom_message"], "Love you");

    // 4 x 29.99 + one wrapped unit
    assert_eq!(cart["total"], "$125.95");
    assert_eq!(cart["item_count"], 4);
}

#[tokio::test]
async fn test_empty_message_is_no_message() {
    let ctx = TestContext::new();

    add(&ctx, json!({ "product_id": "prod-rom-gift-3" })).await;
    let cart = add(
        &ctx,
        json!({ "product_id": "prod-rom-gift-3", "custom_message": "" }),
    )
    .await;

    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 2);

    // Whitespace is a message of its own
    let cart = add(
        &ctx,
        json!({ "product_id": "prod-rom-gift-3", "custom_message": "  " }),
    )
    .await;

    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["custom_message"], "  ");
}

#[tokio::test]
async fn test_gift_wrapping_charged_per_unit() {
    let ctx = TestContext::new();

    let cart = add(
        &ctx,
        json!({ "product_id": "prod-grad-teddy-1", "quantity": 2, "gift_wrapping": true }),
    )
    .await;

    assert_eq!(cart["lines"][0]["unit_price"], "$24.99");
    assert_eq!(cart["lines"][0]["line_total"], "$61.96");
    assert_eq!(cart["total"], "$61.96");
}

#[tokio::test]
async fn test_add_rejections() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post("/api/cart/add", &json!({ "product_id": "prod-missing" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("prod-missing"));

    // prod-rom-gift-5 has 10 in stock
    let (status, body) = ctx
        .post(
            "/api/cart/add",
            &json!({ "product_id": "prod-rom-gift-5", "quantity": 11 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("between 1 and 10"));

    let (status, _) = ctx
        .post(
            "/api/cart/add",
            &json!({ "product_id": "prod-rom-gift-5", "quantity": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cart) = ctx.get("/api/cart").await;
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_update_quantity() {
    let ctx = TestContext::new();
    add(&ctx, json!({ "product_id": "prod-grad-teddy-2", "gift_wrapping": true })).await;

    let (status, cart) = ctx
        .post(
            "/api/cart/update",
            &json!({ "product_id": "prod-grad-teddy-2", "gift_wrapping": true, "quantity": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"][0]["quantity"], 4);

    // Different identity: nothing changes
    let (status, cart) = ctx
        .post(
            "/api/cart/update",
            &json!({ "product_id": "prod-grad-teddy-2", "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"][0]["quantity"], 4);

    // More than in stock (30)
    let (status, _) = ctx
        .post(
            "/api/cart/update",
            &json!({ "product_id": "prod-grad-teddy-2", "gift_wrapping": true, "quantity": 31 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cart) = ctx
        .post(
            "/api/cart/update",
            &json!({ "product_id": "prod-grad-teddy-2", "gift_wrapping": true, "quantity": -1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"], json!([]));
}

#[tokio::test]
async fn test_remove_only_matching_line() {
    let ctx = TestContext::new();
    add(&ctx, json!({ "product_id": "prod-rom-gift-1" })).await;
    add(
        &ctx,
        json!({ "product_id": "prod-rom-gift-1", "custom_message": "Happy anniversary" }),
    )
    .await;

    let (status, cart) = ctx
        .post(
            "/api/cart/remove",
            &json!({ "product_id": "prod-rom-gift-1", "custom_message": "Happy anniversary" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let lines = cart["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].get("custom_message").is_none());
}

#[tokio::test]
async fn test_clear_and_count() {
    let ctx = TestContext::new();
    add(&ctx, json!({ "product_id": "prod-rom-gift-2", "quantity": 2 })).await;
    add(&ctx, json!({ "product_id": "prod-grad-teddy-4", "quantity": 3 })).await;

    let (_, count) = ctx.get("/api/cart/count").await;
    assert_eq!(count["count"], 5);

    let (status, cart) = ctx.post("/api/cart/clear", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 0);
    assert_eq!(ctx.saved_cart().lines().len(), 0);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    add(
        &ctx,
        json!({
            "product_id": "prod-grad-teddy-3",
            "quantity": 2,
            "custom_message": "Class of 2026",
            "gift_wrapping": true
        }),
    )
    .await;

    let snapshot: Value = serde_json::from_str(&ctx.saved_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot[0]["quantity"], 2);
    assert_eq!(snapshot[0]["customMessage"], "Class of 2026");
    assert_eq!(snapshot[0]["giftWrapping"], true);
    assert_eq!(snapshot[0]["product"]["id"], "prod-grad-teddy-3");

    let restarted = ctx.restart();
    let (_, cart) = restarted.get("/api/cart").await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["lines"][0]["custom_message"], "Class of 2026");
    // 2 x 45.99 + 2 x 5.99
    assert_eq!(cart["total"], "$103.96");
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let ctx = TestContext::new();
    ctx.storage.set(CART_STORAGE_KEY, "{not json").unwrap();

    let restarted = ctx.restart();
    let (status, cart) = restarted.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 0);

    // The next change overwrites the corrupt snapshot
    add(&restarted, json!({ "product_id": "prod-rom-gift-3" })).await;
    assert_eq!(restarted.saved_cart().item_count(), 1);
}
