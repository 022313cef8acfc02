//! # Engine Integration Tests
//!
//! End-to-end scenarios over an in-memory database: till lifecycle, cart
//! and checkout, reconciliation, reports and catalog gating.

use chrono::{Duration, Utc};

use brewpos_core::{AuthContext, Cart, Role, TillStatus};
use brewpos_db::{Database, DbConfig};
use brewpos_engine::{Engine, EngineError, ProductInput};

async fn test_engine() -> Engine {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Engine::new(db)
}

fn admin() -> AuthContext {
    AuthContext::new("admin-1", Role::Admin)
}

fn cashier() -> AuthContext {
    AuthContext::new("cashier-1", Role::Cashier)
}

/// Seeds one category and one product through the admin catalog API.
async fn seed_product(engine: &Engine, name: &str, price_cents: i64, stock: i64) -> String {
    let auth = admin();
    let category = engine
        .create_category(&auth, &format!("Category for {}", name))
        .await
        .unwrap();
    let product = engine
        .create_product(
            &auth,
            ProductInput {
                name: name.to_string(),
                category_id: category.id,
                price_cents,
                stock,
            },
        )
        .await
        .unwrap();
    product.id
}

// =============================================================================
// Till Lifecycle
// =============================================================================

#[tokio::test]
async fn open_close_and_reconcile_full_shift() {
    let engine = test_engine().await;
    let auth = cashier();

    let coffee = seed_product(&engine, "Americano", 2500, 10).await;
    let scone = seed_product(&engine, "Scone", 1500, 10).await;

    // Open with a $100.00 float.
    let session = engine.open_till(&auth, 10000).await.unwrap();
    assert_eq!(session.status, TillStatus::Open);
    assert_eq!(session.initial_float_cents, 10000);

    // Two sales: 2500 + 1500.
    let mut cart = Cart::new();
    engine.add_cart_line(&auth, &mut cart, &coffee, 1).await.unwrap();
    let first = engine.checkout(&auth, &cart, &session.id).await.unwrap();
    assert_eq!(first.total_cents, 2500);

    let mut cart = Cart::new();
    engine.add_cart_line(&auth, &mut cart, &scone, 1).await.unwrap();
    engine.checkout(&auth, &cart, &session.id).await.unwrap();

    // Close declaring 14200 counted in the drawer.
    let summary = engine.close_till(&auth, &session.id, 14200).await.unwrap();
    assert_eq!(summary.session.status, TillStatus::Closed);
    assert_eq!(summary.session.declared_final_cents, Some(14200));

    let r = &summary.reconciliation;
    assert_eq!(r.total_sales_cents, 4000);
    assert_eq!(r.sale_count, 2);
    assert_eq!(r.expected_cents, 14000);
    assert_eq!(r.difference_cents, 200); // positive = overage
    assert!(r.is_overage());

    // Reconciling again yields identical numbers.
    let again = engine.reconcile(&auth, &session.id).await.unwrap();
    assert_eq!(again.expected_cents, 14000);
    assert_eq!(again.difference_cents, 200);
}

#[tokio::test]
async fn double_open_rejected_other_cashier_unaffected() {
    let engine = test_engine().await;
    let auth = cashier();

    engine.open_till(&auth, 5000).await.unwrap();

    let err = engine.open_till(&auth, 7000).await.unwrap_err();
    assert!(matches!(err, EngineError::TillAlreadyOpen { .. }));

    // A different cashier opens independently.
    let other = AuthContext::new("cashier-2", Role::Cashier);
    engine.open_till(&other, 3000).await.unwrap();
}

#[tokio::test]
async fn open_with_negative_float_rejected() {
    let engine = test_engine().await;
    let err = engine.open_till(&cashier(), -1).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidAmount { amount_cents: -1 }
    ));
}

#[tokio::test]
async fn close_is_terminal_and_unknown_session_is_not_found() {
    let engine = test_engine().await;
    let auth = cashier();

    let err = engine.close_till(&auth, "nope", 1000).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));

    let session = engine.open_till(&auth, 5000).await.unwrap();
    engine.close_till(&auth, &session.id, 5000).await.unwrap();

    let err = engine.close_till(&auth, &session.id, 9999).await.unwrap_err();
    assert!(matches!(err, EngineError::TillNotOpen { .. }));

    // Negative declared amount never reaches storage.
    let err = engine.close_till(&auth, &session.id, -5).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount { .. }));
}

#[tokio::test]
async fn current_till_reflects_lifecycle() {
    let engine = test_engine().await;
    let auth = cashier();

    assert!(engine.current_till(&auth).await.unwrap().is_none());

    let session = engine.open_till(&auth, 2000).await.unwrap();
    let current = engine.current_till(&auth).await.unwrap().unwrap();
    assert_eq!(current.id, session.id);

    engine.close_till(&auth, &session.id, 2000).await.unwrap();
    assert!(engine.current_till(&auth).await.unwrap().is_none());

    let closed = engine.list_closed_tills(&auth).await.unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].session.id, session.id);
    assert_eq!(closed[0].reconciliation.difference_cents, 0);
}

// =============================================================================
// Cart & Checkout
// =============================================================================

#[tokio::test]
async fn empty_cart_checkout_mutates_nothing() {
    let engine = test_engine().await;
    let auth = cashier();
    let session = engine.open_till(&auth, 1000).await.unwrap();

    let cart = Cart::new();
    let err = engine.checkout(&auth, &cart, &session.id).await.unwrap_err();
    assert!(matches!(err, EngineError::EmptyCart));

    let report = engine.daily_report(&auth, Utc::now().date_naive()).await.unwrap();
    assert_eq!(report.sale_count, 0);
}

#[tokio::test]
async fn unknown_and_deactivated_products_cannot_be_added() {
    let engine = test_engine().await;
    let auth = cashier();
    let mut cart = Cart::new();

    let err = engine
        .add_cart_line(&auth, &mut cart, "no-such-product", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownProduct { .. }));

    let product_id = seed_product(&engine, "Retired Blend", 2000, 5).await;
    engine.deactivate_product(&admin(), &product_id).await.unwrap();

    let err = engine
        .add_cart_line(&auth, &mut cart, &product_id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownProduct { .. }));
    assert!(cart.is_empty());
}

#[tokio::test]
async fn add_time_stock_check_counts_merged_quantity() {
    let engine = test_engine().await;
    let auth = cashier();
    let product_id = seed_product(&engine, "Limited Roast", 3000, 3).await;

    let mut cart = Cart::new();
    engine.add_cart_line(&auth, &mut cart, &product_id, 2).await.unwrap();

    let err = engine
        .add_cart_line(&auth, &mut cart, &product_id, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientStock {
            available: 3,
            requested: 4,
            ..
        }
    ));
    // The existing line survives the failed merge.
    assert_eq!(cart.total_quantity(), 2);
}

#[tokio::test]
async fn two_carts_race_for_the_same_stock() {
    // stock 3, two carts want 2 each: both pass the add-time check,
    // only the first checkout commits.
    let engine = test_engine().await;
    let auth = cashier();
    let product_id = seed_product(&engine, "Flat White", 1700, 3).await;
    let session = engine.open_till(&auth, 0).await.unwrap();

    let mut cart_a = Cart::new();
    engine.add_cart_line(&auth, &mut cart_a, &product_id, 2).await.unwrap();
    let mut cart_b = Cart::new();
    engine.add_cart_line(&auth, &mut cart_b, &product_id, 2).await.unwrap();

    engine.checkout(&auth, &cart_a, &session.id).await.unwrap();

    let err = engine.checkout(&auth, &cart_b, &session.id).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientStock {
            available: 1,
            requested: 2,
            ..
        }
    ));

    // Only the committed checkout drew down stock.
    let listing = engine.list_products(&auth).await.unwrap();
    assert_eq!(listing[0].stock, 1);
}

#[tokio::test]
async fn checkout_against_closed_session_rejected() {
    let engine = test_engine().await;
    let auth = cashier();
    let product_id = seed_product(&engine, "Mocha", 2700, 5).await;

    let session = engine.open_till(&auth, 1000).await.unwrap();
    engine.close_till(&auth, &session.id, 1000).await.unwrap();

    let mut cart = Cart::new();
    engine.add_cart_line(&auth, &mut cart, &product_id, 1).await.unwrap();

    let err = engine.checkout(&auth, &cart, &session.id).await.unwrap_err();
    assert!(matches!(err, EngineError::TillNotOpen { .. }));

    // No decrement happened.
    let listing = engine.list_products(&auth).await.unwrap();
    assert_eq!(listing[0].stock, 5);
}

#[tokio::test]
async fn checkout_against_another_cashiers_session_rejected() {
    let engine = test_engine().await;
    let alice = AuthContext::new("alice", Role::Cashier);
    let bob = AuthContext::new("bob", Role::Cashier);
    let product_id = seed_product(&engine, "Chai Latte", 1500, 10).await;

    let alices_session = engine.open_till(&alice, 10000).await.unwrap();

    let mut cart = Cart::new();
    engine.add_cart_line(&bob, &mut cart, &product_id, 2).await.unwrap();

    let err = engine
        .checkout(&bob, &cart, &alices_session.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::TillNotOpen { .. }));

    // Nothing landed in the drawer: stock is intact and the session
    // reconciles to exactly its float.
    let listing = engine.list_products(&bob).await.unwrap();
    assert_eq!(listing[0].stock, 10);

    let summary = engine
        .close_till(&alice, &alices_session.id, 10000)
        .await
        .unwrap();
    assert_eq!(summary.reconciliation.total_sales_cents, 0);
    assert_eq!(summary.reconciliation.difference_cents, 0);
}

#[tokio::test]
async fn sale_detail_carries_price_snapshots() {
    let engine = test_engine().await;
    let auth = cashier();
    let product_id = seed_product(&engine, "Cortado", 2100, 10).await;
    let session = engine.open_till(&auth, 0).await.unwrap();

    let mut cart = Cart::new();
    engine.add_cart_line(&auth, &mut cart, &product_id, 2).await.unwrap();
    let receipt = engine.checkout(&auth, &cart, &session.id).await.unwrap();

    // Admin reprices afterwards; the recorded sale is unchanged.
    let category_id = engine.list_products(&auth).await.unwrap()[0].category_id.clone();
    engine
        .update_product(
            &admin(),
            &product_id,
            ProductInput {
                name: "Cortado".to_string(),
                category_id,
                price_cents: 9900,
                stock: 8,
            },
        )
        .await
        .unwrap();

    let detail = engine.get_sale(&auth, &receipt.sale_id).await.unwrap();
    assert_eq!(detail.sale.total_cents, 4200);
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].unit_price_cents, 2100);
    assert_eq!(detail.lines[0].name_snapshot, "Cortado");

    let recent = engine.list_sales(&auth, 10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, receipt.sale_id);
}

// =============================================================================
// Reconciliation
// =============================================================================

#[tokio::test]
async fn reconcile_open_session_is_not_closed() {
    let engine = test_engine().await;
    let auth = cashier();
    let session = engine.open_till(&auth, 1000).await.unwrap();

    let err = engine.reconcile(&auth, &session.id).await.unwrap_err();
    assert!(matches!(err, EngineError::TillNotClosed { .. }));

    let err = engine.reconcile(&auth, "nope").await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn shortfall_has_negative_difference() {
    let engine = test_engine().await;
    let auth = cashier();
    let session = engine.open_till(&auth, 10000).await.unwrap();

    // No sales; drawer comes up short.
    let summary = engine.close_till(&auth, &session.id, 9500).await.unwrap();
    assert_eq!(summary.reconciliation.expected_cents, 10000);
    assert_eq!(summary.reconciliation.difference_cents, -500);
    assert!(summary.reconciliation.is_shortfall());
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn reports_aggregate_and_reject_inverted_ranges() {
    let engine = test_engine().await;
    let auth = cashier();
    let product_id = seed_product(&engine, "Latte", 2500, 50).await;
    let session = engine.open_till(&auth, 0).await.unwrap();

    for _ in 0..3 {
        let mut cart = Cart::new();
        engine.add_cart_line(&auth, &mut cart, &product_id, 1).await.unwrap();
        engine.checkout(&auth, &cart, &session.id).await.unwrap();
    }

    let today = Utc::now().date_naive();
    let report = engine.daily_report(&auth, today).await.unwrap();
    assert_eq!(report.sale_count, 3);
    assert_eq!(report.total_sold_cents, 7500);
    // Ascending timestamps.
    for pair in report.sales.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }

    // Single-day range equals the daily report.
    let range = engine.range_report(&auth, today, today).await.unwrap();
    assert_eq!(range.sale_count, 3);
    assert_eq!(range.total_sold_cents, 7500);

    // Tomorrow is empty but valid.
    let tomorrow = today + Duration::days(1);
    let empty = engine.range_report(&auth, tomorrow, tomorrow).await.unwrap();
    assert_eq!(empty.sale_count, 0);
    assert_eq!(empty.total_sold_cents, 0);

    // from > to is rejected.
    let err = engine.range_report(&auth, tomorrow, today).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange { .. }));
}

// =============================================================================
// Roles & Catalog
// =============================================================================

#[tokio::test]
async fn catalog_writes_are_admin_only() {
    let engine = test_engine().await;
    let auth = cashier();

    let err = engine.create_category(&auth, "Coffee").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden { .. }));

    let category = engine.create_category(&admin(), "Coffee").await.unwrap();

    let err = engine
        .create_product(
            &auth,
            ProductInput {
                name: "Espresso".to_string(),
                category_id: category.id.clone(),
                price_cents: 1500,
                stock: 10,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden { .. }));

    // Reads are open to till operators.
    assert!(engine.list_products(&auth).await.unwrap().is_empty());
    assert_eq!(engine.list_categories(&auth).await.unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_validation_and_duplicates() {
    let engine = test_engine().await;
    let auth = admin();

    engine.create_category(&auth, "Tea").await.unwrap();
    let err = engine.create_category(&auth, "Tea").await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine.create_category(&auth, "   ").await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .create_product(
            &auth,
            ProductInput {
                name: "Free Coffee".to_string(),
                category_id: "whatever".to_string(),
                price_cents: 0,
                stock: 10,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .create_product(
            &auth,
            ProductInput {
                name: "Orphan".to_string(),
                category_id: "no-such-category".to_string(),
                price_cents: 1000,
                stock: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn admin_can_operate_till_too() {
    let engine = test_engine().await;
    let auth = admin();

    let session = engine.open_till(&auth, 1000).await.unwrap();
    assert_eq!(session.cashier_id, "admin-1");
    engine.close_till(&auth, &session.id, 1000).await.unwrap();
}
