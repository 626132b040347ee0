//! Integration tests for the checkout handoff and the return trip.
//!
//! Checkout must be a pure snapshot-and-redirect, and the returning-payment
//! redirect must restore session continuity: adopt the echoed session id,
//! scrub the address bar, and reconcile the mirror with the store.

use std::collections::HashMap;
use std::sync::Arc;

use goal_tickets_client::{
    CartClientState, CheckoutError, KeyValueStorage, MemoryStorage, SessionProvider,
};
use goal_tickets_client::session::SESSION_KEY;
use goal_tickets_core::{CartItem, ItemId, MergePolicy, SessionId};
use goal_tickets_integration_tests::{
    RecordingNavigator, RecordingRenderer, TestContext, checkout_config,
};
use rust_decimal::Decimal;
use url::Url;

fn ga_item(id: &str, quantity: u32) -> CartItem {
    CartItem {
        id: ItemId::new(id),
        title: "FIFA World Cup 2026".to_owned(),
        category: "General Admission".to_owned(),
        price: Decimal::from(150),
        quantity,
        image: String::new(),
    }
}

fn storefront_url() -> Url {
    Url::parse("https://goaltickets.com/").expect("url")
}

fn build_client(ctx: &TestContext, storage: Arc<MemoryStorage>) -> (CartClientState, RecordingRenderer) {
    let renderer = RecordingRenderer::new();
    let session = SessionProvider::new(vec![storage.clone() as Arc<dyn KeyValueStorage>]);
    let state = CartClientState::new(
        ctx.api(),
        session,
        storage,
        Box::new(renderer.clone()),
        checkout_config(),
    );
    (state, renderer)
}

fn query_params(url: &Url) -> HashMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// =============================================================================
// Checkout Handoff
// =============================================================================

#[tokio::test]
async fn test_checkout_redirects_with_order_parameters() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;
    let storage = Arc::new(MemoryStorage::new());
    let (mut state, _renderer) = build_client(&ctx, storage.clone());
    let mut nav = RecordingNavigator::new();

    state.init(&storefront_url(), &mut nav).await;
    state.add_to_cart(ga_item("item_1", 2)).await;

    let url = state.initiate_checkout(&mut nav).expect("checkout url");
    assert_eq!(nav.last_assigned(), Some(url.clone()));

    let params = query_params(&url);
    assert_eq!(params.get("site").map(String::as_str), Some("goaltickets.com"));
    assert_eq!(params.get("amount").map(String::as_str), Some("300.00"));
    assert_eq!(params.get("symbol").map(String::as_str), Some("USD"));
    assert_eq!(
        params.get("order_id").map(String::as_str),
        Some("FIFA World Cup 2026")
    );

    // Each return URL carries the session so the return trip can find it
    let success =
        Url::parse(params.get("riderect_success").expect("success url")).expect("parse");
    assert_eq!(
        query_params(&success).get("session_id"),
        Some(&state.session_id().as_str().to_owned())
    );
}

#[tokio::test]
async fn test_checkout_snapshots_cart_without_clearing_it() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;
    let storage = Arc::new(MemoryStorage::new());
    let (mut state, _renderer) = build_client(&ctx, storage.clone());
    let mut nav = RecordingNavigator::new();

    state.init(&storefront_url(), &mut nav).await;
    state.add_to_cart(ga_item("item_1", 2)).await;
    state.initiate_checkout(&mut nav).expect("checkout");

    // Snapshot landed in scratch storage before the redirect
    let snapshot = storage.load("cart_before_payment").expect("snapshot");
    let items: Vec<CartItem> = serde_json::from_str(&snapshot).expect("snapshot json");
    assert_eq!(items.len(), 1);

    // The store still has the cart; checkout is side-effect-free there
    let server_cart = ctx.api().fetch(state.session_id()).await.expect("fetch");
    assert_eq!(server_cart.len(), 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_refused() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;
    let storage = Arc::new(MemoryStorage::new());
    let (mut state, _renderer) = build_client(&ctx, storage);
    let mut nav = RecordingNavigator::new();

    state.init(&storefront_url(), &mut nav).await;
    assert!(matches!(
        state.initiate_checkout(&mut nav),
        Err(CheckoutError::EmptyCart)
    ));
    assert_eq!(nav.last_assigned(), None);
}

// =============================================================================
// Payment Return
// =============================================================================

#[tokio::test]
async fn test_payment_return_adopts_session_and_strips_url() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;

    // S2's cart exists server-side from before the redirect
    let s2 = SessionId::new("session_2_returned");
    ctx.api().add(&s2, &ga_item("item_1", 2)).await.expect("seed s2");

    // The browser comes back holding S1 in storage
    let storage = Arc::new(MemoryStorage::new());
    storage.store(SESSION_KEY, "session_1_stale");
    let (mut state, _renderer) = build_client(&ctx, storage.clone());
    assert_eq!(state.session_id().as_str(), "session_1_stale");

    let mut nav = RecordingNavigator::new();
    let location = Url::parse(
        "https://goaltickets.com/order/success?payment_return=success&session_id=session_2_returned",
    )
    .expect("url");
    state.init(&location, &mut nav).await;

    // Subsequent cart calls address S2's cart
    assert_eq!(state.session_id().as_str(), "session_2_returned");
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.total(), Decimal::from(300));

    // Every storage slot switched with it
    assert_eq!(
        storage.load(SESSION_KEY).as_deref(),
        Some("session_2_returned")
    );

    // The visible URL no longer carries the transient parameters
    let replaced = nav.last_replaced().expect("url replaced");
    assert_eq!(replaced.as_str(), "https://goaltickets.com/order/success");
    assert_eq!(replaced.query(), None);
}

#[tokio::test]
async fn test_snapshot_restores_when_returned_session_is_empty() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;

    // Before the redirect: cart snapshotted, then the collector hands back a
    // session the store has never seen
    let storage = Arc::new(MemoryStorage::new());
    storage.store(SESSION_KEY, "session_1_original");
    storage.store(
        "cart_before_payment",
        &serde_json::to_string(&[ga_item("item_1", 2)]).expect("snapshot"),
    );

    let (mut state, renderer) = build_client(&ctx, storage.clone());
    let mut nav = RecordingNavigator::new();
    let location = Url::parse(
        "https://goaltickets.com/?payment_return=back&session_id=session_3_fresh",
    )
    .expect("url");
    state.init(&location, &mut nav).await;

    // The empty server cart was refilled from the snapshot
    assert_eq!(state.session_id().as_str(), "session_3_fresh");
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.total(), Decimal::from(300));
    assert_eq!(renderer.last_count(), Some(2));

    // Server now agrees, and the snapshot is spent
    let server_cart = ctx
        .api()
        .fetch(&SessionId::new("session_3_fresh"))
        .await
        .expect("fetch");
    assert_eq!(server_cart.len(), 1);
    assert_eq!(storage.load("cart_before_payment"), None);
}

#[tokio::test]
async fn test_plain_visit_does_not_touch_session() {
    let ctx = TestContext::spawn(MergePolicy::ById).await;
    let storage = Arc::new(MemoryStorage::new());
    storage.store(SESSION_KEY, "session_1_regular");
    let (mut state, _renderer) = build_client(&ctx, storage);

    let mut nav = RecordingNavigator::new();
    state.init(&storefront_url(), &mut nav).await;

    assert_eq!(state.session_id().as_str(), "session_1_regular");
    assert_eq!(nav.last_replaced(), None);
}
