//! Integration tests for the storefront cart.
//!
//! Each test is one browser session against an in-process storefront.

use axum::http::StatusCode;
use bella_mode_core::cart::prompts;
use bella_mode_integration_tests::TestClient;

async fn add(client: &mut TestClient, name: &str, price: &str, qty: &str) {
    let resp = client
        .post("/cart/add", &[("name", name), ("price", price), ("qty", qty)])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

async fn badge(client: &mut TestClient) -> String {
    client.get("/cart/count").await.body.trim().to_string()
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_pages_render_with_badge() {
    let mut client = TestClient::new();

    for path in [
        "/",
        "/index.html",
        "/collection.html",
        "/about.html",
        "/contact.html",
        "/cart.html",
    ] {
        let resp = client.get(path).await;
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert!(resp.body.contains("id=\"cart-count\""), "{path}");
    }
}

#[tokio::test]
async fn test_collection_lists_products() {
    let mut client = TestClient::new();
    let resp = client.get("/collection.html").await;

    assert!(resp.body.contains("Dress Bella"));
    assert!(resp.body.contains("Rp 275.000"));
    assert!(resp.body.contains("hx-post=\"/cart/add\""));
}

#[tokio::test]
async fn test_pages_link_neighbours() {
    let mut client = TestClient::new();
    let resp = client.get("/about.html").await;

    assert!(resp.body.contains("href=\"/collection.html\" rel=\"prev\""));
    assert!(resp.body.contains("href=\"/contact.html\" rel=\"next\""));
}

#[tokio::test]
async fn test_pages_carry_swipe_settings() {
    let mut client = TestClient::new();
    let resp = client.get("/about.html").await;

    assert!(resp.body.contains("data-prev=\"collection.html\""));
    assert!(resp.body.contains("data-next=\"contact.html\""));
    assert!(resp.body.contains("data-swipe-threshold=\"70\""));
    assert!(resp.body.contains("data-debounce-ms=\"2000\""));
    assert!(resp.body.contains("data-transition-ms=\"450\""));

    let script = client.get("/static/js/bella.js").await;
    assert_eq!(script.status, StatusCode::OK);
    assert!(script.body.contains("page-transition"));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let mut client = TestClient::new();
    let resp = client.get("/").await;

    assert!(resp.headers.contains_key("x-request-id"));
    assert_eq!(resp.headers["x-frame-options"], "DENY");
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_updates_badge_and_toasts() {
    let mut client = TestClient::new();
    let resp = client
        .post(
            "/cart/add",
            &[("name", "Tas A"), ("price", "Rp 150.000"), ("qty", "2")],
        )
        .await;

    assert_eq!(resp.body.trim(), "2");
    let trigger = resp.trigger();
    assert_eq!(trigger["cart-updated"], true);
    assert_eq!(trigger["bella-toast"]["message"], "\"Tas A\" added to the cart.");
    assert_eq!(trigger["bella-toast"]["durationMs"], 2200);

    assert_eq!(badge(&mut client).await, "2");
}

#[tokio::test]
async fn test_add_merges_by_name_and_keeps_first_price() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;
    add(&mut client, "Tas A", "Rp 999.000", "2").await;

    let page = client.get("/cart").await;
    assert_eq!(page.body.matches("class=\"cart-row\"").count(), 1);
    assert!(page.body.contains("value=\"3\""));
    assert!(page.body.contains("Rp 450.000"));
    assert!(!page.body.contains("Rp 999.000"));
}

#[tokio::test]
async fn test_add_coerces_bad_input() {
    let mut client = TestClient::new();
    add(&mut client, "  ", "gratis", "-4").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("<td>Product</td>"));
    assert!(page.body.contains("Rp 0"));
    assert_eq!(badge(&mut client).await, "1");
}

// ============================================================================
// Row controls
// ============================================================================

#[tokio::test]
async fn test_increment_and_decrement() {
    let mut client = TestClient::new();
    add(&mut client, "Scarf Satin", "Rp 85.000", "2").await;

    let resp = client.post("/cart/items/0/increment", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Rp 255.000"));
    assert_eq!(resp.trigger()["cart-updated"], true);
    assert!(resp.toast().is_none());

    let resp = client.post("/cart/items/0/decrement", &[]).await;
    assert!(resp.body.contains("Rp 170.000"));
}

#[tokio::test]
async fn test_decrement_to_zero_needs_confirmation() {
    let mut client = TestClient::new();
    add(&mut client, "Scarf Satin", "Rp 85.000", "1").await;

    let cart = client.get("/cart").await;
    assert!(
        cart.body
            .contains("hx-confirm=\"Quantity would drop to 0. Remove this item from the cart?\"")
    );

    // Declined: nothing changes
    let resp = client.post("/cart/items/0/decrement", &[]).await;
    assert!(resp.body.contains("Scarf Satin"));
    assert_eq!(badge(&mut client).await, "1");

    let resp = client
        .post(
            "/cart/items/0/decrement",
            &[("confirmed", prompts::QUANTITY_TO_ZERO)],
        )
        .await;
    assert!(resp.body.contains("Your cart is empty"));
    assert_eq!(badge(&mut client).await, "0");
}

#[tokio::test]
async fn test_quantity_field() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;

    let resp = client.post("/cart/items/0/quantity", &[("qty", "4.7")]).await;
    assert!(resp.body.contains("Rp 600.000"));

    // Non-numeric input becomes 1
    let resp = client.post("/cart/items/0/quantity", &[("qty", "abc")]).await;
    assert!(resp.body.contains("value=\"1\""));

    // Floors to zero: removal, only once confirmed
    let resp = client.post("/cart/items/0/quantity", &[("qty", "0.5")]).await;
    assert!(resp.body.contains("Tas A"));
    let resp = client
        .post(
            "/cart/items/0/quantity",
            &[("qty", "0.5"), ("confirmed", prompts::QUANTITY_INVALID)],
        )
        .await;
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_remove_preserves_order_of_others() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;
    add(&mut client, "Dress Bella", "Rp 275.000", "1").await;
    add(&mut client, "Scarf Satin", "Rp 85.000", "1").await;

    let prompt = prompts::remove("Dress Bella");
    let resp = client
        .post("/cart/items/1/remove", &[("confirmed", prompt.as_str())])
        .await;
    assert_eq!(
        resp.toast().as_deref(),
        Some("\"Dress Bella\" removed from the cart.")
    );

    let tas = resp.body.find("Tas A").expect("Tas A row");
    let scarf = resp.body.find("Scarf Satin").expect("Scarf row");
    assert!(tas < scarf);
    assert!(!resp.body.contains("Dress Bella"));
    assert!(resp.body.contains("/cart/items/1/remove"));
    assert!(!resp.body.contains("/cart/items/2/remove"));
}

#[tokio::test]
async fn test_remove_confirmed_for_a_stale_row_is_declined() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;
    add(&mut client, "Dress Bella", "Rp 275.000", "1").await;
    add(&mut client, "Scarf Satin", "Rp 85.000", "1").await;

    // The page shows Dress Bella at row 1
    let page = client.get("/cart").await;
    assert!(page.body.contains("/cart/items/1/remove"));

    // Another tab removes row 0, so Scarf Satin moves up to row 1
    let first = prompts::remove("Tas A");
    client
        .post("/cart/items/0/remove", &[("confirmed", first.as_str())])
        .await;

    let stale = prompts::remove("Dress Bella");
    let resp = client
        .post("/cart/items/1/remove", &[("confirmed", stale.as_str())])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.toast().is_none());
    assert!(resp.body.contains("Dress Bella"));
    assert!(resp.body.contains("Scarf Satin"));
    assert_eq!(badge(&mut client).await, "2");
}

#[tokio::test]
async fn test_unknown_row_renders_current_cart() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;

    let resp = client.post("/cart/items/7/increment", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Tas A"));
}

#[tokio::test]
async fn test_unknown_control_is_not_found() {
    let mut client = TestClient::new();
    let resp = client.post("/cart/items/0/explode", &[]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Checkout and clear
// ============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_is_refused() {
    let mut client = TestClient::new();
    let resp = client.post("/cart/checkout", &[]).await;

    let trigger = resp.trigger();
    assert_eq!(trigger["bella-toast"]["message"], "Your cart is empty.");
    assert_eq!(trigger["bella-toast"]["error"], true);
}

#[tokio::test]
async fn test_checkout_confirms_total_and_clears() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "2").await;

    let cart = client.get("/cart").await;
    assert!(
        cart.body
            .contains("hx-confirm=\"Total payment Rp 300.000. Proceed to checkout?\"")
    );

    // Without confirmation nothing happens
    client.post("/cart/checkout", &[]).await;
    assert_eq!(badge(&mut client).await, "2");

    let prompt = prompts::checkout("Rp 300.000");
    let resp = client
        .post("/cart/checkout", &[("confirmed", prompt.as_str())])
        .await;
    assert_eq!(
        resp.toast().as_deref(),
        Some("Thank you! Your order has been placed (simulated).")
    );
    assert!(resp.body.contains("Your cart is empty"));
    assert_eq!(badge(&mut client).await, "0");
}

#[tokio::test]
async fn test_checkout_confirmed_for_a_stale_total_is_declined() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "1").await;

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Rp 150.000. Proceed to checkout?"));

    // The cart grows after the page was rendered
    add(&mut client, "Dress Bella", "Rp 275.000", "1").await;

    let stale = prompts::checkout("Rp 150.000");
    let resp = client
        .post("/cart/checkout", &[("confirmed", stale.as_str())])
        .await;
    assert!(resp.toast().is_none());
    assert!(resp.body.contains("Rp 425.000"));
    assert!(resp.body.contains("Total payment Rp 425.000. Proceed to checkout?"));
    assert_eq!(badge(&mut client).await, "2");
}

#[tokio::test]
async fn test_clear() {
    let mut client = TestClient::new();
    add(&mut client, "Tas A", "Rp 150.000", "2").await;

    let resp = client.post("/cart/clear", &[]).await;
    assert!(resp.body.contains("Your cart is empty"));
    assert_eq!(badge(&mut client).await, "0");
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_carts_are_per_session() {
    let mut alice = TestClient::new();
    add(&mut alice, "Tas A", "Rp 150.000", "3").await;

    let mut stranger = alice.stranger();
    assert_eq!(badge(&mut stranger).await, "0");
    assert_eq!(badge(&mut alice).await, "3");
}
