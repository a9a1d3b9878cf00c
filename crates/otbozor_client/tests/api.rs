mod common;

use otbozor_client::ErrorKind;
use otbozor_core::{ListingDraft, ListingStatus, FALLBACK_ERROR};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{bearer_client, client, listing_json, ok, page};

#[tokio::test]
async fn regions_are_unwrapped_from_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            { "id": "r-1", "name": "Samarqand", "slug": "samarqand" },
            { "id": "r-2", "name": "Qashqadaryo" }
        ]))))
        .mount(&server)
        .await;

    let regions = client(&server.uri()).regions().await.unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].name, "Samarqand");
    assert_eq!(regions[1].slug, None);
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/my/listings"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![listing_json("l-1", "DRAFT")],
            1,
            20,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let listings = bearer_client(&server.uri(), "tok-123")
        .my_listings()
        .await
        .unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].status, ListingStatus::Draft);
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Kirish talab qilinadi" })),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri()).me().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Kirish talab qilinadi");
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn success_false_with_200_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/my/listings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Sarlavha majburiy" })),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .create_listing_draft(&ListingDraft::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Sarlavha majburiy");
}

#[tokio::test]
async fn submit_402_without_body_id_uses_the_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/my/listings/l-9/submit"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = client(&server.uri()).submit_listing("l-9").await.unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::PaymentRequired {
            listing_id: Some("l-9".into())
        }
    );
    assert_eq!(err.message, FALLBACK_ERROR);
}

#[tokio::test]
async fn server_errors_are_network_errors_with_fallback_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/breeds"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri()).breeds().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.message, FALLBACK_ERROR);
}

#[tokio::test]
async fn empty_success_body_is_fine_for_unit_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/favorites/l-4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri()).remove_favorite("l-4").await.unwrap();
}

#[tokio::test]
async fn reject_sends_the_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/listings/l-2/reject"))
        .and(body_json(json!({ "reason": "Rasm sifatsiz" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri())
        .reject_listing("l-2", "Rasm sifatsiz")
        .await
        .unwrap();
}

#[tokio::test]
async fn reactivation_invoice_posts_listing_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-reactivation-invoice"))
        .and(body_json(json!({ "listingId": "l-7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "paymentId": "p-1",
            "checkoutUrl": "https://pay.example.uz/checkout/p-1"
        }))))
        .mount(&server)
        .await;

    let invoice = client(&server.uri())
        .create_reactivation_invoice("l-7")
        .await
        .unwrap();
    assert_eq!(invoice.checkout_url, "https://pay.example.uz/checkout/p-1");
}

#[tokio::test]
async fn paid_tab_filters_by_is_paid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/listings"))
        .and(query_param("isPaid", "true"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(Vec::new(), 21, 20)))
        .expect(1)
        .mount(&server)
        .await;

    let query = otbozor_core::admin::AdminListingQuery {
        tab: otbozor_core::admin::AdminTab::Paid,
        page: 2,
        ..Default::default()
    };
    let fetched = client(&server.uri()).admin_listings(&query).await.unwrap();
    assert_eq!(fetched.pagination.total, 21);
    assert!(fetched.items.is_empty());
}
