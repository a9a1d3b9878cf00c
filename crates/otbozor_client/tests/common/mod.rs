#![allow(dead_code)]

use std::sync::Once;

use otbozor_client::{ApiClient, AuthStrategy, ClientSettings};
use serde_json::{json, Value};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(otbozor_logging::initialize_for_tests);
}

pub fn client(base_url: &str) -> ApiClient {
    init_logging();
    ApiClient::new(&ClientSettings::with_base_url(base_url)).unwrap()
}

pub fn bearer_client(base_url: &str, token: &str) -> ApiClient {
    init_logging();
    let settings = ClientSettings {
        auth: AuthStrategy::Bearer(token.to_string()),
        ..ClientSettings::with_base_url(base_url)
    };
    ApiClient::new(&settings).unwrap()
}

pub fn listing_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Qorabayir {id}"),
        "slug": format!("qorabayir-{id}"),
        "priceAmount": 45000000,
        "currency": "UZS",
        "status": status,
        "isPaid": false,
    })
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn page(items: Vec<Value>, total: u64, limit: u32) -> Value {
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(u64::from(limit)) };
    json!({
        "success": true,
        "data": items,
        "pagination": { "page": 1, "limit": limit, "total": total, "totalPages": total_pages },
    })
}
