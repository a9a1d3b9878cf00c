mod common;

use std::time::Duration;

use otbozor_client::{EngineHandle, EngineReply, EngineRequest};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, listing_json, page};

fn start_server(delay: Duration) -> (tokio::runtime::Runtime, MockServer) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/favorites"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(page(vec![listing_json("l-1", "APPROVED")], 1, 12)),
            )
            .mount(&server)
            .await;
        server
    });
    (runtime, server)
}

fn wait_until_idle(engine: &EngineHandle) {
    for _ in 0..200 {
        if engine.is_idle() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("engine never went idle");
}

#[test]
fn events_carry_the_scope_and_request() {
    let (_runtime, server) = start_server(Duration::ZERO);
    let engine = EngineHandle::new(client(&server.uri())).unwrap();
    let scope = engine.open_scope();

    engine.dispatch(&scope, EngineRequest::LoadFavorites);
    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("favorites event");

    assert_eq!(event.scope, scope.id());
    assert_eq!(event.request, EngineRequest::LoadFavorites);
    match event.result {
        Ok(EngineReply::Favorites(items)) => assert_eq!(items.len(), 1),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn closing_a_scope_suppresses_its_pending_events() {
    let (_runtime, server) = start_server(Duration::from_millis(400));
    let engine = EngineHandle::new(client(&server.uri())).unwrap();
    let closed = engine.open_scope();
    let open = engine.open_scope();

    engine.dispatch(&closed, EngineRequest::LoadFavorites);
    engine.dispatch(&open, EngineRequest::LoadFavorites);
    let open_id = open.id();
    closed.close();

    wait_until_idle(&engine);
    let mut scopes = Vec::new();
    while let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
        scopes.push(event.scope);
    }
    assert_eq!(scopes, vec![open_id]);
}

#[test]
fn engine_reports_busy_while_a_request_runs() {
    let (_runtime, server) = start_server(Duration::from_millis(300));
    let engine = EngineHandle::new(client(&server.uri())).unwrap();
    assert!(engine.is_idle());

    let scope = engine.open_scope();
    engine.dispatch(&scope, EngineRequest::LoadFavorites);
    assert!(!engine.is_idle());

    assert!(engine.recv_timeout(Duration::from_secs(5)).is_some());
    wait_until_idle(&engine);
}
