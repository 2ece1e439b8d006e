use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use rendezvous_core::{GeoJsonSurface, Session};
use rendezvous_server::{AppState, ServerConfig, SolverClient, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn graph_body() -> Value {
    json!({
        "nodes": {
            "A": {"coords": [43.600, 1.440], "description": "North dorm"},
            "B": {"coords": [43.605, 1.445], "description": "Bakery"},
            "C": {"coords": [43.610, 1.450], "description": "Campus"},
            "E": {"coords": [43.620, 1.440], "description": "South dorm"}
        },
        "people": {
            "alice": {"home": "A", "name": "Alice"},
            "erin": {"home": "E", "name": "Erin"}
        },
        "edges": [],
        "directed": false
    })
}

fn success_body() -> Value {
    json!({
        "status": "success",
        "meeting_point": "C",
        "routes": [
            {"person": "alice", "path": ["A", "B", "C"], "time": 5.0,
             "route_text": "walk south | cross the square", "segment_times": [2.0, 3.0]},
            {"person": "erin", "path": ["E", "C"], "time": 4.0,
             "route_text": "take the bus", "segment_times": [4.0]}
        ]
    })
}

/// Serves the solver API on an ephemeral port and returns its base URL
async fn spawn_solver(reply: (StatusCode, Value), delay: Duration) -> String {
    let app = Router::new()
        .route("/api/graph", get(|| async { Json(graph_body()) }))
        .route(
            "/api/f2",
            post(move |Json(_body): Json<Value>| {
                let (status, body) = reply.clone();
                async move {
                    tokio::time::sleep(delay).await;
                    (status, Json(body))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn app(reply: (StatusCode, Value), delay: Duration) -> Router {
    let mut config = ServerConfig::default();
    config.solver.base_url = spawn_solver(reply, delay).await;

    let solver = SolverClient::new(&config.solver).unwrap();
    let graph = solver.fetch_graph().await.unwrap();
    let surface = GeoJsonSurface::new(&graph);
    let state = AppState::new(
        Session::new(graph, surface),
        solver,
        Duration::from_millis(100),
        config.initial_zoom,
    );
    router(state, &config)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn graph_and_initial_state() {
    let app = app((StatusCode::OK, success_body()), Duration::ZERO).await;

    let (status, graph) = call(&app, "GET", "/graph").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["people"]["alice"]["home"], json!("A"));
    assert_eq!(graph["nodes"]["C"]["coords"], json!([43.610, 1.450]));

    let (status, state) = call(&app, "GET", "/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["compute_enabled"], json!(false));
    assert_eq!(state["step_enabled"], json!(false));
    assert_eq!(state["map"]["zoom"], json!(14));
    assert_eq!(state["map"]["nodes"]["features"].as_array().unwrap().len(), 4);
    assert!(state["map"]["overlays"]["features"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn select_compute_step_clear() {
    let app = app((StatusCode::OK, success_body()), Duration::ZERO).await;

    let (_, state) = call(&app, "POST", "/people/alice/select").await;
    assert_eq!(state["compute_enabled"], json!(true));
    let (_, state) = call(&app, "POST", "/people/erin/select").await;
    assert_eq!(state["selection"], json!(["alice", "erin"]));

    let (status, state) = call(&app, "POST", "/compute").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["meeting_point"], json!("C"));
    assert_eq!(state["step_enabled"], json!(true));
    assert_eq!(state["map"]["open_popup"], json!("C"));
    assert_eq!(state["view"]["routes"][0]["text"], json!("walk south"));
    assert!(state["map"]["bounds"].is_array());
    let drawn = state["map"]["overlays"]["features"].as_array().unwrap().len();
    // alice: shadow, route, waypoint B, start; erin: shadow, route, start
    assert_eq!(drawn, 7);

    let (_, state) = call(&app, "POST", "/step").await;
    assert_eq!(state["view"]["routes"][0]["path"], json!(["B", "C"]));
    assert_eq!(state["view"]["routes"][0]["text"], json!("cross the square"));
    assert_eq!(state["view"]["routes"][1]["text"], json!("reached destination"));

    let (_, state) = call(&app, "POST", "/clear").await;
    assert_eq!(state["selection"], json!([]));
    assert_eq!(state["step_enabled"], json!(false));
    assert!(state["view"].is_null());
    assert!(state["map"]["overlays"]["features"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_person_is_not_found() {
    let app = app((StatusCode::OK, success_body()), Duration::ZERO).await;
    let (status, body) = call(&app, "POST", "/people/ghost/select").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("Unknown person: ghost"));
}

#[tokio::test]
async fn empty_selection_shows_a_notice() {
    let app = app((StatusCode::OK, success_body()), Duration::ZERO).await;
    let (status, state) = call(&app, "POST", "/compute").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["notice"]["kind"], json!("user_input"));
    assert_eq!(
        state["notice"]["message"],
        json!("Please select at least one person")
    );
}

#[tokio::test]
async fn solver_failure_is_shown_then_hidden() {
    let reply = (
        StatusCode::BAD_REQUEST,
        json!({"detail": "No common reachable meeting point among candidates."}),
    );
    let app = app(reply, Duration::ZERO).await;

    call(&app, "POST", "/people/alice/select").await;
    let (status, state) = call(&app, "POST", "/compute").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["notice"]["kind"], json!("compute"));
    assert_eq!(
        state["notice"]["message"],
        json!("Error computing routes: No common reachable meeting point among candidates.")
    );
    assert_eq!(state["compute_enabled"], json!(true));

    tokio::time::sleep(Duration::from_millis(300)).await;
    let (_, state) = call(&app, "GET", "/state").await;
    assert!(state["notice"].is_null());
}

#[tokio::test]
async fn non_success_status_uses_the_message() {
    let reply = (
        StatusCode::OK,
        json!({"status": "error", "message": "Invalid people node: alice"}),
    );
    let app = app(reply, Duration::ZERO).await;

    call(&app, "POST", "/people/alice/select").await;
    let (_, state) = call(&app, "POST", "/compute").await;
    assert_eq!(
        state["notice"]["message"],
        json!("Error computing routes: Invalid people node: alice")
    );

    let (_, state) = call(&app, "POST", "/notice/dismiss").await;
    assert!(state["notice"].is_null());
}

#[tokio::test]
async fn clear_during_compute_drops_the_answer() {
    let app = app((StatusCode::OK, success_body()), Duration::from_millis(300)).await;
    call(&app, "POST", "/people/alice/select").await;

    let pending = tokio::spawn({
        let app = app.clone();
        async move { call(&app, "POST", "/compute").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    let (_, cleared) = call(&app, "POST", "/clear").await;
    assert_eq!(cleared["selection"], json!([]));

    let (status, state) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(state["view"].is_null());
    assert_eq!(state["selection"], json!([]));
    assert_eq!(state["computing"], json!(false));
}
