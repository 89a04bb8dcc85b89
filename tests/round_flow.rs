use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bara_alsalfa_back::{
    config::AppConfig,
    routes,
    services::word_source::FallbackMode,
    state::{AppState, SharedState},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn config(mode: FallbackMode, base_url: Option<String>) -> AppConfig {
    let mut config = AppConfig::default();
    config.fallback_mode = mode;
    config.rng_seed = Some(7);
    if let Some(base_url) = base_url {
        config.generation.base_url = base_url;
        config.generation.api_key = Some("sk-test".into());
    }
    config
}

fn app(config: AppConfig) -> (Router, SharedState) {
    let state = AppState::new(config).expect("state builds");
    (routes::router(state.clone()), state)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn start(client: &str, body: Value) -> Request<Body> {
    Request::post("/api/round")
        .header("x-client-id", client)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, client: &str) -> Request<Body> {
    Request::get(uri)
        .header("x-client-id", client)
        .body(Body::empty())
        .unwrap()
}

fn advance(client: &str) -> Request<Body> {
    Request::post("/api/round/advance")
        .header("x-client-id", client)
        .body(Body::empty())
        .unwrap()
}

async fn mock_completion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_round_with_fixed_pool() {
    let (app, state) = app(config(FallbackMode::Strict, None));

    let (status, body) = call(
        &app,
        start("table-1", json!({"players": ["A", "B", "C"], "use_generation": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_player"], "A");
    assert_eq!(body["index"], 0);
    assert_eq!(body["fallback"], false);
    assert!(body.get("word").is_none());

    let mut words = Vec::new();
    let mut excluded = 0;
    for index in 0..3 {
        let (status, body) = call(&app, get(&format!("/api/round/reveal/{index}"), "table-1")).await;
        assert_eq!(status, StatusCode::OK);
        if body["excluded"] == true {
            assert!(body["word"].is_null());
            excluded += 1;
        } else {
            words.push(body["word"].as_str().unwrap().to_owned());
        }
    }
    assert_eq!(excluded, 1);
    assert_eq!(words[0], words[1]);
    assert!(state.words().pool().contains(&words[0]));

    for expected in 1..3 {
        let (status, body) = call(&app, advance("table-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["complete"], false);
        assert_eq!(body["next_index"], expected);
    }

    let (_, body) = call(&app, advance("table-1")).await;
    assert_eq!(body["complete"], true);
    assert!(body.get("next_player").is_none());

    let (_, body) = call(&app, get("/api/round/current", "table-1")).await;
    assert_eq!(body["player_name"], "C");
    assert_eq!(body["complete"], true);
}

#[tokio::test]
async fn missing_session_and_bad_index_are_reported() {
    let (app, _) = app(config(FallbackMode::Lenient, None));

    let (status, body) = call(&app, get("/api/round/current", "nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_active_session");

    let (status, body) = call(&app, advance("nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_active_session");

    call(
        &app,
        start("table-2", json!({"players": ["A", "B"], "use_generation": false})),
    )
    .await;

    for index in ["2", "-1", "abc", "1.5"] {
        let (status, body) =
            call(&app, get(&format!("/api/round/reveal/{index}"), "table-2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_index");
    }
}

#[tokio::test]
async fn requests_without_client_id_are_rejected() {
    let (app, _) = app(config(FallbackMode::Lenient, None));

    let request = Request::get("/api/round/current")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_client_id");
}

#[tokio::test]
async fn invalid_rosters_are_rejected() {
    let (app, _) = app(config(FallbackMode::Lenient, None));

    let (status, _) = call(&app, start("t", json!({"players": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, start("t", json!({"players": ["A", "   "]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, get("/api/round/current", "t")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generated_word_is_shared_by_everyone_but_the_odd_one_out() {
    let server = MockServer::start().await;
    mock_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "كرة قدم\n"}}]
        })),
    )
    .await;
    let (app, _) = app(config(
        FallbackMode::Strict,
        Some(format!("{}/v1", server.uri())),
    ));

    let (status, body) = call(
        &app,
        start("t", json!({"players": ["A", "B", "C", "D"], "topic": "رياضة"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], false);

    let mut shown = Vec::new();
    for index in 0..4 {
        let (_, body) = call(&app, get(&format!("/api/round/reveal/{index}"), "t")).await;
        if let Some(word) = body["word"].as_str() {
            shown.push(word.to_owned());
        }
    }
    assert_eq!(shown, vec!["كرة قدم".to_string(); 3]);
}

#[tokio::test]
async fn lenient_mode_falls_back_when_generation_errors() {
    let server = MockServer::start().await;
    mock_completion(&server, ResponseTemplate::new(500).set_body_string("boom")).await;
    let (app, state) = app(config(
        FallbackMode::Lenient,
        Some(format!("{}/v1", server.uri())),
    ));

    let (status, body) = call(&app, start("t", json!({"players": ["A", "B", "C"]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);

    let (_, reveal) = call(&app, get("/api/round/reveal/0", "t")).await;
    let (_, other) = call(&app, get("/api/round/reveal/1", "t")).await;
    let word = reveal["word"]
        .as_str()
        .or_else(|| other["word"].as_str())
        .unwrap();
    assert!(state.words().pool().contains(word));
}

#[tokio::test]
async fn strict_mode_surfaces_generation_failure_without_a_session() {
    let server = MockServer::start().await;
    mock_completion(&server, ResponseTemplate::new(500).set_body_string("boom")).await;
    let (app, _) = app(config(
        FallbackMode::Strict,
        Some(format!("{}/v1", server.uri())),
    ));

    let (status, body) = call(&app, start("t", json!({"players": ["A", "B", "C"]}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "generation_failed");
    assert!(body["detail"].as_str().unwrap().contains("500"));

    let (status, _) = call(&app, get("/api/round/current", "t")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn word_endpoints_work_without_a_session() {
    let (app, state) = app(config(FallbackMode::Lenient, None));

    let request = Request::get("/api/words/random").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.words().pool().contains(body["word"].as_str().unwrap()));

    // No credential configured: lenient mode substitutes a pool word.
    let request = Request::post("/api/words/generate")
        .header("content-type", "application/json")
        .body(Body::from(json!({"topic": "طعام"}).to_string()))
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    assert!(state.words().pool().contains(body["word"].as_str().unwrap()));
}

#[tokio::test]
async fn healthcheck_reports_generation_availability() {
    let (app, _) = app(config(FallbackMode::Lenient, None));
    call(
        &app,
        start("t", json!({"players": ["A"], "use_generation": false})),
    )
    .await;

    let request = Request::get("/healthcheck").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["generation_configured"], false);
    assert_eq!(body["active_sessions"], 1);
}
