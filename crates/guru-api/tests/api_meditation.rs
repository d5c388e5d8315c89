mod common;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use serde_json::json;

use common::{StubOpenAi, StubSpeech, body_json, json_request, send, test_app};
use guru_core::persona::MEDITATION_INSTRUCTIONS;

fn scripted() -> Arc<StubOpenAi> {
    Arc::new(StubOpenAi {
        script: Some("Welcome, dear soul... Let us breathe together.".to_string()),
        ..StubOpenAi::default()
    })
}

#[tokio::test]
async fn test_meditation_streams_audio() {
    let openai = scripted();
    let speech = Arc::new(StubSpeech::with_chunks(vec![b"ID3", b"-frame-1", b"-frame-2"]));
    let app = test_app(openai.clone(), speech.clone());

    let response = send(
        app,
        json_request(
            "POST",
            "/api/meditation",
            json!({ "type": "anxiety-relief", "minutes": 10 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert!(response.headers().get(header::CONTENT_LENGTH).is_none());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ID3-frame-1-frame-2");

    // Exactly one call to each provider
    assert_eq!(openai.calls(), 1);
    assert_eq!(speech.calls(), 1);

    let script_requests = openai.script_requests.lock().unwrap();
    let request = &script_requests[0];
    assert_eq!(request.model, "gpt-5");
    assert_eq!(request.max_output_tokens, Some(2_000));
    assert_eq!(request.instructions.as_deref(), Some(MEDITATION_INSTRUCTIONS));
    assert!(request.input.starts_with("Create a 10-minute meditation for calming anxiety"));

    assert_eq!(speech.voices.lock().unwrap()[0], "EXAVITQu4vr4xnSDxMaL");
    assert_eq!(
        speech.texts.lock().unwrap()[0],
        "Welcome, dear soul... Let us breathe together."
    );
}

#[tokio::test]
async fn test_meditation_token_budget_scales_with_minutes() {
    for (minutes, expected) in [(5u32, 1_000u64), (10, 2_000), (30, 6_000)] {
        let openai = scripted();
        let app = test_app(openai.clone(), Arc::new(StubSpeech::with_chunks(vec![b"x"])));

        let response = send(
            app,
            json_request(
                "POST",
                "/api/meditation",
                json!({ "type": "evening-reflection", "minutes": minutes }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let requests = openai.script_requests.lock().unwrap();
        assert_eq!(requests[0].max_output_tokens, Some(expected));
    }
}

#[tokio::test]
async fn test_meditation_rejects_invalid_input_without_upstream_calls() {
    let openai = scripted();
    let speech = Arc::new(StubSpeech::with_chunks(vec![b"x"]));

    let cases = [
        (json!({ "minutes": 10 }), "Missing type or minutes parameter"),
        (json!({ "type": "anxiety-relief" }), "Missing type or minutes parameter"),
        (json!({ "type": "anxiety-relief", "minutes": 0 }), "Missing type or minutes parameter"),
        (json!({ "type": "deep-sleep", "minutes": 10 }), "Invalid meditation type"),
        (json!({ "type": "ANXIETY-RELIEF", "minutes": 10 }), "Invalid meditation type"),
    ];

    for (body, message) in cases {
        let app = test_app(openai.clone(), speech.clone());
        let response = send(app, json_request("POST", "/api/meditation", body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": message }));
    }

    assert_eq!(openai.calls(), 0);
    assert_eq!(speech.calls(), 0);
}

#[tokio::test]
async fn test_meditation_rejects_non_integer_minutes() {
    let openai = scripted();
    let app = test_app(openai.clone(), Arc::new(StubSpeech::default()));

    let response = send(
        app,
        json_request(
            "POST",
            "/api/meditation",
            json!({ "type": "gratitude-joy", "minutes": "ten" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(openai.calls(), 0);
}

#[tokio::test]
async fn test_meditation_empty_script_skips_synthesis() {
    let openai = Arc::new(StubOpenAi::default());
    let speech = Arc::new(StubSpeech::with_chunks(vec![b"x"]));
    let app = test_app(openai.clone(), speech.clone());

    let response = send(
        app,
        json_request("POST", "/api/meditation", json!({ "type": "morning-peace", "minutes": 5 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to create meditation");
    assert_eq!(
        body["details"],
        "Failed to generate meditation script - no content returned"
    );
    assert_eq!(openai.calls(), 1);
    assert_eq!(speech.calls(), 0);
}

#[tokio::test]
async fn test_meditation_script_provider_failure() {
    let openai = Arc::new(StubOpenAi::failing());
    let speech = Arc::new(StubSpeech::with_chunks(vec![b"x"]));
    let app = test_app(openai.clone(), speech.clone());

    let response = send(
        app,
        json_request("POST", "/api/meditation", json!({ "type": "inner-strength", "minutes": 5 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to create meditation");
    assert!(body["details"].as_str().unwrap().contains("503"));
    assert_eq!(speech.calls(), 0);
}

#[tokio::test]
async fn test_meditation_speech_rejection_is_upstream_error() {
    let openai = scripted();
    let speech = Arc::new(StubSpeech {
        reject: true,
        ..StubSpeech::default()
    });
    let app = test_app(openai.clone(), speech.clone());

    let response = send(
        app,
        json_request("POST", "/api/meditation", json!({ "type": "heart-healing", "minutes": 5 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to create meditation");
    assert!(body["details"].as_str().unwrap().contains("401"));
    assert_eq!(openai.calls(), 1);
    assert_eq!(speech.calls(), 1);
}

#[tokio::test]
async fn test_meditation_mid_stream_failure_errors_the_body() {
    let openai = scripted();
    let speech = Arc::new(StubSpeech {
        chunks: vec![b"aa", b"bb", b"cc"],
        fail_after: Some(2),
        ..StubSpeech::default()
    });
    let app = test_app(openai, speech);

    let response = send(
        app,
        json_request("POST", "/api/meditation", json!({ "type": "gratitude-joy", "minutes": 5 })),
    )
    .await;

    // Headers were already sent; the failure shows up in the body
    assert_eq!(response.status(), StatusCode::OK);
    let result = axum::body::to_bytes(response.into_body(), usize::MAX).await;
    assert!(result.is_err());
}
