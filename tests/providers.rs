use futures::StreamExt;
use mockito::Matcher;
use serde_json::json;

use lexrelay::errors::RelayError;
use lexrelay::llm::gemini::GeminiProvider;
use lexrelay::llm::openai::OpenAIProvider;
use lexrelay::llm::ProviderAdapter;
use lexrelay::relay::ChunkStream;

async fn collect_chunks(mut stream: ChunkStream) -> (String, Option<RelayError>) {
    let mut text = String::new();
    let mut error = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => text.push_str(&String::from_utf8_lossy(&chunk)),
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }
    (text, error)
}

#[tokio::test]
async fn test_openai_streams_delta_content() {
    let mut server = mockito::Server::new_async().await;
    let sse_body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Simple \"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"words.\"},\"index\":0}]}\n\n",
        "data: [DONE]\n\n",
    );
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "stream": true,
            "messages": [
                {"role": "system", "content": "Rewrite simply."},
                {"role": "user", "content": "Complicated prose."},
            ],
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body)
        .create_async()
        .await;

    let adapter = OpenAIProvider::new("gpt-3.5-turbo")
        .with_base_url(server.url())
        .with_api_key("test-key");

    let stream = adapter
        .stream_generate("Rewrite simply.", "Complicated prose.")
        .await
        .unwrap();
    let (text, error) = collect_chunks(stream).await;

    mock.assert_async().await;
    assert_eq!(text, "Simple words.");
    assert!(error.is_none());
}

#[tokio::test]
async fn test_openai_rejected_key_fails_before_streaming() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let adapter = OpenAIProvider::new("gpt-3.5-turbo")
        .with_base_url(server.url())
        .with_api_key("bad-key");

    let result = adapter.stream_generate("instruction", "input").await;
    match result {
        Err(RelayError::ProviderInit(message)) => {
            assert!(message.contains("Invalid OpenAI API key"));
        }
        other => panic!("Expected ProviderInit error, got {:?}", other.map(|_| "stream")),
    }
}

#[tokio::test]
async fn test_openai_server_error_fails_before_streaming() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let adapter = OpenAIProvider::new("gpt-3.5-turbo")
        .with_base_url(server.url())
        .with_api_key("test-key");

    let result = adapter.stream_generate("instruction", "input").await;
    match result {
        Err(RelayError::ProviderInit(message)) => {
            assert!(message.contains("500"));
        }
        other => panic!("Expected ProviderInit error, got {:?}", other.map(|_| "stream")),
    }
}

#[tokio::test]
async fn test_openai_missing_key_fails_without_request() {
    std::env::remove_var("OPENAI_API_KEY");

    let adapter = OpenAIProvider::new("gpt-3.5-turbo");
    let result = adapter.stream_generate("instruction", "input").await;

    match result {
        Err(RelayError::ProviderInit(message)) => {
            assert!(message.contains("OPENAI_API_KEY"));
        }
        other => panic!("Expected ProviderInit error, got {:?}", other.map(|_| "stream")),
    }
}

#[tokio::test]
async fn test_gemini_streams_candidate_parts() {
    let mut server = mockito::Server::new_async().await;
    let sse_body = concat!(
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Sim\"},{\"text\":\"ple \"}],\"role\":\"model\"}}]}\n\n",
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"words.\"}],\"role\":\"model\"}}]}\n\n",
    );
    let mock = server
        .mock("POST", "/models/gemini-pro:streamGenerateContent")
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": "Rewrite simply."},
                    {"text": "Complicated prose."},
                ],
            }],
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body)
        .create_async()
        .await;

    let adapter = GeminiProvider::new("gemini-pro")
        .with_base_url(server.url())
        .with_api_key("test-key");

    let stream = adapter
        .stream_generate("Rewrite simply.", "Complicated prose.")
        .await
        .unwrap();
    let (text, error) = collect_chunks(stream).await;

    mock.assert_async().await;
    assert_eq!(text, "Simple words.");
    assert!(error.is_none());
}

#[tokio::test]
async fn test_gemini_mid_stream_error_truncates() {
    let mut server = mockito::Server::new_async().await;
    let sse_body = concat!(
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Sim\"}]}}]}\n\n",
        "data: {\"error\":{\"code\":429,\"message\":\"quota exhausted\"}}\n\n",
    );
    let _mock = server
        .mock("POST", "/models/gemini-pro:streamGenerateContent")
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .with_status(200)
        .with_body(sse_body)
        .create_async()
        .await;

    let adapter = GeminiProvider::new("gemini-pro")
        .with_base_url(server.url())
        .with_api_key("test-key");

    let stream = adapter.stream_generate("instruction", "input").await.unwrap();
    let (text, error) = collect_chunks(stream).await;

    assert_eq!(text, "Sim");
    assert!(matches!(error, Some(RelayError::Stream(msg)) if msg.contains("quota exhausted")));
}

#[tokio::test]
async fn test_gemini_rejected_key_fails_before_streaming() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-pro:streamGenerateContent")
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .with_status(403)
        .with_body(r#"{"error":{"message":"API key not valid"}}"#)
        .create_async()
        .await;

    let adapter = GeminiProvider::new("gemini-pro")
        .with_base_url(server.url())
        .with_api_key("bad-key");

    let result = adapter.stream_generate("instruction", "input").await;
    match result {
        Err(RelayError::ProviderInit(message)) => {
            assert!(message.contains("Invalid Gemini API key"));
        }
        other => panic!("Expected ProviderInit error, got {:?}", other.map(|_| "stream")),
    }
}

// GEMINI_API_KEY and the legacy GOOGLEAI_API_KEY are process-wide state, so
// both lookup scenarios live in one test.
#[tokio::test]
async fn test_gemini_key_environment_fallback() {
    std::env::remove_var("GEMINI_API_KEY");
    std::env::remove_var("GOOGLEAI_API_KEY");

    let adapter = GeminiProvider::new("gemini-pro");
    match adapter.stream_generate("instruction", "input").await {
        Err(RelayError::ProviderInit(message)) => {
            assert!(message.contains("GEMINI_API_KEY"));
        }
        other => panic!("Expected ProviderInit error, got {:?}", other.map(|_| "stream")),
    }

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-pro:streamGenerateContent")
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .match_header("x-goog-api-key", "legacy-key")
        .with_status(200)
        .with_body("data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"ok\"}]}}]}\n\n")
        .create_async()
        .await;

    std::env::set_var("GOOGLEAI_API_KEY", "legacy-key");
    let adapter = GeminiProvider::new("gemini-pro").with_base_url(server.url());
    let stream = adapter.stream_generate("instruction", "input").await.unwrap();
    let (text, error) = collect_chunks(stream).await;
    std::env::remove_var("GOOGLEAI_API_KEY");

    mock.assert_async().await;
    assert_eq!(text, "ok");
    assert!(error.is_none());
}
