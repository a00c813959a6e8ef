use newsquiz::llm::remote::RemoteLlmProvider;
use newsquiz::llm::synthesizer::{synthesize_quiz, SynthesisError};
use newsquiz::news::Article;
use serde_json::json;

fn sample_articles() -> Vec<Article> {
    vec![Article {
        title: "Rust 1.70 released".to_string(),
        description: "New compiler release".to_string(),
        content: "The Rust team announced version 1.70 today...".to_string(),
        published_at: "2023-06-01T12:00:00Z".to_string(),
        url: "https://example.com/rust-1-70".to_string(),
        image: "https://example.com/rust.png".to_string(),
    }]
}

/// Wraps quiz JSON in an OpenAI-style chat completion body.
fn completion_body(content: &str) -> String {
    json!({
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 100, "completion_tokens": 80, "total_tokens": 180 }
    })
    .to_string()
}

fn quiz_json() -> String {
    json!({
        "questions": [
            {
                "question": "What version of Rust was released?",
                "options": ["1.69", "1.70", "1.71"],
                "answer": "1.70"
            },
            {
                "question": "Who announced the release?",
                "options": ["The Rust team", "The C++ committee"],
                "answer": "The Rust team"
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn synthesizes_a_valid_quiz() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(&quiz_json()))
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let quiz = synthesize_quiz(&provider, &sample_articles(), 2)
        .await
        .expect("synthesis succeeds");

    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz.questions[0].answer, "1.70");
    assert!(quiz.questions[0].options.contains(&"1.70".to_string()));

    mock.assert_async().await;
}

#[tokio::test]
async fn accepts_markdown_fenced_json() {
    let mut server = mockito::Server::new_async().await;
    let fenced = format!("Here is your quiz:\n```json\n{}\n```", quiz_json());
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(&fenced))
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let quiz = synthesize_quiz(&provider, &sample_articles(), 2)
        .await
        .expect("fenced JSON still parses");

    assert_eq!(quiz.len(), 2);
}

#[tokio::test]
async fn malformed_output_is_a_synthesis_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("{\"not\": \"a quiz\"}"))
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let err = synthesize_quiz(&provider, &sample_articles(), 2)
        .await
        .expect_err("shape mismatch must fail");

    assert!(matches!(err, SynthesisError::Malformed(_)));
}

#[tokio::test]
async fn answer_missing_from_options_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let bad_quiz = json!({
        "questions": [{
            "question": "2+2?",
            "options": ["3", "5"],
            "answer": "4"
        }]
    })
    .to_string();
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(&bad_quiz))
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let err = synthesize_quiz(&provider, &sample_articles(), 1)
        .await
        .expect_err("answer outside options must fail");

    assert!(matches!(err, SynthesisError::Invalid(_)));
}

#[tokio::test]
async fn empty_article_list_never_reaches_the_provider() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let err = synthesize_quiz(&provider, &[], 5)
        .await
        .expect_err("no articles must fail");

    assert!(matches!(err, SynthesisError::NoArticles));
    mock.assert_async().await;
}

#[tokio::test]
async fn provider_failure_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Rate limit exceeded"}}"#)
        .create_async()
        .await;

    let provider = RemoteLlmProvider::new(server.url(), "fake-api-key", "gpt-4o-2024-08-06");
    let err = synthesize_quiz(&provider, &sample_articles(), 2)
        .await
        .expect_err("API error must fail");

    assert!(matches!(err, SynthesisError::Provider(_)));
    assert!(err.to_string().contains("LLM request failed"));
}
