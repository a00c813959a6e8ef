//! Quiz synthesis: turn an article list into a validated multiple-choice quiz
//! through a single structured-output LLM call.

use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::{extract_json_from_text, LlmProvider, LlmRequest};
use crate::news::Article;
use crate::quiz::Quiz;

/// Failures while synthesizing or validating a quiz.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("no articles available to build a quiz from")]
    NoArticles,
    #[error("LLM request failed: {0}")]
    Provider(#[from] anyhow::Error),
    #[error("LLM output is not a quiz: {0}")]
    Malformed(String),
    #[error("quiz failed validation: {0}")]
    Invalid(String),
}

/// Number of characters of article content included per article in the prompt.
const CONTENT_EXCERPT_CHARS: usize = 500;

/// Synthesize a quiz of `question_count` questions from the given articles.
///
/// Fails with `NoArticles` before any network call when the list is empty.
/// The quiz shape is validated here, at the boundary: downstream code may
/// assume every question has at least two unique options and that the answer
/// is one of them.
pub async fn synthesize_quiz<P: LlmProvider + ?Sized>(
    provider: &P,
    articles: &[Article],
    question_count: usize,
) -> Result<Quiz, SynthesisError> {
    if articles.is_empty() {
        return Err(SynthesisError::NoArticles);
    }

    let request = LlmRequest {
        system: Some(build_system_instruction(articles, question_count)),
        prompt: format!(
            "Generate a quiz with {} questions based on the news article data.",
            question_count
        ),
        max_tokens: None,
        temperature: None,
        timeout_seconds: None,
        response_format: Some(quiz_response_format()),
    };

    let response = provider.generate(request).await?;

    let cleaned = extract_json_from_text(&response.content)
        .ok_or_else(|| SynthesisError::Malformed("no JSON object in LLM output".to_string()))?;

    let quiz: Quiz = serde_json::from_str(&cleaned)
        .map_err(|e| SynthesisError::Malformed(e.to_string()))?;

    validate_quiz(&quiz)?;

    info!(
        "synthesized quiz with {} questions ({} tokens)",
        quiz.len(),
        response.usage.total_tokens
    );

    Ok(quiz)
}

/// The fixed instruction demanding a structured quiz object, with the article
/// digest embedded.
fn build_system_instruction(articles: &[Article], question_count: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Generate a quiz with {} questions based on the following news article data. ",
        question_count
    ));
    prompt.push_str(
        "Return the quiz as a JSON object with a 'questions' key containing an array of \
         question objects. Each question object should have 'question', 'options', and \
         'answer' fields. The 'answer' must match one of the 'options' verbatim.\n\n",
    );
    prompt.push_str("ARTICLES:\n");

    for article in articles {
        prompt.push_str(&format!("## {}\n", article.title));
        if !article.description.is_empty() {
            prompt.push_str(&format!("{}\n", article.description));
        }
        if !article.content.is_empty() {
            let excerpt: String = article.content.chars().take(CONTENT_EXCERPT_CHARS).collect();
            prompt.push_str(&format!("{}\n", excerpt));
        }
        if !article.published_at.is_empty() {
            prompt.push_str(&format!("Published: {}\n", article.published_at));
        }
        prompt.push('\n');
    }

    prompt
}

/// OpenAI `response_format` value declaring the Quiz schema.
fn quiz_response_format() -> serde_json::Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "quiz",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "questions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": { "type": "string" },
                                "options": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                },
                                "answer": { "type": "string" }
                            },
                            "required": ["question", "options", "answer"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["questions"],
                "additionalProperties": false
            }
        }
    })
}

/// Reject malformed quiz shapes at the boundary instead of letting them reach
/// the session state machine.
fn validate_quiz(quiz: &Quiz) -> Result<(), SynthesisError> {
    if quiz.is_empty() {
        return Err(SynthesisError::Invalid("quiz has no questions".to_string()));
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.question.is_empty() {
            return Err(SynthesisError::Invalid(format!(
                "question {} has an empty prompt",
                i + 1
            )));
        }
        if q.options.len() < 2 {
            return Err(SynthesisError::Invalid(format!(
                "question {} has fewer than two options",
                i + 1
            )));
        }
        for (j, option) in q.options.iter().enumerate() {
            if q.options[..j].contains(option) {
                return Err(SynthesisError::Invalid(format!(
                    "question {} has duplicate option '{}'",
                    i + 1,
                    option
                )));
            }
        }
        if !q.options.contains(&q.answer) {
            return Err(SynthesisError::Invalid(format!(
                "question {} answer '{}' is not among its options",
                i + 1,
                q.answer
            )));
        }
    }

    Ok(())
}
