//! HTML fragment rendering. Pure formatting, no business logic: every
//! function maps already-computed state to markup, escaping all dynamic text.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::news::Article;
use crate::quiz::{AnswerOutcome, Progress, QuizQuestion};

/// The question form served into the `#quiz` target. One radio input per
/// option; submission posts the `answer` form field to `/check-answer`.
pub fn render_question(question: &QuizQuestion, index: usize, _total: usize) -> String {
    let mut options_html = String::new();
    for option in &question.options {
        options_html.push_str(&format!(
            "<input type=\"radio\" name=\"answer\" value=\"{}\">{}<br>",
            encode_double_quoted_attribute(option),
            encode_text(option)
        ));
    }

    format!(
        "<form hx-post=\"/check-answer\" hx-target=\"#quiz\">\n\
         <h2>Question {}</h2>\n\
         <p>{}</p>\n\
         {}\n\
         <input type=\"submit\" value=\"Submit\">\n\
         </form>",
        index + 1,
        encode_text(&question.question),
        options_html
    )
}

/// Result fragment shown above the next question.
pub fn render_result(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        "<h3>Correct! Well done!</h3>".to_string()
    } else {
        format!(
            "<h3>Sorry, that's incorrect. The correct answer is: {}</h3>",
            encode_text(&outcome.correct_answer)
        )
    }
}

/// Completion fragment with the final score and a restart button.
pub fn render_summary(score: usize, total: usize) -> String {
    format!(
        "<h2>Quiz Completed!</h2>\n\
         <p>Your final score: {} out of {}</p>\n\
         <button hx-get=\"/quiz\" hx-target=\"#quiz\">Take Another Quiz</button>",
        score, total
    )
}

/// Render whatever the session presents next: a question or the summary.
pub fn render_progress(progress: &Progress) -> String {
    match progress {
        Progress::Question {
            question,
            index,
            total,
        } => render_question(question, *index, *total),
        Progress::Complete { score, total } => render_summary(*score, *total),
    }
}

/// The raw article list served by `/current`.
pub fn render_articles(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "<p>No current affairs data found.</p>".to_string();
    }

    let mut html = String::from("<ul>");
    for article in articles {
        html.push_str(&format!(
            "<li>\n\
             <h3>{title}</h3>\n\
             <p>{description}</p>\n\
             <p>{content}</p>\n\
             <p><strong>Published At:</strong> {published}</p>\n\
             <a href=\"{url}\" target=\"_blank\">Read more</a>\n\
             <br><img src=\"{image}\" alt=\"{alt}\" style=\"max-width: 300px;\">\n\
             </li>",
            title = encode_text(&article.title),
            description = encode_text(&article.description),
            content = encode_text(&article.content),
            published = encode_text(&article.published_at),
            url = encode_double_quoted_attribute(&article.url),
            image = encode_double_quoted_attribute(&article.image),
            alt = encode_double_quoted_attribute(&article.title),
        ));
    }
    html.push_str("</ul>");
    html
}

/// Error fragment: failures surface their raw message, nothing more.
pub fn render_error(message: &str) -> String {
    format!("<p>Error: {}</p>", encode_text(message))
}
