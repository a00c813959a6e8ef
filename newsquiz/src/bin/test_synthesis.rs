use common::NewsConfig;
use newsquiz::llm::remote::RemoteLlmProvider;
use newsquiz::llm::synthesizer::synthesize_quiz;
use newsquiz::news::fetch_articles;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("Set OPENAI_API_KEY environment variable");

    // Allow custom base URL or use OpenAI default
    let base_url = std::env::var("LLM_BASE_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

    let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-2024-08-06".to_string());

    println!("\n{}", "=".repeat(60));
    println!("Testing quiz synthesis");
    println!("Base URL: {}", base_url);
    println!("Model: {}", model);
    println!("{}", "=".repeat(60));

    println!("\n[Step 1] Fetching articles...");
    let news_cfg = NewsConfig::default();
    let articles = match fetch_articles(&news_cfg).await {
        Ok(articles) => {
            println!("✓ Fetched {} articles", articles.len());
            for a in &articles {
                println!("  - {}", a.title);
            }
            articles
        }
        Err(e) => {
            eprintln!("✗ Fetch failed: {}", e);
            return;
        }
    };

    let provider = RemoteLlmProvider::new(&base_url, &api_key, &model).with_defaults(60, 1500, 0.7);

    println!("\n[Step 2] Synthesizing quiz...");
    match synthesize_quiz(&provider, &articles, 5).await {
        Ok(quiz) => {
            println!("✓ Success! {} questions:", quiz.len());
            for (i, q) in quiz.questions.iter().enumerate() {
                println!("\n  {}. {}", i + 1, q.question);
                for option in &q.options {
                    let marker = if *option == q.answer { "*" } else { " " };
                    println!("     [{}] {}", marker, option);
                }
            }
        }
        Err(e) => {
            eprintln!("✗ Failed: {}", e);
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Done");
    println!("{}", "=".repeat(60));
}
