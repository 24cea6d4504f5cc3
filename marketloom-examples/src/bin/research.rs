//! Research workflow demo.
//!
//! Runs offline on the mock model and a static search provider by default.
//! Set `OPENAI_API_KEY` and pass `--live` to use the real model and live
//! search.
//!
//! Usage: `cargo run -p marketloom-examples --bin research -- AAPL [--live]`

use std::sync::Arc;

use marketloom::llm::{ChatOpenAI, LlmClient, MockLlm};
use marketloom::tools::{
    ConclusionTool, HttpSearchProvider, StaticSearchProvider, ToolRegistry, WebSearchTool,
};
use marketloom::{ResearchRunner, WorkflowConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let live = args.iter().any(|a| a == "--live");
    let symbol = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "AAPL".to_string());

    let config = WorkflowConfig::from_env();

    let (llm, registry): (Arc<dyn LlmClient>, Arc<ToolRegistry>) = if live {
        let registry = ToolRegistry::new()
            .register(Arc::new(WebSearchTool::new(Arc::new(
                HttpSearchProvider::new(),
            ))))
            .register(Arc::new(ConclusionTool));
        (
            Arc::new(ChatOpenAI::new(config.llm.clone())),
            Arc::new(registry),
        )
    } else {
        let provider = StaticSearchProvider::new().with_hit(
            "Quarterly results",
            "https://news.example/results",
            "The company reported results ahead of expectations.",
        );
        let llm = MockLlm::new()
            .then_tool_call(
                "web_search",
                format!(r#"{{"query":"{} latest news"}}"#, symbol),
                "call-1",
            )
            .then_answer(format!("{} reported strong results.", symbol))
            .then_answer(format!(
                "Summary: {} beat expectations; see sources for detail.",
                symbol
            ));
        let registry = ToolRegistry::new()
            .register(Arc::new(WebSearchTool::new(Arc::new(provider))))
            .register(Arc::new(ConclusionTool));
        (Arc::new(llm), Arc::new(registry))
    };

    let runner = ResearchRunner::new(llm, registry, &config).expect("graph should compile");
    let outcome = runner.run(&symbol).await.expect("research run failed");

    println!("=== verdict for {} ===", symbol);
    println!("{}", outcome.final_output);
    println!("\nsources:");
    for url in &outcome.urls {
        println!("  {}", url);
    }
    println!("\nexecution log:");
    for event in &outcome.execution_log {
        println!("  {:?} {} [{}]", event.activity_type, event.activity, event.status);
    }
}
