//! Chat workflow demo: a two-turn threaded conversation on the mock model
//! and a static price provider. Runs entirely offline.
//!
//! Usage: `cargo run -p marketloom-examples --bin chat`

use std::sync::Arc;

use chrono::NaiveDate;
use marketloom::llm::MockLlm;
use marketloom::tools::{
    PriceBar, PricesTool, StaticPriceProvider, StaticSearchProvider, ToolRegistry, WebSearchTool,
};
use marketloom::{ChatRunner, WorkflowConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let prices = StaticPriceProvider::new(vec![
        PriceBar {
            date: NaiveDate::from_ymd_opt(2025, 8, 21).unwrap(),
            close: 182.5,
        },
        PriceBar {
            date: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            close: 184.05,
        },
    ]);
    let registry = Arc::new(
        ToolRegistry::new()
            .register(Arc::new(WebSearchTool::new(Arc::new(
                StaticSearchProvider::new(),
            ))))
            .register(Arc::new(PricesTool::new(Arc::new(prices)))),
    );
    let llm = Arc::new(
        MockLlm::new()
            .then_tool_call("get_recent_prices", r#"{"symbol":"AAPL"}"#, "call-1")
            .then_answer("AAPL closed at 184.05, up from 182.50 the day before.")
            .then_answer("That is a gain of about 0.8% over the two sessions."),
    );

    let runner =
        ChatRunner::new(llm, registry, &WorkflowConfig::default()).expect("graph should compile");

    let first = runner
        .run("How has AAPL moved lately?", vec![])
        .await
        .expect("first turn failed");
    println!("Q: How has AAPL moved lately?");
    println!("A: {}\n", first.final_output);

    let second = runner
        .run("How much is that in percent?", first.messages)
        .await
        .expect("second turn failed");
    println!("Q: How much is that in percent?");
    println!("A: {}", second.final_output);
}
