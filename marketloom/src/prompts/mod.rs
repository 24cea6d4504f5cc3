//! Embedded agent instructions and prompt builders.

/// System instructions for the research workflow.
pub const RESEARCH_INSTRUCTIONS: &str = include_str!("research_instructions.md");

/// System instructions for the chat workflow.
pub const CHAT_INSTRUCTIONS: &str = include_str!("chat_instructions.md");

/// System prompt for the research synthesis step, stamped with today's date.
pub fn summary_prompt() -> String {
    let current_date = chrono::Local::now().format("%Y-%m-%d");
    format!(
        "Analyze the messages below and produce a concise summary highlighting the most \
         recent news, trends, or events related to the specified stock. If the news is not \
         relevant to make an immediate stock decision as of {}, please mention so. Limit \
         your response to 100 words maximum. Add relevant URLs to your response.",
        current_date
    )
}
