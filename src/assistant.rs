//! Prompt composition for the external chat assistant.
//!
//! The assistant itself lives outside this crate; these helpers only build
//! the text and request payload handed to it.

use serde_json::{json, Value};

const PREAMBLE: &str = "You are an expert in space and astronomy. \
                        Answer the following question kindly and in detail.";

/// Build the prompt for `query`, optionally grounded in the selected
/// body's description (see
/// [`SimulationContext::assistant_context`](crate::engine::SimulationContext::assistant_context)).
/// Returns `None` for a blank query.
#[must_use]
pub fn compose_prompt(query: &str, context: Option<&str>) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let mut prompt = String::from(PREAMBLE);
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str("\nThe user is currently looking at: ");
        prompt.push_str(context);
    }
    prompt.push_str("\nQuestion: ");
    prompt.push_str(query);
    Some(prompt)
}

/// Single-turn `generateContent`-style request body carrying `prompt`.
#[must_use]
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// First candidate's text from a `generateContent`-style response.
#[must_use]
pub fn response_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}
