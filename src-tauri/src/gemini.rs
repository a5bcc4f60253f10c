//! Thin client for the hosted generative-language API.
//!
//! One request shape is used everywhere: a natural-language prompt plus a
//! structured-output schema, answered with JSON text. Callers decide what
//! a failure degrades to — this module only reports it.

use serde_json::{json, Value};

use crate::error::{PaveraError, Result};

const MODEL_NAME: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The generation credential, if one is configured for this device.
/// Absence is a mode switch (static/empty results), not an error.
pub fn api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Issues one `generateContent` call constrained to the given response
/// schema and returns the raw JSON text of the first candidate.
///
/// Exactly one attempt: no retry, no backoff, no timeout beyond the
/// transport's own. Empty responses are failures like any other.
pub async fn generate_json(api_key: &str, prompt: &str, response_schema: Value) -> Result<String> {
    let url = format!("{API_BASE}/{MODEL_NAME}:generateContent?key={api_key}");

    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        }
    });

    let client = reqwest::Client::new();
    let response = client.post(&url).json(&body).send().await?;

    if !response.status().is_success() {
        return Err(PaveraError::Generation(format!(
            "generateContent returned {}",
            response.status()
        )));
    }

    let payload: Value = response.json().await?;
    extract_text(&payload)
        .map(str::to_string)
        .ok_or_else(|| PaveraError::Generation("empty response from model".into()))
}

/// Pulls `candidates[0].content.parts[0].text` out of a response payload.
fn extract_text(payload: &Value) -> Option<&str> {
    let text = payload["candidates"][0]["content"]["parts"][0]["text"].as_str()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(text)
}
