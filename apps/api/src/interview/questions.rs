//! Interview question generation: prompt, reply parsing and reshaping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::prompts::{QUESTIONS_MAX_TOKENS, QUESTIONS_PROMPT, QUESTIONS_SYSTEM};
use crate::llm_client::prompts::{DEFAULT_TEMPERATURE, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{ChatModel, ChatRequest};
use crate::models::interview::{Difficulty, Question};

const DEFAULT_CATEGORY: &str = "Frontend";

/// A JSON array inside a markdown code block, possibly surrounded by prose.
static FENCED_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\[.*?\])\s*```").expect("fenced array pattern is valid")
});

/// A question as the model returned it. Every field is optional; ids are
/// reassigned during reshaping.
#[derive(Debug, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn generate_questions(llm: &dyn ChatModel) -> Result<Vec<Question>, AppError> {
    let prompt = format!("{QUESTIONS_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}");
    let reply = llm
        .complete(ChatRequest {
            system: QUESTIONS_SYSTEM,
            prompt: &prompt,
            max_tokens: QUESTIONS_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::llm("generate questions", e))?;

    if reply.trim().is_empty() {
        return Err(AppError::Llm("OpenAI returned empty response".to_string()));
    }

    let raw = parse_question_reply(&reply).map_err(AppError::Llm)?;
    let questions = reshape_questions(raw);
    info!("Generated {} interview questions", questions.len());
    Ok(questions)
}

/// Parses the reply as a JSON array, falling back to the first fenced array.
pub fn parse_question_reply(reply: &str) -> Result<Vec<RawQuestion>, String> {
    let direct_err = match serde_json::from_str::<Vec<RawQuestion>>(reply.trim()) {
        Ok(questions) => return Ok(questions),
        Err(e) => e,
    };
    warn!("Question reply is not bare JSON ({direct_err}), looking for a fenced array");

    let fenced = FENCED_ARRAY_RE
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            format!(
                "Failed to parse AI response as JSON: {direct_err}. \
                 Could not extract JSON: No JSON found in response"
            )
        })?;

    serde_json::from_str(fenced.as_str()).map_err(|e| {
        format!("Failed to parse AI response as JSON: {direct_err}. Could not extract JSON: {e}")
    })
}

/// Renumbers ids from 1 and fills defaults. The time limit follows the
/// resolved difficulty.
pub fn reshape_questions(raw: Vec<RawQuestion>) -> Vec<Question> {
    raw.into_iter()
        .enumerate()
        .map(|(i, q)| {
            let difficulty = q
                .difficulty
                .as_deref()
                .map(Difficulty::parse_lenient)
                .unwrap_or_default();
            Question {
                id: (i + 1).to_string(),
                text: q.text.unwrap_or_default(),
                difficulty,
                time_limit: difficulty.time_limit_secs(),
                category: q.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let reply = r#"[{"id": 7, "text": "What is JSX?", "difficulty": "easy", "category": "Frontend"}]"#;
        let raw = parse_question_reply(reply).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].text.as_deref(), Some("What is JSX?"));
    }

    #[test]
    fn test_parse_fenced_array_with_prose() {
        let reply = "Here are your questions:\n```json\n[{\"text\": \"Explain the event loop\", \"difficulty\": \"hard\"}]\n```\nGood luck!";
        let raw = parse_question_reply(reply).unwrap();
        assert_eq!(raw[0].difficulty.as_deref(), Some("hard"));
    }

    #[test]
    fn test_parse_failure_reports_both_attempts() {
        let err = parse_question_reply("Sorry, I cannot help with that.").unwrap_err();
        assert!(err.starts_with("Failed to parse AI response as JSON"));
        assert!(err.contains("No JSON found in response"));
    }

    #[test]
    fn test_reshape_renumbers_and_sets_time_limits() {
        let raw = vec![
            RawQuestion {
                text: Some("Q-a".into()),
                difficulty: Some("medium".into()),
                category: Some("Backend".into()),
            },
            RawQuestion {
                text: Some("Q-b".into()),
                difficulty: Some("hard".into()),
                category: None,
            },
        ];
        let questions = reshape_questions(raw);
        assert_eq!(questions[0].id, "1");
        assert_eq!(questions[0].time_limit, 60);
        assert_eq!(questions[0].category, "Backend");
        assert_eq!(questions[1].id, "2");
        assert_eq!(questions[1].time_limit, 120);
        assert_eq!(questions[1].category, "Frontend");
    }

    #[test]
    fn test_reshape_defaults_missing_fields() {
        let questions = reshape_questions(vec![RawQuestion::default()]);
        assert_eq!(questions[0].text, "");
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[0].time_limit, 20);
    }
}
