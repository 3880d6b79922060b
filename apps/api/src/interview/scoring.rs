//! Answer scoring: deterministic pre-screen, LLM rubric scoring, and a
//! lenient reader for the model's reply.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::interview::prompts::{SCORING_MAX_TOKENS, SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM};
use crate::llm_client::prompts::{DEFAULT_TEMPERATURE, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{strip_json_fences, ChatModel, ChatRequest};
use crate::models::interview::{DetailedScores, QuestionForScoring, ScoreResponse};

/// Answers shorter than this must mention something technical.
const MIN_ANSWER_CHARS: usize = 10;
const MIN_REPEATED_RUN: usize = 5;

/// Substrings that count as technical content in a very short answer.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "react", "javascript", "node", "html", "css", "api", "database", "server", "client",
    "frontend", "backend", "function", "variable", "component", "state", "props", "hook",
    "async", "await", "promise", "json", "http", "rest", "graphql", "sql", "nosql", "mongodb",
    "mysql", "postgresql", "redis", "docker", "kubernetes", "aws", "azure", "git", "github",
    "ci", "cd", "testing", "jest", "cypress", "selenium", "typescript", "webpack", "babel",
    "npm", "yarn", "package", "module", "import", "export", "class", "object", "array",
    "string", "number", "boolean", "null", "undefined", "error", "exception", "try", "catch",
    "finally", "if", "else", "for", "while", "loop", "recursion", "algorithm",
    "data structure", "method", "property", "attribute", "element", "dom", "bom", "event",
    "listener", "callback", "closure", "scope", "hoisting", "prototype", "inheritance",
    "polymorphism", "encapsulation", "abstraction", "solid", "dry", "kiss", "yagni", "mvc",
    "mvp", "mvvm", "flux", "redux", "mobx", "rxjs", "observable", "subject", "behavior",
    "replay", "then", "resolve", "reject", "pending", "fulfilled", "rejected", "settled",
    "race", "all", "allsettled", "any",
];

/// Whole answers that signal the candidate does not know.
const NON_ANSWERS: &[&str] = &[
    "idk", "dunno", "no idea", "dont know", "don't know", "not sure", "maybe", "probably",
    "i think", "i guess", "not really", "kind of", "sort of", "a bit", "a little", "somewhat",
    "somehow", "somewhere", "sometime", "someone", "something", "anything", "everything",
    "nothing", "whatever", "anyway", "anyhow", "someway",
];

static GIBBERISH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{10,}$").expect("gibberish pattern is valid"));
static SCORE_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""score":\s*(\d+)"#).expect("score pattern is valid"));
static FEEDBACK_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""feedback":\s*"([^"]+)""#).expect("feedback pattern is valid"));

/// Scores an answer, short-circuiting the LLM for empty or junk answers.
pub async fn score_answer(
    llm: &dyn ChatModel,
    question: &QuestionForScoring,
    answer: &str,
) -> Result<ScoreResponse, AppError> {
    if let Some(verdict) = prescreen(answer) {
        debug!("Answer pre-screened with score {}", verdict.score);
        return Ok(verdict);
    }

    let prompt = build_scoring_prompt(question, answer);
    let reply = llm
        .complete(ChatRequest {
            system: SCORING_SYSTEM,
            prompt: &prompt,
            max_tokens: SCORING_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::llm("score answer", e))?;

    parse_score_reply(&reply).map_err(AppError::Llm)
}

pub fn build_scoring_prompt(question: &QuestionForScoring, answer: &str) -> String {
    let prompt = SCORING_PROMPT_TEMPLATE
        .replace("{question_text}", &question.text)
        .replace("{difficulty}", &question.difficulty)
        .replace("{category}", &question.category)
        .replace("{answer}", answer);
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

// ────────────────────────────────────────────────────────────────────────────
// Pre-screen
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic verdicts for answers not worth sending to the model.
/// Checks run in order: empty, gibberish, one repeated character, too short
/// without technical content, stock non-answer.
pub fn prescreen(answer: &str) -> Option<ScoreResponse> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Some(canned(
            0,
            "No answer provided. Please provide a response to receive a score.",
            0,
            "Provide a complete answer to the question",
            "Take time to read the question carefully and provide a thoughtful response",
        ));
    }

    let lowered = answer.to_lowercase();
    let lowered = lowered.trim();

    if GIBBERISH_RE.is_match(lowered) {
        return Some(canned(
            5,
            "Answer appears to be random characters or gibberish. \
             Please provide a meaningful response to the technical question.",
            1,
            "Provide a coherent technical answer",
            "Read the question carefully and provide a relevant technical response",
        ));
    }

    if is_repeated_char(lowered) {
        return Some(canned(
            5,
            "Answer appears to be repeated characters. \
             Please provide a meaningful response to the technical question.",
            1,
            "Provide a coherent technical answer",
            "Read the question carefully and provide a relevant technical response",
        ));
    }

    if trimmed.chars().count() < MIN_ANSWER_CHARS
        && !TECHNICAL_KEYWORDS.iter().any(|k| lowered.contains(k))
    {
        return Some(canned(
            10,
            "Answer is too short and doesn't contain technical content. \
             Please provide a more detailed response explaining your technical knowledge.",
            2,
            "Provide a more detailed technical answer",
            "Expand your answer with technical details and examples",
        ));
    }

    if NON_ANSWERS.contains(&lowered) {
        return Some(canned(
            15,
            "Answer indicates uncertainty. \
             Please provide a more confident response based on your technical knowledge.",
            3,
            "Provide a more confident technical answer",
            "Draw from your technical knowledge and experience to provide a more detailed response",
        ));
    }

    None
}

/// The same character five or more times and nothing else.
fn is_repeated_char(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first != '\n' => {
            chars.clone().count() + 1 >= MIN_REPEATED_RUN && chars.all(|c| c == first)
        }
        _ => false,
    }
}

fn canned(
    score: i64,
    feedback: &str,
    communication: i64,
    improvement: &str,
    suggestion: &str,
) -> ScoreResponse {
    ScoreResponse {
        success: true,
        score,
        feedback: feedback.to_string(),
        detailed_scores: Some(DetailedScores {
            communication,
            ..DetailedScores::default()
        }),
        strengths: vec![],
        areas_for_improvement: vec![improvement.to_string()],
        suggestions: vec![suggestion.to_string()],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reply parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the model's evaluation. Malformed JSON falls back to recovering
/// just `score` and `feedback` with regexes.
pub fn parse_score_reply(reply: &str) -> Result<ScoreResponse, String> {
    let body = strip_json_fences(reply);
    let parse_err = match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => return Ok(score_from_json(&value)),
        Ok(other) => format!("expected a JSON object, got {other}"),
        Err(e) => e.to_string(),
    };
    warn!("Score reply is not a JSON object ({parse_err}), trying field recovery");

    let score = SCORE_FIELD_RE
        .captures(reply)
        .and_then(|c| c[1].parse::<i64>().ok());
    let feedback = FEEDBACK_FIELD_RE
        .captures(reply)
        .map(|c| c[1].to_string());

    match (score, feedback) {
        (Some(score), Some(feedback)) => Ok(ScoreResponse {
            success: true,
            score: score.clamp(0, 100),
            feedback,
            detailed_scores: None,
            strengths: vec![],
            areas_for_improvement: vec![],
            suggestions: vec![],
        }),
        _ => Err(format!("Failed to parse scoring response: {parse_err}")),
    }
}

fn score_from_json(json: &Value) -> ScoreResponse {
    let int = |key: &str| json.get(key).and_then(as_int).unwrap_or(0);
    let strings = |key: &str| -> Vec<String> {
        json.get(key)
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    };

    ScoreResponse {
        success: true,
        score: int("score").clamp(0, 100),
        feedback: json
            .get("feedback")
            .and_then(Value::as_str)
            .unwrap_or("No feedback provided.")
            .to_string(),
        detailed_scores: Some(DetailedScores {
            technical_accuracy: int("technical_accuracy"),
            problem_solving: int("problem_solving"),
            communication: int("communication"),
            relevance: int("relevance"),
            depth_of_knowledge: int("depth_of_knowledge"),
        }),
        strengths: strings("strengths"),
        areas_for_improvement: strings("areas_for_improvement"),
        suggestions: strings("suggestions"),
    }
}

/// Accepts integer or fractional JSON numbers, rounding the latter.
fn as_int(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_scores_zero() {
        let r = prescreen("   \n").unwrap();
        assert_eq!(r.score, 0);
        assert_eq!(r.detailed_scores, Some(DetailedScores::default()));
        assert_eq!(r.areas_for_improvement, vec!["Provide a complete answer to the question"]);
    }

    #[test]
    fn test_gibberish_scores_five() {
        let r = prescreen("fdkjvbvvkbvsd").unwrap();
        assert_eq!(r.score, 5);
        assert!(r.feedback.contains("gibberish"));
        assert_eq!(r.detailed_scores.unwrap().communication, 1);
    }

    #[test]
    fn test_repeated_characters_score_five() {
        let r = prescreen("!!!!!!").unwrap();
        assert_eq!(r.score, 5);
        assert!(r.feedback.contains("repeated characters"));
    }

    #[test]
    fn test_short_non_technical_answer_scores_ten() {
        let r = prescreen("hello").unwrap();
        assert_eq!(r.score, 10);
    }

    #[test]
    fn test_short_technical_answer_goes_to_model() {
        assert!(prescreen("use redux").is_none());
    }

    #[test]
    fn test_non_answer_scores_fifteen() {
        let r = prescreen("Don't Know").unwrap();
        assert_eq!(r.score, 15);
    }

    #[test]
    fn test_real_answer_is_not_prescreened() {
        assert!(prescreen("let and const are block-scoped while var is function-scoped").is_none());
    }

    #[test]
    fn test_is_repeated_char() {
        assert!(is_repeated_char("aaaaa"));
        assert!(!is_repeated_char("aaaa"));
        assert!(!is_repeated_char("aaaab"));
        assert!(!is_repeated_char(""));
    }

    #[test]
    fn test_parse_full_reply_clamps_score() {
        let reply = r#"```json
        {"score": 140, "feedback": "Great", "technical_accuracy": 18, "problem_solving": 17.6,
         "communication": 16, "relevance": 19, "depth_of_knowledge": 15,
         "strengths": ["Clear"], "areas_for_improvement": [], "suggestions": ["More depth"]}
        ```"#;
        let r = parse_score_reply(reply).unwrap();
        assert_eq!(r.score, 100);
        assert_eq!(r.feedback, "Great");
        let detailed = r.detailed_scores.unwrap();
        assert_eq!(detailed.technical_accuracy, 18);
        assert_eq!(detailed.problem_solving, 18);
        assert_eq!(r.strengths, vec!["Clear"]);
        assert_eq!(r.suggestions, vec!["More depth"]);
    }

    #[test]
    fn test_parse_reply_defaults_missing_fields() {
        let r = parse_score_reply(r#"{"score": -3}"#).unwrap();
        assert_eq!(r.score, 0);
        assert_eq!(r.feedback, "No feedback provided.");
        assert_eq!(r.detailed_scores, Some(DetailedScores::default()));
        assert!(r.strengths.is_empty());
    }

    #[test]
    fn test_parse_malformed_reply_recovers_score_and_feedback() {
        let reply = r#"{"score": 72, "feedback": "Decent answer", "strengths": [oops"#;
        let r = parse_score_reply(reply).unwrap();
        assert_eq!(r.score, 72);
        assert_eq!(r.feedback, "Decent answer");
        assert!(r.detailed_scores.is_none());
    }

    #[test]
    fn test_parse_unrecoverable_reply_is_error() {
        let err = parse_score_reply("I would give this a seven").unwrap_err();
        assert!(err.starts_with("Failed to parse scoring response"));
    }

    #[test]
    fn test_scoring_prompt_includes_question_and_answer() {
        let q = QuestionForScoring {
            text: "What is a promise?".into(),
            difficulty: "easy".into(),
            category: "Frontend".into(),
        };
        let prompt = build_scoring_prompt(&q, "An eventual value");
        assert!(prompt.contains("Question: What is a promise?"));
        assert!(prompt.contains("Difficulty Level: easy"));
        assert!(prompt.contains("An eventual value"));
        assert!(!prompt.contains("{answer}"));
    }
}
