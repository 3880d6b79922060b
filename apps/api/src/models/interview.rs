use serde::{Deserialize, Deserializer, Serialize};

/// Question difficulty. Drives the per-question time limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse; anything unrecognised is `Easy`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    /// Seconds the candidate gets to answer.
    pub fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 60,
            Difficulty::Hard => 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: Difficulty,
    pub time_limit: u32,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionForScoring {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: String,
}

/// Both fields are optional on the wire so a missing one can be reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub question: Option<QuestionForScoring>,
    /// `Some(None)` when the key is present but `null`.
    #[serde(default, deserialize_with = "present_or_null")]
    pub answer: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Per-criterion breakdown, each nominally 0–20.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub technical_accuracy: i64,
    pub problem_solving: i64,
    pub communication: i64,
    pub relevance: i64,
    pub depth_of_knowledge: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub score: i64,
    pub feedback: String,
    /// `None` when the model reply could only be partially recovered.
    pub detailed_scores: Option<DetailedScores>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRef {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub answers: Vec<CandidateAnswer>,
    #[serde(default)]
    pub questions: Vec<QuestionRef>,
    pub final_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    pub candidate: Option<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_lenient() {
        assert_eq!(Difficulty::parse_lenient("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient(" Medium "), Difficulty::Medium);
        assert_eq!(Difficulty::parse_lenient("expert"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_lenient(""), Difficulty::Easy);
    }

    #[test]
    fn test_time_limits() {
        assert_eq!(Difficulty::Easy.time_limit_secs(), 20);
        assert_eq!(Difficulty::Medium.time_limit_secs(), 60);
        assert_eq!(Difficulty::Hard.time_limit_secs(), 120);
    }

    #[test]
    fn test_question_serializes_camel_case() {
        let q = Question {
            id: "1".to_string(),
            text: "What is a closure?".to_string(),
            difficulty: Difficulty::Medium,
            time_limit: 60,
            category: "Frontend".to_string(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["timeLimit"], 60);
        assert_eq!(json["difficulty"], "medium");
    }

    #[test]
    fn test_candidate_deserializes_with_defaults() {
        let c: Candidate = serde_json::from_str(r#"{"finalScore": 72}"#).unwrap();
        assert!(c.name.is_none());
        assert!(c.answers.is_empty());
        assert_eq!(c.final_score, Some(72.0));
    }

    #[test]
    fn test_score_request_tolerates_missing_fields() {
        let r: ScoreRequest = serde_json::from_str(r#"{"answer": "x"}"#).unwrap();
        assert!(r.question.is_none());
        assert_eq!(r.answer, Some(Some("x".to_string())));
    }

    #[test]
    fn test_score_request_distinguishes_null_answer_from_missing() {
        let null: ScoreRequest = serde_json::from_str(r#"{"answer": null}"#).unwrap();
        assert_eq!(null.answer, Some(None));

        let missing: ScoreRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.answer, None);
    }
}
