//! Candidate summary generation.

use crate::errors::AppError;
use crate::interview::prompts::{SUMMARY_MAX_TOKENS, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};
use crate::llm_client::prompts::DEFAULT_TEMPERATURE;
use crate::llm_client::{ChatModel, ChatRequest};
use crate::models::interview::Candidate;

pub async fn generate_summary(llm: &dyn ChatModel, candidate: &Candidate) -> Result<String, AppError> {
    let prompt = build_summary_prompt(candidate);
    let summary = llm
        .complete(ChatRequest {
            system: SUMMARY_SYSTEM,
            prompt: &prompt,
            max_tokens: SUMMARY_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::llm("generate summary", e))?;

    if summary.trim().is_empty() {
        return Err(AppError::Llm("OpenAI returned empty summary".to_string()));
    }
    Ok(summary)
}

pub fn build_summary_prompt(candidate: &Candidate) -> String {
    let final_score = candidate
        .final_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Not calculated".to_string());

    SUMMARY_PROMPT_TEMPLATE
        .replace("{name}", candidate.name.as_deref().unwrap_or("Unknown"))
        .replace("{email}", candidate.email.as_deref().unwrap_or("Unknown"))
        .replace("{answered}", &candidate.answers.len().to_string())
        .replace("{total}", &candidate.questions.len().to_string())
        .replace("{final_score}", &final_score)
        .replace("{responses}", &format_transcript(candidate))
}

/// One Q/A/Score block per answer. Answers beyond the question list are
/// labelled "Question N".
pub fn format_transcript(candidate: &Candidate) -> String {
    candidate
        .answers
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            let n = i + 1;
            let question = candidate
                .questions
                .get(i)
                .and_then(|q| q.text.clone())
                .unwrap_or_else(|| format!("Question {n}"));
            format!(
                "Q{n}: {question}\nA{n}: {}\nScore: {}%\n\n",
                answer.answer, answer.score
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::{CandidateAnswer, QuestionRef};

    fn candidate() -> Candidate {
        Candidate {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            answers: vec![
                CandidateAnswer {
                    answer: "Hooks manage state".into(),
                    score: 80.0,
                },
                CandidateAnswer {
                    answer: "Use an index".into(),
                    score: 62.5,
                },
            ],
            questions: vec![QuestionRef {
                text: Some("What are React hooks?".into()),
            }],
            final_score: Some(71.0),
        }
    }

    #[test]
    fn test_transcript_labels_missing_questions() {
        let transcript = format_transcript(&candidate());
        assert_eq!(
            transcript,
            "Q1: What are React hooks?\nA1: Hooks manage state\nScore: 80%\n\n\
             Q2: Question 2\nA2: Use an index\nScore: 62.5%\n\n"
        );
    }

    #[test]
    fn test_prompt_fills_candidate_details() {
        let prompt = build_summary_prompt(&candidate());
        assert!(prompt.contains("Candidate: Jane Doe"));
        assert!(prompt.contains("Questions answered: 2/1"));
        assert!(prompt.contains("Overall score: 71%"));
        assert!(prompt.contains("Q1: What are React hooks?"));
    }

    #[test]
    fn test_prompt_defaults_for_empty_candidate() {
        let prompt = build_summary_prompt(&Candidate::default());
        assert!(prompt.contains("Candidate: Unknown"));
        assert!(prompt.contains("Email: Unknown"));
        assert!(prompt.contains("Questions answered: 0/0"));
        assert!(prompt.contains("Overall score: Not calculated%"));
    }
}
