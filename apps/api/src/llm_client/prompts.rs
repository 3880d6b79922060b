// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Default sampling temperature for every interview call.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT include explanations or apologies.";
