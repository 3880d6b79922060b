use serde::Serialize;

/// Contact fields recovered from a resume, plus the text they came from.
/// Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub text: String,
}

impl ParsedContact {
    /// A record with no fields found.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            text: text.into(),
        }
    }
}
