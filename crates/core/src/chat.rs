//! Per-message annotation for the triage chat.
//!
//! The chat session owns the transcript; this module only ever looks at one message at a
//! time. Each message, whoever authored it, is run through the symptom classifier, and the
//! result decides whether the UI should offer the nearby-hospital finder.

use crate::constants::HOSPITAL_FINDER_MARKER;
use crate::symptoms::{self, Classification, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One entry in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The system message the UI inserts to render the hospital finder prompt.
    pub fn hospital_finder_prompt() -> Self {
        Self::new(Role::System, HOSPITAL_FINDER_MARKER)
    }

    fn is_hospital_finder_prompt(&self) -> bool {
        self.role == Role::System && self.content == HOSPITAL_FINDER_MARKER
    }
}

/// Phrases an assistant uses once it has reached an assessment.
const ASSESSMENT_PHRASES: &[&str] = &[
    "possible conditions",
    "assessment summary",
    "possible condition",
    "diagnosis",
    "may have",
    "could be",
    "likely",
];

/// True when `text` reads like the assistant's closing assessment.
pub fn is_assessment_complete(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ASSESSMENT_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// What the UI should surface alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MessageAnnotation {
    pub classification: Option<Classification>,
    /// Empty when there is no classification.
    pub advice: String,
    pub is_emergency: bool,
    pub is_urgent: bool,
    pub suggest_hospital_finder: bool,
}

impl MessageAnnotation {
    fn none() -> Self {
        Self {
            classification: None,
            advice: String::new(),
            is_emergency: false,
            is_urgent: false,
            suggest_hospital_finder: false,
        }
    }
}

/// Annotates one chat message.
pub fn annotate(message: &ChatMessage) -> MessageAnnotation {
    if message.is_hospital_finder_prompt() {
        return MessageAnnotation::none();
    }

    let classification = symptoms::classify(&message.content);
    let is_emergency = symptoms::is_emergency(classification.as_ref());
    let is_urgent = symptoms::is_urgent(classification.as_ref());
    let advice = classification
        .as_ref()
        .map(|c| c.severity.advice().to_string())
        .unwrap_or_default();

    let assessed = message.role == Role::Assistant && is_assessment_complete(&message.content);

    if let Some(c) = &classification {
        tracing::info!(
            role = ?message.role,
            condition = %c.condition,
            severity = %c.severity,
            "critical symptom detected"
        );
    }

    MessageAnnotation {
        suggest_hospital_finder: classification.is_some() || assessed,
        classification,
        advice,
        is_emergency,
        is_urgent,
    }
}

/// Severity of the most serious classification across `messages`, if any.
///
/// Useful when a caller re-renders a transcript and only needs the banner level.
pub fn highest_severity<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
) -> Option<Severity> {
    let mut highest = None;
    for message in messages {
        match annotate(message).classification.map(|c| c.severity) {
            Some(Severity::Emergency) => return Some(Severity::Emergency),
            Some(Severity::Urgent) => highest = Some(Severity::Urgent),
            None => {}
        }
    }
    highest
}
