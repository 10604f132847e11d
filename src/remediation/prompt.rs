//! Prompt sent to the completion backend for a fix request

/// Role framing for the model
pub const SYSTEM_PROMPT: &str =
    "You are an AWS security expert providing security fixes for security issues.";

/// A system/user prompt pair built around one issue description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPrompt {
    context: String,
}

impl FixPrompt {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// The caller's issue description, verbatim
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn system(&self) -> &str {
        SYSTEM_PROMPT
    }

    pub fn user(&self) -> String {
        format!(
            "Provide a detailed fix for the following AWS security issue:\n{}.\n\n\
             A relevant security fix has been provided for context.\n\
             The response should be clear, actionable, and follow best security practices.",
            self.context
        )
    }

    /// System and user text folded into one prompt, for backends without roles
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system(), self.user())
    }
}
