//! Extract code and steps from generated remediation text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)```").expect("valid code block regex")
});

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:\d+[.)]|[*-])[ \t]+(.+?)[ \t]*$").expect("valid list item regex")
});

/// Structured view of a fix
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemediationDetails {
    /// Contents of the first fenced code block, trimmed; empty if none
    pub code: String,
    /// Numbered or bulleted lines, in order
    pub steps: Vec<String>,
}

impl RemediationDetails {
    pub fn parse(text: &str) -> Self {
        Self {
            code: parse_code(text),
            steps: parse_steps(text),
        }
    }
}

/// First fenced code block, trimmed
pub fn parse_code(text: &str) -> String {
    CODE_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// List items outside of code blocks
pub fn parse_steps(text: &str) -> Vec<String> {
    let prose = CODE_BLOCK.replace_all(text, "");
    LIST_ITEM
        .captures_iter(&prose)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
