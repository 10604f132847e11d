//! Security findings as they are described to the fix endpoint

use serde::{Deserialize, Serialize};

/// Placeholder used when no earlier fix is known for an issue
pub const NO_PRIOR_FIX: &str = "No prior fixes known/found";

/// A finding reported by the scanner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityIssue {
    pub service: String,
    #[serde(rename = "resource name")]
    pub resource_name: String,
    pub details: String,
    pub severity: String,
}

impl SecurityIssue {
    /// One-line description, e.g. `[S3] logs - bucket is public (Severity: HIGH)`
    pub fn describe(&self) -> String {
        format!(
            "[{}] {} - {} (Severity: {})\n",
            self.service, self.resource_name, self.details, self.severity
        )
    }
}

/// A finding together with a known fix, used as fix context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityIssueMetadata {
    pub service: String,
    #[serde(rename = "resourcename")]
    pub resource_name: String,
    pub details: String,
    pub severity: String,
    pub fix: String,
}

impl SecurityIssueMetadata {
    pub fn new(issue: &SecurityIssue, fix: impl Into<String>) -> Self {
        Self {
            service: issue.service.clone(),
            resource_name: issue.resource_name.clone(),
            details: issue.details.clone(),
            severity: issue.severity.clone(),
            fix: fix.into(),
        }
    }

    pub fn without_prior_fix(issue: &SecurityIssue) -> Self {
        Self::new(issue, NO_PRIOR_FIX)
    }

    /// Context line sent to `POST /fix`
    pub fn describe(&self) -> String {
        format!(
            "[{}] {} - {} (Severity: {}); Fix: {}\n",
            self.service, self.resource_name, self.details, self.severity, self.fix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> SecurityIssue {
        SecurityIssue {
            service: "EC2".to_string(),
            resource_name: "sg-0abc".to_string(),
            details: "Port 22 open to 0.0.0.0/0".to_string(),
            severity: "HIGH".to_string(),
        }
    }

    #[test]
    fn test_describe_issue() {
        assert_eq!(
            issue().describe(),
            "[EC2] sg-0abc - Port 22 open to 0.0.0.0/0 (Severity: HIGH)\n"
        );
    }

    #[test]
    fn test_metadata_without_prior_fix() {
        let meta = SecurityIssueMetadata::without_prior_fix(&issue());
        assert_eq!(meta.severity, "HIGH");
        assert_eq!(
            meta.describe(),
            "[EC2] sg-0abc - Port 22 open to 0.0.0.0/0 (Severity: HIGH); Fix: No prior fixes known/found\n"
        );
    }

    #[test]
    fn test_issue_json_field_names() {
        let json = serde_json::to_value(issue()).unwrap();
        assert_eq!(json["resource name"], "sg-0abc");
    }
}
