//! Prompt element types.
//!
//! A prompt is built from four independently editable text fields. The empty
//! string is the "unset" state; fields are never optional once they live in
//! a [`PromptElements`]. Expansion results from the assist gateway arrive as
//! [`PartialPromptElements`], where absence means "leave the field alone".

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the four structured prompt fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptField {
    Role,
    Purpose,
    Constraints,
    Details,
}

impl PromptField {
    /// All fields in composition order.
    pub const ALL: [PromptField; 4] = [
        PromptField::Role,
        PromptField::Purpose,
        PromptField::Constraints,
        PromptField::Details,
    ];

    /// Section heading used when composing the prompt text.
    pub fn label(&self) -> &'static str {
        match self {
            PromptField::Role => "Role",
            PromptField::Purpose => "Purpose",
            PromptField::Constraints => "Constraints",
            PromptField::Details => "Details",
        }
    }
}

impl fmt::Display for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptField::Role => write!(f, "role"),
            PromptField::Purpose => write!(f, "purpose"),
            PromptField::Constraints => write!(f, "constraints"),
            PromptField::Details => write!(f, "details"),
        }
    }
}

impl FromStr for PromptField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "role" => Ok(PromptField::Role),
            "purpose" => Ok(PromptField::Purpose),
            "constraints" | "constraint" => Ok(PromptField::Constraints),
            "details" | "detail" => Ok(PromptField::Details),
            other => Err(format!("invalid prompt field: '{other}'")),
        }
    }
}

/// The four structured fields of a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptElements {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub details: String,
}

impl PromptElements {
    /// Read a field by name.
    pub fn field(&self, field: PromptField) -> &str {
        match field {
            PromptField::Role => &self.role,
            PromptField::Purpose => &self.purpose,
            PromptField::Constraints => &self.constraints,
            PromptField::Details => &self.details,
        }
    }

    /// Mutable access to a field by name.
    pub fn field_mut(&mut self, field: PromptField) -> &mut String {
        match field {
            PromptField::Role => &mut self.role,
            PromptField::Purpose => &mut self.purpose,
            PromptField::Constraints => &mut self.constraints,
            PromptField::Details => &mut self.details,
        }
    }

    /// True when every field is blank after trimming.
    pub fn is_blank(&self) -> bool {
        PromptField::ALL
            .iter()
            .all(|f| self.field(*f).trim().is_empty())
    }
}

/// Partial prompt produced by the expand-idea call.
///
/// `None` means the assistant did not provide the field, which is different
/// from providing an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialPromptElements {
    /// The role the AI should take on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The goal the prompt should achieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Output constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    /// Additional details or background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl PartialPromptElements {
    /// The provided value for a field, if any.
    pub fn field(&self, field: PromptField) -> Option<&str> {
        match field {
            PromptField::Role => self.role.as_deref(),
            PromptField::Purpose => self.purpose.as_deref(),
            PromptField::Constraints => self.constraints.as_deref(),
            PromptField::Details => self.details.as_deref(),
        }
    }
}

/// Three candidate values for each of role, purpose and constraints.
///
/// Lives for one idea-processing cycle and is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionSet {
    /// Candidate roles for the AI.
    pub roles: Vec<String>,
    /// Candidate purposes for the prompt.
    pub purposes: Vec<String>,
    /// Candidate output constraints.
    pub constraints: Vec<String>,
}

impl SuggestionSet {
    /// Number of items expected per list.
    pub const ITEMS_PER_LIST: usize = 3;

    /// Candidates that apply to the given field. `Details` has none.
    pub fn for_field(&self, field: PromptField) -> &[String] {
        match field {
            PromptField::Role => &self.roles,
            PromptField::Purpose => &self.purposes,
            PromptField::Constraints => &self.constraints,
            PromptField::Details => &[],
        }
    }
}
