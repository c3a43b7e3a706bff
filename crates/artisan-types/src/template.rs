//! Prompt template types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prompt::PromptElements;

/// Template catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Business,
    Creative,
    Learning,
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateCategory::Business => write!(f, "business"),
            TemplateCategory::Creative => write!(f, "creative"),
            TemplateCategory::Learning => write!(f, "learning"),
        }
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "business" => Ok(TemplateCategory::Business),
            "creative" => Ok(TemplateCategory::Creative),
            "learning" => Ok(TemplateCategory::Learning),
            other => Err(format!("invalid template category: '{other}'")),
        }
    }
}

/// A ready-made prompt a workspace can start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: u32,
    pub title: String,
    /// Also used as the workspace idea when the template is opened.
    pub description: String,
    pub category: TemplateCategory,
    pub prompt: PromptElements,
}
