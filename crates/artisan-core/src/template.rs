//! Built-in prompt template catalog.

use artisan_types::prompt::PromptElements;
use artisan_types::template::{PromptTemplate, TemplateCategory};

fn template(
    id: u32,
    title: &str,
    description: &str,
    category: TemplateCategory,
    prompt: [&str; 4],
) -> PromptTemplate {
    let [role, purpose, constraints, details] = prompt;
    PromptTemplate {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category,
        prompt: PromptElements {
            role: role.to_string(),
            purpose: purpose.to_string(),
            constraints: constraints.to_string(),
            details: details.to_string(),
        },
    }
}

/// The templates shipped with the application, in catalog order.
pub fn builtin_templates() -> Vec<PromptTemplate> {
    vec![
        template(
            1,
            "Marketing copy",
            "Write punchy launch copy for a new product",
            TemplateCategory::Business,
            [
                "You are a senior copywriter at a consumer tech brand.",
                "Write launch copy that makes the product's main benefit obvious in one read.",
                "- Under 120 words\n- No superlatives without evidence\n- End with a call to action",
                "- Product: <name>\n- Audience: <who>",
            ],
        ),
        template(
            2,
            "Meeting summary",
            "Turn raw meeting notes into a decision log",
            TemplateCategory::Business,
            [
                "You are an executive assistant who writes crisp minutes.",
                "Summarize the notes into decisions, owners and deadlines.",
                "- Bullet points only\n- Flag anything without an owner",
                "",
            ],
        ),
        template(
            3,
            "Short story",
            "Draft a short story from a single premise",
            TemplateCategory::Creative,
            [
                "You are an award-winning short fiction author.",
                "Write a complete short story built around the premise below.",
                "- 800 to 1200 words\n- Third person past tense",
                "- Premise: <premise>",
            ],
        ),
        template(
            4,
            "Image generation",
            "Describe a scene for an image model",
            TemplateCategory::Creative,
            [
                "You are a concept artist briefing an image model.",
                "Describe a single scene precisely enough to render.",
                "- One paragraph\n- Name the art style and lighting",
                "",
            ],
        ),
        template(
            5,
            "Concept explainer",
            "Explain a difficult concept to a beginner",
            TemplateCategory::Learning,
            [
                "You are a patient tutor.",
                "Explain the concept so a motivated beginner can restate it.",
                "- Start from an everyday analogy\n- Avoid unexplained jargon",
                "- Concept: <topic>",
            ],
        ),
        template(
            6,
            "Quiz builder",
            "Generate a practice quiz on a topic",
            TemplateCategory::Learning,
            [
                "You are an instructional designer.",
                "Write a practice quiz that checks understanding rather than recall.",
                "- 5 questions\n- Include an answer key with one-line explanations",
                "",
            ],
        ),
    ]
}

/// Built-in templates, optionally restricted to one category.
pub fn templates_in(category: Option<TemplateCategory>) -> Vec<PromptTemplate> {
    builtin_templates()
        .into_iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .collect()
}

pub fn find_template(id: u32) -> Option<PromptTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
