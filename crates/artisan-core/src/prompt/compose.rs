//! Composed prompt derivation.
//!
//! The composed prompt is a pure function of the prompt elements and is
//! recomputed on every read. It is never parsed back into fields.

use artisan_types::prompt::{PromptElements, PromptField};

/// Build the composed prompt text.
///
/// Each non-blank field becomes a `## <Label>` section holding the raw field
/// value; sections appear in role/purpose/constraints/details order and are
/// separated by a blank line. Blank fields are omitted entirely.
pub fn compose_prompt(elements: &PromptElements) -> String {
    PromptField::ALL
        .iter()
        .filter_map(|field| {
            let value = elements.field(*field);
            if value.trim().is_empty() {
                None
            } else {
                Some(format!("## {}\n{}", field.label(), value))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
