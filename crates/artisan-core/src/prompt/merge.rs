//! Text merge rules for prompt fields.

use artisan_types::prompt::{PartialPromptElements, PromptElements, PromptField};

/// Overwrite only the fields the partial result provides.
///
/// Fields absent from `partial` keep their current value, so edits made
/// while the expand call was in flight survive.
pub fn merge_partial(elements: &mut PromptElements, partial: &PartialPromptElements) {
    for field in PromptField::ALL {
        if let Some(value) = partial.field(field) {
            *elements.field_mut(field) = value.to_string();
        }
    }
}

/// Append `item` as a `- ` bullet on a new line; the result is trimmed.
pub fn append_bullet(prev: &str, item: &str) -> String {
    format!("{prev}\n- {item}").trim().to_string()
}

/// Append an accepted ghost suggestion below the existing text.
pub fn append_ghost(prev: &str, ghost: &str) -> String {
    let trimmed = prev.trim();
    if trimmed.is_empty() {
        ghost.to_string()
    } else {
        format!("{trimmed}\n{ghost}")
    }
}
