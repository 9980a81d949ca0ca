//! # Item Formatter
//!
//! Turns an [`Item`] into the text shown when the user opens it.
//!
//! ```text
//! {"balise": "div", "attributs": ["id"], "définition": "Container"}
//!
//! title:   div
//! body:    Attributes: id\n
//!          \nDefinition: Container
//! example: None
//! ```
//!
//! The first declared field names the item and becomes the title. The
//! definition always closes the body. The example never appears in it.

use crate::core::catalog::{FieldRole, FieldValue, Item};

/// Fallback fields consulted, in order, when the first field has no usable name.
const NAME_FALLBACKS: [FieldRole; 3] = [FieldRole::Name, FieldRole::Attribute, FieldRole::Event];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub title: Option<String>,
    pub body: String,
    pub example: Option<String>,
}

pub fn format(item: &Item) -> Formatted {
    let mut body = String::new();
    let mut fields = item.fields.iter();
    let title = fields.next().map(|f| f.value.render());

    for field in fields {
        match (field.role, &field.value) {
            (FieldRole::Definition | FieldRole::Example, _) => {}
            (FieldRole::Attributes, FieldValue::List(values)) => {
                body.push_str(&format!("Attributes: {}\n", values.join(", ")));
            }
            (FieldRole::Syntax, value) => {
                body.push_str(&format!("Syntax:\n{}\n", value.render()));
            }
            (_, value) => {
                body.push_str(&format!("{}: {}\n", capitalize(&field.name), value.render()));
            }
        }
    }

    // A definition in first position is both the title and the closing line.
    if let Some(definition) = item.field(FieldRole::Definition) {
        body.push_str(&format!("\nDefinition: {}", definition.value.render()));
    }

    Formatted {
        title,
        body,
        example: item.field(FieldRole::Example).map(|f| f.value.render()),
    }
}

/// Name used in numbered item menus.
pub fn display_name(item: &Item) -> Option<String> {
    item.fields
        .first()
        .filter(|f| !f.value.is_blank())
        .or_else(|| {
            NAME_FALLBACKS
                .iter()
                .filter_map(|role| item.field(*role))
                .find(|f| !f.value.is_blank())
        })
        .map(|f| f.value.render())
}

/// Lowercased haystack for substring search. Excludes the example.
pub fn search_text(item: &Item) -> String {
    item.fields
        .iter()
        .filter(|f| f.role != FieldRole::Example)
        .map(|f| f.value.render().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
