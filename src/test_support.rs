//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::catalog::Catalog;
use crate::core::navigation::{InputStyle, Session};
use crate::core::state::App;

/// One technology, one category, one item.
pub fn html_catalog() -> Catalog {
    Catalog::from_bundle(
        "test",
        r#"{"HTML5": {"Tags": [{"balise": "div", "définition": "Generic container"}]}}"#,
    )
    .unwrap()
}

/// The five default technologies with a little content in each.
pub fn five_tech_catalog() -> Catalog {
    Catalog::from_bundle(
        "test",
        r#"{
            "HTML5": {
                "Balises": [
                    {"balise": "div", "définition": "Generic container"},
                    {"balise": "a", "attributs": ["href", "target"], "définition": "Hyperlink"}
                ]
            },
            "CSS3": {
                "Propriétés": [{"propriété": "color", "syntaxe": "color: red;", "définition": "Text color"}]
            },
            "JavaScript": {
                "Fonctions": [
                    {"fonction": "map", "définition": "Transforms each element", "exemple": "[1, 2].map(x => x * 2)"},
                    {"fonction": "filter", "définition": "Keeps matching values"}
                ],
                "Évènements": [{"évènement": "click", "définition": "Pointer pressed and released"}]
            },
            "PHP": {
                "Fonctions": [{"fonction": "strlen", "définition": "String length"}]
            },
            "SQL": {
                "Requêtes": [{"commande": "SELECT", "définition": "Reads rows"}]
            }
        }"#,
    )
    .unwrap()
}

/// An App whose catalog has already loaded.
pub fn loaded_app() -> App {
    let mut app = App::new(InputStyle::Menu);
    app.attach(Session::new(five_tech_catalog(), InputStyle::Menu));
    app
}
