//! # Catalog Store
//!
//! The technology → category → item reference data, frozen after load.
//!
//! ```text
//! Catalog
//! └── technologies: Vec<Technology>      // configured order
//!     ├── name: String                   // "HTML5"
//!     └── categories: Vec<Category>      // document order
//!         ├── name: String               // "Balises"
//!         └── items: Vec<Item>           // document order
//!             └── fields: Vec<Field>     // declared order
//! ```
//!
//! JSON objects are read through an ordered map visitor, so declared field
//! order survives deserialization without relying on the map type serde_json
//! was compiled with.

use std::fmt;
use std::marker::PhantomData;

use log::{debug, info};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Field Roles
// ============================================================================

/// Semantic role of a field, resolved from its name.
///
/// Catalog documents are French (`définition`, `syntaxe`); English names are
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Definition,
    Syntax,
    Attributes,
    Example,
    Name,
    Attribute,
    Event,
    Other,
}

impl FieldRole {
    pub fn of(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "definition" | "définition" => FieldRole::Definition,
            "syntax" | "syntaxe" => FieldRole::Syntax,
            "attributes" | "attributs" => FieldRole::Attributes,
            "example" | "exemple" => FieldRole::Example,
            "name" | "nom" => FieldRole::Name,
            "attribute" | "attribut" => FieldRole::Attribute,
            "event" | "évènement" | "événement" | "evenement" => FieldRole::Event,
            _ => FieldRole::Other,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Rendered verbatim as a code block (the `syntax` field).
    Code(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Best-effort coercion of an arbitrary JSON value.
    fn from_json(role: FieldRole, value: Value) -> Self {
        match value {
            Value::Array(values) => FieldValue::List(values.into_iter().map(scalar_text).collect()),
            other if role == FieldRole::Syntax => FieldValue::Code(scalar_text(other)),
            other => FieldValue::Text(scalar_text(other)),
        }
    }

    /// Flat text form. Lists are joined with `", "`.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Code(s) => s.clone(),
            FieldValue::List(values) => values.join(", "),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Code(s) => s.trim().is_empty(),
            FieldValue::List(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub role: FieldRole,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        let name = name.into();
        Self {
            role: FieldRole::of(&name),
            name,
            value,
        }
    }
}

/// One reference entry: fields in the order the document declared them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub fields: Vec<Field>,
}

impl Item {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// First field with the given role.
    pub fn field(&self, role: FieldRole) -> Option<&Field> {
        self.fields.iter().find(|f| f.role == role)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = deserializer.deserialize_map(OrderedVisitor::<Value>::new("an item object"))?;
        let fields = pairs
            .into_iter()
            .map(|(name, value)| {
                let role = FieldRole::of(&name);
                Field {
                    value: FieldValue::from_json(role, value),
                    role,
                    name,
                }
            })
            .collect();
        Ok(Item { fields })
    }
}

// ============================================================================
// Ordered Map Visitor
// ============================================================================

/// Collects a JSON object into `(key, value)` pairs, keeping document order.
struct OrderedVisitor<V> {
    expecting: &'static str,
    marker: PhantomData<V>,
}

impl<V> OrderedVisitor<V> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}

/// Item arrays, rejecting anything that is not a list of objects.
struct ItemList(Vec<Item>);

impl<'de> Deserialize<'de> for ItemList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemsVisitor;

        impl<'de> Visitor<'de> for ItemsVisitor {
            type Value = ItemList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of item objects")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<Item>()? {
                    items.push(item);
                }
                Ok(ItemList(items))
            }
        }

        deserializer.deserialize_seq(ItemsVisitor)
    }
}

/// `{category: [item, ...]}`, one technology's document.
struct CategoryDocument(Vec<Category>);

impl<'de> Deserialize<'de> for CategoryDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = deserializer
            .deserialize_map(OrderedVisitor::<ItemList>::new("a map of category names to item arrays"))?;
        Ok(CategoryDocument(
            pairs
                .into_iter()
                .map(|(name, ItemList(items))| Category { name, items })
                .collect(),
        ))
    }
}

/// `{technology: {category: [item, ...]}}`, the single-file layout.
struct BundleDocument(Vec<Technology>);

impl<'de> Deserialize<'de> for BundleDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = deserializer
            .deserialize_map(OrderedVisitor::<CategoryDocument>::new("a map of technology names"))?;
        Ok(BundleDocument(
            pairs
                .into_iter()
                .map(|(name, CategoryDocument(categories))| Technology { name, categories })
                .collect(),
        ))
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technology {
    pub name: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    technologies: Vec<Technology>,
}

/// Why the catalog could not be assembled. Fatal for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Source could not be read (I/O failure, HTTP error status, transport error).
    Unreachable { source: String, reason: String },
    /// Source was read but is not a valid catalog document.
    Parse { source: String, reason: String },
    /// Loading succeeded but there is nothing to offer.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unreachable { source, reason } => {
                write!(f, "catalog source {source} unreachable: {reason}")
            }
            LoadError::Parse { source, reason } => {
                write!(f, "catalog source {source} is not a valid document: {reason}")
            }
            LoadError::Empty => write!(f, "catalog contains no technologies"),
        }
    }
}

impl std::error::Error for LoadError {}

impl Catalog {
    pub fn new(technologies: Vec<Technology>) -> Self {
        Self { technologies }
    }

    /// Assemble a catalog from one document per technology, keeping the
    /// order of `documents`. Each entry is `(technology name, raw JSON)`.
    pub fn from_documents(documents: Vec<(String, String)>) -> Result<Self, LoadError> {
        let mut technologies = Vec::with_capacity(documents.len());
        for (name, raw) in documents {
            let CategoryDocument(categories) =
                serde_json::from_str(&raw).map_err(|e| LoadError::Parse {
                    source: name.clone(),
                    reason: e.to_string(),
                })?;
            debug!("Parsed {} ({} categories)", name, categories.len());
            technologies.push(Technology { name, categories });
        }
        Self::checked(technologies)
    }

    /// Parse a single `{technology: {category: [item]}}` document.
    pub fn from_bundle(source: &str, raw: &str) -> Result<Self, LoadError> {
        let BundleDocument(technologies) =
            serde_json::from_str(raw).map_err(|e| LoadError::Parse {
                source: source.to_string(),
                reason: e.to_string(),
            })?;
        Self::checked(technologies)
    }

    fn checked(technologies: Vec<Technology>) -> Result<Self, LoadError> {
        if technologies.is_empty() {
            return Err(LoadError::Empty);
        }
        let catalog = Self { technologies };
        info!(
            "Catalog ready: {} technologies, {} items",
            catalog.technology_count(),
            catalog.item_count()
        );
        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }

    pub fn technology_count(&self) -> usize {
        self.technologies.len()
    }

    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    pub fn technology(&self, index: usize) -> Option<&Technology> {
        self.technologies.get(index)
    }

    pub fn category(&self, tech: usize, category: usize) -> Option<&Category> {
        self.technology(tech)?.categories.get(category)
    }

    pub fn item(&self, tech: usize, category: usize, item: usize) -> Option<&Item> {
        self.category(tech, category)?.items.get(item)
    }

    pub fn item_count(&self) -> usize {
        self.technologies
            .iter()
            .flat_map(|t| &t.categories)
            .map(|c| c.items.len())
            .sum()
    }
}
