use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GenerateError;

static MODEL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid model name regex"));

/// Words whose plural is the word itself
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "bison",
    "cattle",
    "chassis",
    "data",
    "deer",
    "education",
    "emoji",
    "equipment",
    "evidence",
    "feedback",
    "firmware",
    "fish",
    "furniture",
    "hardware",
    "information",
    "knowledge",
    "media",
    "metadata",
    "money",
    "moose",
    "news",
    "nutrition",
    "offspring",
    "plankton",
    "police",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "swine",
    "traffic",
];

/// Irregular singular → plural pairs (lowercase)
const IRREGULAR: &[(&str, &str)] = &[
    ("analysis", "analyses"),
    ("cactus", "cacti"),
    ("calf", "calves"),
    ("child", "children"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("index", "indices"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("phenomenon", "phenomena"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("tooth", "teeth"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// Words ending in `o` that take `es`
const O_ES: &[&str] = &["echo", "hero", "potato", "tomato", "veto"];

/// Pluralise an English word or PascalCase identifier
///
/// Only the last word of a compound identifier is inflected, and the casing of
/// that word is preserved.
///
/// # Example
///
/// ```rust
/// use autocrud::model::pluralize;
///
/// assert_eq!(pluralize("Product"), "Products");
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("SalesPerson"), "SalesPeople");
/// ```
pub fn pluralize(word: &str) -> String {
    let split = last_word_start(word);
    let (head, tail) = word.split_at(split);
    format!("{head}{}", pluralize_word(tail))
}

fn last_word_start(word: &str) -> usize {
    word.char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_ascii_uppercase() || *c == '_')
        .map(|(i, c)| if c == '_' { i + 1 } else { i })
        .last()
        .filter(|i| *i < word.len())
        .unwrap_or(0)
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_case(word, plural);
    }

    let bytes = lower.as_bytes();
    let ends_with_consonant_y = lower.ends_with('y')
        && bytes.len() > 1
        && !matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u');

    // quiz -> quizzes, but waltz -> waltzes and buzz -> buzzes
    let ends_with_vowel_z = lower.ends_with('z')
        && bytes.len() > 1
        && matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u');

    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ends_with_vowel_z {
        format!("{word}zes")
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s))
        || O_ES.contains(&lower.as_str())
    {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.len() > 1 && original.chars().all(|c| c.is_ascii_uppercase()) {
        return replacement.to_uppercase();
    }
    match original.chars().next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}

/// Casing of the collection path segment in generated routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    /// `order_items`
    #[default]
    Snake,
    /// `order-items`
    Kebab,
}

/// Validated PascalCase singular model name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

impl ModelName {
    /// Validate and wrap a model name
    pub fn parse(name: &str) -> Result<Self, GenerateError> {
        if MODEL_NAME.is_match(name) {
            Ok(ModelName(name.to_string()))
        } else {
            Err(GenerateError::InvalidModelName {
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Categories` for `Category`
    pub fn plural(&self) -> String {
        pluralize(&self.0)
    }

    /// Backing table name: `order_items` for `OrderItem`
    pub fn table_name(&self) -> String {
        self.plural().to_snake_case()
    }

    /// Collection path segment used in route registration
    pub fn route_path(&self, style: RouteStyle) -> String {
        match style {
            RouteStyle::Snake => self.plural().to_snake_case(),
            RouteStyle::Kebab => self.plural().to_kebab_case(),
        }
    }

    /// Generated variable holding one record: `orderItem`
    pub fn variable(&self) -> String {
        self.0.to_lower_camel_case()
    }

    /// Generated variable holding a page of records: `orderItems`
    pub fn plural_variable(&self) -> String {
        self.plural().to_lower_camel_case()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
