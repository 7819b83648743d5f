//! Entry types - one dictionary row and the language selectors
//!
//! Every entry carries four optional language variants:
//! - `Amharic`: Ge'ez script
//! - `OromLatin`: Afaan Oromo in Latin script (Qubee)
//! - `OromSaba`: Afaan Oromo in Sabaean (Ge'ez) script
//! - `English`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of lookup targets.
///
/// Each selector maps to exactly one storage column and one field accessor,
/// so the query layer never builds column names from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Amharic,
    OromLatin,
    OromSaba,
    English,
}

impl Language {
    /// Canonical selector name, as shown to users and used in the source header
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Amharic => "Amharic",
            Language::OromLatin => "OromLatin",
            Language::OromSaba => "OromSaba",
            Language::English => "English",
        }
    }

    /// Storage column holding this variant
    pub fn column(&self) -> &'static str {
        match self {
            Language::Amharic => "amharic",
            Language::OromLatin => "orom_latin",
            Language::OromSaba => "orom_saba",
            Language::English => "english",
        }
    }

    /// All selectors, in display order
    pub fn all() -> &'static [Language] {
        &[
            Language::Amharic,
            Language::OromLatin,
            Language::OromSaba,
            Language::English,
        ]
    }

    /// Exact selector match: one of the four canonical names, nothing else
    pub fn from_selector(s: &str) -> Option<Self> {
        Language::all().iter().copied().find(|lang| lang.as_str() == s)
    }

    /// Lenient parse (case, whitespace and snake/kebab spellings), `None` if unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amharic" => Ok(Language::Amharic),
            "oromlatin" | "orom_latin" | "orom-latin" => Ok(Language::OromLatin),
            "oromsaba" | "orom_saba" | "orom-saba" => Ok(Language::OromSaba),
            "english" => Ok(Language::English),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Surrogate key, assigned at insertion and never reused
    pub id: i64,
    /// Insertion-order ordinal
    pub serial_number: i64,
    pub amharic: Option<String>,
    pub orom_latin: Option<String>,
    pub orom_saba: Option<String>,
    pub english: Option<String>,
}

impl Entry {
    /// Field accessor for a language selector
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::Amharic => self.amharic.as_deref(),
            Language::OromLatin => self.orom_latin.as_deref(),
            Language::OromSaba => self.orom_saba.as_deref(),
            Language::English => self.english.as_deref(),
        }
    }
}

/// The four text fields of one row read from the population source.
///
/// Blank values are always `None`; construct through [`SourceRow::set`] or
/// [`SourceRow::new`] to keep that normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRow {
    pub amharic: Option<String>,
    pub orom_latin: Option<String>,
    pub orom_saba: Option<String>,
    pub english: Option<String>,
}

impl SourceRow {
    /// Build a row from raw cell values, normalizing blanks to absent
    pub fn new(
        amharic: Option<&str>,
        orom_latin: Option<&str>,
        orom_saba: Option<&str>,
        english: Option<&str>,
    ) -> Self {
        let mut row = Self::default();
        row.set(Language::Amharic, amharic);
        row.set(Language::OromLatin, orom_latin);
        row.set(Language::OromSaba, orom_saba);
        row.set(Language::English, english);
        row
    }

    /// Set one field; empty or whitespace-only values become `None`
    pub fn set(&mut self, language: Language, value: Option<&str>) {
        let value = normalize(value);
        match language {
            Language::Amharic => self.amharic = value,
            Language::OromLatin => self.orom_latin = value,
            Language::OromSaba => self.orom_saba = value,
            Language::English => self.english = value,
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("Amharic".parse::<Language>().unwrap(), Language::Amharic);
        assert_eq!("oromlatin".parse::<Language>().unwrap(), Language::OromLatin);
        assert_eq!("orom_saba".parse::<Language>().unwrap(), Language::OromSaba);
        assert_eq!(" ENGLISH ".parse::<Language>().unwrap(), Language::English);
        assert!("NotALanguage".parse::<Language>().is_err());
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn test_language_from_selector_is_exact() {
        assert_eq!(Language::from_selector("OromLatin"), Some(Language::OromLatin));
        assert_eq!(Language::from_selector("English"), Some(Language::English));
        assert_eq!(Language::from_selector("english"), None);
        assert_eq!(Language::from_selector(" English"), None);
        assert_eq!(Language::from_selector("orom_latin"), None);
        assert_eq!(Language::from_selector(""), None);
    }

    #[test]
    fn test_language_round_trips_through_display() {
        for lang in Language::all() {
            assert_eq!(Language::parse(&lang.to_string()), Some(*lang));
        }
    }

    #[test]
    fn test_source_row_normalizes_blanks() {
        let row = SourceRow::new(Some("ውሃ"), Some(""), Some("   "), None);
        assert_eq!(row.amharic.as_deref(), Some("ውሃ"));
        assert_eq!(row.orom_latin, None);
        assert_eq!(row.orom_saba, None);
        assert_eq!(row.english, None);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry {
            id: 1,
            serial_number: 1,
            amharic: Some("ሰላም".to_string()),
            orom_latin: None,
            orom_saba: None,
            english: Some("hello".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["serialNumber"], 1);
        assert_eq!(json["amharic"], "ሰላም");
        assert!(json["oromLatin"].is_null());
        assert_eq!(entry.get(Language::English), Some("hello"));
    }
}
