use tabled::{settings::Style, Table, Tabled};

use crate::entry::Entry;
use crate::storage::DictionaryStats;
use crate::Language;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &DictionaryStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Entries", &stats.entries.to_string());
    for language in Language::all() {
        builder.add_row(language.as_str(), &stats.for_language(*language).to_string());
    }
    builder.build()
}

/// One dictionary entry as a table row; absent values render blank
#[derive(Tabled)]
struct EntryRow<'a> {
    #[tabled(rename = "Amharic")]
    amharic: &'a str,
    #[tabled(rename = "OromLatin")]
    orom_latin: &'a str,
    #[tabled(rename = "OromSaba")]
    orom_saba: &'a str,
    #[tabled(rename = "English")]
    english: &'a str,
}

impl<'a> From<&'a Entry> for EntryRow<'a> {
    fn from(entry: &'a Entry) -> Self {
        let cell = move |language: Language| entry.get(language).unwrap_or("");
        Self {
            amharic: cell(Language::Amharic),
            orom_latin: cell(Language::OromLatin),
            orom_saba: cell(Language::OromSaba),
            english: cell(Language::English),
        }
    }
}

pub fn entries_table(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let rows: Vec<EntryRow<'_>> = entries.iter().map(EntryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_table_renders_blank_for_absent() {
        let entries = vec![Entry {
            id: 1,
            serial_number: 1,
            amharic: Some("ሰላም".to_string()),
            orom_latin: None,
            orom_saba: None,
            english: Some("hello".to_string()),
        }];

        let table = entries_table(&entries);
        assert!(table.contains("OromLatin"));
        assert!(table.contains("ሰላም"));
        assert!(table.contains("hello"));
        assert!(entries_table(&[]).is_empty());
    }

    #[test]
    fn test_stats_table() {
        let stats = DictionaryStats {
            entries: 2,
            amharic: 2,
            orom_latin: 1,
            orom_saba: 0,
            english: 2,
        };
        let table = stats_table(&stats);
        assert!(table.contains("Entries"));
        assert!(table.contains("OromSaba"));
    }
}
