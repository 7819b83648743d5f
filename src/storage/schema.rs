//! Database schema definitions

/// SQL to create the entries table
///
/// `AUTOINCREMENT` keeps ids from ever being reused, even after deletes.
pub const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    serial_number INTEGER NOT NULL,
    amharic TEXT,
    orom_latin TEXT,
    orom_saba TEXT,
    english TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_entries_serial ON entries(serial_number)",
    "CREATE INDEX IF NOT EXISTS idx_entries_amharic ON entries(amharic)",
    "CREATE INDEX IF NOT EXISTS idx_entries_orom_latin ON entries(orom_latin)",
    "CREATE INDEX IF NOT EXISTS idx_entries_orom_saba ON entries(orom_saba)",
    "CREATE INDEX IF NOT EXISTS idx_entries_english ON entries(english)",
];

/// Columns selected for every entry read, in `row_to_entry` order
pub const ENTRY_COLUMNS: &str = "id, serial_number, amharic, orom_latin, orom_saba, english";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_ENTRIES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
