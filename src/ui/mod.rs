pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    dim, error, header, highlight, info, no_results, success, summary_row, warn,
};
pub use progress::Spinner;
pub use table::{entries_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
