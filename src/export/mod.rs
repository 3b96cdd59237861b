pub mod csv_export;
pub mod table;

pub use csv_export::{export_to_csv, write_results_csv};
pub use table::render_table;
