pub mod engine;
pub mod options;

pub use engine::{filter_records, filter_records_now, window_cutoff, CompiledFilter};
pub use options::{filter_options, FilterOptions};
