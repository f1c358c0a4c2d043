//! Filters and frequency tables over an in-memory record list.
//!
//! Every function here is a single pass that borrows its input and returns a
//! new collection; nothing mutates the loaded records.

pub mod code;
pub mod quality;
pub mod tags;
pub mod years;

pub use code::filter_by_code;
pub use quality::{QualityThresholds, filter_by_quality};
pub use tags::{extract_tag_count, rank_tags};
pub use years::frequency_by_year;
