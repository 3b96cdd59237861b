pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod logging;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod transliterate;
pub mod util;

pub use matching::{
    SearchOptions, build_query, explain, phonetic_key, prepare, prepare_with_key_len, score,
    search, search_partitions,
};
pub use models::{MatchReason, MatchResult, PreparedRecord, PreparedRecords, RawRecord};
pub use normalize::normalize;
pub use transliterate::{to_latin, to_native_script};
