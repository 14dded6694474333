//! Output Module: Where Synthesized Rows Go
//!
//! - **table**: whole-series CSV persistence, one observation per line
//! - **records**: per-value tagged records for line-oriented streaming

mod records;
mod table;

pub use records::{
    row_to_datapoints,
    unix_timestamp,
    DataPoint,
    DataPointSink,
    JsonLinesSink,
    TagSet,
    RAW_DATA_TOPIC,
    TAG_LENGTH,
};
pub use table::{format_value, save_csv, write_csv};
