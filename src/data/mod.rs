//! Data layer: cells, columns and tables
//!
//! `Table` keeps its cells column by column. Statistics live on `Column`,
//! table operations are split by concern across the modules below.

pub mod cell_value;
pub mod column;
pub mod column_stats;
pub mod data_provider;
pub mod datatable;
pub mod describe;
pub mod numeric;
pub mod selection;
pub mod transform;
pub mod type_inference;
