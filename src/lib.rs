//! In-memory, column-oriented tables with type inference, descriptive
//! statistics, row/column selection and feature scaling.

pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod io;
pub mod logging;
pub mod scale;

pub use config::Config;
pub use data::cell_value::CellValue;
pub use data::column::Column;
pub use data::data_provider::DataProvider;
pub use data::datatable::{RowView, Table};
pub use data::type_inference::TypeInference;
pub use error::{Result, TableError};
pub use io::records::Record;
pub use scale::{RangeScaler, Scaler, ZScaler};
