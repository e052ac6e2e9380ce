//! gridcalc-core - UI-agnostic sheet document + storage.

pub mod error;
pub mod sheet;
pub mod storage;

pub use error::{CoreError, Result};
pub use sheet::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TITLE, Sheet, parse_edit};
pub use storage::Format;

pub use gridcalc_engine::engine::{CellRef, DisplayValue, Grid};
