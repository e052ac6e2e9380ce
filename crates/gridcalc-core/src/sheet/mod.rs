//! Sheet state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use ops::parse_edit;
pub use state::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TITLE, Sheet};
