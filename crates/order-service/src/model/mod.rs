//! Orders, their items, and the JSON record contract they share.

pub mod item;
pub mod order;
pub mod record;
pub mod status;

pub use item::*;
pub use order::*;
pub use record::{DataValidationError, Record};
pub use status::*;
