#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod fields;
pub mod varint;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use fields::{Field, FieldValue, WireType};
