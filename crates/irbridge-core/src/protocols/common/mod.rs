//! Checked fixed-width reads shared by every protocol layer.

pub mod error;
pub mod reader;

pub use error::ReadError;
pub use reader::ByteReader;
