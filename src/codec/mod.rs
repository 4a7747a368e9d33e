pub mod read;
pub mod write;

pub use read::read_table;
pub use write::write_table;

use crate::error::{Error, Result};

pub const DEFAULT_DELIMITER: char = ',';

/// Convert a delimiter character into the byte the `csv` crate expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    match delimiter {
        '"' | '\n' | '\r' => Err(Error::InvalidDelimiter(delimiter)),
        c if c.is_ascii() => Ok(c as u8),
        c => Err(Error::InvalidDelimiter(c)),
    }
}
