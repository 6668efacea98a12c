//! Caller-side helpers: reading a source block and the built-in example.
use crate::error::{ConvertError, Result};
use std::io::Read;

/// Example block covering all six functions.
pub const EXAMPLE_SOURCE: &str = "// Example code showing various OLED functions
OLED_ShowChar(1, 1, 'A');
OLED_ShowString(1, 1, \"Temperature: \");
OLED_ShowNum(2, 1, 1234, 4);
OLED_ShowSignedNum(3, 1, -567, 3);
OLED_ShowHexNum(4, 1, 0xABCD, 4);
OLED_ShowBinNum(4, 10, 0b1101, 4);";

/// Read a whole source block, trailing whitespace removed.
///
/// Fails with [`ConvertError::EmptyInput`] if nothing but whitespace is read.
pub fn read_source<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    let trimmed_len = buf.trim_end().len();
    if buf.trim_start().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    buf.truncate(trimmed_len);
    Ok(buf)
}
