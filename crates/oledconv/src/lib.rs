//! oledconv: rewrite OLED driver call sites from row/column addressing to
//! pixel coordinates with a font-size argument, or collapse them into
//! `OLED_Printf`.
//!
//! Recognition is textual and line-oriented: one call per line, terminated by
//! `;`, no lexer and no multi-line calls.

pub mod call;
pub mod convert;
pub mod coords;
mod error;
pub mod function;
mod source;

pub use call::{parse_args, CallSite};
pub use convert::{BlockOutput, ConversionContext, ConversionMode, Converter, FONT_6X8, FONT_8X16};
pub use coords::{convert_coordinates, Coord};
pub use error::{ConvertError, Result};
pub use function::{FunctionDescriptor, FunctionKind, FUNCTIONS};
pub use source::{read_source, EXAMPLE_SOURCE};

/// Convert a block with a default [`Converter`].
pub fn convert_block(text: &str, context: &ConversionContext) -> BlockOutput {
    Converter::new().convert_block(text, context)
}
