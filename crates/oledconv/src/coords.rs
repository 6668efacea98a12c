//! Row/column to pixel conversion for the fixed 8x16 character cell.
use std::fmt;

pub const CELL_WIDTH: i64 = 8;
pub const CELL_HEIGHT: i64 = 16;

/// A pixel coordinate: either computed, or left as an expression when the
/// row/column text is not an integer literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coord {
    Pixel(i64),
    Expr(String),
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Pixel(v) => write!(f, "{v}"),
            Coord::Expr(e) => f.write_str(e),
        }
    }
}

fn to_pixel(index: i64, cell: i64) -> Option<i64> {
    index.checked_sub(1)?.checked_mul(cell)
}

/// Convert 1-based `(row, col)` text to `(x, y)`.
///
/// Both become numbers only if both parse; otherwise both are emitted as
/// `(col - 1) * 8` and `(row - 1) * 16` with the original text inside.
///
/// A number is a plain decimal `i64` with an optional sign; digit
/// separators such as `1_0` are not numbers here and take the expression
/// form. A pixel value that overflows `i64` also takes the expression form.
pub fn convert_coordinates(row: &str, col: &str) -> (Coord, Coord) {
    let numeric = match (row.parse::<i64>(), col.parse::<i64>()) {
        (Ok(r), Ok(c)) => to_pixel(c, CELL_WIDTH).zip(to_pixel(r, CELL_HEIGHT)),
        _ => None,
    };
    match numeric {
        Some((x, y)) => (Coord::Pixel(x), Coord::Pixel(y)),
        None => (
            Coord::Expr(format!("({col} - 1) * {CELL_WIDTH}")),
            Coord::Expr(format!("({row} - 1) * {CELL_HEIGHT}")),
        ),
    }
}
