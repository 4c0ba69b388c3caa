use thiserror::Error;

pub type Result<T> = std::result::Result<T, AirfoilError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AirfoilError {
    #[error("stacked coordinates have a leading axis of length {rows} instead of 2")]
    Shape { rows: usize },

    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("an airfoil needs at least 2 points, got {found}")]
    NotEnoughPoints { found: usize },

    #[error("{0} is not supported")]
    UnsupportedOperation(&'static str),

    #[error("unsupported operand type for {op}: Airfoil and {operand}")]
    TypeMismatch {
        op: &'static str,
        operand: &'static str,
    },

    #[error("'{0}' is not a NACA 4-digit designation")]
    InvalidDesignation(String),

    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("the {surface} surface is not monotonic in x")]
    NonMonotonic { surface: &'static str },

    #[error("the {surface} surface has no points to interpolate from")]
    EmptySurface { surface: &'static str },

    #[error("index {index} is out of bounds for an airfoil of {len} points")]
    IndexOutOfBounds { index: usize, len: usize },
}
