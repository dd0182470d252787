use std::{error, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	Interrupted,
	DivideByZero,
	NegativeSquareRoot,
	LogOfNonPositive,
	InvalidDecimalLiteral,
	NonFiniteFloat,
	DegenerateState,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Interrupted => write!(f, "interrupted"),
			Self::DivideByZero => write!(f, "division by zero"),
			Self::NegativeSquareRoot => {
				write!(f, "square root of a negative number")
			}
			Self::LogOfNonPositive => {
				write!(f, "logarithm of a number that is zero or negative")
			}
			Self::InvalidDecimalLiteral => write!(f, "invalid decimal literal"),
			Self::NonFiniteFloat => {
				write!(f, "cannot convert NaN or infinity to a real number")
			}
			Self::DegenerateState => {
				write!(f, "internal transducer state became degenerate")
			}
		}
	}
}

impl error::Error for Error {}
