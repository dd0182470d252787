use num_bigint::BigInt;
use num_traits::One;
use std::fmt;

/// One layer of a generalized continued fraction. A term at position `i` of a
/// stream contributes the layer `n + m/(…)`. The first term of a stream is
/// the integer part and may be negative; later simple terms satisfy `n >= 1`.
#[derive(Clone, PartialEq, Eq)]
pub enum Term {
	/// A simple continued-fraction term (numerator 1).
	Simple(BigInt),
	/// A generalized term `(n, m)` with `m >= 1`.
	Gcf(BigInt, BigInt),
}

impl Term {
	pub(crate) fn into_parts(self) -> (BigInt, BigInt) {
		match self {
			Self::Simple(n) => (n, BigInt::one()),
			Self::Gcf(n, m) => (n, m),
		}
	}
}

impl fmt::Debug for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Simple(n) => write!(f, "{n}"),
			Self::Gcf(n, m) => write!(f, "({n}, {m})"),
		}
	}
}

impl From<i64> for Term {
	fn from(n: i64) -> Self {
		Self::Simple(n.into())
	}
}

impl From<BigInt> for Term {
	fn from(n: BigInt) -> Self {
		Self::Simple(n)
	}
}

impl From<(i64, i64)> for Term {
	fn from((n, m): (i64, i64)) -> Self {
		Self::Gcf(n.into(), m.into())
	}
}

impl From<(BigInt, BigInt)> for Term {
	fn from((n, m): (BigInt, BigInt)) -> Self {
		Self::Gcf(n, m)
	}
}
