use crate::algebraic::AlgebraicComputation;
use crate::computation::{Computation, TermIter};
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::real::Real;
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;

/// Patience used when renormalizing a generalized constant stream into a
/// simple one; constants are consumed often enough to warrant trying hard
/// for simple terms.
const NORMALIZE_MAX_INGESTIONS: usize = 100;

// e = [2; 1, 2, 1, 1, 4, 1, 1, 6, 1, 1, 8, ...]
struct ETerms {
	k: BigInt,
	stage: u8,
}

impl Computation for ETerms {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		Ok(Some(match self.stage {
			0 => {
				self.stage = 1;
				Term::Simple(BigInt::from(2))
			}
			1 => {
				self.stage = 2;
				Term::Simple(BigInt::from(1))
			}
			2 => {
				self.stage = 3;
				Term::Simple(self.k.clone())
			}
			_ => {
				self.stage = 1;
				self.k += BigInt::from(2);
				Term::Simple(BigInt::from(1))
			}
		}))
	}
}

pub fn e() -> Real {
	Real::from_raw(Box::new(ETerms {
		k: BigInt::from(2),
		stage: 0,
	}))
}

// pi = 0 + 4/(1 + 1²/(3 + 2²/(5 + 3²/(7 + ...))))
struct PiTerms {
	m: BigInt,
	n: BigInt,
	first: bool,
}

impl Computation for PiTerms {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		if self.first {
			self.first = false;
			return Ok(Some(Term::Gcf(BigInt::from(0), BigInt::from(4))));
		}
		let term = Term::Gcf(self.m.clone(), self.n.clone());
		self.m += BigInt::from(2);
		self.n += &self.m;
		Ok(Some(term))
	}
}

pub fn pi() -> Real {
	let raw = PiTerms {
		m: BigInt::from(1),
		n: BigInt::from(1),
		first: true,
	};
	// The raw stream is generalized; renormalize so consumers see the
	// ordinary continued fraction of pi.
	Real::from_raw(Box::new(AlgebraicComputation::with_max_ingestions(
		Box::new(raw),
		Homographic::identity(),
		NORMALIZE_MAX_INGESTIONS,
	)))
}

// The golden ratio is the simplest of all continued fractions.
pub fn phi() -> Real {
	Real::from_raw(Box::new(TermIter::new(std::iter::repeat_with(|| {
		Term::Simple(BigInt::from(1))
	}))))
}

// ln(2) = 0 + 1/(1 + 1/(2 + 1/(3 + 4/(2 + 4/(5 + 9/(2 + ...))))))
struct Log2Terms {
	m: BigInt,
	n: BigInt,
	stage: u8,
}

impl Computation for Log2Terms {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		Ok(Some(match self.stage {
			0 => {
				self.stage = 1;
				Term::Gcf(BigInt::from(0), BigInt::from(1))
			}
			1 => {
				self.stage = 2;
				Term::Gcf(self.m.clone(), self.n.clone())
			}
			_ => {
				let term = Term::Gcf(BigInt::from(2), self.n.clone());
				self.m += BigInt::from(2);
				self.n += BigInt::from(1);
				self.stage = 1;
				term
			}
		}))
	}
}

pub fn ln_2() -> Real {
	Real::from_raw(Box::new(Log2Terms {
		m: BigInt::from(1),
		n: BigInt::from(1),
		stage: 0,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn e_to_ten_digits() {
		assert_eq!(e().evaluate(10, false).unwrap(), "2.7182818284");
	}

	#[test]
	fn pi_to_ten_digits() {
		assert_eq!(pi().evaluate(10, false).unwrap(), "3.1415926535");
	}

	#[test]
	fn phi_to_ten_digits() {
		assert_eq!(phi().evaluate(10, false).unwrap(), "1.6180339887");
	}

	#[test]
	fn ln_2_to_ten_digits() {
		assert_eq!(ln_2().evaluate(10, false).unwrap(), "0.6931471805");
	}

	#[test]
	fn pi_term_prefix() {
		let mut c = pi().compute();
		let mut terms = Vec::new();
		for _ in 0..5 {
			terms.push(c.next_term(&crate::interrupt::Never).unwrap().unwrap());
		}
		assert_eq!(terms, [3i64, 7, 15, 1, 292].map(Term::from).to_vec());
	}
}
