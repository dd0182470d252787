use crate::algebraic::AlgebraicComputation;
use crate::computation::{BoxedComputation, Computation};
use crate::error::Error;
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

// ln(x/y) = r/(y + r/(2 + r/(3y + 2r/(2 + 2r/(5y + 3r/(2 + ...)))))) with
// r = x − y; the wrapper only renormalizes the generalized terms.

struct LogSeries {
	r: BigInt,
	m: BigInt,
	n: BigInt,
	increment: BigInt,
	stage: u8,
}

impl Computation for LogSeries {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		Ok(Some(match self.stage {
			0 => {
				self.stage = 1;
				Term::Gcf(BigInt::from(0), self.r.clone())
			}
			1 => {
				self.stage = 2;
				Term::Gcf(self.n.clone(), self.m.clone())
			}
			_ => {
				let term = Term::Gcf(BigInt::from(2), self.m.clone());
				self.m += &self.r;
				self.n += &self.increment;
				self.stage = 1;
				term
			}
		}))
	}
}

pub(crate) fn ln_fraction_computation(f: &BigRational) -> RResult<BoxedComputation> {
	if !f.is_positive() {
		return Err(Error::LogOfNonPositive);
	}
	let x = f.numer();
	let y = f.denom();
	let r = x - y;
	let series = LogSeries {
		r: r.clone(),
		m: r,
		n: y.clone(),
		increment: BigInt::from(2) * y,
		stage: 0,
	};
	Ok(Box::new(AlgebraicComputation::new(
		Box::new(series),
		Homographic::identity(),
	)))
}
