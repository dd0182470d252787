use crate::algebraic::AlgebraicComputation;
use crate::computation::{BoxedComputation, Computation};
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;

// With X = 6y + x²/(10y + x²/(14y + ...)),
// exp(x/y) = ((2y + x)·X + x²) / ((2y − x)·X + x²):
// the series below fed through the wrapper (2y+x, x², 2y−x, x²).

struct ExpSeries {
	m: BigInt,
	increment: BigInt,
	x_squared: BigInt,
}

impl Computation for ExpSeries {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		let term = Term::Gcf(self.m.clone(), self.x_squared.clone());
		self.m += &self.increment;
		Ok(Some(term))
	}
}

pub(crate) fn exp_fraction_computation(f: &BigRational) -> BoxedComputation {
	let x = f.numer();
	let y = f.denom();
	let x_squared = x * x;
	let two_y = BigInt::from(2) * y;
	let series = ExpSeries {
		m: BigInt::from(6) * y,
		increment: BigInt::from(4) * y,
		x_squared: x_squared.clone(),
	};
	Box::new(AlgebraicComputation::new(
		Box::new(series),
		Homographic::new(&two_y + x, x_squared.clone(), &two_y - x, x_squared),
	))
}
