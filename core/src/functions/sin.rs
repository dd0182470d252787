use crate::algebraic::AlgebraicComputation;
use crate::computation::{BoxedComputation, Computation};
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

// The Lambert-style series for sin(x/y), convergent for |x/y| < π/2:
// sin(x/y) = x/(y + x²y/(2·3·y² − x² + 2·3·x²y²/(4·5·y² − x² + ...))).

struct SinSeries {
	x_squared: BigInt,
	y_squared: BigInt,
	x_squared_y_squared: BigInt,
	x: BigInt,
	y: BigInt,
	n: BigInt,
	stage: u8,
}

impl Computation for SinSeries {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		Ok(Some(match self.stage {
			0 => {
				self.stage = 1;
				Term::Gcf(BigInt::from(0), self.x.clone())
			}
			1 => {
				self.stage = 2;
				Term::Gcf(self.y.clone(), &self.x_squared * &self.y)
			}
			_ => {
				let coefficient = &self.n * (&self.n + BigInt::from(1));
				let a = &coefficient * &self.y_squared - &self.x_squared;
				debug_assert!(a.is_positive());
				let term = Term::Gcf(a, &coefficient * &self.x_squared_y_squared);
				self.n += BigInt::from(2);
				term
			}
		}))
	}
}

pub(crate) fn sin_fraction_computation(f: &BigRational) -> BoxedComputation {
	let x = f.numer().clone();
	let y = f.denom().clone();
	let x_squared = &x * &x;
	let y_squared = &y * &y;
	let series = SinSeries {
		x_squared_y_squared: &x_squared * &y_squared,
		x_squared,
		y_squared,
		x,
		y,
		n: BigInt::from(2),
		stage: 0,
	};
	Box::new(AlgebraicComputation::new(
		Box::new(series),
		Homographic::identity(),
	))
}
