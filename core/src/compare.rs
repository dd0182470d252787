use crate::approximation::Approximation;
use crate::interrupt::{test_int, Interrupt};
use crate::real::Real;
use crate::result::RResult;
use num_rational::BigRational;

/// Result of a bracketed comparison. Equality of two reals is undecidable,
/// so once both brackets have shrunk below epsilon without separating the
/// answer is `Unknown`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComparisonResult {
	Smaller,
	Greater,
	Unknown,
}

pub(crate) fn default_epsilon() -> BigRational {
	BigRational::new(1.into(), 100_000.into())
}

/// Shrink brackets around both arguments until they separate or both are
/// tighter than `epsilon/2`.
pub fn compare(
	x: &Real,
	y: &Real,
	epsilon: &BigRational,
	int: &dyn Interrupt,
) -> RResult<ComparisonResult> {
	let mut x_approximation = Approximation::new(x);
	x_approximation.improve(1, int)?;
	let mut y_approximation = Approximation::new(y);
	y_approximation.improve(1, int)?;

	let half = epsilon / BigRational::from_integer(2.into());
	loop {
		test_int(int)?;

		if let (Some(x_upper), Some(y_lower)) =
			(x_approximation.upper_bound(), y_approximation.lower_bound())
		{
			if x_upper < y_lower {
				return Ok(ComparisonResult::Smaller);
			}
		}
		if let (Some(x_lower), Some(y_upper)) =
			(x_approximation.lower_bound(), y_approximation.upper_bound())
		{
			if y_upper < x_lower {
				return Ok(ComparisonResult::Greater);
			}
		}

		let x_eps = x_approximation.epsilon_fraction();
		let y_eps = y_approximation.epsilon_fraction();

		match &x_eps {
			Some(eps) if *eps <= half => {}
			_ => x_approximation.improve(1, int)?,
		}
		match &y_eps {
			Some(eps) if *eps <= half => {}
			_ => y_approximation.improve(1, int)?,
		}

		if let (Some(x_eps), Some(y_eps)) = (x_eps, y_eps) {
			if x_eps <= half && y_eps <= half {
				break;
			}
		}
	}

	Ok(ComparisonResult::Unknown)
}
