use crate::bihomographic::Bihomographic;
use crate::computation::Computation;
use crate::error::Error;
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::quadratic::QuadraticComputation;
use crate::real::Real;
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Computes sqrt(n) for a positive non-square integer `n` by iterating the
/// fix-point integer of `H(x) = n/x`: each step ingests and emits the same
/// `k`, which is exactly the next simple continued-fraction term. A
/// degenerate fix point ends the stream.
pub(crate) struct SqrtComputation {
	state: Homographic,
}

impl SqrtComputation {
	pub(crate) fn new(n: BigInt) -> Self {
		Self {
			state: Homographic::new(0, n, 1, 0),
		}
	}
}

impl Computation for SqrtComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		test_int(int)?;
		let Some(k) = self.state.fix_point() else {
			return Ok(None);
		};
		self.state.ingest(Term::Simple(k.clone()));
		self.state.emit(Term::Simple(k.clone()));
		Ok(Some(Term::Simple(k)))
	}
}

fn is_perfect_square(n: &BigInt) -> Option<BigInt> {
	let root = n.sqrt();
	if &root * &root == *n {
		Some(root)
	} else {
		None
	}
}

pub fn sqrt_int(n: impl Into<BigInt>) -> RResult<Real> {
	let n = n.into();
	if n.is_negative() {
		return Err(Error::NegativeSquareRoot);
	}
	// Perfect squares would otherwise rely on the degenerate fix point, so
	// resolve them up front.
	if let Some(root) = is_perfect_square(&n) {
		return Ok(Real::from_bigint(root));
	}
	Ok(Real::from_raw(Box::new(SqrtComputation::new(n))))
}

pub fn sqrt_fraction(f: &BigRational) -> RResult<Real> {
	if f.is_negative() {
		return Err(Error::NegativeSquareRoot);
	}
	if f.is_zero() {
		return Ok(Real::from_int(0));
	}
	let p = f.numer().clone();
	let q = f.denom().clone();
	if let (Some(root_p), Some(root_q)) = (is_perfect_square(&p), is_perfect_square(&q)) {
		return Ok(Real::from_ratio(&BigRational::new(root_p, root_q)));
	}
	if q == BigInt::from(1) {
		return sqrt_int(p);
	}
	// sqrt(p)/sqrt(q) through a single bihomographic state.
	Ok(Real::from_raw(Box::new(QuadraticComputation::new(
		Box::new(SqrtComputation::new(p)),
		Box::new(SqrtComputation::new(q)),
		Bihomographic::new(0, 1, 0, 0, 0, 0, 1, 0),
	))))
}
