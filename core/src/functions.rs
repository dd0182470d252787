use crate::monotonic::MonotonicComputation;
use crate::real::Real;
use crate::result::RResult;
use num_rational::BigRational;

pub(crate) mod exp;
pub(crate) mod log;
pub(crate) mod sin;
pub(crate) mod sqrt;
pub(crate) mod trig;

pub use sqrt::{sqrt_fraction, sqrt_int};
pub use trig::sin_fraction;

/// exp of a rational argument, straight from the generalized series.
pub fn exp_fraction(f: &BigRational) -> Real {
	Real::from_raw(exp::exp_fraction_computation(f))
}

/// Natural logarithm of a rational argument. The argument must be positive.
pub fn ln_fraction(f: &BigRational) -> RResult<Real> {
	Ok(Real::from_raw(log::ln_fraction_computation(f)?))
}

impl Real {
	pub fn exp(&self) -> Self {
		Self::from_raw(Box::new(MonotonicComputation::new(
			self.boxed(),
			Box::new(|f| Ok(exp::exp_fraction_computation(f))),
		)))
	}

	/// Natural logarithm. For arguments that are not positive the stream
	/// diverges (positivity of a real is undecidable); rational entry points
	/// should prefer [`ln_fraction`], which rejects bad arguments up front.
	pub fn ln(&self) -> Self {
		Self::from_raw(Box::new(MonotonicComputation::new(
			self.boxed(),
			Box::new(log::ln_fraction_computation),
		)))
	}

	pub fn sqrt(&self) -> Self {
		// sqrt(x) = exp(ln(x)/2)
		(self.ln() / 2).exp()
	}

	/// Real exponentiation through exp and ln; the base must be positive.
	pub fn pow(&self, exponent: &Self) -> Self {
		(self.ln() * exponent.clone()).exp()
	}

	pub fn sin(&self) -> Self {
		Self::from_raw(Box::new(trig::TrigComputation::new(
			self.clone(),
			trig::TrigFunction::Sin,
		)))
	}

	pub fn cos(&self) -> Self {
		Self::from_raw(Box::new(trig::TrigComputation::new(
			self.clone(),
			trig::TrigFunction::Cos,
		)))
	}

	pub fn tan(&self) -> Self {
		self.sin() / self.cos()
	}

	pub fn cot(&self) -> Self {
		self.cos() / self.sin()
	}

	pub fn sec(&self) -> Self {
		Self::from_int(1) / self.cos()
	}

	pub fn csc(&self) -> Self {
		Self::from_int(1) / self.sin()
	}

	pub fn sinh(&self) -> Self {
		(self.exp() - (-self.clone()).exp()) / 2
	}

	pub fn cosh(&self) -> Self {
		(self.exp() + (-self.clone()).exp()) / 2
	}

	pub fn tanh(&self) -> Self {
		let e2x = (self.clone() * 2).exp();
		(e2x.clone() - 1) / (e2x + 1)
	}

	pub fn coth(&self) -> Self {
		let e2x = (self.clone() * 2).exp();
		(e2x.clone() + 1) / (e2x - 1)
	}

	pub fn sech(&self) -> Self {
		Self::from_int(2) / (self.exp() + (-self.clone()).exp())
	}

	pub fn csch(&self) -> Self {
		Self::from_int(2) / (self.exp() - (-self.clone()).exp())
	}
}
