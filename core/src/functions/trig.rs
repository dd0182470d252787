use crate::approximation::Approximation;
use crate::computation::{BoxedComputation, Computation};
use crate::constants;
use crate::error::Error;
use crate::functions::sin::sin_fraction_computation;
use crate::interrupt::Interrupt;
use crate::monotonic::MonotonicComputation;
use crate::real::Real;
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

fn reduction_epsilon() -> BigRational {
	BigRational::new(1.into(), 1000.into())
}

fn one_half() -> BigRational {
	BigRational::new(1.into(), 2.into())
}

/// sin on (−π/2, π/2), where the series converges, lifted to a real
/// argument through the monotone-bracket driver.
fn sin_inner(x: &Real) -> Real {
	Real::from_raw(Box::new(MonotonicComputation::new(
		x.boxed(),
		Box::new(|f| Ok(sin_fraction_computation(f))),
	)))
}

/// cos on (−π/2, π/2) via cos(x) = 1 − 2·sin²(x/2); halving the angle keeps
/// the driver's argument inside a window where sin is monotone.
fn cos_inner(x: &Real) -> Real {
	let s = sin_inner(&(x.clone() / 2));
	Real::from_int(1) - (s.clone() * s) * 2
}

/// Floor of `x`, decided from a bracket of width 1/1000. Only used on
/// arguments that stay clear of integers by more than that.
fn coarse_floor(x: &Real, int: &dyn Interrupt) -> RResult<BigInt> {
	let mut a = Approximation::new(x);
	a.improve_epsilon(&reduction_epsilon(), int)?;
	let fraction = a.as_fraction().ok_or(Error::DegenerateState)?;
	Ok(fraction.floor().to_integer())
}

/// Subtract the nearest multiple of 2π, leaving `|x_r| <= π` up to the
/// reduction tolerance.
fn reduce(x: &Real, int: &dyn Interrupt) -> RResult<Real> {
	let two_pi = constants::pi() * 2;
	let k = coarse_floor(&(x.clone() / two_pi.clone() + one_half()), int)?;
	if k == BigInt::from(0) {
		return Ok(x.clone());
	}
	Ok(x.clone() - two_pi * Real::from_bigint(k))
}

/// Octant selector `⌊2·x_r/π + 1/2⌋ ∈ {−2, …, 2}`.
fn octant(reduced: &Real, int: &dyn Interrupt) -> RResult<i64> {
	let selector = reduced.clone() * 2 / constants::pi() + one_half();
	let m = coarse_floor(&selector, int)?;
	m.to_i64().ok_or(Error::DegenerateState)
}

fn sin_real(x: &Real, int: &dyn Interrupt) -> RResult<Real> {
	let reduced = reduce(x, int)?;
	let m = octant(&reduced, int)?;
	let pi = constants::pi;
	Ok(match m {
		-2 => -sin_inner(&(pi() + reduced)),
		-1 => -cos_inner(&(reduced + pi() / 2)),
		0 => sin_inner(&reduced),
		1 => cos_inner(&(reduced - pi() / 2)),
		2 => sin_inner(&(pi() - reduced)),
		_ => unreachable!("octant selector out of range"),
	})
}

fn cos_real(x: &Real, int: &dyn Interrupt) -> RResult<Real> {
	let reduced = reduce(x, int)?;
	let m = octant(&reduced, int)?;
	let pi = constants::pi;
	Ok(match m {
		-2 => -cos_inner(&(reduced + pi())),
		-1 => sin_inner(&(pi() / 2 + reduced)),
		0 => cos_inner(&reduced),
		1 => sin_inner(&(pi() / 2 - reduced)),
		2 => -cos_inner(&(reduced - pi())),
		_ => unreachable!("octant selector out of range"),
	})
}

#[derive(Copy, Clone)]
pub(crate) enum TrigFunction {
	Sin,
	Cos,
}

/// Defers the argument reduction and octant dispatch to the first pull, so
/// constructing a sine or cosine is O(1) like every other operation and the
/// reduction's bracket narrowing runs under the consumer's interrupt.
pub(crate) struct TrigComputation {
	argument: Real,
	function: TrigFunction,
	inner: Option<BoxedComputation>,
}

impl TrigComputation {
	pub(crate) fn new(argument: Real, function: TrigFunction) -> Self {
		Self {
			argument,
			function,
			inner: None,
		}
	}
}

impl Computation for TrigComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		if let Some(inner) = self.inner.as_mut() {
			return inner.next_term(int);
		}
		let resolved = match self.function {
			TrigFunction::Sin => sin_real(&self.argument, int)?,
			TrigFunction::Cos => cos_real(&self.argument, int)?,
		};
		self.inner.insert(resolved.boxed()).next_term(int)
	}
}

/// sin of a rational argument: the series is used directly whenever the
/// argument is safely inside its convergence window.
pub fn sin_fraction(f: &BigRational) -> Real {
	if f.numer().magnitude() < f.denom().magnitude() {
		return Real::from_raw(sin_fraction_computation(f));
	}
	Real::from_raw(Box::new(TrigComputation::new(
		Real::from_ratio(f),
		TrigFunction::Sin,
	)))
}
