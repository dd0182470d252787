use crate::computation::{BoxedComputation, Computation};
use crate::error::Error;
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::real::Real;
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

/// Maintains a shrinking rational bracket around a real by ingesting its
/// terms into an identity-seeded homographic state. Consecutive convergents
/// enclose the value on alternating sides, so which corner of the state is
/// the lower bound depends on the ingestion parity.
pub struct Approximation {
	state: Homographic,
	ingestions: usize,
	computation: BoxedComputation,
	terminated: bool,
}

impl Approximation {
	pub fn new(x: &Real) -> Self {
		Self::from_computation(x.boxed())
	}

	pub(crate) fn from_computation(computation: BoxedComputation) -> Self {
		Self {
			state: Homographic::identity(),
			ingestions: 0,
			computation,
			terminated: false,
		}
	}

	pub(crate) fn is_terminated(&self) -> bool {
		self.terminated
	}

	/// Ingest up to `n` further terms.
	pub fn improve(&mut self, n: usize, int: &dyn Interrupt) -> RResult<()> {
		for _ in 0..n {
			if self.terminated {
				break;
			}
			self.ingestions += 1;
			match self.computation.next_term(int)? {
				Some(term) => self.state.ingest(term),
				None => {
					self.state.ingest_inf();
					self.terminated = true;
				}
			}
		}
		Ok(())
	}

	/// Ingest until the bracket width is at most `epsilon`.
	pub fn improve_epsilon(&mut self, epsilon: &BigRational, int: &dyn Interrupt) -> RResult<()> {
		loop {
			test_int(int)?;
			if self.terminated {
				break;
			}
			match self.epsilon_fraction() {
				Some(eps) if eps <= *epsilon => break,
				_ => self.improve(1, int)?,
			}
		}
		Ok(())
	}

	fn lower_parts(&self) -> (BigInt, BigInt) {
		if self.ingestions % 2 == 1 {
			(self.state.a.clone(), self.state.c.clone())
		} else {
			(&self.state.a + &self.state.b, &self.state.c + &self.state.d)
		}
	}

	fn upper_parts(&self) -> (BigInt, BigInt) {
		if self.ingestions % 2 == 1 {
			(&self.state.a + &self.state.b, &self.state.c + &self.state.d)
		} else {
			(self.state.a.clone(), self.state.c.clone())
		}
	}

	pub fn lower_bound(&self) -> Option<BigRational> {
		if self.ingestions == 0 {
			return None;
		}
		let (p, q) = self.lower_parts();
		if q.is_zero() {
			None
		} else {
			Some(BigRational::new(p, q))
		}
	}

	pub fn upper_bound(&self) -> Option<BigRational> {
		let (p, q) = self.upper_parts();
		if q.is_zero() {
			None
		} else {
			Some(BigRational::new(p, q))
		}
	}

	pub fn lower_bound_f64(&self) -> Option<f64> {
		self.lower_bound().as_ref().and_then(BigRational::to_f64)
	}

	pub fn upper_bound_f64(&self) -> Option<f64> {
		self.upper_bound().as_ref().and_then(BigRational::to_f64)
	}

	pub fn interval(&self) -> (Option<BigRational>, Option<BigRational>) {
		(self.lower_bound(), self.upper_bound())
	}

	/// Width of the current bracket, when both bounds exist.
	pub fn epsilon_fraction(&self) -> Option<BigRational> {
		let lower = self.lower_bound()?;
		let upper = self.upper_bound()?;
		Some(upper - lower)
	}

	/// The latest convergent `a/c`.
	pub fn as_fraction(&self) -> Option<BigRational> {
		if self.state.c.is_zero() {
			None
		} else {
			Some(BigRational::new(self.state.a.clone(), self.state.c.clone()))
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		self.as_fraction().as_ref().and_then(BigRational::to_f64)
	}

	/// Ingest until the float coercions of both bounds coincide; the result
	/// is the unique f64 enclosed by every later bracket.
	pub fn closest_float(&mut self, int: &dyn Interrupt) -> RResult<f64> {
		loop {
			test_int(int)?;
			if let (Some(lo), Some(hi)) = (self.lower_bound_f64(), self.upper_bound_f64()) {
				if lo == hi {
					return Ok(lo);
				}
			}
			if self.terminated {
				return self.as_f64().ok_or(Error::DegenerateState);
			}
			self.improve(1, int)?;
		}
	}
}

/// Forwards the terms of an underlying computation unchanged while recording
/// the rational bracket they imply.
pub struct IntervalComputation {
	inner: BoxedComputation,
	state: Homographic,
	ingestions: usize,
	lower_bound: Option<BigRational>,
	upper_bound: Option<BigRational>,
}

impl IntervalComputation {
	pub fn new(x: &Real) -> Self {
		Self {
			inner: x.boxed(),
			state: Homographic::identity(),
			ingestions: 0,
			lower_bound: None,
			upper_bound: None,
		}
	}

	pub fn bounds(&self) -> (Option<BigRational>, Option<BigRational>) {
		(self.lower_bound.clone(), self.upper_bound.clone())
	}

	fn convergent(p: &BigInt, q: &BigInt) -> Option<BigRational> {
		if q.is_zero() {
			None
		} else {
			Some(BigRational::new(p.clone(), q.clone()))
		}
	}

	fn update_bounds(&mut self) {
		// a/c is the newest convergent, b/d the previous one; they enclose
		// the value on alternating sides.
		let newest = Self::convergent(&self.state.a, &self.state.c);
		let previous = Self::convergent(&self.state.b, &self.state.d);
		let (lower, upper) = if self.ingestions % 2 == 1 {
			(newest, previous)
		} else {
			(previous, newest)
		};
		if lower.is_some() {
			self.lower_bound = lower;
		}
		if upper.is_some() {
			self.upper_bound = upper;
		}
	}
}

impl Computation for IntervalComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		let term = self.inner.next_term(int)?;
		self.ingestions += 1;
		match &term {
			Some(t) => self.state.ingest(t.clone()),
			None => {
				self.state.ingest_inf();
			}
		}
		self.update_bounds();
		Ok(term)
	}
}

/// The bracket implied by the first `n` terms of `x`.
pub fn interval(
	x: &Real,
	n: usize,
	int: &dyn Interrupt,
) -> RResult<(Option<BigRational>, Option<BigRational>)> {
	let mut c = IntervalComputation::new(x);
	for _ in 0..n {
		if c.next_term(int)?.is_none() {
			break;
		}
	}
	Ok(c.bounds())
}

/// The first `n` convergents of `x`; each is the best rational approximation
/// among all fractions with no larger denominator.
pub fn best_rational_approximations(
	x: &Real,
	n: usize,
	int: &dyn Interrupt,
) -> RResult<Vec<BigRational>> {
	let mut a = Approximation::new(x);
	let mut result = Vec::with_capacity(n);
	for _ in 0..n {
		a.improve(1, int)?;
		match a.as_fraction() {
			Some(fraction) => result.push(fraction),
			None => break,
		}
		if a.is_terminated() {
			break;
		}
	}
	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::interrupt::Never;

	#[test]
	fn brackets_shrink_around_sqrt_two_squared() {
		let sqrt2 = Real::from_simple_iter(
			std::iter::once(1i64).chain(std::iter::repeat_with(|| 2)),
		);
		let square = sqrt2.clone() * sqrt2;
		let mut a = Approximation::new(&square);
		a.improve_epsilon(&BigRational::new(1.into(), 1000.into()), &Never)
			.unwrap();
		let two = BigRational::from_integer(2.into());
		assert!(a.lower_bound().unwrap() < two);
		assert!(a.upper_bound().unwrap() > two);
	}

	#[test]
	fn rational_bracket_collapses() {
		let x = Real::from_fraction(1, 3).unwrap();
		let mut a = Approximation::new(&x);
		a.improve(100, &Never).unwrap();
		let third = BigRational::new(1.into(), 3.into());
		assert_eq!(a.lower_bound(), Some(third.clone()));
		assert_eq!(a.upper_bound(), Some(third));
		assert_eq!(a.epsilon_fraction(), Some(BigRational::zero()));
	}

	#[test]
	fn convergents_of_e() {
		let approximations =
			best_rational_approximations(&crate::constants::e(), 4, &Never).unwrap();
		let expected = [(2i64, 1i64), (3, 1), (8, 3), (11, 4)]
			.map(|(p, q)| BigRational::new(p.into(), q.into()));
		assert_eq!(approximations, expected.to_vec());
	}

	#[test]
	fn closest_float_of_rational() {
		let x = Real::from_fraction(1, 2).unwrap();
		let mut a = Approximation::new(&x);
		assert_eq!(a.closest_float(&Never).unwrap(), 0.5);
	}

	#[test]
	fn interval_tracks_term_prefix() {
		let (lower, upper) = interval(&crate::constants::e(), 2, &Never).unwrap();
		assert_eq!(lower.unwrap(), BigRational::from_integer(2.into()));
		assert_eq!(upper.unwrap(), BigRational::from_integer(3.into()));
	}

	struct AlwaysInterrupt;

	impl crate::interrupt::Interrupt for AlwaysInterrupt {
		fn should_interrupt(&self) -> bool {
			true
		}
	}

	#[test]
	fn interrupt_stops_refinement() {
		let mut a = Approximation::new(&crate::constants::pi());
		assert_eq!(a.improve(5, &AlwaysInterrupt).unwrap_err(), Error::Interrupted);
	}
}
