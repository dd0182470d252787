use crate::algebraic::AlgebraicComputation;
use crate::approximation::Approximation;
use crate::bihomographic::Bihomographic;
use crate::compare::{compare, default_epsilon, ComparisonResult};
use crate::computation::{empty_computation, BoxedComputation, CachedComputation, Computation, TermIter};
use crate::error::Error;
use crate::homographic::Homographic;
use crate::interrupt::{Interrupt, Never};
use crate::quadratic::QuadraticComputation;
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops;
use std::rc::Rc;

/// A real number, represented by a lazy stream of continued-fraction terms.
///
/// A `Real` owns its raw term source and a shared append-only cache; every
/// consumer reads through its own [`CachedComputation`] cursor, so a value
/// appearing several times in an expression tree computes each term once.
/// Cloning is cheap and shares both.
#[derive(Clone)]
pub struct Real {
	source: Rc<RefCell<BoxedComputation>>,
	cache: Rc<RefCell<Vec<Term>>>,
}

/// A computation that failed at construction time. Arithmetic never fails
/// eagerly; the error is delivered to whichever consumer first pulls a term.
struct FailedComputation(Error);

impl Computation for FailedComputation {
	fn next_term(&mut self, _int: &dyn Interrupt) -> RResult<Option<Term>> {
		Err(self.0.clone())
	}
}

impl Real {
	pub(crate) fn from_raw(computation: BoxedComputation) -> Self {
		Self {
			source: Rc::new(RefCell::new(computation)),
			cache: Rc::new(RefCell::new(Vec::new())),
		}
	}

	pub(crate) fn failed(e: Error) -> Self {
		Self::from_raw(Box::new(FailedComputation(e)))
	}

	/// A fresh cursor over this real's term stream.
	pub fn compute(&self) -> CachedComputation {
		CachedComputation::new(self.source.clone(), self.cache.clone())
	}

	pub(crate) fn boxed(&self) -> BoxedComputation {
		Box::new(self.compute())
	}

	pub fn from_int(n: i64) -> Self {
		Self::from_bigint(n.into())
	}

	pub fn from_bigint(n: BigInt) -> Self {
		Self::from_raw(Box::new(TermIter::new(std::iter::once(Term::Simple(n)))))
	}

	pub fn from_fraction(p: i64, q: i64) -> RResult<Self> {
		Self::from_ratio_parts(p.into(), q.into())
	}

	pub fn from_ratio_parts(p: BigInt, q: BigInt) -> RResult<Self> {
		if q.is_zero() {
			return Err(Error::DivideByZero);
		}
		Ok(Self::from_ratio(&BigRational::new(p, q)))
	}

	pub fn from_ratio(r: &BigRational) -> Self {
		let p = r.numer().clone();
		let q = r.denom().clone();
		Self::from_raw(Box::new(AlgebraicComputation::new(
			empty_computation(),
			Homographic::new(p.clone(), p, q.clone(), q),
		)))
	}

	/// Parses a fixed-point decimal literal such as `-12.345`.
	pub fn from_decimal(literal: &str) -> RResult<Self> {
		let (negative, rest) = match literal.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, literal.strip_prefix('+').unwrap_or(literal)),
		};
		let (whole, fraction) = match rest.split_once('.') {
			Some((whole, fraction)) => (whole, fraction),
			None => (rest, ""),
		};
		if whole.is_empty() && fraction.is_empty() {
			return Err(Error::InvalidDecimalLiteral);
		}
		if !whole.bytes().all(|b| b.is_ascii_digit())
			|| !fraction.bytes().all(|b| b.is_ascii_digit())
		{
			return Err(Error::InvalidDecimalLiteral);
		}
		let mut numerator = BigInt::zero();
		for b in whole.bytes().chain(fraction.bytes()) {
			numerator = numerator * BigInt::from(10) + BigInt::from(b - b'0');
		}
		if negative {
			numerator = -numerator;
		}
		let denominator = num_traits::pow(BigInt::from(10), fraction.len());
		Self::from_ratio_parts(numerator, denominator)
	}

	/// Converts a float exactly (every finite f64 is a binary fraction).
	/// NaN and infinities are refused; lossy use of floats must be explicit.
	pub fn from_float(f: f64) -> RResult<Self> {
		let ratio = BigRational::from_float(f).ok_or(Error::NonFiniteFloat)?;
		Ok(Self::from_ratio(&ratio))
	}

	/// A real from simple continued-fraction terms: the first is the integer
	/// part, the rest must be at least 1.
	pub fn from_simple_iter<T, I>(terms: I) -> Self
	where
		T: Into<BigInt>,
		I: IntoIterator<Item = T>,
		I::IntoIter: 'static,
	{
		Self::from_raw(Box::new(TermIter::new(
			terms.into_iter().map(|n| Term::Simple(n.into())).fuse(),
		)))
	}

	/// A real from generalized `(n, m)` terms with `m >= 1`.
	pub fn from_gcf_iter<T, I>(terms: I) -> Self
	where
		T: Into<BigInt>,
		I: IntoIterator<Item = (T, T)>,
		I::IntoIter: 'static,
	{
		Self::from_raw(Box::new(TermIter::new(
			terms
				.into_iter()
				.map(|(n, m)| Term::Gcf(n.into(), m.into()))
				.fuse(),
		)))
	}

	pub(crate) fn algebraic(&self, state: Homographic) -> Self {
		Self::from_raw(Box::new(AlgebraicComputation::new(self.boxed(), state)))
	}

	pub(crate) fn quadratic(x: &Self, y: &Self, state: Bihomographic) -> Self {
		Self::from_raw(Box::new(QuadraticComputation::new(
			x.boxed(),
			y.boxed(),
			state,
		)))
	}

	fn add_ratio(&self, r: &BigRational) -> Self {
		let (p, q) = (r.numer(), r.denom());
		self.algebraic(Homographic::new(q.clone(), p.clone(), 0, q.clone()))
	}

	fn sub_ratio(&self, r: &BigRational) -> Self {
		self.add_ratio(&-r)
	}

	fn ratio_sub(&self, r: &BigRational) -> Self {
		let (p, q) = (r.numer(), r.denom());
		self.algebraic(Homographic::new(-q, p.clone(), 0, q.clone()))
	}

	fn mul_ratio(&self, r: &BigRational) -> Self {
		let (p, q) = (r.numer(), r.denom());
		self.algebraic(Homographic::new(p.clone(), 0, 0, q.clone()))
	}

	fn div_ratio(&self, r: &BigRational) -> Self {
		let (p, q) = (r.numer(), r.denom());
		if p.is_zero() {
			return Self::failed(Error::DivideByZero);
		}
		self.algebraic(Homographic::new(q.clone(), 0, 0, p.clone()))
	}

	fn ratio_div(&self, r: &BigRational) -> Self {
		let (p, q) = (r.numer(), r.denom());
		self.algebraic(Homographic::new(0, p.clone(), q.clone(), 0))
	}

	pub fn recip(&self) -> Self {
		self.algebraic(Homographic::new(0, 1, 1, 0))
	}

	/// Integer power by binary exponentiation; negative exponents go through
	/// the reciprocal.
	pub fn pow_int(&self, exponent: i64) -> Self {
		let mut result = Self::from_int(1);
		let mut base = self.clone();
		let mut e = exponent.unsigned_abs();
		while e > 0 {
			if e & 1 == 1 {
				result = result * base.clone();
			}
			e >>= 1;
			if e > 0 {
				base = base.clone() * base;
			}
		}
		if exponent < 0 {
			result.recip()
		} else {
			result
		}
	}

	/// Renders `places` fractional digits; see [`Real::evaluate_with_interrupt`].
	pub fn evaluate(&self, places: usize, round: bool) -> RResult<String> {
		self.evaluate_with_interrupt(places, round, &Never)
	}

	/// Decimal rendering with truncation toward zero, or correct rounding
	/// when `round` is set. This is the bounded digit consumer: it pulls
	/// exactly as many terms as the requested digits need.
	pub fn evaluate_with_interrupt(
		&self,
		places: usize,
		round: bool,
		int: &dyn Interrupt,
	) -> RResult<String> {
		crate::digits::evaluate(self, places, round, int)
	}

	/// The closest f64, found by shrinking the bracket until both ends
	/// coerce to the same float.
	pub fn to_float(&self) -> RResult<f64> {
		self.to_float_with_interrupt(&Never)
	}

	pub fn to_float_with_interrupt(&self, int: &dyn Interrupt) -> RResult<f64> {
		Approximation::new(self).closest_float(int)
	}

	/// Bracketed comparison; see [`compare`].
	pub fn compare_with(
		&self,
		other: &Self,
		epsilon: &BigRational,
		int: &dyn Interrupt,
	) -> RResult<ComparisonResult> {
		compare(self, other, epsilon, int)
	}
}

impl fmt::Debug for Real {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// only the terms computed so far; forcing more here could diverge
		write!(f, "Real[")?;
		for term in self.cache.borrow().iter() {
			write!(f, "{term:?}, ")?;
		}
		write!(f, "...]")
	}
}

/// Bracketed equality with the default epsilon: `true` means the two values
/// could not be told apart, not that they are provably equal.
impl PartialEq for Real {
	fn eq(&self, other: &Self) -> bool {
		matches!(
			compare(self, other, &default_epsilon(), &Never),
			Ok(ComparisonResult::Unknown)
		)
	}
}

impl PartialOrd for Real {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match compare(self, other, &default_epsilon(), &Never) {
			Ok(ComparisonResult::Smaller) => Some(Ordering::Less),
			Ok(ComparisonResult::Greater) => Some(Ordering::Greater),
			Ok(ComparisonResult::Unknown) => Some(Ordering::Equal),
			Err(_) => None,
		}
	}
}

impl ops::Neg for Real {
	type Output = Self;

	fn neg(self) -> Self {
		self.algebraic(Homographic::new(-1, 0, 0, 1))
	}
}

impl ops::Neg for &Real {
	type Output = Real;

	fn neg(self) -> Real {
		self.algebraic(Homographic::new(-1, 0, 0, 1))
	}
}

impl ops::Add for Real {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::quadratic(&self, &rhs, Bihomographic::new(0, 1, 1, 0, 0, 0, 0, 1))
	}
}

impl ops::Sub for Real {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::quadratic(&self, &rhs, Bihomographic::new(0, 1, -1, 0, 0, 0, 0, 1))
	}
}

impl ops::Mul for Real {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self::quadratic(&self, &rhs, Bihomographic::new(1, 0, 0, 0, 0, 0, 0, 1))
	}
}

impl ops::Div for Real {
	type Output = Self;

	fn div(self, rhs: Self) -> Self {
		Self::quadratic(&self, &rhs, Bihomographic::new(0, 1, 0, 0, 0, 0, 1, 0))
	}
}

impl ops::Add<&Real> for &Real {
	type Output = Real;

	fn add(self, rhs: &Real) -> Real {
		Real::quadratic(self, rhs, Bihomographic::new(0, 1, 1, 0, 0, 0, 0, 1))
	}
}

impl ops::Sub<&Real> for &Real {
	type Output = Real;

	fn sub(self, rhs: &Real) -> Real {
		Real::quadratic(self, rhs, Bihomographic::new(0, 1, -1, 0, 0, 0, 0, 1))
	}
}

impl ops::Mul<&Real> for &Real {
	type Output = Real;

	fn mul(self, rhs: &Real) -> Real {
		Real::quadratic(self, rhs, Bihomographic::new(1, 0, 0, 0, 0, 0, 0, 1))
	}
}

impl ops::Div<&Real> for &Real {
	type Output = Real;

	fn div(self, rhs: &Real) -> Real {
		Real::quadratic(self, rhs, Bihomographic::new(0, 1, 0, 0, 0, 0, 1, 0))
	}
}

fn ratio_from_int(n: i64) -> BigRational {
	BigRational::from_integer(n.into())
}

impl ops::Add<BigRational> for Real {
	type Output = Self;

	fn add(self, rhs: BigRational) -> Self {
		self.add_ratio(&rhs)
	}
}

impl ops::Sub<BigRational> for Real {
	type Output = Self;

	fn sub(self, rhs: BigRational) -> Self {
		self.sub_ratio(&rhs)
	}
}

impl ops::Mul<BigRational> for Real {
	type Output = Self;

	fn mul(self, rhs: BigRational) -> Self {
		self.mul_ratio(&rhs)
	}
}

impl ops::Div<BigRational> for Real {
	type Output = Self;

	fn div(self, rhs: BigRational) -> Self {
		self.div_ratio(&rhs)
	}
}

impl ops::Add<i64> for Real {
	type Output = Self;

	fn add(self, rhs: i64) -> Self {
		self.add_ratio(&ratio_from_int(rhs))
	}
}

impl ops::Sub<i64> for Real {
	type Output = Self;

	fn sub(self, rhs: i64) -> Self {
		self.sub_ratio(&ratio_from_int(rhs))
	}
}

impl ops::Mul<i64> for Real {
	type Output = Self;

	fn mul(self, rhs: i64) -> Self {
		self.mul_ratio(&ratio_from_int(rhs))
	}
}

impl ops::Div<i64> for Real {
	type Output = Self;

	fn div(self, rhs: i64) -> Self {
		self.div_ratio(&ratio_from_int(rhs))
	}
}

impl ops::Add<Real> for i64 {
	type Output = Real;

	fn add(self, rhs: Real) -> Real {
		rhs.add_ratio(&ratio_from_int(self))
	}
}

impl ops::Sub<Real> for i64 {
	type Output = Real;

	fn sub(self, rhs: Real) -> Real {
		rhs.ratio_sub(&ratio_from_int(self))
	}
}

impl ops::Mul<Real> for i64 {
	type Output = Real;

	fn mul(self, rhs: Real) -> Real {
		rhs.mul_ratio(&ratio_from_int(self))
	}
}

impl ops::Div<Real> for i64 {
	type Output = Real;

	fn div(self, rhs: Real) -> Real {
		rhs.ratio_div(&ratio_from_int(self))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::interrupt::Never;

	fn terms(x: &Real, limit: usize) -> Vec<Term> {
		let mut c = x.compute();
		let mut result = Vec::new();
		for _ in 0..limit {
			match c.next_term(&Never).unwrap() {
				Some(t) => result.push(t),
				None => break,
			}
		}
		result
	}

	#[test]
	fn fraction_terms_terminate() {
		let x = Real::from_fraction(123, 456).unwrap();
		assert_eq!(terms(&x, 100), [0i64, 3, 1, 2, 2, 2, 2].map(Term::from).to_vec());
	}

	#[test]
	fn product_with_rational_terminates() {
		let x = Real::from_fraction(1, 10).unwrap() * 2;
		assert_eq!(terms(&x, 100), [0i64, 5].map(Term::from).to_vec());
		assert_eq!(x.evaluate(1, false).unwrap(), "0.2");
	}

	#[test]
	fn cache_is_shared_between_cursors() {
		let x = Real::from_simple_iter([1i64, 2, 3, 4, 5]);
		let mut c1 = x.compute();
		let mut c2 = x.compute();
		for _ in 0..3 {
			c1.next_term(&Never).unwrap();
		}
		assert_eq!(c2.next_term(&Never).unwrap(), Some(Term::from(1)));
		assert_eq!(x.cache.borrow().len(), 3);
		assert_eq!(c1.index(), 3);
		assert_eq!(c2.index(), 1);
	}

	#[test]
	fn decimal_literals() {
		let x = Real::from_decimal("12.25").unwrap();
		assert_eq!(x.evaluate(3, false).unwrap(), "12.250");
		let y = Real::from_decimal("-0.5").unwrap();
		assert_eq!(y.evaluate(2, false).unwrap(), "-0.50");
		assert!(Real::from_decimal("1.2.3").is_err());
		assert!(Real::from_decimal("").is_err());
	}

	#[test]
	fn float_conversion_is_exact() {
		let x = Real::from_float(0.5).unwrap();
		assert_eq!(x.evaluate(2, false).unwrap(), "0.50");
		assert!(Real::from_float(f64::NAN).is_err());
		assert!(Real::from_float(f64::INFINITY).is_err());
	}

	#[test]
	fn involutions() {
		let x = Real::from_fraction(3, 7).unwrap();
		assert_eq!((-(-x.clone())).evaluate(6, false).unwrap(), "0.428571");
		assert_eq!(x.recip().recip().evaluate(6, false).unwrap(), "0.428571");
	}

	#[test]
	fn integer_powers() {
		let x = Real::from_fraction(3, 2).unwrap();
		assert_eq!(x.pow_int(2).evaluate(2, false).unwrap(), "2.25");
		assert_eq!(x.pow_int(0).evaluate(1, false).unwrap(), "1.0");
		assert_eq!(x.pow_int(-1).evaluate(4, false).unwrap(), "0.6666");
	}

	#[test]
	fn division_by_zero_rational_surfaces_at_consumer() {
		let x = Real::from_int(1) / Real::from_int(0).recip().recip();
		// pulling terms of 1/(0) diverges or errors, but construction is
		// fine; the rational fast path reports the error eagerly instead
		let y = Real::from_int(1).div_ratio(&BigRational::zero());
		assert_eq!(y.evaluate(1, false).unwrap_err(), Error::DivideByZero);
		drop(x);
	}

	#[test]
	fn commutativity_brackets_agree() {
		let x = crate::constants::e();
		let y = crate::constants::pi();
		let lhs = x.clone() + y.clone();
		let rhs = y + x;
		assert_eq!(
			lhs.evaluate(12, false).unwrap(),
			rhs.evaluate(12, false).unwrap()
		);
	}
}
