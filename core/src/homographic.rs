// Notes:
// https://perl.plover.com/classes/cftalk/INFO/gosper.html
// https://crypto.stanford.edu/pbc/notes/contfrac/nonsimple.html

use crate::term::Term;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// The pending linear-fractional map `(a·x + b)/(c·x + d)`, where `x` ranges
/// over the remainder of the input stream. Invariant: `(c, d) != (0, 0)`.
#[derive(Clone, Debug)]
pub(crate) struct Homographic {
	pub(crate) a: BigInt,
	pub(crate) b: BigInt,
	pub(crate) c: BigInt,
	pub(crate) d: BigInt,
}

impl Homographic {
	pub(crate) fn new(
		a: impl Into<BigInt>,
		b: impl Into<BigInt>,
		c: impl Into<BigInt>,
		d: impl Into<BigInt>,
	) -> Self {
		Self {
			a: a.into(),
			b: b.into(),
			c: c.into(),
			d: d.into(),
		}
	}

	pub(crate) fn identity() -> Self {
		Self::new(1, 0, 0, 1)
	}

	/// Replace `x` by `n + m/x` and bring the map back into homographic form.
	pub(crate) fn ingest(&mut self, term: Term) {
		let (n, m) = term.into_parts();
		let a = &n * &self.a + &self.b;
		let b = &m * &self.a;
		let c = &n * &self.c + &self.d;
		let d = &m * &self.c;
		self.a = a;
		self.b = b;
		self.c = c;
		self.d = d;
	}

	/// The input stream ended: `x = ∞`. Returns true when the map has
	/// degenerated to an infinite value.
	pub(crate) fn ingest_inf(&mut self) -> bool {
		self.b = self.a.clone();
		self.d = self.c.clone();
		self.c.is_zero() && self.d.is_zero()
	}

	/// Replace the represented value `v` by `m/(v − n)`. Returns true when
	/// the stream is exhausted (nothing remains after the emitted term).
	pub(crate) fn emit(&mut self, term: Term) -> bool {
		let (n, m) = term.into_parts();
		let a = &self.a - &n * &self.c;
		let b = &self.b - &n * &self.d;
		let terminated = a.is_zero() && b.is_zero();
		self.a = &m * &self.c;
		self.b = &m * &self.d;
		self.c = a;
		self.d = b;
		terminated
	}

	/// Base-10 emission: replace the value `v` by `10·(v − digit)`, leaving
	/// the denominator row untouched. Returns true on exhaustion.
	pub(crate) fn emit_digit(&mut self, digit: &BigInt) -> bool {
		let ten = BigInt::from(10);
		self.a = (&self.a - digit * &self.c) * &ten;
		self.b = (&self.b - digit * &self.d) * &ten;
		self.a.is_zero() && self.b.is_zero()
	}

	/// An integer `k` with `H(k) ∈ [k, k + 1)`, found by bisection from
	/// `guess_int`. `None` when the iteration degenerates (the square-root
	/// stream treats that as termination).
	pub(crate) fn fix_point(&self) -> Option<BigInt> {
		let mut guess = self.guess_int()?;
		if guess.is_zero() {
			return None;
		}
		loop {
			let value = self.evaluate_int(&guess)?;
			debug_assert!(!value.is_zero());
			let next = (&guess + &value).div_floor(&BigInt::from(2));
			let step = &next - &guess;
			if step.is_zero() || step.is_one() {
				return Some(guess);
			}
			guess = next;
		}
	}

	/// Floor of the map evaluated at the integer `n`, or `None` when the
	/// denominator vanishes there.
	pub(crate) fn evaluate_int(&self, n: &BigInt) -> Option<BigInt> {
		let denominator = &self.c * n + &self.d;
		if denominator.is_zero() {
			return None;
		}
		Some((&self.a * n + &self.b).div_floor(&denominator))
	}

	/// An integer that makes the denominator positive, or `None` when that
	/// is impossible (denominator of the form `0·x + n` with `n <= 0`).
	pub(crate) fn guess_int(&self) -> Option<BigInt> {
		if self.c.is_zero() {
			if self.d.is_positive() {
				Some(BigInt::zero())
			} else {
				None
			}
		} else if self.c.is_positive() {
			let neg_d: BigInt = -&self.d;
			Some((neg_d.div_floor(&self.c) + BigInt::one()).max(BigInt::zero()))
		} else {
			let q: BigInt = self.d.div_floor(&self.c);
			Some((-q - BigInt::one()).min(BigInt::zero()))
		}
	}
}
