use crate::term::Term;
use num_bigint::BigInt;
use num_traits::Zero;

/// The pending bilinear-fractional map
/// `(a·xy + b·x + c·y + d)/(e·xy + f·x + g·y + h)` over the remainders of
/// the two input streams.
#[derive(Clone, Debug)]
pub(crate) struct Bihomographic {
	pub(crate) a: BigInt,
	pub(crate) b: BigInt,
	pub(crate) c: BigInt,
	pub(crate) d: BigInt,
	pub(crate) e: BigInt,
	pub(crate) f: BigInt,
	pub(crate) g: BigInt,
	pub(crate) h: BigInt,
}

impl Bihomographic {
	#[allow(clippy::too_many_arguments)]
	pub(crate) fn new(
		a: impl Into<BigInt>,
		b: impl Into<BigInt>,
		c: impl Into<BigInt>,
		d: impl Into<BigInt>,
		e: impl Into<BigInt>,
		f: impl Into<BigInt>,
		g: impl Into<BigInt>,
		h: impl Into<BigInt>,
	) -> Self {
		Self {
			a: a.into(),
			b: b.into(),
			c: c.into(),
			d: d.into(),
			e: e.into(),
			f: f.into(),
			g: g.into(),
			h: h.into(),
		}
	}

	/// Replace `x` by `n + m/x` and renormalize.
	pub(crate) fn x_ingest(&mut self, term: Term) {
		let (n, m) = term.into_parts();
		let a = &n * &self.a + &self.c;
		let b = &n * &self.b + &self.d;
		let c = &m * &self.a;
		let d = &m * &self.b;
		let e = &n * &self.e + &self.g;
		let f = &n * &self.f + &self.h;
		let g = &m * &self.e;
		let h = &m * &self.f;
		*self = Self { a, b, c, d, e, f, g, h };
	}

	/// The x stream ended: `x = ∞`. True when the map degenerated.
	pub(crate) fn x_ingest_inf(&mut self) -> bool {
		self.c = self.a.clone();
		self.d = self.b.clone();
		self.g = self.e.clone();
		self.h = self.f.clone();
		self.denominator_is_zero()
	}

	/// Replace `y` by `n + m/y` and renormalize.
	pub(crate) fn y_ingest(&mut self, term: Term) {
		let (n, m) = term.into_parts();
		let a = &n * &self.a + &self.b;
		let b = &m * &self.a;
		let c = &n * &self.c + &self.d;
		let d = &m * &self.c;
		let e = &n * &self.e + &self.f;
		let f = &m * &self.e;
		let g = &n * &self.g + &self.h;
		let h = &m * &self.g;
		*self = Self { a, b, c, d, e, f, g, h };
	}

	/// The y stream ended: `y = ∞`. True when the map degenerated.
	pub(crate) fn y_ingest_inf(&mut self) -> bool {
		self.b = self.a.clone();
		self.d = self.c.clone();
		self.f = self.e.clone();
		self.h = self.g.clone();
		self.denominator_is_zero()
	}

	/// Replace the represented value `v` by `m/(v − n)`. Returns true when
	/// both inputs are exhausted and nothing remains.
	pub(crate) fn emit(&mut self, term: Term) -> bool {
		let (n, m) = term.into_parts();
		let a = &self.a - &n * &self.e;
		let b = &self.b - &n * &self.f;
		let c = &self.c - &n * &self.g;
		let d = &self.d - &n * &self.h;
		let terminated = a.is_zero() && b.is_zero() && c.is_zero() && d.is_zero();
		self.a = &m * &self.e;
		self.b = &m * &self.f;
		self.c = &m * &self.g;
		self.d = &m * &self.h;
		self.e = a;
		self.f = b;
		self.g = c;
		self.h = d;
		terminated
	}

	fn denominator_is_zero(&self) -> bool {
		self.e.is_zero() && self.f.is_zero() && self.g.is_zero() && self.h.is_zero()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn coeffs(s: &Bihomographic) -> [i64; 8] {
		[&s.a, &s.b, &s.c, &s.d, &s.e, &s.f, &s.g, &s.h].map(|x| i64::try_from(x).unwrap())
	}

	#[test]
	fn x_ingest_renormalizes() {
		// x + y, ingest x = 2 + 1/x'
		let mut s = Bihomographic::new(0, 1, 1, 0, 0, 0, 0, 1);
		s.x_ingest(Term::from(2));
		assert_eq!(coeffs(&s), [1, 2, 0, 1, 0, 1, 0, 0]);
	}

	#[test]
	fn y_ingest_renormalizes() {
		let mut s = Bihomographic::new(0, 1, 1, 0, 0, 0, 0, 1);
		s.y_ingest(Term::from(3));
		assert_eq!(coeffs(&s), [1, 0, 3, 1, 0, 0, 1, 0]);
	}

	#[test]
	fn emit_swaps_rows() {
		let mut s = Bihomographic::new(5, 0, 0, 0, 1, 0, 0, 0);
		let terminated = s.emit(Term::from(5));
		assert!(terminated);
		assert_eq!(coeffs(&s), [1, 0, 0, 0, 0, 0, 0, 0]);
	}
}
