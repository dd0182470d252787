use crate::bihomographic::Bihomographic;
use crate::computation::{BoxedComputation, Computation};
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// The quadratic transducer absorbs much faster than the algebraic one, so
/// its patience is shorter.
pub(crate) const DEFAULT_MAX_INGESTIONS: usize = 5;

/// Drives the map `(a·xy + b·x + c·y + d)/(e·xy + f·x + g·y + h)` over two
/// input streams.
pub(crate) struct QuadraticComputation {
	state: Bihomographic,
	x: BoxedComputation,
	y: BoxedComputation,
	max_ingestions: usize,
	terminated: bool,
}

impl QuadraticComputation {
	pub(crate) fn new(x: BoxedComputation, y: BoxedComputation, state: Bihomographic) -> Self {
		Self {
			state,
			x,
			y,
			max_ingestions: DEFAULT_MAX_INGESTIONS,
			terminated: false,
		}
	}

	fn ingest_x(&mut self, int: &dyn Interrupt) -> RResult<()> {
		match self.x.next_term(int)? {
			Some(term) => self.state.x_ingest(term),
			None => self.terminated = self.state.x_ingest_inf(),
		}
		Ok(())
	}

	fn ingest_y(&mut self, int: &dyn Interrupt) -> RResult<()> {
		match self.y.next_term(int)? {
			Some(term) => self.state.y_ingest(term),
			None => self.terminated = self.state.y_ingest_inf(),
		}
		Ok(())
	}

	/// Corner denominators of the image of the unit square, in the order
	/// (1,1), (∞,1), (1,∞), (∞,∞).
	fn denominators(&self) -> (BigInt, BigInt, BigInt, BigInt) {
		let s = &self.state;
		(
			&s.e + &s.f + &s.g + &s.h,
			&s.e + &s.f,
			&s.e + &s.g,
			s.e.clone(),
		)
	}

	fn quotients(
		&self,
		d00: &BigInt,
		d10: &BigInt,
		d01: &BigInt,
		d11: &BigInt,
	) -> (BigInt, BigInt, BigInt, BigInt) {
		let s = &self.state;
		(
			(&s.a + &s.b + &s.c + &s.d).div_floor(d00),
			(&s.a + &s.b).div_floor(d10),
			(&s.a + &s.c).div_floor(d01),
			s.a.div_floor(d11),
		)
	}
}

fn same_sign(p: &BigInt, q: &BigInt) -> bool {
	!p.is_zero() && !q.is_zero() && p.sign() == q.sign()
}

impl Computation for QuadraticComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		if self.terminated {
			return Ok(None);
		}

		let mut ingestions = 0;
		loop {
			test_int(int)?;
			let (d00, d10, d01, d11) = self.denominators();

			if ingestions > self.max_ingestions
				&& !d00.is_zero()
				&& !d10.is_zero()
				&& !d01.is_zero()
				&& !d11.is_zero()
			{
				// Patience ran out: emit a generalized term spanning the
				// four corner quotients.
				let (q00, q10, q01, q11) = self.quotients(&d00, &d10, &d01, &d11);
				let n = q00.clone().min(q10.clone()).min(q01.clone()).min(q11.clone());
				let m = q00.max(q10).max(q01).max(q11) - &n + BigInt::one();
				let term = Term::Gcf(n, m);
				self.terminated = self.state.emit(term.clone());
				return Ok(Some(term));
			}

			let x_ingest;
			let y_ingest;
			if same_sign(&d00, &d10) && same_sign(&d01, &d11) && same_sign(&d00, &d01) {
				let (q00, q10, q01, q11) = self.quotients(&d00, &d10, &d01, &d11);
				if q00 == q10 && q00 == q01 && q00 == q11 {
					self.terminated = self.state.emit(Term::Simple(q00.clone()));
					return Ok(Some(Term::Simple(q00)));
				}
				x_ingest = q00 != q10 || q01 != q11;
				y_ingest = q00 != q01 || q10 != q11;
			} else {
				// A pole crosses the square; absorb along every axis whose
				// denominator signs disagree.
				x_ingest = !(same_sign(&d00, &d10) && same_sign(&d01, &d11));
				y_ingest = !(same_sign(&d00, &d01) && same_sign(&d10, &d11));
			}

			ingestions += 1;
			if x_ingest {
				self.ingest_x(int)?;
			}
			if y_ingest {
				self.ingest_y(int)?;
			}
			if self.terminated {
				return Ok(None);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algebraic::AlgebraicComputation;
	use crate::computation::{empty_computation, TermIter};
	use crate::homographic::Homographic;
	use crate::interrupt::Never;

	fn fraction_stream(p: i64, q: i64) -> BoxedComputation {
		Box::new(AlgebraicComputation::new(
			empty_computation(),
			Homographic::new(p, p, q, q),
		))
	}

	fn collect(c: &mut QuadraticComputation, limit: usize) -> Vec<Term> {
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
	fn product_of_rationals_terminates() {
		let mut c = QuadraticComputation::new(
			fraction_stream(2, 1),
			fraction_stream(1, 10),
			Bihomographic::new(1, 0, 0, 0, 0, 0, 0, 1),
		);
		assert_eq!(collect(&mut c, 100), [0i64, 5].map(Term::from).to_vec());
		assert_eq!(c.next_term(&Never).unwrap(), None);
		assert_eq!(c.next_term(&Never).unwrap(), None);
	}

	#[test]
	fn sum_of_rationals() {
		// 1/3 + 1/6 = 1/2
		let mut c = QuadraticComputation::new(
			fraction_stream(1, 3),
			fraction_stream(1, 6),
			Bihomographic::new(0, 1, 1, 0, 0, 0, 0, 1),
		);
		assert_eq!(collect(&mut c, 100), [0i64, 2].map(Term::from).to_vec());
	}

	#[test]
	fn square_of_sqrt_two_stays_near_two() {
		let sqrt2 = || {
			Box::new(TermIter::new(
				std::iter::once(Term::from(1)).chain(std::iter::repeat_with(|| Term::from(2))),
			)) as BoxedComputation
		};
		let mut c = QuadraticComputation::new(
			sqrt2(),
			sqrt2(),
			Bihomographic::new(1, 0, 0, 0, 0, 0, 0, 1),
		);
		// The first term of sqrt(2)² must be 1 or 2; the stream never
		// decides between 1 + 1/(1 + ...) and 2 exactly, but every prefix
		// must stay consistent with the value 2.
		let first = c.next_term(&Never).unwrap().unwrap();
		match first {
			Term::Simple(n) => assert!(n == 1.into() || n == 2.into()),
			Term::Gcf(n, m) => {
				assert!(n <= 2.into() && &n + &m >= 2.into());
			}
		}
	}
}
