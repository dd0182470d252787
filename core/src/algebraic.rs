use crate::computation::{BoxedComputation, Computation};
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// How many terms a transducer absorbs within one emission attempt before it
/// gives up on a simple term and falls back to a generalized one.
pub(crate) const DEFAULT_MAX_INGESTIONS: usize = 15;

/// Drives the map `(a·x + b)/(c·x + d)` over a single input stream,
/// producing the term stream of the image.
pub(crate) struct AlgebraicComputation {
	state: Homographic,
	x: BoxedComputation,
	max_ingestions: usize,
	terminated: bool,
	simple_mode: bool,
}

impl AlgebraicComputation {
	pub(crate) fn new(x: BoxedComputation, state: Homographic) -> Self {
		Self::with_max_ingestions(x, state, DEFAULT_MAX_INGESTIONS)
	}

	pub(crate) fn with_max_ingestions(
		x: BoxedComputation,
		state: Homographic,
		max_ingestions: usize,
	) -> Self {
		Self {
			state,
			x,
			max_ingestions,
			terminated: false,
			simple_mode: true,
		}
	}

	fn ingest_x(&mut self, int: &dyn Interrupt) -> RResult<()> {
		match self.x.next_term(int)? {
			Some(term) => self.state.ingest(term),
			None => self.terminated = self.state.ingest_inf(),
		}
		Ok(())
	}
}

impl Computation for AlgebraicComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		if self.terminated {
			return Ok(None);
		}
		debug_assert!(!(self.state.c.is_zero() && self.state.d.is_zero()));

		let mut ingestions = 0;
		loop {
			test_int(int)?;
			self.simple_mode = self.simple_mode && ingestions <= self.max_ingestions;

			// Both floor candidates are only meaningful when the image of
			// x ∈ [1, ∞] avoids the pole: c and c + d nonzero, same sign.
			let cd = &self.state.c + &self.state.d;
			if !self.state.c.is_zero() && self.state.c.sign() == cd.sign() {
				let n1 = self.state.a.div_floor(&self.state.c);
				let n2 = (&self.state.a + &self.state.b).div_floor(&cd);

				if n1 == n2 {
					self.simple_mode = true;
					self.terminated = self.state.emit(Term::Simple(n1.clone()));
					return Ok(Some(Term::Simple(n1)));
				}
				if !self.simple_mode {
					let n = n1.clone().min(n2.clone());
					let m = n1.max(n2) - &n + BigInt::one();
					debug_assert!(!m.is_one());
					let term = Term::Gcf(n, m);
					self.terminated = self.state.emit(term.clone());
					debug_assert!(!self.terminated);
					return Ok(Some(term));
				}
			}

			self.ingest_x(int)?;
			if self.terminated {
				return Ok(None);
			}
			ingestions += 1;
		}
	}
}
