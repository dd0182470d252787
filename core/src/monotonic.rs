use crate::approximation::Approximation;
use crate::computation::{BoxedComputation, Computation};
use crate::error::Error;
use crate::interrupt::{test_int, Interrupt};
use crate::result::RResult;
use crate::term::Term;
use num_rational::BigRational;

/// How many argument terms to absorb whenever the two function images
/// disagree on the next output term.
const IMPROVEMENT_STEP: usize = 10;

pub(crate) type GeneratorFn = Box<dyn Fn(&BigRational) -> RResult<BoxedComputation>>;

/// Promotes a rational-argument function to a real argument: evaluate the
/// function at both ends of a shrinking bracket of the argument and emit
/// every term the two images agree on. Requires the function to be monotone
/// on the bracket, so that agreement of a prefix pins it for the whole
/// bracket.
pub(crate) struct MonotonicComputation {
	argument: Approximation,
	generator: GeneratorFn,
	emitted: usize,
	children: Option<(BoxedComputation, BoxedComputation)>,
	terminated: bool,
}

impl MonotonicComputation {
	pub(crate) fn new(argument: BoxedComputation, generator: GeneratorFn) -> Self {
		Self {
			argument: Approximation::from_computation(argument),
			generator,
			emitted: 0,
			children: None,
			terminated: false,
		}
	}

	fn increase_precision(&mut self, int: &dyn Interrupt) -> RResult<()> {
		self.children = None;
		loop {
			test_int(int)?;
			self.argument.improve(IMPROVEMENT_STEP, int)?;
			let (Some(lower), Some(upper)) = (self.argument.lower_bound(), self.argument.upper_bound())
			else {
				if self.argument.is_terminated() {
					return Err(Error::DegenerateState);
				}
				continue;
			};
			let lo = match (self.generator)(&lower) {
				Ok(c) => c,
				Err(Error::Interrupted) => return Err(Error::Interrupted),
				// A transient domain error (e.g. a logarithm bracket still
				// straddling zero): tighten the bracket and retry, unless
				// the argument is already exact.
				Err(e) => {
					if self.argument.is_terminated() {
						return Err(e);
					}
					continue;
				}
			};
			let hi = match (self.generator)(&upper) {
				Ok(c) => c,
				Err(Error::Interrupted) => return Err(Error::Interrupted),
				Err(e) => {
					if self.argument.is_terminated() {
						return Err(e);
					}
					continue;
				}
			};
			let mut lo = lo;
			let mut hi = hi;
			for _ in 0..self.emitted {
				lo.next_term(int)?;
				hi.next_term(int)?;
			}
			self.children = Some((lo, hi));
			return Ok(());
		}
	}
}

impl Computation for MonotonicComputation {
	fn next_term(&mut self, int: &dyn Interrupt) -> RResult<Option<Term>> {
		if self.terminated {
			return Ok(None);
		}
		loop {
			test_int(int)?;
			if self.children.is_none() {
				self.increase_precision(int)?;
			}
			let Some((lo, hi)) = self.children.as_mut() else {
				continue;
			};
			let term_lo = lo.next_term(int)?;
			let term_hi = hi.next_term(int)?;
			match (term_lo, term_hi) {
				(Some(a), Some(b)) if a == b => {
					self.emitted += 1;
					return Ok(Some(a));
				}
				(None, None) => {
					// Both images ended with an identical prefix: the value
					// is exactly that rational.
					self.terminated = true;
					return Ok(None);
				}
				_ => self.increase_precision(int)?,
			}
		}
	}
}
