use crate::computation::BoxedComputation;
use crate::error::Error;
use crate::homographic::Homographic;
use crate::interrupt::{test_int, Interrupt};
use crate::real::Real;
use crate::result::RResult;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Streams the decimal expansion of a real: first the integer part (floor,
/// possibly negative), then one digit in 0..=9 per pull. `None` once every
/// remaining digit is zero.
pub(crate) struct DigitComputation {
	state: Homographic,
	input: BoxedComputation,
	input_done: bool,
	terminated: bool,
}

impl DigitComputation {
	pub(crate) fn new(x: &Real) -> Self {
		Self {
			state: Homographic::identity(),
			input: x.boxed(),
			input_done: false,
			terminated: false,
		}
	}

	pub(crate) fn is_terminated(&self) -> bool {
		self.terminated
	}

	pub(crate) fn next_digit(&mut self, int: &dyn Interrupt) -> RResult<Option<BigInt>> {
		if self.terminated {
			return Ok(None);
		}
		loop {
			test_int(int)?;
			if !self.state.c.is_zero() {
				let cd = &self.state.c + &self.state.d;
				if !cd.is_zero() && self.state.c.sign() == cd.sign() {
					let n1 = self.state.a.div_floor(&self.state.c);
					let n2 = (&self.state.a + &self.state.b).div_floor(&cd);
					if n1 == n2 {
						self.terminated = self.state.emit_digit(&n1);
						return Ok(Some(n1));
					}
				}
			}
			if self.input_done {
				// No input remains and the candidates still straddle a
				// pole: the represented value is not finite.
				return Err(Error::DegenerateState);
			}
			match self.input.next_term(int)? {
				Some(term) => self.state.ingest(term),
				None => {
					self.input_done = true;
					if self.state.ingest_inf() {
						return Err(Error::DegenerateState);
					}
				}
			}
		}
	}
}

fn pow10(exponent: usize) -> BigInt {
	num_traits::pow(BigInt::from(10), exponent)
}

/// Decimal rendering with `places` fractional digits. Truncates toward zero;
/// with `round` set, a half-ulp is added to the magnitude first (one guard
/// digit decides the carry). Negative values run through the complement
/// path: the digit stream describes `x − ⌊x⌋`, so the printed magnitude is
/// `(−z₀−1)·10ⁿ + 10ⁿ − D − borrow`, with the borrow cleared exactly when
/// the stream terminates within the requested digits.
pub(crate) fn evaluate(
	x: &Real,
	places: usize,
	round: bool,
	int: &dyn Interrupt,
) -> RResult<String> {
	let guard_places = if round { places + 1 } else { places };
	let mut digits = DigitComputation::new(x);
	let Some(integer_part) = digits.next_digit(int)? else {
		return Err(Error::DegenerateState);
	};

	let ten = BigInt::from(10);
	let mut fractional = BigInt::zero();
	let mut collected = 0usize;
	let mut exact = false;
	while collected < guard_places {
		match digits.next_digit(int)? {
			Some(digit) => {
				fractional = &fractional * &ten + &digit;
				collected += 1;
			}
			None => {
				exact = true;
				break;
			}
		}
	}
	for _ in collected..guard_places {
		fractional = &fractional * &ten;
	}
	// the expansion may end exactly on the last digit we asked for
	let exact = exact || digits.is_terminated();

	let scale = pow10(guard_places);
	let (negative, mut magnitude) = if integer_part.is_negative() {
		let borrow = if exact { BigInt::zero() } else { BigInt::from(1) };
		let whole = -&integer_part - BigInt::from(1);
		(true, &whole * &scale + &scale - &fractional - borrow)
	} else {
		(false, &integer_part * &scale + &fractional)
	};
	if round {
		magnitude = (&magnitude + BigInt::from(5)).div_floor(&ten);
	}

	let mut result = String::new();
	if negative {
		result.push('-');
	}
	if places == 0 {
		result.push_str(&magnitude.to_string());
		return Ok(result);
	}
	let places_scale = pow10(places);
	let (whole, fraction) = magnitude.div_rem(&places_scale);
	result.push_str(&whole.to_string());
	result.push('.');
	let fraction_digits = fraction.to_string();
	for _ in fraction_digits.len()..places {
		result.push('0');
	}
	result.push_str(&fraction_digits);
	Ok(result)
}
