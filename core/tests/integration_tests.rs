use num_rational::BigRational;
use reals_core::{
	compare, e, exp_fraction, ln_fraction, phi, pi, sin_fraction, sqrt_fraction, sqrt_int,
	ComparisonResult, Computation, Never, Real, Term,
};

#[track_caller]
fn test_digits(x: &Real, places: usize, expected: &str) {
	assert_eq!(x.evaluate(places, false).unwrap(), expected);
}

#[track_caller]
fn test_terms(x: &Real, expected: &[i64], terminates: bool) {
	let mut c = x.compute();
	for &n in expected {
		assert_eq!(c.next_term(&Never).unwrap(), Some(Term::from(n)));
	}
	if terminates {
		assert_eq!(c.next_term(&Never).unwrap(), None);
	}
}

fn fraction(p: i64, q: i64) -> BigRational {
	BigRational::new(p.into(), q.into())
}

#[track_caller]
fn assert_brackets_zero(x: &Real) {
	// the bracket of x must contain 0 once tighter than 10^-9
	let mut a = reals_core::Approximation::new(x);
	a.improve_epsilon(&fraction(1, 1_000_000_000), &Never).unwrap();
	let zero = BigRational::new(0.into(), 1.into());
	assert!(a.lower_bound().unwrap() <= zero);
	assert!(a.upper_bound().unwrap() >= zero);
}

#[test]
fn e_to_ten_digits() {
	test_digits(&e(), 10, "2.7182818284");
}

#[test]
fn pi_to_ten_digits() {
	test_digits(&pi(), 10, "3.1415926535");
}

#[test]
fn phi_to_ten_digits() {
	test_digits(&phi(), 10, "1.6180339887");
}

#[test]
fn rational_terms_terminate() {
	let x = Real::from_fraction(123, 456).unwrap();
	test_terms(&x, &[0, 3, 1, 2, 2, 2, 2], true);
}

#[test]
fn rational_round_trip() {
	test_digits(&Real::from_fraction(123, 456).unwrap(), 10, "0.2697368421");
	test_digits(&Real::from_fraction(22, 7).unwrap(), 6, "3.142857");
	test_digits(&Real::from_fraction(-22, 7).unwrap(), 6, "-3.142857");
}

#[test]
fn two_times_one_tenth_terminates() {
	let x = Real::from_int(2) * Real::from_fraction(1, 10).unwrap();
	test_terms(&x, &[0, 5], true);
	test_digits(&x, 1, "0.2");
}

#[test]
fn exp_of_five() {
	test_digits(&exp_fraction(&fraction(5, 1)), 20, "148.41315910257660342111");
}

#[test]
fn exp_of_three_fifths() {
	test_digits(&exp_fraction(&fraction(3, 5)), 20, "1.82211880039050897487");
}

#[test]
fn exp_of_real() {
	// goes through the monotone-bracket driver rather than the series
	test_digits(&Real::from_int(1).exp(), 10, "2.7182818284");
	let x = Real::from_fraction(1, 1_000_000).unwrap() + sqrt_int(2).unwrap() * 0;
	test_digits(&x.exp(), 10, "1.0000010000");
}

#[test]
fn log_of_101() {
	test_digits(&ln_fraction(&fraction(101, 1)).unwrap(), 20, "4.61512051684125945088");
}

#[test]
fn log_of_1000_over_3() {
	test_digits(
		&ln_fraction(&fraction(1000, 3)).unwrap(),
		20,
		"5.80914299031402736065",
	);
}

#[test]
fn log_rejects_non_positive() {
	assert!(ln_fraction(&fraction(0, 1)).is_err());
	assert!(ln_fraction(&fraction(-3, 2)).is_err());
}

#[test]
fn log_of_exp_brackets_argument() {
	let x = Real::from_fraction(3, 2).unwrap();
	let round_trip = exp_fraction(&fraction(3, 2)).ln() - x;
	assert_brackets_zero(&round_trip);
}

#[test]
fn exp_of_log_brackets_argument() {
	let round_trip = ln_fraction(&fraction(5, 2)).unwrap().exp() - Real::from_fraction(5, 2).unwrap();
	assert_brackets_zero(&round_trip);
}

#[test]
fn sin_of_half() {
	test_digits(&sin_fraction(&fraction(1, 2)), 20, "0.47942553860420300027");
}

#[test]
fn sin_of_one() {
	test_digits(&Real::from_int(1).sin(), 20, "0.84147098480789650665");
}

#[test]
fn cos_of_one() {
	test_digits(&Real::from_int(1).cos(), 20, "0.54030230586813971740");
}

#[test]
fn tan_of_one() {
	test_digits(&Real::from_int(1).tan(), 20, "1.55740772465490223050");
}

#[test]
fn csc_of_one() {
	test_digits(&Real::from_int(1).csc(), 20, "1.18839510577812121626");
}

#[test]
fn sinh_of_one() {
	test_digits(&Real::from_int(1).sinh(), 20, "1.17520119364380145688");
}

#[test]
fn cosh_of_one() {
	test_digits(&Real::from_int(1).cosh(), 20, "1.54308063481524377847");
}

#[test]
fn tanh_of_one() {
	test_digits(&Real::from_int(1).tanh(), 20, "0.76159415595576488811");
}

#[test]
fn sqrt_of_two() {
	test_digits(&sqrt_int(2).unwrap(), 10, "1.4142135623");
}

#[test]
fn sqrt_squared_brackets_argument() {
	let root = sqrt_int(2).unwrap();
	let difference = root.clone() * root - Real::from_int(2);
	assert_brackets_zero(&difference);
}

#[test]
fn sqrt_of_perfect_square_terminates() {
	let x = sqrt_int(49).unwrap();
	test_terms(&x, &[7], true);
}

#[test]
fn sqrt_of_square_fraction_is_exact() {
	let x = sqrt_fraction(&fraction(16, 9)).unwrap();
	assert!(x == Real::from_fraction(4, 3).unwrap());
}

#[test]
fn sqrt_of_fraction() {
	// sqrt(1/2) = 0.70710678118654752440...
	let x = sqrt_fraction(&fraction(1, 2)).unwrap();
	test_digits(&x, 10, "0.7071067811");
}

#[test]
fn algebraic_identities_bracket_zero() {
	let x = sqrt_int(2).unwrap();
	let y = e();
	assert_brackets_zero(&(x.clone() + y.clone() - (y.clone() + x.clone())));
	assert_brackets_zero(&(x.clone() * y.clone() - (y * x.clone())));
	assert_brackets_zero(&(x.clone() - x));
}

#[test]
fn involutions_bracket_argument() {
	let x = pi();
	assert_brackets_zero(&(x.clone().recip().recip() - x.clone()));
	assert_brackets_zero(&(-(-x.clone()) - x));
}

#[test]
fn comparisons() {
	let eps = fraction(1, 100_000);
	assert_eq!(
		compare(&e(), &pi(), &eps, &Never).unwrap(),
		ComparisonResult::Smaller
	);
	assert_eq!(
		compare(&pi(), &e(), &eps, &Never).unwrap(),
		ComparisonResult::Greater
	);
	assert_eq!(
		compare(&phi(), &phi(), &eps, &Never).unwrap(),
		ComparisonResult::Unknown
	);
	assert!(e() < pi());
	assert!(pi() > e());
}

#[test]
fn digit_prefix_is_stable() {
	let x = pi();
	let short = x.evaluate(5, false).unwrap();
	let long = x.evaluate(25, false).unwrap();
	assert!(long.starts_with(&short));
}

#[test]
fn rounding() {
	let x = Real::from_fraction(2, 3).unwrap();
	assert_eq!(x.evaluate(4, true).unwrap(), "0.6667");
	assert_eq!(x.evaluate(4, false).unwrap(), "0.6666");
}

#[test]
fn closest_float() {
	assert_eq!(pi().to_float().unwrap(), std::f64::consts::PI);
	assert_eq!(Real::from_fraction(1, 2).unwrap().to_float().unwrap(), 0.5);
}

#[test]
fn power() {
	let x = Real::from_fraction(3, 2).unwrap();
	test_digits(&x.pow_int(3), 5, "3.37500");
	// 2^(1/2) through exp/log
	let y = Real::from_int(2).pow(&Real::from_fraction(1, 2).unwrap());
	test_digits(&y, 10, "1.4142135623");
}

#[test]
fn user_supplied_streams() {
	// sqrt(2) as a handwritten simple stream
	let sqrt2 = Real::from_simple_iter(std::iter::once(1i64).chain(std::iter::repeat_with(|| 2)));
	test_digits(&sqrt2, 10, "1.4142135623");

	// pi as a generalized stream: 0 + 4/(1 + 1/(3 + 4/(5 + 9/(...))))
	let pi_gcf = Real::from_gcf_iter(GcfPi::default());
	test_digits(&pi_gcf, 10, "3.1415926535");
}

#[derive(Default)]
struct GcfPi {
	m: i64,
	n: i64,
}

impl Iterator for GcfPi {
	type Item = (i64, i64);

	fn next(&mut self) -> Option<(i64, i64)> {
		if self.m == 0 {
			self.m = 1;
			self.n = 1;
			return Some((0, 4));
		}
		let term = (self.m, self.n);
		self.m += 2;
		self.n += self.m;
		Some(term)
	}
}
