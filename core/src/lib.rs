#![forbid(unsafe_code)]

//! Exact real arithmetic with lazy generalized continued fractions.
//!
//! A [`Real`] is a stream of continued-fraction terms rather than a finite
//! approximation: every arithmetic operation wires up a stream transducer,
//! and consumers (decimal rendering, float coercion, comparison) pull just
//! enough terms to answer their query exactly.
//!
//! ```
//! use reals_core::Real;
//!
//! let x = Real::from_fraction(1, 3).unwrap();
//! let y = (x * 2).sqrt();
//! assert_eq!(y.evaluate(10, false).unwrap(), "0.8164965809");
//! ```
//!
//! Exact equality of reals is undecidable, so comparisons are bracketed:
//! [`compare`] reports [`ComparisonResult::Unknown`] once both brackets are
//! tighter than the given epsilon without separating. Consumers that could
//! otherwise loop forever accept an [`Interrupt`].

mod algebraic;
mod approximation;
mod bihomographic;
mod compare;
mod computation;
mod constants;
mod digits;
mod error;
mod functions;
mod homographic;
mod interrupt;
mod monotonic;
mod quadratic;
mod real;
mod result;
mod term;

pub use approximation::{best_rational_approximations, interval, Approximation, IntervalComputation};
pub use compare::{compare, ComparisonResult};
pub use computation::{CachedComputation, Computation};
pub use constants::{e, ln_2, phi, pi};
pub use error::Error;
pub use functions::{exp_fraction, ln_fraction, sin_fraction, sqrt_fraction, sqrt_int};
pub use interrupt::{Interrupt, Never};
pub use real::Real;
pub use result::RResult;
pub use term::Term;
