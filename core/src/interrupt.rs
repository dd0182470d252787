use crate::error::Error;
use crate::result::RResult;

/// Allows aborting a computation that would otherwise pull terms forever,
/// e.g. the digit stream of two equal reals being compared.
pub trait Interrupt {
	fn should_interrupt(&self) -> bool;
}

#[derive(Default)]
pub struct Never;

impl Interrupt for Never {
	fn should_interrupt(&self) -> bool {
		false
	}
}

pub(crate) fn test_int(int: &dyn Interrupt) -> RResult<()> {
	if int.should_interrupt() {
		Err(Error::Interrupted)
	} else {
		Ok(())
	}
}
