use crate::error::Error;

pub type RResult<T> = Result<T, Error>;
