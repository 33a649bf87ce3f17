//! Pin level drivers.

pub mod gpio;
pub mod shift_register;
