//! Register definitions for the RC-S730
//! Taken from the RC-S730 command reference manual

pub mod map;

mod control;
mod interrupt;

pub use control::*;
pub use interrupt::*;
