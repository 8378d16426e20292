//! # Configuration Module
//!
//! Central home for the crate's constants so rendering and session code
//! agree on shared values instead of scattering magic numbers.

pub mod constants;
pub use constants::*;
