//! Curtain quantity calculator.

pub mod curtain;

pub use curtain::*;
