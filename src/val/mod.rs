//! Value types which have no suitable representation in the ecosystem.

pub mod float;

pub use float::{BigFloat, Form, RoundingMode};
