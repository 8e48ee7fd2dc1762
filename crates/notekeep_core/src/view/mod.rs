//! Derived note views for display.
//!
//! # Responsibility
//! - Turn the held note collection plus search/sort input into the ordered
//!   list a front-end renders.
//!
//! # Invariants
//! - Projection is pure: inputs are never mutated and equal inputs give
//!   equal, identically ordered output.

pub mod projector;
