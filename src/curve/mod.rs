//! Curve25519 / Ed25519 arithmetic: field elements, scalars, and Edwards
//! group operations.
//!
//! This module carries no precomputed tables; all scalar multiplication is
//! double-and-add over the formulas in [`group`]. See `DESIGN.md` for why.

pub(crate) mod field;
pub(crate) mod group;
pub(crate) mod scalar;
