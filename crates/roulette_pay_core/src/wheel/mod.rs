//! Wheel outcome resolution.
//!
//! # Responsibility
//! - Lay out interleaved slices for `N` participants with `K` slices each.
//! - Compute the eased angle of a spin for any elapsed fraction.
//! - Decode a committed final angle into a winning participant index.
//!
//! # Invariants
//! - Slice `i` always belongs to participant `i mod N`.
//! - Decode is a pure function of angle and layout; randomness lives only in
//!   `rotation::RotationSource`.

pub mod decode;
pub mod driver;
pub mod layout;
pub mod motion;
pub mod rotation;
