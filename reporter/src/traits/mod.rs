//!
//! Traits Module
//!
//! - [`strategy`]: The [`strategy::DocumentStrategy`] trait implemented by every report layout.

pub mod strategy;
