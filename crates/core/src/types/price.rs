//! Integer price arithmetic in major currency units.
//!
//! The inventory platform reports sale prices in minor units (kopecks,
//! cents). Everything user-facing works in whole major units: conversion is
//! integer floor division, line totals are plain multiplication, and no
//! rounding happens after the conversion at fetch time.

/// Minor currency units per major unit (kopecks per ruble, cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Convert a minor-unit amount to major units, flooring toward zero.
///
/// `149_999` minor units becomes `1_499` major units; fractional remainders
/// are discarded, never rounded up.
#[must_use]
pub const fn major_from_minor(minor: i64) -> i64 {
    minor / MINOR_PER_MAJOR
}
