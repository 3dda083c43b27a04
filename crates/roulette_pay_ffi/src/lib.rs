//! Flutter-facing bridge for RoulettePay.

pub mod api;
