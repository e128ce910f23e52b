//! Error conversions at the infrastructure boundary

pub mod conversions;
