//! Single test binary entry point.
//!
//! Every test lives in this one binary so the crate is linked once.
//!
//! Structure:
//! - helpers: Builders and drivers shared by the other modules
//! - integration: Multi-component workflow tests through the controller
//! - unit: Single-component unit tests

mod unit;
