//! rams-core: pure domain logic for the road asset management platform.
//!
//! Everything in this crate is synchronous, side-effect-free computation
//! over plain data: condition/urgency classification, DERU defect scoring,
//! dashboard aggregation, and input validation. No I/O, no database types,
//! no async. The `rams-db` and `rams-api` crates are hosts that project
//! their rows into the input shapes defined here.

pub mod aggregation;
pub mod assets;
pub mod condition;
pub mod deru;
pub mod error;
pub mod presentation;
pub mod types;
pub mod urgency;
pub mod validation;
pub mod work_orders;
