//! Core data types for the projection engine
//!
//! This module contains the request and result types shared by every
//! component. Types are organized into submodules by domain:
//!
//! - `risk` - risk tiers and their annual-return ranges
//! - `request` - simulation requests and validated plan inputs
//! - `results` - distribution statistics and Monte Carlo summaries

mod request;
mod results;
mod risk;

pub use request::*;
pub use results::*;
pub use risk::*;
