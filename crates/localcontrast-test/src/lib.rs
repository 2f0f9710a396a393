//! localcontrast-test - Regression test framework for the local contrast
//! tone mapper
//!
//! This crate provides a small regression test harness and synthetic test
//! images. The harness supports two modes:
//!
//! - **Compare**: Check results and record failures (default)
//! - **Display**: Additionally dump compared buffers to stderr
//!
//! # Usage
//!
//! ```ignore
//! use localcontrast_test::{RegParams, images};
//!
//! let mut rp = RegParams::new("stretch");
//! let src = images::gradient_rgb(16, 16).unwrap();
//! rp.compare_values(255.0, max as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod images;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, max_sample_diff};
