//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use localcontrast_core::{PixelBuffer, PixelData};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results (default)
    #[default]
    Compare,
    /// Compare and dump buffers for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "stretch")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Check a condition, recording `what` on failure
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Compare two buffers for exact equality
    pub fn compare_buffers(&mut self, expected: &PixelBuffer, actual: &PixelBuffer) -> bool {
        self.compare_buffers_within(expected, actual, 0)
    }

    /// Compare two buffers, allowing each sample to differ by `max_diff`
    pub fn compare_buffers_within(
        &mut self,
        expected: &PixelBuffer,
        actual: &PixelBuffer,
        max_diff: u32,
    ) -> bool {
        self.index += 1;
        if self.display() {
            dump_buffer("expected", expected);
            dump_buffer("actual", actual);
        }

        match max_sample_diff(expected, actual) {
            Ok(diff) if diff <= max_diff => true,
            Ok(diff) => {
                let msg = format!(
                    "Failure in {}_reg: buffer comparison for index {}\n\
                     max sample difference = {} but allowed = {}",
                    self.test_name, self.index, diff, max_diff
                );
                self.fail(msg);
                false
            }
            Err(e) => {
                let msg = format!(
                    "Failure in {}_reg: buffer comparison for index {} - {}",
                    self.test_name, self.index, e
                );
                self.fail(msg);
                false
            }
        }
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Largest absolute difference between corresponding samples
///
/// # Errors
///
/// Returns [`TestError::LayoutMismatch`] if the buffers differ in
/// dimensions, channel count, or depth.
pub fn max_sample_diff(a: &PixelBuffer, b: &PixelBuffer) -> TestResult<u32> {
    if a.dimensions() != b.dimensions() || a.channels() != b.channels() {
        return Err(TestError::LayoutMismatch(format!(
            "{:?}x{} vs {:?}x{}",
            a.dimensions(),
            a.channels(),
            b.dimensions(),
            b.channels()
        )));
    }
    let diff = match (a.data(), b.data()) {
        (PixelData::Bit8(x), PixelData::Bit8(y)) => x
            .iter()
            .zip(y)
            .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs())
            .max(),
        (PixelData::Bit16(x), PixelData::Bit16(y)) => x
            .iter()
            .zip(y)
            .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs())
            .max(),
        _ => {
            return Err(TestError::LayoutMismatch(format!(
                "{}-bit vs {}-bit",
                a.depth().bits(),
                b.depth().bits()
            )));
        }
    };
    Ok(diff.unwrap_or(0))
}

fn dump_buffer(label: &str, buf: &PixelBuffer) {
    eprintln!(
        "{label}: {}x{} {}-bit, {} channels",
        buf.width(),
        buf.height(),
        buf.depth().bits(),
        buf.channels()
    );
    for y in 0..buf.height().min(8) {
        let row: Vec<String> = (0..buf.width().min(8))
            .filter_map(|x| buf.get_rgb(x, y))
            .map(|[r, g, b]| format!("({r},{g},{b})"))
            .collect();
        eprintln!("  {}", row.join(" "));
    }
}
