//! Text serialization for ToneMappingParams
//!
//! Line-oriented `key value` format:
//!
//! ```text
//! Tonemapping_by_PAUL
//! version 1
//! info_fast_mode 0
//! low_saturation 100
//! high_saturation 100
//! stretch_contrast 1
//! function_id 0
//! STAGE 0
//! enabled 1
//! power 30
//! blur 80
//! STAGE 1
//! ...
//! unsharp_mask_enabled 0
//! unsharp_mask_power 30
//! unsharp_mask_blur 4
//! unsharp_mask_threshold 0
//! ```
//!
//! Unknown keys are skipped and missing keys keep their defaults. Values
//! go through the clamping setters, so an out of range value in a file is
//! accepted and clamped. `enabled`/`power`/`blur` apply to the stage named
//! by the most recent `STAGE` line; they are ignored when that index is out
//! of range.

use super::{MAX_STAGES, ToneFunction, ToneMappingParams};
use crate::error::{Error, Result};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// First line of every parameter file
pub const PARAMS_HEADER: &str = "Tonemapping_by_PAUL";

/// Format version written by this crate
const PARAMS_VERSION: i32 = 1;

/// Maximum input size in bytes to prevent unbounded memory growth.
const MAX_INPUT_SIZE: usize = 1_000_000;

impl ToneMappingParams {
    /// Read parameters from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let buf = read_limited(reader)?;
        Self::read_from_bytes(&buf)
    }

    /// Read parameters from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read parameters from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the header is missing, the version
    /// is not supported, or a known key carries an unparsable value.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("invalid UTF-8: {e}")))?;
        parse_params(text)
    }

    /// Write parameters to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "{PARAMS_HEADER}")?;
        writeln!(writer, "version {PARAMS_VERSION}")?;
        writeln!(writer, "info_fast_mode {}", self.fast_mode as u8)?;
        writeln!(writer, "low_saturation {}", self.low_saturation)?;
        writeln!(writer, "high_saturation {}", self.high_saturation)?;
        writeln!(writer, "stretch_contrast {}", self.stretch_contrast as u8)?;
        writeln!(writer, "function_id {}", self.function.id())?;

        for (i, stage) in self.stages.iter().enumerate() {
            writeln!(writer, "STAGE {i}")?;
            writeln!(writer, "enabled {}", stage.enabled as u8)?;
            writeln!(writer, "power {}", stage.power)?;
            writeln!(writer, "blur {}", stage.blur)?;
        }

        let usm = &self.unsharp_mask;
        writeln!(writer, "unsharp_mask_enabled {}", usm.enabled as u8)?;
        writeln!(writer, "unsharp_mask_power {}", usm.power)?;
        writeln!(writer, "unsharp_mask_blur {}", usm.blur)?;
        writeln!(writer, "unsharp_mask_threshold {}", usm.threshold)?;
        Ok(())
    }

    /// Write parameters to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write parameters to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

/// Read from a reader with a size limit, returning a clear error if exceeded.
fn read_limited(reader: &mut impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take((MAX_INPUT_SIZE + 1) as u64)
        .read_to_end(&mut buf)?;
    if buf.len() > MAX_INPUT_SIZE {
        return Err(Error::DecodeError(format!(
            "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
        )));
    }
    Ok(buf)
}

fn parse_params(text: &str) -> Result<ToneMappingParams> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some(PARAMS_HEADER) => {}
        Some(other) => {
            return Err(Error::DecodeError(format!(
                "not a tone mapping parameter file: header '{other}'"
            )));
        }
        None => return Err(Error::DecodeError("empty parameter file".into())),
    }

    let mut params = ToneMappingParams::default();
    // Stage addressed by stage-local keys; None when out of range.
    let mut stage: Option<usize> = None;

    for line in lines {
        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((k, v)) => (k, v.trim()),
            None => (line, ""),
        };

        match key {
            "version" => {
                let version: i32 = parse_value(key, value)?;
                if version != PARAMS_VERSION {
                    return Err(Error::DecodeError(format!(
                        "unsupported parameter file version: {version}"
                    )));
                }
            }
            "info_fast_mode" => params.set_fast_mode(parse_flag(key, value)?),
            "low_saturation" => params.set_low_saturation(parse_value(key, value)?),
            "high_saturation" => params.set_high_saturation(parse_value(key, value)?),
            "stretch_contrast" => params.set_stretch_contrast(parse_flag(key, value)?),
            "function_id" => params.set_function(ToneFunction::from_id(parse_value(key, value)?)),
            "STAGE" => {
                let index: i64 = parse_value(key, value)?;
                stage = usize::try_from(index).ok().filter(|&i| i < MAX_STAGES);
            }
            "enabled" => {
                let flag = parse_flag(key, value)?;
                if let Some(s) = stage.and_then(|i| params.stage_mut(i)) {
                    s.set_enabled(flag);
                }
            }
            "power" => {
                let power = parse_value(key, value)?;
                if let Some(s) = stage.and_then(|i| params.stage_mut(i)) {
                    s.set_power(power);
                }
            }
            "blur" => {
                let blur = parse_value(key, value)?;
                if let Some(s) = stage.and_then(|i| params.stage_mut(i)) {
                    s.set_blur(blur);
                }
            }
            "unsharp_mask_enabled" => params
                .unsharp_mask_mut()
                .set_enabled(parse_flag(key, value)?),
            "unsharp_mask_power" => params
                .unsharp_mask_mut()
                .set_power(parse_value(key, value)?),
            "unsharp_mask_blur" => params
                .unsharp_mask_mut()
                .set_blur(parse_value(key, value)?),
            "unsharp_mask_threshold" => params
                .unsharp_mask_mut()
                .set_threshold(parse_value(key, value)?),
            _ => {}
        }
    }

    Ok(params)
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| Error::DecodeError(format!("invalid value '{value}' for '{key}': {e}")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    let v: i32 = parse_value(key, value)?;
    Ok(v != 0)
}
