//! Key/value form of ToneMappingParams
//!
//! Image editors record applied filters in an edit history as flat lists of
//! named string values. This module converts parameters to and from that
//! form. Keys:
//!
//! - `stretchContrast`, `lowSaturation`, `highSaturation`, `functionId`,
//!   `fastMode`
//! - `stage[i]:enabled`, `stage[i]:power`, `stage[i]:blur` for each stage
//! - `unsharpMask:enabled`, `unsharpMask:power`, `unsharpMask:blur`,
//!   `unsharpMask:threshold`
//!
//! Reading is lenient: unknown keys are skipped and unparsable values keep
//! their defaults.

use super::{ToneFunction, ToneMappingParams};

impl ToneMappingParams {
    /// Flatten the parameters into ordered `(key, value)` pairs.
    pub fn to_action_params(&self) -> Vec<(String, String)> {
        let mut out = vec![
            ("stretchContrast".to_string(), self.stretch_contrast.to_string()),
            ("lowSaturation".to_string(), self.low_saturation.to_string()),
            ("highSaturation".to_string(), self.high_saturation.to_string()),
            ("functionId".to_string(), self.function.id().to_string()),
            ("fastMode".to_string(), self.fast_mode.to_string()),
        ];

        for (i, stage) in self.stages.iter().enumerate() {
            out.push((format!("stage[{i}]:enabled"), stage.enabled.to_string()));
            out.push((format!("stage[{i}]:power"), stage.power.to_string()));
            out.push((format!("stage[{i}]:blur"), stage.blur.to_string()));
        }

        let usm = &self.unsharp_mask;
        out.push(("unsharpMask:enabled".to_string(), usm.enabled.to_string()));
        out.push(("unsharpMask:power".to_string(), usm.power.to_string()));
        out.push(("unsharpMask:blur".to_string(), usm.blur.to_string()));
        out.push(("unsharpMask:threshold".to_string(), usm.threshold.to_string()));
        out
    }

    /// Rebuild parameters from `(key, value)` pairs, starting from defaults.
    pub fn from_action_params<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = ToneMappingParams::default();
        for (key, value) in pairs {
            params.apply_action_value(key.as_ref(), value.as_ref().trim());
        }
        params
    }

    fn apply_action_value(&mut self, key: &str, value: &str) {
        match key {
            "stretchContrast" => {
                if let Some(v) = parse_bool(value) {
                    self.set_stretch_contrast(v);
                }
            }
            "lowSaturation" => {
                if let Ok(v) = value.parse() {
                    self.set_low_saturation(v);
                }
            }
            "highSaturation" => {
                if let Ok(v) = value.parse() {
                    self.set_high_saturation(v);
                }
            }
            "functionId" => {
                if let Ok(v) = value.parse() {
                    self.set_function(ToneFunction::from_id(v));
                }
            }
            "fastMode" => {
                if let Some(v) = parse_bool(value) {
                    self.set_fast_mode(v);
                }
            }
            "unsharpMask:enabled" => {
                if let Some(v) = parse_bool(value) {
                    self.unsharp_mask.set_enabled(v);
                }
            }
            "unsharpMask:power" => {
                if let Ok(v) = value.parse() {
                    self.unsharp_mask.set_power(v);
                }
            }
            "unsharpMask:blur" => {
                if let Ok(v) = value.parse() {
                    self.unsharp_mask.set_blur(v);
                }
            }
            "unsharpMask:threshold" => {
                if let Ok(v) = value.parse() {
                    self.unsharp_mask.set_threshold(v);
                }
            }
            _ => {
                if let Some((index, field)) = parse_stage_key(key) {
                    self.apply_stage_value(index, field, value);
                }
            }
        }
    }

    fn apply_stage_value(&mut self, index: usize, field: &str, value: &str) {
        let Some(stage) = self.stage_mut(index) else {
            return;
        };
        match field {
            "enabled" => {
                if let Some(v) = parse_bool(value) {
                    stage.set_enabled(v);
                }
            }
            "power" => {
                if let Ok(v) = value.parse() {
                    stage.set_power(v);
                }
            }
            "blur" => {
                if let Ok(v) = value.parse() {
                    stage.set_blur(v);
                }
            }
            _ => {}
        }
    }
}

/// Split `stage[i]:field` into `(i, field)`.
fn parse_stage_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix("stage[")?;
    let (index, field) = rest.split_once("]:")?;
    Some((index.parse().ok()?, field))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::StageParams;

    #[test]
    fn test_action_roundtrip() {
        let mut p = ToneMappingParams::default();
        p.set_stage(3, StageParams::new(true, 77.7, 0.5));
        p.set_high_saturation(20);
        p.set_function(ToneFunction::Linear);
        p.unsharp_mask_mut().set_enabled(true);
        p.unsharp_mask_mut().set_threshold(42);

        let pairs = p.to_action_params();
        assert_eq!(pairs.len(), 5 + 3 * 4 + 4);
        assert_eq!(ToneMappingParams::from_action_params(&pairs), p);
    }

    #[test]
    fn test_action_lenient() {
        let pairs = [
            ("lowSaturation", "abc"),
            ("stage[1]:enabled", "1"),
            ("stage[1]:blur", "12.5"),
            ("stage[7]:enabled", "true"),
            ("stage[x]:power", "3"),
            ("unknown", "1"),
        ];
        let p = ToneMappingParams::from_action_params(&pairs);
        assert_eq!(p.low_saturation(), 100);
        assert!(p.stage(1).unwrap().enabled());
        assert_eq!(p.stage(1).unwrap().blur(), 12.5);
    }

    #[test]
    fn test_parse_stage_key() {
        assert_eq!(parse_stage_key("stage[2]:power"), Some((2, "power")));
        assert_eq!(parse_stage_key("stage2:power"), None);
        assert_eq!(parse_stage_key("stage[-1]:power"), None);
    }
}
