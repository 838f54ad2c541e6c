//! YAML presets for [`DespillParameters`].
//!
//! Missing keys fall back to the defaults, so a preset only needs the
//! values it changes:
//!
//! ```rust
//! use despill_ops::{ColorSelect, DespillParameters};
//!
//! let p = DespillParameters::from_yaml_str("color: blue\nhue_limit: 0.7\n").unwrap();
//! assert_eq!(p.color, ColorSelect::Blue);
//! assert_eq!(p.hue_limit, 0.7);
//! assert_eq!(p.white_point, 1.0);
//! ```

use crate::{DespillParameters, OpsError, OpsResult};
use std::path::Path;
use tracing::debug;

impl DespillParameters {
    /// Parses a YAML preset and validates it.
    ///
    /// # Errors
    ///
    /// [`OpsError::Preset`] on malformed YAML or unknown keys,
    /// [`OpsError::InvalidParameter`] on out-of-range values.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let params: Self =
            serde_yaml::from_str(yaml).map_err(|e| OpsError::Preset(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Loads a preset file.
    pub fn load(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OpsError::Preset(format!("{}: {}", path.display(), e)))?;
        let params = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), "preset loaded");
        Ok(params)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        serde_yaml::to_string(self).map_err(|e| OpsError::Preset(e.to_string()))
    }

    /// Writes a preset file.
    pub fn save(&self, path: impl AsRef<Path>) -> OpsResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml_string()?)
            .map_err(|e| OpsError::Preset(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "preset saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelSlot, ColorSelect, DespillMath, OutputType};
    use despill_math::{Color3, LumaMode};

    #[test]
    fn test_partial_preset() {
        let yaml = "\
color: pick
pick: [0.2, 0.3, 0.9]
despill_math: custom
custom_weight: -0.5
respill_math: rec2020
output_type: spill
output_channel: red
";
        let p = DespillParameters::from_yaml_str(yaml).unwrap();
        assert_eq!(p.color, ColorSelect::Pick);
        assert_eq!(p.pick, Color3::new(0.2, 0.3, 0.9));
        assert_eq!(p.despill_math, DespillMath::Custom);
        assert_eq!(p.respill_math, LumaMode::Rec2020);
        assert_eq!(p.output_type, OutputType::Spill);
        assert_eq!(p.output_channel, ChannelSlot::Red);
        assert_eq!(p.protect_falloff, 2.0);
    }

    #[test]
    fn test_bad_presets() {
        assert!(matches!(
            DespillParameters::from_yaml_str("color: purple\n"),
            Err(OpsError::Preset(_))
        ));
        assert!(matches!(
            DespillParameters::from_yaml_str("hue_limt: 0.5\n"),
            Err(OpsError::Preset(_))
        ));
        assert!(matches!(
            DespillParameters::from_yaml_str("hue_limit: -2\n"),
            Err(OpsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blue.yaml");
        let p = DespillParameters {
            protect_tones: true,
            protect_color: Color3::new(0.8, 0.6, 0.5),
            ..DespillParameters::blue_screen()
        };
        p.save(&path).unwrap();
        assert_eq!(DespillParameters::load(&path).unwrap(), p);
    }

    #[test]
    fn test_missing_file() {
        let err = DespillParameters::load("/nonexistent/preset.yaml").unwrap_err();
        assert!(err.to_string().contains("preset.yaml"));
    }
}
