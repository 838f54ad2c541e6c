//! CLI command implementations

pub mod apply;
pub mod batch;
pub mod preset;

use crate::DespillOverrides;
use anyhow::{Context, Result};
use despill_core::ImageBuf;
use despill_io::WriteOptions;
use despill_ops::DespillParameters;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageBuf> {
    despill_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &ImageBuf, float: bool) -> Result<()> {
    despill_io::write_with(path, image, &WriteOptions { float })
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Preset file (or defaults) with command-line overrides on top.
pub fn build_params(preset: Option<&Path>, overrides: &DespillOverrides) -> Result<DespillParameters> {
    let mut params = match preset {
        Some(path) => DespillParameters::load(path)
            .with_context(|| format!("Failed to load preset: {}", path.display()))?,
        None => DespillParameters::default(),
    };
    overrides.apply_to(&mut params);
    params.validate().context("Invalid parameters")?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use despill_ops::{ColorSelect, DespillMath};

    #[test]
    fn test_flags_override_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blue.yaml");
        let mut base = DespillParameters::blue_screen();
        base.hue_limit = 0.5;
        base.save(&path).unwrap();

        let overrides = DespillOverrides {
            math: Some(DespillMath::Min),
            ..Default::default()
        };
        let params = build_params(Some(path.as_path()), &overrides).unwrap();
        assert_eq!(params.color, ColorSelect::Blue);
        assert_eq!(params.hue_limit, 0.5);
        assert_eq!(params.despill_math, DespillMath::Min);
    }

    #[test]
    fn test_defaults_without_preset() {
        let params = build_params(None, &DespillOverrides::default()).unwrap();
        assert_eq!(params, DespillParameters::default());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = DespillOverrides {
            hue_limit: Some(f32::NAN),
            ..Default::default()
        };
        assert!(build_params(None, &overrides).is_err());
    }

    #[test]
    fn test_missing_preset() {
        let err = build_params(Some(Path::new("/nonexistent/p.yaml")), &DespillOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load preset"));
    }
}
