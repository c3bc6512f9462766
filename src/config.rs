//! Dataset generation settings, loadable from YAML.

use std::path::Path;

use serde::Deserialize;

use crate::augment::NoiseConfig;
use crate::features::InputChannels;
use crate::raster::RasterConfig;
use crate::types::{
    DEFAULT_GRID_RANGE, DEFAULT_GRID_SIZE, DEFAULT_MIN_POINTS_IN_BOX, DEFAULT_SEARCH_PADDING,
    GridInfo, LabelGridError,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Feature map width in cells.
    #[serde(default = "default_grid_size")]
    pub width: u32,
    /// Feature map height in cells. Must equal `width`.
    #[serde(default = "default_grid_size")]
    pub height: u32,
    /// Half extent of the covered area, meters.
    #[serde(default = "default_range", deserialize_with = "deserialize_range")]
    pub range: f32,
    #[serde(default)]
    pub use_constant_feature: bool,
    #[serde(default = "default_true")]
    pub use_intensity_feature: bool,
    /// Stop after this many samples. `None` processes every frame.
    #[serde(default)]
    pub end_id: Option<usize>,
    /// Extra augmented samples per frame.
    #[serde(default)]
    pub augmentation_num: usize,
    #[serde(default)]
    pub add_noise: bool,
    #[serde(default = "default_min_points_in_box")]
    pub min_points_in_box: usize,
    #[serde(default = "default_search_padding")]
    pub search_padding: i32,
    /// Bound of the random vertical shift applied to augmented samples, meters.
    #[serde(default = "default_z_translation_range")]
    pub z_translation_range: f32,
    /// Seed for augmentation and noise. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub noise: NoiseConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            range: DEFAULT_GRID_RANGE,
            use_constant_feature: false,
            use_intensity_feature: true,
            end_id: None,
            augmentation_num: 0,
            add_noise: false,
            min_points_in_box: DEFAULT_MIN_POINTS_IN_BOX,
            search_padding: DEFAULT_SEARCH_PADDING,
            z_translation_range: default_z_translation_range(),
            seed: None,
            noise: NoiseConfig::default(),
        }
    }
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_range() -> f32 {
    DEFAULT_GRID_RANGE
}

fn default_true() -> bool {
    true
}

fn default_min_points_in_box() -> usize {
    DEFAULT_MIN_POINTS_IN_BOX
}

fn default_search_padding() -> i32 {
    DEFAULT_SEARCH_PADDING
}

fn default_z_translation_range() -> f32 {
    0.5
}

fn deserialize_range<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("range must be a positive number"))
    }
}

impl DatasetConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LabelGridError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelGridError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check everything that must hold before any frame is processed.
    pub fn validate(&self) -> Result<(), LabelGridError> {
        self.grid_info()?;
        if self.search_padding < 0 {
            return Err(LabelGridError::InvalidConfig(
                "search_padding must not be negative".to_string(),
            ));
        }
        if !(self.z_translation_range >= 0.0 && self.z_translation_range.is_finite()) {
            return Err(LabelGridError::InvalidConfig(
                "z_translation_range must be a non-negative number".to_string(),
            ));
        }
        if self.add_noise {
            self.noise.validate()?;
        }
        Ok(())
    }

    /// Grid metadata. Fails for non-square grids.
    pub fn grid_info(&self) -> Result<GridInfo, LabelGridError> {
        GridInfo::new(self.width, self.height, self.range)
    }

    pub fn raster_config(&self) -> Result<RasterConfig, LabelGridError> {
        Ok(RasterConfig {
            info: self.grid_info()?,
            min_points_in_box: self.min_points_in_box,
            search_padding: self.search_padding,
        })
    }

    pub fn input_channels(&self) -> InputChannels {
        InputChannels::from_flags(self.use_constant_feature, self.use_intensity_feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DatasetConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, DatasetConfig::default());
        assert_eq!(config.input_channels().count(), 6);
        let raster = config.raster_config().unwrap();
        assert_eq!(raster.info.size, 672);
        assert_eq!(raster.info.range, 70.0);
        assert_eq!(raster.min_points_in_box, 4);
        assert_eq!(raster.search_padding, 1);
    }

    #[test]
    fn non_square_grid_is_rejected() {
        let err = DatasetConfig::from_yaml_str("width: 640\nheight: 480\n").unwrap_err();
        assert!(matches!(err, LabelGridError::NonSquareGrid { .. }));
    }

    #[test]
    fn negative_range_is_rejected() {
        let err = DatasetConfig::from_yaml_str("range: -5.0\n").unwrap_err();
        assert!(matches!(err, LabelGridError::Yaml(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(DatasetConfig::from_yaml_str("grid_size: 12\n").is_err());
    }
}
