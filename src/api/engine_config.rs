use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PRICE_PADDING_RATIO, HitTestConfig, PlotArea};
use crate::error::{ChartError, ChartResult};
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Public engine bootstrap configuration.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEngineConfig {
    /// Initial plot area; hosts usually set it once the chart has laid out.
    #[serde(default)]
    pub plot_area: Option<PlotArea>,
    #[serde(default)]
    pub hit_test: HitTestConfig,
    /// Multiplicative padding applied to candle price extrema.
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_handle_radius_px")]
    pub handle_radius_px: f64,
    /// Extra stroke width for hovered, selected or dragged lines.
    #[serde(default = "default_emphasis_stroke_delta_px")]
    pub emphasis_stroke_delta_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    /// Seeds id suffixes and palette picks; entropy-seeded when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for AnnotationEngineConfig {
    fn default() -> Self {
        Self {
            plot_area: None,
            hit_test: HitTestConfig::default(),
            price_padding_ratio: default_price_padding_ratio(),
            storage_key: default_storage_key(),
            handle_radius_px: default_handle_radius_px(),
            emphasis_stroke_delta_px: default_emphasis_stroke_delta_px(),
            label_font_size_px: default_label_font_size_px(),
            rng_seed: None,
        }
    }
}

impl AnnotationEngineConfig {
    #[must_use]
    pub fn with_plot_area(mut self, plot_area: PlotArea) -> Self {
        self.plot_area = Some(plot_area);
        self
    }

    #[must_use]
    pub fn with_hit_test(mut self, hit_test: HitTestConfig) -> Self {
        self.hit_test = hit_test;
        self
    }

    #[must_use]
    pub fn with_price_padding_ratio(mut self, ratio: f64) -> Self {
        self.price_padding_ratio = ratio;
        self
    }

    /// Sets the storage slot used for the persisted collection.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_handle_radius_px(mut self, radius: f64) -> Self {
        self.handle_radius_px = radius;
        self
    }

    #[must_use]
    pub fn with_emphasis_stroke_delta_px(mut self, delta: f64) -> Self {
        self.emphasis_stroke_delta_px = delta;
        self
    }

    #[must_use]
    pub fn with_label_font_size_px(mut self, size: f64) -> Self {
        self.label_font_size_px = size;
        self
    }

    /// Makes generated ids and colors reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if let Some(plot_area) = self.plot_area {
            plot_area.validate()?;
        }
        self.hit_test.validate()?;
        if !self.price_padding_ratio.is_finite()
            || !(0.0..1.0).contains(&self.price_padding_ratio)
        {
            return Err(ChartError::InvalidData(
                "price padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "storage key must not be empty".to_owned(),
            ));
        }
        for (value, name) in [
            (self.handle_radius_px, "handle_radius_px"),
            (self.label_font_size_px, "label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.emphasis_stroke_delta_px.is_finite() || self.emphasis_stroke_delta_px < 0.0 {
            return Err(ChartError::InvalidData(
                "`emphasis_stroke_delta_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_price_padding_ratio() -> f64 {
    DEFAULT_PRICE_PADDING_RATIO
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_owned()
}

fn default_handle_radius_px() -> f64 {
    6.0
}

fn default_emphasis_stroke_delta_px() -> f64 {
    1.0
}

fn default_label_font_size_px() -> f64 {
    10.0
}
