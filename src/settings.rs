//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse object settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid object settings: {0}")]
    Invalid(String),
}

/// Interaction and appearance constants shared by every object on a canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSettings {
    /// Edge length of the square resize zone in the bottom-right corner
    pub resize_field_size: i32,
    /// Smallest width/height a resize gesture can produce
    pub min_object_size: i32,
    pub emphasis_highlighted: u8,
    pub emphasis_subtle: u8,
    pub title_font_size: f32,
    pub axis_stroke_length: i32,
}

impl Default for ObjectSettings {
    fn default() -> Self {
        ObjectSettings {
            resize_field_size: 10,
            min_object_size: 1,
            emphasis_highlighted: 50,
            emphasis_subtle: 10,
            title_font_size: 12.0,
            axis_stroke_length: 10,
        }
    }
}

impl ObjectSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: ObjectSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.resize_field_size <= 0 {
            return Err(SettingsError::Invalid(format!(
                "resize_field_size must be positive, got {}",
                self.resize_field_size
            )));
        }
        if self.min_object_size <= 0 {
            return Err(SettingsError::Invalid(format!(
                "min_object_size must be positive, got {}",
                self.min_object_size
            )));
        }
        if self.title_font_size <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "title_font_size must be positive, got {}",
                self.title_font_size
            )));
        }
        Ok(())
    }
}
