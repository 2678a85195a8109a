//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::object_config::DisplayFlags;

/// Last known process status reported by the data acquisition side
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectStatus {
    #[default]
    None,
    Red,
    Yellow,
    Green,
}

impl ObjectStatus {
    pub const ALL: [ObjectStatus; 4] = [
        ObjectStatus::None,
        ObjectStatus::Red,
        ObjectStatus::Yellow,
        ObjectStatus::Green,
    ];

    /// Cycle to the next status, wrapping around after green
    pub fn next(self) -> Self {
        match self {
            ObjectStatus::None => ObjectStatus::Red,
            ObjectStatus::Red => ObjectStatus::Yellow,
            ObjectStatus::Yellow => ObjectStatus::Green,
            ObjectStatus::Green => ObjectStatus::None,
        }
    }
}

pub const LIGHT_GRAY: Color32 = Color32::from_rgb(192, 192, 192);
pub const DARK_GRAY: Color32 = Color32::from_rgb(128, 128, 128);
pub const RED_ACCENT: Color32 = Color32::from_rgb(171, 27, 227);
pub const YELLOW_ACCENT: Color32 = Color32::from_rgb(228, 221, 29);
pub const GREEN_ACCENT: Color32 = Color32::from_rgb(14, 121, 7);

/// Fill and border colours derived from the status and display flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: Color32,
    pub line: Color32,
}

impl Palette {
    pub fn for_status(status: ObjectStatus, flags: &DisplayFlags) -> Self {
        let mut palette = if flags.is_dynamic {
            Palette {
                fill: fill_colour(status),
                line: line_colour(status),
            }
        } else {
            Palette {
                fill: Color32::WHITE,
                line: Color32::BLACK,
            }
        };

        if !flags.show_background {
            palette.fill = Color32::TRANSPARENT;
        }
        palette
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::for_status(ObjectStatus::None, &DisplayFlags::default())
    }
}

fn fill_colour(status: ObjectStatus) -> Color32 {
    match status {
        ObjectStatus::None => LIGHT_GRAY,
        ObjectStatus::Red => Color32::from_rgb(255, 0, 0),
        ObjectStatus::Yellow => Color32::from_rgb(255, 255, 0),
        ObjectStatus::Green => Color32::from_rgb(0, 255, 0),
    }
}

fn line_colour(status: ObjectStatus) -> Color32 {
    match status {
        ObjectStatus::None => DARK_GRAY,
        ObjectStatus::Red => RED_ACCENT,
        ObjectStatus::Yellow => YELLOW_ACCENT,
        ObjectStatus::Green => GREEN_ACCENT,
    }
}
