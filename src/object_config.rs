//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

use std::fmt;

use eframe::egui;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::object_status::ObjectStatus;

/// Stable identity of a SCADA object, carried by selection and double-click events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        ObjectId(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// Position and size of an object on the host canvas, in integer canvas units.
///
/// Width and height are never negative: every constructor and setter clamps at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Geometry {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn top_left(&self) -> Point<i32> {
        Point::new(self.x, self.y)
    }

    pub fn move_to(&mut self, top_left: Point<i32>) {
        self.x = top_left.x;
        self.y = top_left.y;
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    /// Whether a point in object-local coordinates lies on the object
    pub fn contains_local(&self, local: Point<i32>) -> bool {
        local.x >= 0 && local.y >= 0 && local.x < self.width && local.y < self.height
    }

    /// Whether a point in canvas coordinates lies on the object
    pub fn contains(&self, point: Point<i32>) -> bool {
        self.contains_local(self.to_local(point))
    }

    pub fn to_local(&self, point: Point<i32>) -> Point<i32> {
        Point::new(point.x - self.x, point.y - self.y)
    }

    /// Bounding box relative to the object's own top-left corner
    pub fn local_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(self.width as f32, self.height as f32),
        )
    }

    /// Bounding box on a surface whose canvas origin sits at `origin`
    pub fn to_rect(&self, origin: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_size(
            origin + egui::vec2(self.x as f32, self.y as f32),
            egui::vec2(self.width as f32, self.height as f32),
        )
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::new(100, 100, 100, 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub show_background: bool,
    pub show_background_image: bool,
    pub show_markers: bool,
    pub axies_enabled: bool,
    pub is_dynamic: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        DisplayFlags {
            show_background: true,
            show_background_image: false,
            show_markers: true,
            axies_enabled: false,
            is_dynamic: false,
        }
    }
}

/// Which bottom corner the axis annotation hub is drawn in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub inside: String,
    pub upside: String,
    pub aside: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        AxisLabels {
            inside: "x".to_string(),
            upside: "y".to_string(),
            aside: "z".to_string(),
        }
    }
}

/// Opaque reference to an image owned by the host, with its native pixel size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(key: impl Into<String>, width: u32, height: u32) -> Self {
        ImageHandle {
            key: key.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRefs {
    pub marker_none: Option<ImageHandle>,
    pub marker_red: Option<ImageHandle>,
    pub marker_yellow: Option<ImageHandle>,
    pub marker_green: Option<ImageHandle>,
    pub background: Option<ImageHandle>,
}

impl ImageRefs {
    /// Marker image shown for the given status
    pub fn marker(&self, status: ObjectStatus) -> Option<&ImageHandle> {
        match status {
            ObjectStatus::None => self.marker_none.as_ref(),
            ObjectStatus::Red => self.marker_red.as_ref(),
            ObjectStatus::Yellow => self.marker_yellow.as_ref(),
            ObjectStatus::Green => self.marker_green.as_ref(),
        }
    }

    pub fn set_marker(&mut self, status: ObjectStatus, image: Option<ImageHandle>) {
        match status {
            ObjectStatus::None => self.marker_none = image,
            ObjectStatus::Red => self.marker_red = image,
            ObjectStatus::Yellow => self.marker_yellow = image,
            ObjectStatus::Green => self.marker_green = image,
        }
    }
}

/// Everything that describes a SCADA object apart from its live state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub id: ObjectId,
    pub geometry: Geometry,
    pub title: String,
    pub flags: DisplayFlags,
    pub axis_position: AxisPosition,
    pub axis_labels: AxisLabels,
    pub images: ImageRefs,
}

impl ObjectConfig {
    pub fn new(title: impl Into<String>, geometry: Geometry) -> Self {
        ObjectConfig {
            title: title.into(),
            geometry,
            ..Default::default()
        }
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        ObjectConfig {
            id: ObjectId::new(),
            geometry: Geometry::default(),
            title: "Object".to_string(),
            flags: DisplayFlags::default(),
            axis_position: AxisPosition::default(),
            axis_labels: AxisLabels::default(),
            images: ImageRefs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_never_holds_negative_size() {
        let mut geometry = Geometry::new(5, 5, -3, -1);
        assert_eq!((geometry.width(), geometry.height()), (0, 0));

        geometry.set_size(-10, 20);
        assert_eq!((geometry.width(), geometry.height()), (0, 20));
    }

    #[test]
    fn contains_uses_canvas_coordinates() {
        let geometry = Geometry::new(10, 20, 30, 40);
        assert!(geometry.contains(Point::new(10, 20)));
        assert!(geometry.contains(Point::new(39, 59)));
        assert!(!geometry.contains(Point::new(40, 20)));
        assert!(!geometry.contains(Point::new(9, 30)));
        assert_eq!(geometry.to_local(Point::new(15, 25)), Point::new(5, 5));
    }

    #[test]
    fn to_rect_offsets_by_surface_origin() {
        let geometry = Geometry::new(10, 20, 30, 40);
        let rect = geometry.to_rect(egui::pos2(5.0, -5.0));
        assert_eq!(rect.min, egui::pos2(15.0, 15.0));
        assert_eq!(rect.size(), egui::vec2(30.0, 40.0));
    }

    #[test]
    fn default_config_matches_new_object_layout() {
        let config = ObjectConfig::default();
        assert_eq!(config.geometry, Geometry::new(100, 100, 100, 100));
        assert!(config.flags.show_background);
        assert!(!config.flags.is_dynamic);
        assert_eq!(config.axis_position, AxisPosition::Left);
        assert_ne!(config.id, ObjectConfig::default().id);
    }

    #[test]
    fn marker_lookup_follows_status() {
        let mut images = ImageRefs::default();
        images.set_marker(ObjectStatus::Red, Some(ImageHandle::new("red", 8, 8)));

        assert_eq!(images.marker(ObjectStatus::Red).map(|i| i.key.as_str()), Some("red"));
        assert!(images.marker(ObjectStatus::Green).is_none());
    }

    #[test]
    fn unknown_axis_position_is_rejected() {
        let parsed: Result<AxisPosition, _> = serde_json::from_str("\"Top\"");
        assert!(parsed.is_err());
    }
}
