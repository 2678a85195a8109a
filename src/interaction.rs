//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen
//!
//! Types exchanged between a SCADA object and the canvas hosting it.
//!
//! ```text
//! None -> Resize   (left press inside the resize zone)
//! None -> Move     (left press anywhere else, selects the object)
//! Any  -> None     (release)
//! ```

use eframe::egui;

use crate::object_config::{Geometry, ObjectId, Point};

/// Gesture currently in progress
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    #[default]
    None,
    Move,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
    DoubleClick,
}

/// A pointer event in object-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: egui::PointerButton,
    pub pos: Point<i32>,
}

impl PointerEvent {
    pub fn press(x: i32, y: i32) -> Self {
        Self::primary(PointerEventKind::Press, x, y)
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::primary(PointerEventKind::Move, x, y)
    }

    pub fn release(x: i32, y: i32) -> Self {
        Self::primary(PointerEventKind::Release, x, y)
    }

    pub fn double_click(x: i32, y: i32) -> Self {
        Self::primary(PointerEventKind::DoubleClick, x, y)
    }

    pub fn with_button(mut self, button: egui::PointerButton) -> Self {
        self.button = button;
        self
    }

    fn primary(kind: PointerEventKind, x: i32, y: i32) -> Self {
        PointerEvent {
            kind,
            button: egui::PointerButton::Primary,
            pos: Point::new(x, y),
        }
    }
}

/// Whether the object consumed a pointer event or left it to default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Handled,
    PassThrough,
}

/// Cursor the object asks its host to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    OpenHand,
    Grabbing,
    ResizeDiagonal,
}

impl From<CursorShape> for egui::CursorIcon {
    fn from(shape: CursorShape) -> Self {
        match shape {
            CursorShape::Default => egui::CursorIcon::Default,
            CursorShape::OpenHand => egui::CursorIcon::Grab,
            CursorShape::Grabbing => egui::CursorIcon::Grabbing,
            CursorShape::ResizeDiagonal => egui::CursorIcon::ResizeNwSe,
        }
    }
}

/// Notifications for the host canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    Selected(ObjectId),
    Moved { x: i32, y: i32 },
    Resized { delta_width: i32, delta_height: i32 },
    DoubleClicked(ObjectId),
}

/// Hit test for the resize affordance.
///
/// Only the lower bound is checked on each axis, so points right of or below the
/// box also count as long as the other coordinate is inside the corner band.
pub fn in_resize_zone(geometry: &Geometry, local: Point<i32>, field_size: i32) -> bool {
    geometry.width().saturating_sub(field_size) < local.x
        && geometry.height().saturating_sub(field_size) < local.y
}
