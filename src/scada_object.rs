//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

use eframe::egui;

use crate::interaction::{
    in_resize_zone, CursorShape, EventDisposition, ObjectAction, ObjectEvent, PointerEvent,
    PointerEventKind,
};
use crate::object_config::{Geometry, ObjectConfig, ObjectId, Point};
use crate::object_status::{ObjectStatus, Palette};
use crate::settings::ObjectSettings;

/// A SCADA object placed on a canvas.
///
/// Interprets pointer input as move/resize/select gestures while editable and keeps
/// its palette in sync with the process status. Everything the host has to act on
/// (events, cursor, raise, repaint) is queued and drained by the host.
#[derive(Debug, Clone)]
pub struct InteractiveObject {
    config: ObjectConfig,
    settings: ObjectSettings,
    status: ObjectStatus,
    action: ObjectAction,
    editable: bool,
    selected: bool,
    drag_anchor: Point<i32>,
    palette: Palette,
    emphasis: u8,

    events: Vec<ObjectEvent>,
    cursor_request: Option<CursorShape>,
    raise_requested: bool,
    repaint_requested: bool,
}

impl Default for InteractiveObject {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectConfig> for InteractiveObject {
    fn from(config: ObjectConfig) -> Self {
        Self::with_settings(config, ObjectSettings::default())
    }
}

impl InteractiveObject {
    pub fn new() -> Self {
        Self::from(ObjectConfig::default())
    }

    pub fn with_settings(config: ObjectConfig, settings: ObjectSettings) -> Self {
        let palette = Palette::for_status(ObjectStatus::None, &config.flags);
        let emphasis = settings.emphasis_subtle;
        InteractiveObject {
            config,
            settings,
            status: ObjectStatus::None,
            action: ObjectAction::None,
            editable: false,
            selected: false,
            drag_anchor: Point::default(),
            palette,
            emphasis,
            events: Vec::new(),
            cursor_request: None,
            raise_requested: false,
            repaint_requested: true,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.config.id
    }

    pub fn config(&self) -> &ObjectConfig {
        &self.config
    }

    /// Replace the whole configuration, returning the previous one
    pub fn set_config(&mut self, config: ObjectConfig) -> ObjectConfig {
        let old = std::mem::replace(&mut self.config, config);
        log::debug!("object {}: configuration replaced", self.config.id);
        self.config_changed();
        old
    }

    /// Edit the configuration in place; the palette is recomputed afterwards
    pub fn update_config<R>(&mut self, edit: impl FnOnce(&mut ObjectConfig) -> R) -> R {
        let result = edit(&mut self.config);
        self.config_changed();
        result
    }

    /// Tell the object that flags affecting its colours changed elsewhere
    pub fn notify_config_changed(&mut self) {
        self.recompute_palette();
    }

    pub fn settings(&self) -> &ObjectSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ObjectSettings) {
        self.emphasis = if self.selected {
            settings.emphasis_highlighted
        } else {
            settings.emphasis_subtle
        };
        self.settings = settings;
        self.repaint_requested = true;
    }

    pub fn geometry(&self) -> Geometry {
        self.config.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.config.geometry = geometry;
        self.repaint_requested = true;
    }

    pub fn status(&self) -> ObjectStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ObjectStatus) {
        if self.status != status {
            log::debug!("object {}: status {:?} -> {:?}", self.config.id, self.status, status);
        }
        self.status = status;
        self.recompute_palette();
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn action(&self) -> ObjectAction {
        self.action
    }

    /// Press point of the running move gesture
    pub fn drag_anchor(&self) -> Option<Point<i32>> {
        match self.action {
            ObjectAction::Move => Some(self.drag_anchor),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Switch between editor and runtime mode. Leaving editor mode ends any gesture.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable && self.action != ObjectAction::None {
            self.action = ObjectAction::None;
            self.cursor_request = Some(CursorShape::Default);
        }
        self.repaint_requested = true;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;

        if selected {
            self.events.push(ObjectEvent::Selected(self.config.id));
            self.emphasis = self.settings.emphasis_highlighted;
            self.raise_requested = true;
        } else {
            self.emphasis = self.settings.emphasis_subtle;
        }
        self.repaint_requested = true;
    }

    /// Glow intensity of the selection emphasis
    pub fn emphasis(&self) -> u8 {
        self.emphasis
    }

    pub fn in_resize_zone(&self, local: Point<i32>) -> bool {
        in_resize_zone(&self.config.geometry, local, self.settings.resize_field_size)
    }

    /// Feed a pointer event in object-local coordinates
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventDisposition {
        match event.kind {
            PointerEventKind::DoubleClick => {
                if event.button == egui::PointerButton::Primary {
                    self.events.push(ObjectEvent::DoubleClicked(self.config.id));
                }
                EventDisposition::Handled
            }
            _ if !self.editable => EventDisposition::PassThrough,
            PointerEventKind::Press => {
                if event.button == egui::PointerButton::Primary
                    && self.action == ObjectAction::None
                {
                    self.begin_gesture(event.pos);
                }
                EventDisposition::Handled
            }
            PointerEventKind::Move => {
                match self.action {
                    ObjectAction::Move => self.move_to_pointer(event.pos),
                    ObjectAction::Resize => self.resize_to_pointer(event.pos),
                    ObjectAction::None => self.hover(event.pos),
                }
                EventDisposition::Handled
            }
            PointerEventKind::Release => {
                if self.action != ObjectAction::None {
                    log::debug!("object {}: {:?} finished", self.config.id, self.action);
                }
                self.action = ObjectAction::None;
                self.cursor_request = Some(CursorShape::Default);
                EventDisposition::Handled
            }
        }
    }

    /// Events emitted since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<ObjectEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_cursor_request(&mut self) -> Option<CursorShape> {
        self.cursor_request.take()
    }

    pub fn take_raise_request(&mut self) -> bool {
        std::mem::take(&mut self.raise_requested)
    }

    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    fn begin_gesture(&mut self, pos: Point<i32>) {
        if self.in_resize_zone(pos) {
            log::debug!("object {}: resize started at {:?}", self.config.id, pos);
            self.action = ObjectAction::Resize;
        } else {
            log::debug!("object {}: move started at {:?}", self.config.id, pos);
            self.set_selected(true);
            self.cursor_request = Some(CursorShape::Grabbing);
            self.action = ObjectAction::Move;
            self.drag_anchor = pos;
        }
    }

    // The anchor stays at the press point for the whole gesture.
    fn move_to_pointer(&mut self, pos: Point<i32>) {
        let geometry = self.config.geometry;
        let top_left = Point::new(
            geometry
                .x()
                .saturating_add(pos.x.saturating_sub(self.drag_anchor.x)),
            geometry
                .y()
                .saturating_add(pos.y.saturating_sub(self.drag_anchor.y)),
        );
        self.config.geometry.move_to(top_left);
        self.repaint_requested = true;
        log::trace!("object {}: moved to {:?}", self.config.id, top_left);

        if pos.x != 0 && pos.y != 0 {
            self.events.push(ObjectEvent::Moved {
                x: top_left.x,
                y: top_left.y,
            });
        }
    }

    fn resize_to_pointer(&mut self, pos: Point<i32>) {
        let geometry = self.config.geometry;
        let min = self.settings.min_object_size;
        let width = geometry
            .width()
            .saturating_add(pos.x.saturating_sub(geometry.width()))
            .max(min);
        let height = geometry
            .height()
            .saturating_add(pos.y.saturating_sub(geometry.height()))
            .max(min);
        let delta_width = width.saturating_sub(geometry.width());
        let delta_height = height.saturating_sub(geometry.height());

        self.config.geometry.set_size(width, height);
        self.repaint_requested = true;
        log::trace!("object {}: resized to {}x{}", self.config.id, width, height);

        if pos.x != 0 && pos.y != 0 {
            self.events.push(ObjectEvent::Resized {
                delta_width,
                delta_height,
            });
        }
    }

    fn hover(&mut self, pos: Point<i32>) {
        if self.in_resize_zone(pos) {
            self.cursor_request = Some(CursorShape::ResizeDiagonal);
        } else if self.config.geometry.contains_local(pos) {
            self.cursor_request = Some(CursorShape::OpenHand);
        }
    }

    fn config_changed(&mut self) {
        self.repaint_requested = true;
        self.recompute_palette();
    }

    fn recompute_palette(&mut self) {
        self.palette = Palette::for_status(self.status, &self.config.flags);
        self.repaint_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_status::{GREEN_ACCENT, LIGHT_GRAY, RED_ACCENT};
    use eframe::egui::Color32;

    fn editable_object(x: i32, y: i32, width: i32, height: i32) -> InteractiveObject {
        let mut object =
            InteractiveObject::from(ObjectConfig::new("Pump", Geometry::new(x, y, width, height)));
        object.set_editable(true);
        object
    }

    #[test]
    fn new_object_starts_idle_at_default_geometry() {
        let object = InteractiveObject::new();
        assert_eq!(object.geometry(), Geometry::new(100, 100, 100, 100));
        assert_eq!(object.status(), ObjectStatus::None);
        assert_eq!(object.action(), ObjectAction::None);
        assert!(!object.is_selected());
        assert!(!object.is_editable());
        assert_eq!(object.emphasis(), 10);
    }

    #[test]
    fn press_in_resize_zone_starts_resize() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(95, 95));

        assert_eq!(object.action(), ObjectAction::Resize);
        assert!(!object.is_selected());
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn press_elsewhere_selects_and_starts_move() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(40, 30));

        assert_eq!(object.action(), ObjectAction::Move);
        assert!(object.is_selected());
        assert_eq!(object.drag_anchor(), Some(Point::new(40, 30)));
        assert_eq!(object.take_cursor_request(), Some(CursorShape::Grabbing));
        assert_eq!(object.drain_events(), vec![ObjectEvent::Selected(object.id())]);
    }

    #[test]
    fn non_primary_press_is_ignored() {
        let mut object = editable_object(0, 0, 100, 100);
        let disposition = object
            .handle_pointer(PointerEvent::press(40, 30).with_button(egui::PointerButton::Secondary));

        assert_eq!(disposition, EventDisposition::Handled);
        assert_eq!(object.action(), ObjectAction::None);
        assert!(!object.is_selected());
    }

    #[test]
    fn move_delta_is_relative_to_press_point() {
        let mut object = editable_object(10, 20, 100, 100);
        object.handle_pointer(PointerEvent::press(30, 30));
        object.handle_pointer(PointerEvent::moved(35, 37));
        assert_eq!(object.geometry(), Geometry::new(15, 27, 100, 100));

        // A second event at the same local point moves again by the same delta.
        object.handle_pointer(PointerEvent::moved(35, 37));
        assert_eq!(object.geometry(), Geometry::new(20, 34, 100, 100));
    }

    #[test]
    fn move_emits_new_top_left() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(50, 50));
        object.drain_events();

        object.handle_pointer(PointerEvent::moved(60, 45));
        assert_eq!(object.drain_events(), vec![ObjectEvent::Moved { x: 10, y: -5 }]);
    }

    #[test]
    fn move_event_requires_both_pointer_coordinates_non_zero() {
        // Older builds only tested the x coordinate (twice); a zero y now suppresses the event.
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(50, 50));
        object.drain_events();

        object.handle_pointer(PointerEvent::moved(60, 0));
        assert_eq!(object.geometry().top_left(), Point::new(10, -50));
        assert!(object.drain_events().is_empty());

        object.handle_pointer(PointerEvent::moved(0, 60));
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn resize_replaces_size_with_pointer_position() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(95, 95));
        object.take_repaint_request();

        object.handle_pointer(PointerEvent::moved(150, 120));
        assert_eq!(object.geometry(), Geometry::new(0, 0, 150, 120));
        assert!(object.take_repaint_request());
        assert_eq!(
            object.drain_events(),
            vec![ObjectEvent::Resized {
                delta_width: 50,
                delta_height: 20
            }]
        );

        object.handle_pointer(PointerEvent::release(150, 120));
        assert_eq!(object.action(), ObjectAction::None);
    }

    #[test]
    fn resize_clamps_to_minimum_size() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(95, 95));

        object.handle_pointer(PointerEvent::moved(-20, 5));
        assert_eq!(object.geometry(), Geometry::new(0, 0, 1, 5));
        assert_eq!(
            object.drain_events(),
            vec![ObjectEvent::Resized {
                delta_width: -99,
                delta_height: -95
            }]
        );
    }

    #[test]
    fn resize_to_zero_coordinate_emits_nothing() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(95, 95));

        object.handle_pointer(PointerEvent::moved(0, 40));
        assert_eq!(object.geometry(), Geometry::new(0, 0, 1, 40));
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn hover_requests_cursor_affordance() {
        let mut object = editable_object(0, 0, 100, 100);

        object.handle_pointer(PointerEvent::moved(96, 97));
        assert_eq!(object.take_cursor_request(), Some(CursorShape::ResizeDiagonal));

        object.handle_pointer(PointerEvent::moved(20, 20));
        assert_eq!(object.take_cursor_request(), Some(CursorShape::OpenHand));

        object.handle_pointer(PointerEvent::moved(-5, 20));
        assert_eq!(object.take_cursor_request(), None);
        assert_eq!(object.geometry(), Geometry::new(0, 0, 100, 100));
    }

    #[test]
    fn release_always_returns_to_idle() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::release(3, 3));
        assert_eq!(object.action(), ObjectAction::None);
        assert_eq!(object.take_cursor_request(), Some(CursorShape::Default));

        object.handle_pointer(PointerEvent::press(3, 3));
        object.handle_pointer(PointerEvent::release(3, 3));
        assert_eq!(object.action(), ObjectAction::None);
        assert_eq!(object.drag_anchor(), None);
    }

    #[test]
    fn non_editable_object_passes_events_through() {
        let mut object = InteractiveObject::new();
        for event in [
            PointerEvent::press(10, 10),
            PointerEvent::moved(50, 50),
            PointerEvent::release(50, 50),
        ] {
            assert_eq!(object.handle_pointer(event), EventDisposition::PassThrough);
        }
        assert_eq!(object.action(), ObjectAction::None);
        assert!(!object.is_selected());
        assert_eq!(object.geometry(), Geometry::new(100, 100, 100, 100));
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn double_click_emits_in_any_mode() {
        let mut object = InteractiveObject::new();
        object.handle_pointer(PointerEvent::double_click(5, 5));
        assert_eq!(object.drain_events(), vec![ObjectEvent::DoubleClicked(object.id())]);

        object.set_editable(true);
        object.handle_pointer(PointerEvent::press(5, 5));
        object.drain_events();
        object.handle_pointer(PointerEvent::double_click(5, 5));
        assert_eq!(object.action(), ObjectAction::Move);
        assert_eq!(object.drain_events(), vec![ObjectEvent::DoubleClicked(object.id())]);

        object.handle_pointer(
            PointerEvent::double_click(5, 5).with_button(egui::PointerButton::Secondary),
        );
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn leaving_edit_mode_ends_gesture() {
        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(20, 20));
        object.set_editable(false);
        assert_eq!(object.action(), ObjectAction::None);
    }

    #[test]
    fn selection_controls_emphasis_and_raise() {
        let mut object = InteractiveObject::new();

        object.set_selected(true);
        assert_eq!(object.emphasis(), 50);
        assert!(object.take_raise_request());
        assert_eq!(object.drain_events(), vec![ObjectEvent::Selected(object.id())]);

        object.set_selected(false);
        assert_eq!(object.emphasis(), 10);
        assert!(!object.take_raise_request());
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn status_change_recolours_dynamic_object() {
        let mut object = InteractiveObject::new();
        object.update_config(|config| config.flags.is_dynamic = true);
        assert_eq!(object.palette().fill, LIGHT_GRAY);

        object.set_status(ObjectStatus::Red);
        assert_eq!(object.palette().fill, Color32::from_rgb(255, 0, 0));
        assert_eq!(object.palette().line, RED_ACCENT);
    }

    #[test]
    fn set_config_returns_previous_and_recomputes_palette() {
        let mut object = InteractiveObject::new();
        object.set_status(ObjectStatus::Green);
        assert_eq!(object.palette().fill, Color32::WHITE);

        let mut config = ObjectConfig::new("Valve", Geometry::new(0, 0, 40, 40));
        config.flags.is_dynamic = true;
        config.flags.show_background = false;
        let old = object.set_config(config);

        assert_eq!(old.title, "Object");
        assert_eq!(object.geometry(), Geometry::new(0, 0, 40, 40));
        assert_eq!(object.palette().fill, Color32::TRANSPARENT);
        assert_eq!(object.palette().line, GREEN_ACCENT);
    }

    #[test]
    fn external_notification_recomputes_palette() {
        let mut object = InteractiveObject::new();
        object.set_status(ObjectStatus::Yellow);
        let mut config = object.config().clone();
        config.flags.is_dynamic = true;
        object.set_config(config);
        assert_eq!(object.palette().fill, Color32::from_rgb(255, 255, 0));

        object.update_config(|config| config.flags.is_dynamic = false);
        object.notify_config_changed();
        assert_eq!(object.palette().fill, Color32::WHITE);
    }

    #[test]
    fn custom_resize_field_size_is_honoured() {
        let settings = ObjectSettings {
            resize_field_size: 30,
            ..Default::default()
        };
        let config = ObjectConfig::new("Tank", Geometry::new(0, 0, 100, 100));
        let mut object = InteractiveObject::with_settings(config, settings);
        object.set_editable(true);

        object.handle_pointer(PointerEvent::press(75, 75));
        assert_eq!(object.action(), ObjectAction::Resize);
    }

    #[test]
    fn replacing_settings_keeps_emphasis_in_step_with_selection() {
        let mut object = InteractiveObject::new();
        object.set_selected(true);
        object.take_repaint_request();

        object.set_settings(ObjectSettings {
            emphasis_highlighted: 70,
            emphasis_subtle: 5,
            ..Default::default()
        });
        assert_eq!(object.emphasis(), 70);
        assert!(object.take_repaint_request());

        object.set_selected(false);
        assert_eq!(object.emphasis(), 5);
    }

    #[test]
    fn set_geometry_replaces_bounds_and_requests_repaint() {
        let mut object = InteractiveObject::new();
        object.take_repaint_request();

        object.set_geometry(Geometry::new(-20, 40, 60, 30));
        assert_eq!(object.geometry(), Geometry::new(-20, 40, 60, 30));
        assert!(object.take_repaint_request());
        assert!(object.drain_events().is_empty());
    }

    #[test]
    fn move_and_resize_saturate_at_coordinate_limits() {
        let mut object = editable_object(i32::MAX - 10, i32::MIN + 10, 100, 100);
        object.handle_pointer(PointerEvent::press(i32::MIN + 1, 50));
        object.handle_pointer(PointerEvent::moved(i32::MAX, i32::MIN));
        assert_eq!(object.geometry().top_left(), Point::new(i32::MAX, i32::MIN));
        object.handle_pointer(PointerEvent::release(i32::MAX, i32::MIN));

        let mut object = editable_object(0, 0, 100, 100);
        object.handle_pointer(PointerEvent::press(95, 95));
        object.handle_pointer(PointerEvent::moved(i32::MAX, i32::MIN));
        assert_eq!(object.geometry(), Geometry::new(0, 0, i32::MAX, 1));
    }
}
