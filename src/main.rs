// Copyright 2024 - The Open-Agriculture Developers
// SPDX-License-Identifier: GPL-3.0-or-later
// Authors: Daan Steenbergen
use std::collections::HashMap;

use eframe::egui;
use scada_object::{
    AxisPosition, Geometry, ImageHandle, InteractiveObject, ObjectConfig, ObjectEvent, ObjectId,
    ObjectSettings, ObjectStatus, Point, PointerEvent, RenderableObject,
};

const SETTINGS_PATH: &str = "scada_object_settings.json";
const MARKER_SIZE: u32 = 16;
const MAX_LOG_LINES: usize = 200;
const SIMULATION_PERIOD_SECS: f64 = 1.5;

pub struct ScadaDemoApp {
    /// Paint order, the last object is on top
    objects: Vec<InteractiveObject>,
    settings: ObjectSettings,
    textures: HashMap<String, egui::TextureHandle>,
    editable: bool,
    grabbed: Option<ObjectId>,
    cursor: egui::CursorIcon,
    simulate: bool,
    last_simulation_tick: f64,
    event_log: Vec<String>,
}

impl ScadaDemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings();
        let mut textures = HashMap::new();

        for status in ObjectStatus::ALL {
            let key = marker_key(status);
            let image = marker_image(status);
            let texture = cc
                .egui_ctx
                .load_texture(key.as_str(), image, egui::TextureOptions::default());
            textures.insert(key, texture);
        }

        let background = std::env::args().nth(1).and_then(|path| {
            match image::open(&path) {
                Ok(image) => {
                    let rgba = image.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let colour_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    textures.insert(
                        "background".to_string(),
                        cc.egui_ctx.load_texture(
                            "background",
                            colour_image,
                            egui::TextureOptions::default(),
                        ),
                    );
                    log::info!("Loaded background image {} ({}x{})", path, size[0], size[1]);
                    Some(ImageHandle::new("background", rgba.width(), rgba.height()))
                }
                Err(e) => {
                    log::error!("Failed to load background image {}: {}", path, e);
                    None
                }
            }
        });

        let objects = demo_configs(background)
            .into_iter()
            .map(|config| InteractiveObject::with_settings(config, settings.clone()))
            .collect();

        ScadaDemoApp {
            objects,
            settings,
            textures,
            editable: true,
            grabbed: None,
            cursor: egui::CursorIcon::Default,
            simulate: false,
            last_simulation_tick: 0.0,
            event_log: Vec::new(),
        }
    }

    fn object_at(&self, point: Point<i32>) -> Option<usize> {
        self.objects
            .iter()
            .rposition(|object| object.geometry().contains(point))
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.id() == id)
    }

    fn selected_index(&self) -> Option<usize> {
        self.objects.iter().position(|object| object.is_selected())
    }

    fn deliver(&mut self, index: usize, kind: fn(i32, i32) -> PointerEvent, point: Point<i32>) {
        let object = &mut self.objects[index];
        let local = object.geometry().to_local(point);
        object.handle_pointer(kind(local.x, local.y));
    }

    fn handle_canvas_input(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let (hover, pressed, released, double_clicked, moving) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.button_double_clicked(egui::PointerButton::Primary),
                i.pointer.is_moving(),
            )
        });
        let Some(pos) = hover else {
            return;
        };
        let point = Point::new((pos.x - origin.x) as i32, (pos.y - origin.y) as i32);

        if double_clicked {
            if let Some(index) = self.object_at(point) {
                self.deliver(index, PointerEvent::double_click, point);
            }
        }

        if pressed {
            match self.object_at(point) {
                Some(index) => {
                    self.grabbed = Some(self.objects[index].id());
                    self.deliver(index, PointerEvent::press, point);
                }
                None => {
                    for object in self.objects.iter_mut().filter(|o| o.is_selected()) {
                        object.set_selected(false);
                    }
                }
            }
        }

        if moving {
            let target = match self.grabbed {
                Some(id) => self.index_of(id),
                None => self.object_at(point),
            };
            match target {
                Some(index) => self.deliver(index, PointerEvent::moved, point),
                None => self.cursor = egui::CursorIcon::Default,
            }
        }

        if released {
            if let Some(index) = self.grabbed.take().and_then(|id| self.index_of(id)) {
                self.deliver(index, PointerEvent::release, point);
            }
        }
    }

    fn process_object_output(&mut self, ctx: &egui::Context) {
        let mut selected = None;
        let mut raised = Vec::new();

        for object in &mut self.objects {
            for event in object.drain_events() {
                match event {
                    ObjectEvent::Selected(id) => selected = Some(id),
                    ObjectEvent::DoubleClicked(id) => {
                        log::info!("Open properties of '{}' ({})", object.config().title, id);
                    }
                    _ => (),
                }
                self.event_log.push(format!("{}: {:?}", object.config().title, event));
            }
            if let Some(cursor) = object.take_cursor_request() {
                self.cursor = cursor.into();
            }
            if object.take_raise_request() {
                raised.push(object.id());
            }
            if object.take_repaint_request() {
                ctx.request_repaint();
            }
        }

        // Only one object may be selected at a time
        if let Some(id) = selected {
            for object in self.objects.iter_mut() {
                if object.id() != id && object.is_selected() {
                    object.set_selected(false);
                }
            }
        }

        for id in raised {
            if let Some(index) = self.index_of(id) {
                let object = self.objects.remove(index);
                self.objects.push(object);
            }
        }

        if self.event_log.len() > MAX_LOG_LINES {
            let excess = self.event_log.len() - MAX_LOG_LINES;
            self.event_log.drain(..excess);
        }
    }

    fn simulate_process(&mut self, ctx: &egui::Context) {
        if !self.simulate {
            return;
        }
        let now = ctx.input(|i| i.time);
        if now - self.last_simulation_tick >= SIMULATION_PERIOD_SECS {
            self.last_simulation_tick = now;
            for object in self.objects.iter_mut().filter(|o| o.config().flags.is_dynamic) {
                object.set_status(object.status().next());
            }
        }
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(SIMULATION_PERIOD_SECS));
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .checkbox(&mut self.editable, "Edit mode")
                .on_hover_text("Allow moving and resizing objects")
                .changed()
            {
                for object in &mut self.objects {
                    object.set_editable(self.editable);
                }
                self.grabbed = None;
            }
            ui.checkbox(&mut self.simulate, "Simulate process")
                .on_hover_text("Cycle the status of dynamic objects");

            ui.separator();

            let selected = self.selected_index();
            ui.add_enabled_ui(selected.is_some(), |ui| {
                for status in ObjectStatus::ALL {
                    if ui.button(format!("{:?}", status)).clicked() {
                        if let Some(index) = selected {
                            self.objects[index].set_status(status);
                        }
                    }
                }
                if ui
                    .button("Toggle dynamic")
                    .on_hover_text("Colour the selected object by its status")
                    .clicked()
                {
                    if let Some(index) = selected {
                        self.objects[index].update_config(|config| {
                            config.flags.is_dynamic = !config.flags.is_dynamic;
                        });
                    }
                }
            });

            ui.separator();

            if ui.button("Save settings").clicked() {
                match self.settings.to_json() {
                    Ok(json) => match std::fs::write(SETTINGS_PATH, json) {
                        Ok(()) => log::info!("Saved settings to {}", SETTINGS_PATH),
                        Err(e) => log::error!("Failed to save settings: {}", e),
                    },
                    Err(e) => log::error!("Failed to serialize settings: {}", e),
                }
            }
            if ui
                .button("Reload settings")
                .on_hover_text(format!("Read {} again", SETTINGS_PATH))
                .clicked()
            {
                self.settings = load_settings();
                for object in &mut self.objects {
                    object.set_settings(self.settings.clone());
                }
            }
            if ui
                .button("Reset layout")
                .on_hover_text("Move every object back to its initial place")
                .clicked()
            {
                // Objects may have been raised, so match by title rather than index
                for config in demo_configs(None) {
                    if let Some(object) = self
                        .objects
                        .iter_mut()
                        .find(|object| object.config().title == config.title)
                    {
                        object.set_geometry(config.geometry);
                    }
                }
                self.grabbed = None;
            }
        });
    }
}

impl eframe::App for ScadaDemoApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.simulate_process(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.show_toolbar(ui));

        egui::SidePanel::right("event_log")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Events");
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.event_log {
                            ui.monospace(line);
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, egui::Color32::from_gray(235));

            self.handle_canvas_input(ctx, origin);
            self.process_object_output(ctx);

            for object in &self.objects {
                let bounds = object.geometry().to_rect(origin);
                object.render(&painter, bounds.min, &self.textures);
            }
        });

        ctx.set_cursor_icon(self.cursor);
    }
}

fn load_settings() -> ObjectSettings {
    match std::fs::read_to_string(SETTINGS_PATH) {
        Ok(json) => match ObjectSettings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", SETTINGS_PATH);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", SETTINGS_PATH, e);
                ObjectSettings::default()
            }
        },
        Err(_) => ObjectSettings::default(),
    }
}

fn marker_key(status: ObjectStatus) -> String {
    format!("marker_{:?}", status).to_lowercase()
}

/// Filled disc in the status colour, used as the status marker
fn marker_image(status: ObjectStatus) -> egui::ColorImage {
    let [r, g, b] = match status {
        ObjectStatus::None => [128, 128, 128],
        ObjectStatus::Red => [200, 30, 30],
        ObjectStatus::Yellow => [230, 200, 20],
        ObjectStatus::Green => [20, 160, 40],
    };
    let radius = MARKER_SIZE as f32 / 2.0;
    let image = image::RgbaImage::from_fn(MARKER_SIZE, MARKER_SIZE, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy <= radius * radius {
            image::Rgba([r, g, b, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    egui::ColorImage::from_rgba_unmultiplied(
        [MARKER_SIZE as usize, MARKER_SIZE as usize],
        image.as_raw(),
    )
}

fn demo_configs(background: Option<ImageHandle>) -> Vec<ObjectConfig> {
    let mut pump = ObjectConfig::new("Pump P-101", Geometry::new(40, 40, 140, 100));
    pump.flags.is_dynamic = true;
    for status in ObjectStatus::ALL {
        pump.images.set_marker(
            status,
            Some(ImageHandle::new(marker_key(status), MARKER_SIZE, MARKER_SIZE)),
        );
    }

    let mut valve = ObjectConfig::new("Valve V-7", Geometry::new(240, 60, 120, 120));
    valve.flags.axies_enabled = true;
    valve.axis_position = AxisPosition::Right;
    valve.flags.show_markers = false;

    let mut tank = ObjectConfig::new("Tank T-3", Geometry::new(120, 220, 180, 140));
    tank.flags.is_dynamic = true;
    tank.flags.axies_enabled = true;
    if background.is_some() {
        tank.flags.show_background_image = true;
        tank.images.background = background;
    }

    vec![pump, valve, tank]
}

fn main() {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([600.0, 440.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SCADA Object Designer",
        native_options,
        Box::new(|cc| Ok(Box::new(ScadaDemoApp::new(cc)))),
    )
    .ok();
}
