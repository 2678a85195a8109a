//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

use std::collections::HashMap;

use eframe::egui;
use eframe::egui::Color32;
use eframe::egui::FontId;
use eframe::egui::Pos2;
use eframe::egui::Rect;
use eframe::egui::Stroke;

use crate::object_config::{AxisLabels, AxisPosition, ImageHandle};
use crate::object_status::DARK_GRAY;
use crate::InteractiveObject;

/// Visual layers of an object in paint order, each one drawn over the previous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Emphasis,
    Fill,
    Title,
    Axes,
    ResizeGrip,
    Marker,
    BackgroundImage,
    Border,
}

/// A single drawing primitive in object-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text whose baseline starts at `anchor`
    Text {
        anchor: Pos2,
        text: String,
        colour: Color32,
    },
    Ellipse {
        rect: Rect,
        stroke: Stroke,
    },
    Line {
        points: [Pos2; 2],
        stroke: Stroke,
    },
    Dot {
        pos: Pos2,
        colour: Color32,
    },
    Image {
        image: ImageHandle,
        rect: Rect,
        uv: Rect,
    },
    RoundedRect {
        rect: Rect,
        corner_radius: f32,
        stroke: Stroke,
    },
    Fill {
        rect: Rect,
        colour: Color32,
    },
    Glow {
        rect: Rect,
        blur: u8,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub layer: Layer,
    pub ops: Vec<DrawOp>,
}

/// Output of one render pass: the visible layers in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub layers: Vec<RenderLayer>,
    pub font_size: f32,
}

/// Looks up the texture for an image handle owned by the host
pub trait ImageResolver {
    fn texture(&self, image: &ImageHandle) -> Option<egui::TextureId>;
}

impl ImageResolver for HashMap<String, egui::TextureHandle> {
    fn texture(&self, image: &ImageHandle) -> Option<egui::TextureId> {
        self.get(&image.key).map(|texture| texture.id())
    }
}

pub struct NoImages;

impl ImageResolver for NoImages {
    fn texture(&self, _: &ImageHandle) -> Option<egui::TextureId> {
        None
    }
}

pub trait RenderableObject {
    fn render_pass(&self) -> RenderPass;

    fn render(&self, painter: &egui::Painter, origin: Pos2, images: &dyn ImageResolver) {
        self.render_pass().paint(painter, origin, images);
    }
}

const TITLE_OFFSET: (i32, i32) = (10, 20);
const AXIS_HUB_LEFT: i32 = 12;
const AXIS_HUB_RIGHT_INSET: i32 = 30;
const AXIS_HUB_BOTTOM_INSET: i32 = 10;
const AXIS_HUB_SIZE: i32 = 4;
const BORDER_WIDTH: f32 = 2.0;
const BORDER_RADIUS: f32 = 3.0;

fn p(x: i32, y: i32) -> Pos2 {
    egui::pos2(x as f32, y as f32)
}

impl RenderableObject for InteractiveObject {
    fn render_pass(&self) -> RenderPass {
        let config = self.config();
        let settings = self.settings();
        let geometry = config.geometry;
        let (width, height) = (geometry.width(), geometry.height());
        let local = geometry.local_rect();
        let palette = self.palette();

        let mut layers = Vec::new();
        let mut push = |layer: Layer, ops: Vec<DrawOp>| {
            if !ops.is_empty() {
                layers.push(RenderLayer { layer, ops });
            }
        };

        push(
            Layer::Emphasis,
            vec![DrawOp::Glow {
                rect: local,
                blur: self.emphasis(),
            }],
        );

        if palette.fill.a() > 0 {
            push(
                Layer::Fill,
                vec![DrawOp::Fill {
                    rect: local,
                    colour: palette.fill,
                }],
            );
        }

        push(
            Layer::Title,
            vec![DrawOp::Text {
                anchor: p(TITLE_OFFSET.0, TITLE_OFFSET.1),
                text: config.title.clone(),
                colour: Color32::BLACK,
            }],
        );

        if config.flags.axies_enabled {
            let hub_x = match config.axis_position {
                AxisPosition::Left => AXIS_HUB_LEFT,
                AxisPosition::Right => width - AXIS_HUB_RIGHT_INSET,
            };
            push(
                Layer::Axes,
                axis_ops(
                    (hub_x, height - AXIS_HUB_BOTTOM_INSET),
                    height,
                    settings.axis_stroke_length,
                    &config.axis_labels,
                ),
            );
        }

        if self.is_editable() {
            let field = settings.resize_field_size;
            let mut dots = Vec::new();
            for i in 1..=field {
                for j in 1..=i {
                    dots.push(DrawOp::Dot {
                        pos: p(width - field + 2 * i, height - 2 * j),
                        colour: DARK_GRAY,
                    });
                }
            }
            push(Layer::ResizeGrip, dots);
        }

        if config.flags.show_markers {
            if let Some(marker) = config.images.marker(self.status()) {
                let w = i32::try_from(marker.width).unwrap_or(i32::MAX);
                let h = i32::try_from(marker.height).unwrap_or(i32::MAX);
                push(
                    Layer::Marker,
                    vec![DrawOp::Image {
                        image: marker.clone(),
                        rect: Rect::from_min_size(
                            p(width.saturating_sub(w) / 2, height.saturating_sub(h) / 2),
                            marker.size(),
                        ),
                        uv: full_uv(),
                    }],
                );
            }
        }

        if config.flags.show_background_image {
            if let Some(background) = &config.images.background {
                if let Some(uv) = cover_uv(background.size(), local.size()) {
                    push(
                        Layer::BackgroundImage,
                        vec![DrawOp::Image {
                            image: background.clone(),
                            rect: local,
                            uv,
                        }],
                    );
                }
            }
        }

        if config.flags.show_background {
            push(
                Layer::Border,
                vec![DrawOp::RoundedRect {
                    rect: local,
                    corner_radius: BORDER_RADIUS,
                    stroke: Stroke::new(BORDER_WIDTH, palette.line),
                }],
            );
        }

        RenderPass {
            layers,
            font_size: settings.title_font_size,
        }
    }
}

fn axis_ops(hub: (i32, i32), height: i32, length: i32, labels: &AxisLabels) -> Vec<DrawOp> {
    let (x, y) = hub;
    let half = AXIS_HUB_SIZE / 2;
    let pen = Stroke::new(1.0, Color32::BLACK);
    let line = |a: Pos2, b: Pos2| DrawOp::Line {
        points: [a, b],
        stroke: pen,
    };
    let text = |anchor: Pos2, text: &str| DrawOp::Text {
        anchor,
        text: text.to_string(),
        colour: Color32::BLACK,
    };

    vec![
        DrawOp::Ellipse {
            rect: Rect::from_min_size(
                p(x - half, y - half),
                egui::Vec2::splat(AXIS_HUB_SIZE as f32),
            ),
            stroke: pen,
        },
        text(p(x - 10, height - 2), &labels.inside),
        // up
        line(p(x, y), p(x, y - length)),
        line(p(x, y - length - 1), p(x - 3, y - length + 3)),
        line(p(x, y - length - 1), p(x + 3, y - length + 3)),
        text(p(x - 3, y - length - 3), &labels.upside),
        // aside
        line(p(x, y), p(x + length, y)),
        line(p(x + length + 1, y), p(x + length - 3, y - 3)),
        line(p(x + length + 1, y), p(x + length - 3, y + 3)),
        text(p(x + length + 3, y + 3), &labels.aside),
    ]
}

fn full_uv() -> Rect {
    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

/// Texture coordinates that scale `image` to cover `target` while keeping its aspect
/// ratio, cropping the overflow evenly on both sides
fn cover_uv(image: egui::Vec2, target: egui::Vec2) -> Option<Rect> {
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return None;
    }
    let scale = (target.x / image.x).max(target.y / image.y);
    let visible_u = target.x / (image.x * scale);
    let visible_v = target.y / (image.y * scale);
    Some(Rect::from_min_max(
        egui::pos2((1.0 - visible_u) / 2.0, (1.0 - visible_v) / 2.0),
        egui::pos2((1.0 + visible_u) / 2.0, (1.0 + visible_v) / 2.0),
    ))
}

impl RenderPass {
    pub fn layer(&self, layer: Layer) -> Option<&RenderLayer> {
        self.layers.iter().find(|l| l.layer == layer)
    }

    pub fn layer_order(&self) -> Vec<Layer> {
        self.layers.iter().map(|l| l.layer).collect()
    }

    /// Paint the layers in list order, later layers over earlier ones
    pub fn paint(&self, painter: &egui::Painter, origin: Pos2, images: &dyn ImageResolver) {
        let offset = origin.to_vec2();
        let font = FontId::proportional(self.font_size);

        for layer in &self.layers {
            for op in &layer.ops {
                match op {
                    DrawOp::Text {
                        anchor,
                        text,
                        colour,
                    } => {
                        painter.text(
                            *anchor + offset,
                            egui::Align2::LEFT_BOTTOM,
                            text,
                            font.clone(),
                            *colour,
                        );
                    }
                    DrawOp::Ellipse { rect, stroke } => {
                        let rect = rect.translate(offset);
                        painter.add(egui::Shape::ellipse_stroke(
                            rect.center(),
                            rect.size() / 2.0,
                            *stroke,
                        ));
                    }
                    DrawOp::Line { points, stroke } => {
                        painter.line_segment([points[0] + offset, points[1] + offset], *stroke);
                    }
                    DrawOp::Dot { pos, colour } => {
                        painter.rect_filled(
                            Rect::from_min_size(*pos + offset, egui::vec2(1.0, 1.0)),
                            0.0,
                            *colour,
                        );
                    }
                    DrawOp::Image { image, rect, uv } => match images.texture(image) {
                        Some(texture) => {
                            painter.image(texture, rect.translate(offset), *uv, Color32::WHITE);
                        }
                        None => log::trace!("no texture for image '{}'", image.key),
                    },
                    DrawOp::RoundedRect {
                        rect,
                        corner_radius,
                        stroke,
                    } => {
                        painter.rect_stroke(
                            rect.translate(offset),
                            *corner_radius,
                            *stroke,
                            egui::StrokeKind::Inside,
                        );
                    }
                    DrawOp::Fill { rect, colour } => {
                        painter.rect_filled(rect.translate(offset), 0.0, *colour);
                    }
                    DrawOp::Glow { rect, blur } => {
                        let shadow = egui::Shadow {
                            offset: [0, 0],
                            blur: *blur,
                            spread: 0,
                            color: Color32::from_black_alpha(96),
                        };
                        painter.add(shadow.as_shape(rect.translate(offset), BORDER_RADIUS));
                    }
                }
            }
        }
    }
}
