//! Copyright 2024 - The Open-Agriculture Developers
//! SPDX-License-Identifier: GPL-3.0-or-later
//! Authors: Daan Steenbergen

mod interaction;
mod object_config;
mod object_rendering;
mod object_status;
mod scada_object;
mod settings;

pub use interaction::{
    in_resize_zone, CursorShape, EventDisposition, ObjectAction, ObjectEvent, PointerEvent,
    PointerEventKind,
};
pub use object_config::{
    AxisLabels, AxisPosition, DisplayFlags, Geometry, ImageHandle, ImageRefs, ObjectConfig,
    ObjectId, Point,
};
pub use object_rendering::{
    DrawOp, ImageResolver, Layer, NoImages, RenderLayer, RenderPass, RenderableObject,
};
pub use object_status::{ObjectStatus, Palette};
pub use scada_object::InteractiveObject;
pub use settings::{ObjectSettings, SettingsError};
