// src/render/mod.rs
//! Rendering: frame composition, scheduling and the two painters.

pub mod color;
pub mod frame;
pub mod raster;
pub mod render_loop;
pub mod scene;
pub mod scheduler;
pub mod terminal;

pub use color::Rgba;
pub use frame::{compose_frame, RenderContext, BACKGROUND, GRID_FREQUENCIES};
pub use raster::rasterize;
pub use render_loop::{LoopState, RenderLoop};
pub use scene::{DrawCommand, RectF, Scene, SceneItem, SceneLayer, CANVAS_ID};
pub use scheduler::{FrameScheduler, FrameToken};
pub use terminal::{render_scene, terminal_color};
