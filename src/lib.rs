//! Volume calculator for classic solids with an interactive 3D preview.
//!
//! The crate splits cleanly between the pure calculator (shape catalog,
//! form parsing, volume math, es-MX formatting) and the wgpu viewer built
//! on top of it.  The calculator side has no GPU dependencies, so the CLI
//! paths and the tests run headless.

pub mod app;
pub mod form;
pub mod format;
pub mod mesh;
pub mod preview;
pub mod registry;
pub mod render;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::ViewerState;
pub use form::{Computation, FieldInput, FormState};
pub use mesh::MeshData;
pub use preview::PreviewModel;
pub use registry::{FieldSpec, FieldValues, ShapeDefinition, ShapeKind, UnknownShapeError};
pub use render::{CameraParams, LightParams, Renderer};
