mod canvas;
pub mod config;
mod connections;
mod geometry;
mod layout;
mod node_boxes;
mod readiness;
mod scene;
mod selection;
mod types;
mod zoom;

pub use canvas::ValuesMap;
