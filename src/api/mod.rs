mod drag_controller;
mod draw_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod overlay_frame_builder;
mod plugin_dispatch;
mod plugin_registry;
mod trendline_commands;

pub use draw_controller::ClickOutcome;
pub use engine::AnnotationEngine;
pub use engine_config::AnnotationEngineConfig;
pub use interaction_controller::{TrendlineHit, TrendlineInfo};
