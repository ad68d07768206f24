//! Optional observer hooks live here.
//!
//! Keep extensions decoupled from core paths: they only see events and a
//! read-only context.

mod plugins;

pub use plugins::{AnnotationPlugin, EventPoint, PluginContext, TrendlineAction, TrendlineEvent};
