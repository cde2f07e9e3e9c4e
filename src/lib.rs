//! gpui_plot crate: coordinate, state and interaction core for GPUI plots

pub mod axis_store;
pub mod config;
pub mod controllers;
pub mod data_types;
pub mod error;
pub mod events;
pub mod extent;
#[cfg(feature = "gpui")]
pub mod gpui_input;
pub mod legend;
pub mod registry;
pub mod scales;
pub mod translator;
pub mod utils;

pub use config::{AxisConfig, PlotConfig};
pub use controllers::{AxisBound, BoxZoom, ClosestPoint, DrawPath, Grab, Tracking, WheelZoom};
pub use data_types::{AxisDomain, AxisId, DomainRange, SeriesSpec};
pub use error::{ConfigError, PlotError, Result};
pub use events::{NormalizedPointerEvent, PlotEventHandler, RawPointerEvent};
pub use legend::{place as place_legend, LegendPosition};
pub use registry::{PlotAction, PlotControls, PlotRegistry, PlotSnapshot};
pub use scales::ChartScale;
pub use translator::EventTranslator;
