//! Page rendering
//!
//! Pipelines build a [`Page`] of blocks; [`html::render_page`] turns it into
//! a document.

pub mod chart;
pub mod choropleth;
pub mod dashboard;
pub mod diagnostics;
pub mod error;
pub mod html;
pub mod page;
pub mod tracker;

pub use chart::{ChartSeries, LineChart};
pub use choropleth::{Choropleth, ColorScale, MapView, TooltipLayer, TooltipReport};
pub use dashboard::{render_dashboard, DASHBOARD_TITLE};
pub use diagnostics::SystemInfo;
pub use error::{RenderError, RenderResult};
pub use html::render_page;
pub use page::{Block, Fatal, Level, Page, Rendered};
pub use tracker::{render_tracker, TRACKER_TITLE};
