// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Circular progress indicator rendered into an RGBA pixel surface.
//!
//! ```no_run
//! use progress_ring::{CircularProgress, Host, WidgetConfig};
//!
//! let mut host = Host::new();
//! host.add_mount_point("main");
//! let mut ring = CircularProgress::new(&mut host, "main", "upload", WidgetConfig::default())?;
//! ring.set_progress(49.4)?;
//! assert_eq!(ring.formatted_progress(), "49%");
//! # Ok::<(), progress_ring::WidgetError>(())
//! ```

pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod host;
mod render;
pub mod scene;
pub mod surface;
pub mod viewer;
pub mod widget;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use color::Color;
pub use command::WidgetCommand;
pub use config::{LineCap, ViewerConfig, WidgetConfig};
pub use error::WidgetError;
pub use geometry::{
    Geometry, ProgressAngles, DEFAULT_SIZE, FULL_ANGLE, MAX_SIZE, MIN_SIZE,
    START_ANGLE,
};
pub use host::Host;
pub use scene::{DrawCommand, Scene};
pub use surface::Surface;
pub use widget::{CircularProgress, Style};
