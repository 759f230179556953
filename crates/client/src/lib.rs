//! Viewer-side core: brain-data loading, the prediction client and the
//! marker controller. Nothing here depends on a UI toolkit; a UI adapter
//! calls these methods directly.

pub mod config;
pub mod data_source;
pub mod error;
pub mod marker;
pub mod prediction;
pub mod startup;
pub mod status;

pub use config::*;
pub use data_source::*;
pub use error::*;
pub use marker::*;
pub use prediction::*;
pub use startup::*;
pub use status::*;
