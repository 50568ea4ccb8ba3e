//! Core engine for the starlit paper-galaxy explorer.
//!
//! A "galaxy" here is a static point cloud: one star per academic paper,
//! positioned by a precomputed 3D embedding in unit space. This crate owns
//! everything about that data that does not require a renderer:
//!
//! - **Catalog**: the immutable record set, loaded once per session, with
//!   legacy trajectory schemas normalized at the boundary
//! - **Framing**: the shared unit-to-world scale and the auto-framing math
//!   that places the camera so the whole cloud fits the frustum
//! - **Picking**: nearest-along-the-ray point selection
//! - **Search**: fuzzy title lookup resolving a query to a record index
//!
//! The viewer crate layers Bevy rendering, navigation, and UI on top.

mod catalog;
mod error;
mod framing;
mod picking;
mod record;
mod search;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use framing::{Framing, WORLD_SCALE};
pub use picking::{PICK_RADIUS, pick_nearest};
pub use record::{PaperRecord, Sample, Trajectory};
pub use search::TitleIndex;
