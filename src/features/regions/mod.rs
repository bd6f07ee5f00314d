//! Province/district region selection.
//!
//! ## Layers
//!
//! - [`services`]: the [`RegionDirectory`] boundary with a static in-memory
//!   table and an HTTP implementation over the travel-note API
//! - [`resolver`]: the [`SelectionResolver`] state machine. Pure; transitions
//!   return the fetches they need instead of performing them
//! - [`selector`]: [`RegionSelector`], which runs those fetches concurrently and
//!   feeds the results back
//! - [`view`]: dropdown view model rendered from resolver state
//!
//! ## Directory endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/regions/provinces` | List all provinces |
//! | GET | `/regions/provinces/{code}/districts` | List districts of a province |
//! | GET | `/regions/{code}` | Resolve a province or district code |

pub mod dtos;
pub mod error;
pub mod models;
pub mod observer;
pub mod resolver;
pub mod selector;
pub mod services;
pub mod view;

pub use error::{RegionError, RegionResult};
pub use observer::{SelectionEvent, SelectionObserver};
pub use resolver::{Selection, SelectionResolver};
pub use selector::RegionSelector;
pub use services::{HttpRegionDirectory, RegionDirectory, StaticRegionDirectory};
pub use view::{SelectorInput, SelectorView};
