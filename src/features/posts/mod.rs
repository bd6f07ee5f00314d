//! Travel notes attached to a region.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/posts` | Create a post |
//! | GET | `/posts/region/{code}` | List posts of a region |
//! | GET | `/posts/{id}` | Get a post |
//! | PUT | `/posts/{id}` | Update a post |
//! | DELETE | `/posts/{id}` | Delete a post |

pub mod draft;
pub mod dtos;
pub mod models;
pub mod services;

pub use draft::PostDraft;
pub use services::PostClient;
