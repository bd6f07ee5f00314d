//! Travel-note client: region selection plus the authenticated API clients
//! used by the post pages.

pub mod core;
pub mod features;
pub mod shared;
