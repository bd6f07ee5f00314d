mod directory;
mod http_directory;
mod static_directory;

pub use directory::RegionDirectory;
pub use http_directory::HttpRegionDirectory;
pub use static_directory::StaticRegionDirectory;
