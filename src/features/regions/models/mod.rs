mod district;
mod province;
mod region;

pub use district::District;
pub use province::Province;
pub use region::Region;
