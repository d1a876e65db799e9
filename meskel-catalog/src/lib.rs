pub mod packages;

pub use packages::{find_package, tour_packages, TourPackage};
