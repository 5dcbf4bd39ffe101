pub mod model;
pub mod params;
