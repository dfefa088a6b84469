pub mod dbscan;
pub mod elbow;
pub mod error;
pub mod feature;
pub mod io;
pub mod quality;
pub mod scan;
