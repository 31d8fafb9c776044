pub mod classifier;
pub mod conan;
pub mod marker_rule;
