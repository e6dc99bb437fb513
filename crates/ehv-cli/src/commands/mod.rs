pub mod faults;
pub mod lines;
pub mod maintenance;
pub mod route;
pub mod stats;
pub mod substations;
