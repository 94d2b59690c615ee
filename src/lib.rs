pub mod config;
pub mod controller;
pub mod math;
pub mod pose;
pub mod vmt;
