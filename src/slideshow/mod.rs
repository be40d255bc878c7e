pub mod composer;
pub mod config;
pub mod controller;
pub mod sequence;
pub mod surface;
