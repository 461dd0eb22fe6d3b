pub mod config;
pub mod domain;
pub mod field;
pub mod math;
pub mod render;
