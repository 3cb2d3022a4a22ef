pub mod config;
pub mod data_io;
pub mod grid;
pub mod math;
pub mod sounding;
pub mod time_utils;

pub use time_utils::*;
