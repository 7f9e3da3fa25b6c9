#![forbid(unsafe_code)]

pub mod experiment;
pub mod model;
pub mod time;

pub use time::Clock;
