#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod scoring;
pub mod time;

pub use config::QuizConfig;
pub use error::Error;
pub use time::Clock;
