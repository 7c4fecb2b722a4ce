pub mod config;
pub mod error;
pub mod hidden;
pub mod note;
pub mod paths;
pub mod scanner;
pub mod tags;
