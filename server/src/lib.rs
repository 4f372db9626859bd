// Library exports for testing and reuse

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod session;
pub mod views;
