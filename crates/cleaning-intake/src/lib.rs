pub mod config;
pub mod error;
pub mod handlers;
pub mod inquiry;
pub mod mail;
pub mod places;
pub mod telemetry;
