pub mod app;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod state;
pub mod users;
