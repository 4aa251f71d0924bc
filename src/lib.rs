#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod logging;
pub mod models;
pub mod components;
pub mod api;
pub mod catalog;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geolocation;
pub mod map;
pub mod realtime;
pub mod session;

pub use components::app::App;
