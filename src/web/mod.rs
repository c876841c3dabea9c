//! The HTTP surface of the dashboard.

pub mod handlers;
pub mod pages;
pub mod server;
pub mod state;
