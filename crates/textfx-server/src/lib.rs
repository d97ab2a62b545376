//! textfx-server - HTTP surface for running textfx tasks

pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;
pub mod tasks;
