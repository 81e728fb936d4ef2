// mdpick - platform/mod.rs
//
// Platform layer: selection hosts and configuration.
// Dependencies: core, util, rfd, directories.
// Must NOT depend on: app.

pub mod config;
pub mod native;
pub mod scripted;
