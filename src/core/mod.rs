// mdpick - core/mod.rs
//
// Core picker logic layer.
// Dependencies: util layer and `futures` primitives.
// Must NOT depend on: platform, app, or any dialog crate directly.

pub mod event;
pub mod model;
pub mod picker;
pub mod surface;
