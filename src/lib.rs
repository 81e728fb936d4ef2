// mdpick - lib.rs
//
// Library entry point. `core::picker::FilePicker` is the public operation;
// `platform` provides the native and scripted selection hosts.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::model::SelectionResult;
pub use crate::core::picker::{FilePicker, PickerPolicy};
