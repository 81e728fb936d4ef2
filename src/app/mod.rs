// mdpick - app/mod.rs
//
// Application layer: what happens to a selection once the picker settles.
// Dependencies: core, util.
// Must NOT depend on: platform specifics.

pub mod import;
