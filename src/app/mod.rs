//! Application module
//!
//! Contains the terminal host, split into:
//! - `state`: App struct, command dispatch and completion handling
//! - `surface`: the screen the pipeline draws through
//! - `input`: Key event handling
//! - `render`: UI rendering

mod input;
mod render;
mod state;
mod surface;

pub use state::App;
pub use surface::{Screen, View};
