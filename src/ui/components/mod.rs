//! Building blocks shared by the views

mod blocks;
mod empty_state;
mod message;

pub use blocks::{bordered_block, bordered_block_with_notification, header_block, side_borders_block};
pub use empty_state::{empty_panel_state, empty_state, no_changesets_state};
pub use message::{build_notification_line, build_notification_title};
