//! Reusable UI widgets

mod notification_banner;
mod status_bar;

pub use notification_banner::render_notification_banner;
pub use status_bar::{build_status_bar, render_status_bar};
