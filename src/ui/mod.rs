//! UI layer
//!
//! Views, widgets, components and theme for the terminal host.

pub mod components;
pub mod navigation;
pub mod theme;
pub mod views;
pub mod widgets;
