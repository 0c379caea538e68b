//! Terminal front-end: application state, key handling and the table view.

pub mod app;
pub mod controller;
pub mod ui;
