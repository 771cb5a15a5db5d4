pub mod app;
pub mod editor;
pub mod net;
pub mod ui;
