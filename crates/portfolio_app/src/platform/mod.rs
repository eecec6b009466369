mod app;
mod effects;
mod logging;
mod script;
mod ui;

pub use app::run_app;
