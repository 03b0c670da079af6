pub mod app;
pub mod controls_panel;
pub mod settings_modal;
pub mod sketch_pad;

pub use app::App;
