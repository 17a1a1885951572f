pub mod app;
pub mod content_unavailable;
pub mod controls_panel;
pub mod editor_view;
pub mod legend;
pub mod legend_panel;
pub mod level_view;
pub mod program_panel;
pub mod result_overlay;
pub mod settings_modal;
pub mod stats_panel;
