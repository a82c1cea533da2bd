pub mod color_match;
pub mod column_scan;
pub mod normalizer;
pub mod pixel;
pub mod plot_image;
pub mod run_selector;
pub mod trace_window;
