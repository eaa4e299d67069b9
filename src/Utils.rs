/// equally spaced grids, linear resampling and axis ranges
pub mod grid;
/// rendering backend chosen from the output file extension
pub mod output_format;
/// CSV export of computed series
pub mod save_results;
/// opening rendered files in the system viewer
pub mod show_this_pic;
