pub mod duration;
pub mod graph_enums;
pub mod graph_options;
