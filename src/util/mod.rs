pub mod environment;
pub mod filesystem;
pub mod graph;
pub mod graphmap;
