pub mod descriptor;
pub mod fixtures;
pub mod log;
pub mod seed;
pub mod tree;
