pub mod move_plan;
pub mod tree;

pub use move_plan::*;
pub use tree::*;
