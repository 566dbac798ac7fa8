pub mod errors;
pub mod expressions;
pub mod statements;
pub mod tree;

pub use errors::*;
pub use expressions::Parser;
pub use tree::*;
