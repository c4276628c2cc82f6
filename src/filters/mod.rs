pub mod keywords;
pub mod rules;

pub use keywords::*;
pub use rules::*;
