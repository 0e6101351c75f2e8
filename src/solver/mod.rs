pub mod direct;

pub use direct::*;
