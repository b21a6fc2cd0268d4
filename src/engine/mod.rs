pub mod engine;
pub use engine::*;

pub mod transcript;
pub use transcript::*;
