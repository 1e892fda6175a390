pub mod engine;

pub use engine::{CaseSensitivity, QueryEngine, ReferenceMatch};
