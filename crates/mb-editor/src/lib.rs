pub mod sync;

pub use sync::{BoardEngine, BoardMutation, BoardSnapshot};
