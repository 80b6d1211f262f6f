//! Primary healthcare center directory.

mod model;
mod repository;

pub use model::PhcEntry;
pub use repository::PhcDirectory;
