//! Storage primitives shared by the file-backed repositories.

mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;
