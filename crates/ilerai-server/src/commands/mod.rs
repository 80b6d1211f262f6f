pub mod dial;
pub mod info;
pub mod serve;
pub mod sessions;
