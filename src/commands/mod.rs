pub mod metadata;
pub mod render;
pub mod serve;
