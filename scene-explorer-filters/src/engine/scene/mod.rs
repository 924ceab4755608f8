pub mod bounds;
pub mod builder;
pub mod metadata;
pub mod path;
