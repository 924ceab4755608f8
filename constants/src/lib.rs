pub mod highlight;
pub mod metadata;
pub mod panel;
pub mod path;
pub mod stream;
