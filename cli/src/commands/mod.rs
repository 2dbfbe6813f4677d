pub mod files;
pub mod tl;
