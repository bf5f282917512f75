pub mod file;
pub mod pagination;
