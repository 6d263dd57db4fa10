pub mod editor;
pub mod summary;
