pub mod favicon;
pub mod root;
pub mod summary;
