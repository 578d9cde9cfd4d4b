pub mod error;

// App catalog module
pub mod catalog;
