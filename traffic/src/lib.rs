pub mod aggregate;
pub mod format;
pub mod index;
pub mod policy;
pub mod scales;
pub mod window;
