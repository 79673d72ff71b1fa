pub mod config;
pub mod namespace;
pub mod project;
pub mod quantity;
pub mod quota;
pub mod validate;
