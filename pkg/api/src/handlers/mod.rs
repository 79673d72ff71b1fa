pub mod namespaces;
pub mod projects;
