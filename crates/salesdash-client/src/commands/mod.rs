pub(crate) mod common;
pub mod dashboard;
pub mod demo;
pub mod explore;
pub mod filters;
