pub mod collation;
pub mod collection;
pub mod config;
pub mod error;
pub mod gateway;
pub mod images;
pub mod model;
pub mod pages;
