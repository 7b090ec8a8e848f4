#![allow(clippy::new_without_default)]

pub mod actor;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod course;
pub mod error;
pub mod find;
pub mod landing;
pub mod paging;
pub mod promise;
pub mod store;
pub mod util;
