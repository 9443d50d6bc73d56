//! Boardlink Catalog - board catalog search and identity resolution
//!
//! This crate provides the core engine for matching connected hardware
//! against a catalog of known board definitions:
//! - Recursive search over the deserialized catalog tree
//! - Path navigation for fetching single attributes or whole sub-records
//! - Product-id to board identity resolution
//! - Typed board parameter records (upload, build, bootloader)

pub mod board;
pub mod catalog;
pub mod error;
pub mod identity;
pub mod navigate;
pub mod search;

pub use board::{BoardParams, BootloaderParams, BuildParams, UploadParams, UsbIdSet};
pub use catalog::Catalog;
pub use error::CatalogError;
pub use identity::{resolve_by_product_id, ResolvedBoard};
pub use navigate::navigate;
pub use search::{
    collect, find_by_token, find_by_token_and_value, find_product_ids, find_vendor_ids,
    path_matches, unique_values, PropertyMatch, PATH_DELIMITER,
};
