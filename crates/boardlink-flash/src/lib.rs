//! Boardlink Flash - collaborators around the catalog engine
//!
//! This crate provides the utilities device-flashing logic needs once a
//! board has been identified:
//! - Firmware image digests for change detection
//! - Pipelines of external flashing tools with stdout/stdin plumbing
//! - Serial port record filtering and USB id normalization

pub mod image;
pub mod pipeline;
pub mod ports;

pub use image::image_digest;
pub use pipeline::{run_pipeline, FlashError, PipelineStage};
pub use ports::{filter_ports, format_usb_id, SerialPortInfo};
