pub mod args;
pub mod exiftool;
pub mod processor;
pub mod sidecar;
pub mod tags;
