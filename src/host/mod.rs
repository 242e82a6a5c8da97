//! Host adapters that feed batches into the node

pub mod manifest;

pub use manifest::{AttachmentSource, BatchManifest, ManifestItem};
