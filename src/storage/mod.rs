//! Object storage contract for uploaded notes.
//!
//! Provides the configuration and result shapes shared with the remote object
//! store, an [`ObjectUploader`] trait, and [`FsUploader`], which writes objects
//! to a local directory.
//!
//! - [`R2Config`] - Bucket identity and credentials
//! - [`UploadResult`] - Key, public URL, size and checksum of a stored object
//! - [`ObjectUploader`] - Upload abstraction consumed by the import service

mod fs_uploader;
mod types;

pub use fs_uploader::FsUploader;
pub use types::{
    ObjectUploader, R2Config, StorageError, UploadResult, build_object_key, sha256_hex,
};

#[cfg(test)]
pub use types::MockObjectUploader;
