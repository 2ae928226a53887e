//! Persistence of probabilities in readable and packed form.

pub mod archive;

pub use archive::{from_binary, from_json, load, save, to_binary, to_json, ArchiveFormat};
