//! Weight checkpoint files (std-only).
//!
//! A checkpoint is one pretty-printed JSON document carrying the network shape,
//! the flat weight vector and a lowercase-hex SHA-256 over both. Writes go to a
//! sibling `.tmp` file first and are renamed into place.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{Error, FeedForwardNet, NetworkShape, Result, WeightCheckpoint};

const SCHEMA_VERSION_V1: u32 = 1;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct CheckpointFileV1 {
    schema_version: u32,
    name: String,
    shape: NetworkShape,
    weights: Vec<f64>,
    sha256: String, // lowercase hex
}

/// Write the current weights of `net` to `path`.
///
/// The checkpoint name is the file stem. Returns the written digest.
pub fn save_checkpoint(path: impl AsRef<Path>, net: &FeedForwardNet) -> Result<String> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("checkpoint");
    write_checkpoint(path, &WeightCheckpoint::capture(name, net))
}

/// Write an already captured checkpoint to `path`. Returns the written digest.
pub fn write_checkpoint(path: impl AsRef<Path>, checkpoint: &WeightCheckpoint) -> Result<String> {
    let path = path.as_ref();
    let digest = weights_digest(&checkpoint.shape, &checkpoint.weights);
    let file = CheckpointFileV1 {
        schema_version: SCHEMA_VERSION_V1,
        name: checkpoint.name.clone(),
        shape: checkpoint.shape,
        weights: checkpoint.weights.clone(),
        sha256: digest.clone(),
    };
    let json = serde_json::to_vec_pretty(&file)?;
    atomic_write(path, &json)?;
    debug!(path = %path.display(), sha256 = %digest, "checkpoint written");
    Ok(digest)
}

/// Read and verify a checkpoint file.
pub fn read_checkpoint(path: impl AsRef<Path>) -> Result<WeightCheckpoint> {
    let file: CheckpointFileV1 = serde_json::from_reader(File::open(path.as_ref())?)?;
    if file.schema_version != SCHEMA_VERSION_V1 {
        return Err(Error::UnsupportedVersion(file.schema_version));
    }

    let actual = weights_digest(&file.shape, &file.weights);
    if actual != file.sha256 {
        return Err(Error::ChecksumMismatch {
            expected: file.sha256,
            actual,
        });
    }

    Ok(WeightCheckpoint {
        name: file.name,
        version: WeightCheckpoint::VERSION,
        shape: file.shape,
        weights: file.weights,
    })
}

/// Read, verify and rebuild the network stored at `path`.
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<FeedForwardNet> {
    Ok(read_checkpoint(path)?.restore()?)
}

/// SHA-256 over the three shape dimensions (u64 LE) followed by each weight
/// (f64 LE bytes), as lowercase hex.
pub fn weights_digest(shape: &NetworkShape, weights: &[f64]) -> String {
    let mut hasher = Sha256::new();
    for dim in [shape.num_input(), shape.num_hidden(), shape.num_output()] {
        hasher.update((dim as u64).to_le_bytes());
    }
    for w in weights {
        hasher.update(w.to_le_bytes());
    }
    hex_lower(&hasher.finalize())
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"))?;

    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let mut f = File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.flush()?;
        let _ = f.sync_all();
    }

    fs::rename(&tmp_path, path)
}

fn hex_lower(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}
