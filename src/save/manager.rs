//! Save-file management with a checksummed on-disk container.
//!
//! File format:
//! - Version magic (8 bytes, little endian)
//! - Payload length (4 bytes, little endian)
//! - JSON-serialized [`SaveData`] (variable length)
//! - SHA-256 checksum over the three sections above (32 bytes)
//!
//! The JSON body is what makes old files loadable: unknown fields in
//! either direction are tolerated, missing ones take their defaults. A
//! failed magic, length, checksum or parse aborts the load and leaves
//! the in-memory state untouched.

use crate::save::data::SaveData;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const SAVE_VERSION_MAGIC: u64 = 0x4F56_5257_4C44_5631; // "OVRWLDV1"

/// Manages the saves directory and the container format.
pub struct SaveManager {
    saves_dir: PathBuf,
}

impl SaveManager {
    /// Opens (and creates if needed) the platform saves directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "overworld").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let saves_dir = project_dirs.config_dir().join("saves");
        fs::create_dir_all(&saves_dir)?;

        Ok(Self { saves_dir })
    }

    /// A SaveManager rooted in a unique temporary directory, for tests.
    pub fn new_in(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { saves_dir: dir })
    }

    /// Full path of a named save slot.
    pub fn slot_path(&self, name: &str) -> PathBuf {
        self.saves_dir.join(format!("{}.sav", name))
    }

    /// Names of the existing save slots, sorted.
    pub fn list_slots(&self) -> io::Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.saves_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "sav") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slots.push(stem.to_string());
                }
            }
        }
        slots.sort();
        Ok(slots)
    }

    /// Writes a snapshot to a named slot.
    pub fn save_slot(&self, name: &str, data: &SaveData) -> io::Result<()> {
        write_save(&self.slot_path(name), data)
    }

    /// Reads a named slot.
    pub fn load_slot(&self, name: &str) -> io::Result<SaveData> {
        read_save(&self.slot_path(name))
    }
}

/// Serializes and writes one save file.
pub fn write_save(path: &Path, data: &SaveData) -> io::Result<()> {
    let payload = serde_json::to_vec(data)?;
    let payload_len = payload.len() as u32;

    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(payload_len.to_le_bytes());
    hasher.update(&payload);
    let checksum = hasher.finalize();

    let mut file = fs::File::create(path)?;
    file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
    file.write_all(&payload_len.to_le_bytes())?;
    file.write_all(&payload)?;
    file.write_all(&checksum)?;
    Ok(())
}

/// Reads and verifies one save file.
pub fn read_save(path: &Path) -> io::Result<SaveData> {
    let mut file = fs::File::open(path)?;

    let mut magic_bytes = [0u8; 8];
    file.read_exact(&mut magic_bytes)?;
    let magic = u64::from_le_bytes(magic_bytes);
    if magic != SAVE_VERSION_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Invalid save magic: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, magic
            ),
        ));
    }

    let mut length_bytes = [0u8; 4];
    file.read_exact(&mut length_bytes)?;
    let payload_len = u32::from_le_bytes(length_bytes);

    let mut payload = vec![0u8; payload_len as usize];
    file.read_exact(&mut payload)?;

    let mut stored_checksum = [0u8; 32];
    file.read_exact(&mut stored_checksum)?;

    let mut hasher = Sha256::new();
    hasher.update(magic_bytes);
    hasher.update(length_bytes);
    hasher.update(&payload);
    let computed_checksum = hasher.finalize();

    if stored_checksum != computed_checksum.as_slice() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Checksum verification failed",
        ));
    }

    let data = serde_json::from_slice(&payload)?;
    Ok(data)
}
