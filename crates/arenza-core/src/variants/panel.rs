//! Per-size activation and upload tracking for the admin upload panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Variant;

/// The fixed size labels offered by the upload panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelSize {
    P,
    M,
    G,
    GG,
    G1,
    G2,
}

impl PanelSize {
    pub const ALL: [PanelSize; 6] = [
        PanelSize::P,
        PanelSize::M,
        PanelSize::G,
        PanelSize::GG,
        PanelSize::G1,
        PanelSize::G2,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PanelSize::P => "P",
            PanelSize::M => "M",
            PanelSize::G => "G",
            PanelSize::GG => "GG",
            PanelSize::G1 => "G1",
            PanelSize::G2 => "G2",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PanelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown size \"{0}\"; expected one of P, M, G, GG, G1, G2")]
pub struct UnknownPanelSize(pub String);

impl FromStr for PanelSize {
    type Err = UnknownPanelSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s.trim())
            .ok_or_else(|| UnknownPanelSize(s.to_owned()))
    }
}

/// One file successfully placed in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    /// Original file name as picked by the administrator.
    pub name: String,
    /// Object path inside the bucket.
    pub path: String,
    /// Public URL the storefront renders.
    pub url: String,
}

impl StoredUpload {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SizeSlot {
    active: bool,
    uploads: Vec<StoredUpload>,
}

/// Session-local state of the upload panel.
///
/// Toggling a size off keeps its uploads, so toggling it back on restores
/// them. Only [`PanelState::materialize`] decides what reaches storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    slots: [SizeSlot; 6],
}

impl PanelState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the size's active flag and returns the new value.
    pub fn toggle(&mut self, size: PanelSize) -> bool {
        let slot = &mut self.slots[size.index()];
        slot.active = !slot.active;
        slot.active
    }

    #[must_use]
    pub fn is_active(&self, size: PanelSize) -> bool {
        self.slots[size.index()].active
    }

    /// Appends an upload to the size's list. No de-duplication.
    pub fn record_upload(&mut self, size: PanelSize, upload: StoredUpload) {
        self.slots[size.index()].uploads.push(upload);
    }

    /// Forgets every upload of `size` stored at `path`. The remote object is
    /// left in place. Returns `true` if anything was removed.
    pub fn remove_upload(&mut self, size: PanelSize, path: &str) -> bool {
        let uploads = &mut self.slots[size.index()].uploads;
        let before = uploads.len();
        uploads.retain(|upload| upload.path != path);
        uploads.len() != before
    }

    #[must_use]
    pub fn uploads(&self, size: PanelSize) -> &[StoredUpload] {
        &self.slots[size.index()].uploads
    }

    pub fn active_sizes(&self) -> impl Iterator<Item = PanelSize> + '_ {
        PanelSize::ALL
            .into_iter()
            .filter(|size| self.is_active(*size))
    }

    /// Builds the canonical variant list: active sizes with at least one
    /// upload, in panel order, each carrying its upload URLs.
    #[must_use]
    pub fn materialize(&self) -> Vec<Variant> {
        self.active_sizes()
            .filter_map(|size| {
                let prints: Vec<String> = self
                    .uploads(size)
                    .iter()
                    .map(|upload| upload.url.trim().to_owned())
                    .filter(|url| !url.is_empty())
                    .collect();
                (!prints.is_empty()).then(|| Variant::new(size.as_str(), prints))
            })
            .collect()
    }

    /// Returns every size to inactive with no uploads.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
