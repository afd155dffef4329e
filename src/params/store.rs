//! Committed parameter snapshot plus pending edits.
//!
//! The frame loop reads only the committed snapshot. Edits from the control
//! surface land in the pending buffer and are swapped in at a tick boundary.

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::Parameters;
use crate::error::{Error, Result};

/// What changed when pending edits were committed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterChanges {
    pub any: bool,
    pub shape: bool,
    pub strategy: bool,
    pub reaction: bool,
    pub camera: bool,
    pub noise_seed: bool,
}

/// Parameter snapshot with a separate pending buffer
#[derive(Debug, Clone)]
pub struct ParameterStore {
    committed: Parameters,
    pending: Parameters,
}

impl ParameterStore {
    pub fn new(params: Parameters) -> Self {
        Self {
            committed: params.clone(),
            pending: params,
        }
    }

    /// Immutable snapshot for the current tick
    pub fn snapshot(&self) -> &Parameters {
        &self.committed
    }

    /// Pending buffer, applied on the next [`commit`](Self::commit)
    pub fn edit(&mut self) -> &mut Parameters {
        &mut self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending != self.committed
    }

    /// Apply pending edits atomically
    ///
    /// # Returns
    /// Which parts of the snapshot changed
    pub fn commit(&mut self) -> ParameterChanges {
        if !self.has_pending() {
            return ParameterChanges::default();
        }

        let changes = ParameterChanges {
            any: true,
            shape: self.pending.shape != self.committed.shape,
            strategy: self.pending.animation.strategy != self.committed.animation.strategy,
            reaction: self.pending.reaction != self.committed.reaction,
            camera: self.pending.camera != self.committed.camera,
            noise_seed: self.pending.noise_seed != self.committed.noise_seed,
        };
        self.committed = self.pending.clone();
        debug!("Committed parameter changes: {:?}", changes);
        changes
    }

    /// Write the committed snapshot to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        self.committed.save(path)
    }

    /// Read `path` into the pending buffer
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.pending = Parameters::load(path)?;
        Ok(())
    }
}

impl Parameters {
    /// Read parameters from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::configuration(path, format!("cannot read settings: {}", e)))?;
        let params = serde_json::from_str(&text)?;
        info!("Loaded settings from {}", path.display());
        Ok(params)
    }

    /// Write parameters as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}
