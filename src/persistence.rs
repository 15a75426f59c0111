//! Save record persistence
//!
//! One JSON file carrying everything that outlives a run: the high score,
//! the coin bank, and the upgrade ledger. Loading never fails: a missing or
//! malformed file degrades to the documented defaults so a corrupt save can
//! never take the game down with it. Saving happens only at run boundaries,
//! never inside the frame loop.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::progression::ProgressionStore;
use crate::sim::RunSummary;

/// Everything persisted across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveData {
    pub high_score: u64,
    pub total_coins: u64,
    pub upgrades: ProgressionStore,
}

impl SaveData {
    /// Load from disk, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    log::info!("loaded save from {}", path.display());
                    data
                }
                Err(e) => {
                    log::warn!("malformed save ({e}), starting fresh");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no save found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write the record to disk
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("save written to {}", path.display());
        Ok(())
    }

    /// Merge a finished run: keep the best score, bank the coins
    pub fn record_run(&mut self, summary: &RunSummary) {
        if summary.final_score > self.high_score {
            self.high_score = summary.final_score;
        }
        self.total_coins += summary.final_coins;
    }

    /// Factory reset
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
