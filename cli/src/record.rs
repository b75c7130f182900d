use anyhow::{Context, Result};
use kittymerge_core::{RecordBest, Score};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    best: Score,
}

/// Best score kept in a small JSON file.
#[derive(Debug)]
pub(crate) struct BestRecordStore {
    path: Option<PathBuf>,
    best: Score,
}

impl BestRecordStore {
    /// Loads the record at `path`, a missing file counts as no record yet.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let best = match fs::read_to_string(path) {
            Ok(contents) => {
                let record: RecordFile = serde_json::from_str(&contents)
                    .with_context(|| format!("Could not parse record file {}", path.display()))?;
                record.best
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Could not read record file {}", path.display()));
            }
        };
        log::debug!("Loaded best record {} from {}", best, path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            best,
        })
    }

    /// Record that lives only as long as the process.
    pub(crate) fn in_memory() -> Self {
        Self {
            path: None,
            best: 0,
        }
    }

    pub(crate) fn best(&self) -> Score {
        self.best
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = serde_json::to_string(&RecordFile { best: self.best })?;
        fs::write(path, contents)
            .with_context(|| format!("Could not write record file {}", path.display()))
    }
}

impl RecordBest for BestRecordStore {
    fn record_best(&mut self, score: Score) {
        if score <= self.best {
            return;
        }
        self.best = score;
        if let Err(err) = self.save() {
            log::error!("{err:#}");
        }
    }
}
