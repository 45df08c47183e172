//! Workspace directory layout for one period's run.
//!
//! Each period writes into its own workspace: the five named outputs at the
//! root and every intermediate raster under `intermediate/`. Artifacts are
//! left in place when a later step fails.

use lucc_core::errors::LuccResult;
use lucc_core::pipeline::{ArtifactRole, ArtifactSink};
use lucc_core::raster::ValueRaster;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension for persisted rasters.
pub const RASTER_EXTENSION: &str = "raster";

/// An existing output directory with its `intermediate/` subdirectory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    intermediate: PathBuf,
}

impl Workspace {
    /// Create the workspace directories, succeeding if they already exist.
    pub fn create<P: AsRef<Path>>(root: P) -> LuccResult<Self> {
        let root = root.as_ref().to_path_buf();
        let intermediate = root.join("intermediate");
        fs::create_dir_all(&intermediate)?;
        Ok(Self { root, intermediate })
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named output artifact.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{RASTER_EXTENSION}"))
    }

    /// Path of a named intermediate artifact.
    pub fn intermediate_path(&self, name: &str) -> PathBuf {
        self.intermediate.join(format!("{name}.{RASTER_EXTENSION}"))
    }

    /// Path for an artifact according to its role.
    pub fn artifact_path(&self, name: &str, role: ArtifactRole) -> PathBuf {
        match role {
            ArtifactRole::Intermediate => self.intermediate_path(name),
            ArtifactRole::Output => self.output_path(name),
        }
    }
}

impl ArtifactSink for Workspace {
    fn persist(
        &mut self,
        name: &str,
        role: ArtifactRole,
        raster: &ValueRaster,
    ) -> LuccResult<()> {
        raster.save(self.artifact_path(name, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_root_and_intermediate_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::create(dir.path().join("2009_2024")).unwrap();
        assert!(ws.root().is_dir());
        assert!(ws.root().join("intermediate").is_dir());
    }

    #[test]
    fn create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        Workspace::create(dir.path()).unwrap();
        Workspace::create(dir.path()).unwrap();
    }

    #[test]
    fn artifact_paths_follow_role() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::create(dir.path()).unwrap();
        assert_eq!(
            ws.artifact_path("change_net", ArtifactRole::Output),
            dir.path().join("change_net.raster")
        );
        assert_eq!(
            ws.artifact_path("rate_bas", ArtifactRole::Intermediate),
            dir.path().join("intermediate").join("rate_bas.raster")
        );
    }
}
