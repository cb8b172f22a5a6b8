use crate::actions::OwnerActions;
use crate::config::ConfigDocument;
use crate::deployment::Deployment;
use crate::error::{DesynthError, Result};
use crate::paths;
use crate::registry::SynthRegistry;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One run's view of the deployment artifacts: all stores loaded up front,
/// mutated in memory, and flushed with [`Session::commit`] immediately after
/// each confirmed on-chain step. There is no other mutable state.
///
/// The deployment record is read-only — it is the append-only history of
/// what was deployed, and stays intact even for removed synths.
#[derive(Debug)]
pub struct Session {
    pub network: String,
    pub dry_run: bool,
    pub config: ConfigDocument,
    pub deployment: Deployment,
    pub registry: SynthRegistry,
    pub owner_actions: OwnerActions,
    dir: PathBuf,
}

impl Session {
    pub fn open(dir: &Path, network: &str, dry_run: bool) -> Result<Self> {
        if !paths::deployment_path(dir).exists() {
            return Err(DesynthError::DeploymentNotFound(dir.display().to_string()));
        }
        Ok(Self {
            network: network.to_string(),
            dry_run,
            config: ConfigDocument::load(&paths::config_path(dir))?,
            deployment: Deployment::load(&paths::deployment_path(dir))?,
            registry: SynthRegistry::load(&paths::synths_path(dir))?,
            owner_actions: OwnerActions::load(&paths::owner_actions_path(dir))?,
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Drop a removed synth from the in-memory mirror: its three config
    /// entries and its registry entry, in the same logical step. Callers
    /// must follow a confirmed on-chain removal with [`Session::commit`].
    pub fn remove_synth(&mut self, name: &str) {
        let removed = self.config.remove_synth_contracts(name);
        debug!(synth = name, ?removed, "dropped config mirror entries");
        self.registry.remove(name);
    }

    /// Flush every mutable store. Dry-run sessions never touch disk.
    pub fn commit(&self) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.config.save(&paths::config_path(&self.dir))?;
        self.registry.save(&paths::synths_path(&self.dir))?;
        self.owner_actions.save(&paths::owner_actions_path(&self.dir))?;
        Ok(())
    }

    /// Flush only the owner-action queue, after a call was deferred to the
    /// owner. The mirror is untouched because the chain state has not
    /// changed yet.
    pub fn save_owner_actions(&self) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.owner_actions
            .save(&paths::owner_actions_path(&self.dir))
    }
}
