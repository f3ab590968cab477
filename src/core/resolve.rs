/*!
 * Destination resolution: size token + file name -> provisioned output path
 */

use std::path::PathBuf;
use std::sync::Arc;

use dpiwatch_core_interface::AssetSystem;

use super::alias::SizeAliasTable;
use super::provision::DirectoryProvisioner;
use crate::error::Result;

/// Maps classified files into `<dest_root>/<prefix>-<qualifier>/<file>`
pub struct DestinationResolver<S: AssetSystem> {
    provisioner: DirectoryProvisioner<S>,
    aliases: Arc<SizeAliasTable>,
    dest_root: PathBuf,
    dir_prefix: String,
}

impl<S: AssetSystem> DestinationResolver<S> {
    pub fn new(
        system: Arc<S>,
        aliases: Arc<SizeAliasTable>,
        dest_root: impl Into<PathBuf>,
        dir_prefix: impl Into<String>,
    ) -> Self {
        Self {
            provisioner: DirectoryProvisioner::new(system),
            aliases,
            dest_root: dest_root.into(),
            dir_prefix: dir_prefix.into(),
        }
    }

    /// Output directory for a size token, without touching the filesystem
    ///
    /// Tokens missing from the alias table are used verbatim as the
    /// qualifier.
    pub fn directory_for(&self, size_token: &str) -> PathBuf {
        let qualifier = self.aliases.qualifier_for(size_token);
        self.dest_root
            .join(format!("{}-{}", self.dir_prefix, qualifier))
    }

    /// Resolve and provision the destination for `file_name`
    ///
    /// The directory is guaranteed to exist when `Ok` is returned. A
    /// provisioning failure is returned as-is; the caller skips the transfer.
    pub async fn resolve(&self, size_token: &str, file_name: &str) -> Result<PathBuf> {
        let dir = self.directory_for(size_token);
        self.provisioner.ensure_dir(&dir).await?;
        Ok(dir.join(file_name))
    }
}
