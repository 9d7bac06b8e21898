//! One module per subcommand; `main::run` dispatches here.

pub mod apply;
pub mod completions;
pub mod init;
pub mod list;
pub mod show;

use stencil_adapters::{FilesystemBundleLoader, InMemoryRegistry, discover_bundles};
use tracing::warn;

use crate::{config::AppConfig, error::CliResult};

/// Build the bundle registry for this invocation: built-ins first, then
/// bundles discovered on disk (which may shadow built-ins by name).
pub(crate) fn build_registry(config: &AppConfig) -> CliResult<InMemoryRegistry> {
    let registry = InMemoryRegistry::with_builtin()?;

    for bundle in discover_bundles() {
        registry.insert(bundle)?;
    }

    if let Some(dir) = &config.bundles.dir {
        match FilesystemBundleLoader::new(dir).load_all() {
            Ok(bundles) => {
                for bundle in bundles {
                    registry.insert(bundle)?;
                }
            }
            Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping configured bundle dir"),
        }
    }

    Ok(registry)
}
