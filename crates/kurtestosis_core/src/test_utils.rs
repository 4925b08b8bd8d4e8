use std::sync::Arc;

use camino::Utf8PathBuf;
use kurtestosis_project::{KurtosisManifest, Options, Project};
use kurtestosis_system::OsSystem;

/// An in-memory project rooted at `/packages/example`, with default settings.
pub(crate) fn project(package_name: &str) -> Arc<Project> {
    let root = Utf8PathBuf::from("/packages/example");
    let settings = Options::default().to_settings(&root, &OsSystem::new(&root));

    Arc::new(Project::new(
        root,
        KurtosisManifest::new(package_name),
        settings,
    ))
}
