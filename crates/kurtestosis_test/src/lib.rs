mod context;
mod utils;

pub use context::TestContext;
pub use utils::{dedent, tempdir_filter};

/// A `kurtosis.yml` for a package named `github.com/kurtestosis/example`.
pub const DEFAULT_MANIFEST: &str = "name: github.com/kurtestosis/example\n";
