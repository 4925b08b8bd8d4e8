mod discovery;
mod models;
mod parse;

pub use discovery::{Discovery, DiscoveryError, GlobDiscovery};
pub use models::{TestFile, TestFunction};
