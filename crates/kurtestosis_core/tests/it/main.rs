use std::sync::Arc;

use kurtestosis_project::{Project, ProjectOptionsOverrides};
use kurtestosis_system::OsSystem;
use kurtestosis_test::TestContext;

mod orchestration;
mod scripted;

fn load_project(context: &TestContext, system: &OsSystem) -> Arc<Project> {
    Arc::new(Project::load(context.root(), system, &ProjectOptionsOverrides::default()).unwrap())
}
