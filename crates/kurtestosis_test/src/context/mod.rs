mod test_context;

pub use test_context::TestContext;
