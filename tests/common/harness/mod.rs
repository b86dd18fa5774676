//! Test harness for CLI integration tests.
//!
//! Provides isolated repositories, programmatic zettel creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod zettel;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::ZetCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use zettel::TestZettel;
