//! Directory client: the external key-value namespace proposals live in.
//!
//! - `traits`: the async `DirectoryClient` contract
//! - `file_store`: JSON-file ledger used by the CLI
//! - `mock`: in-memory directory with failure and race hooks for tests

pub mod file_store;
pub mod mock;
pub mod traits;

pub use file_store::FileDirectory;
pub use mock::MockDirectory;
pub use traits::{DirectoryClient, DirectoryError, DirectoryResult};
