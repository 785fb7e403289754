//! Descriptor reading: the scoped reader interface the skill graph loader consumes,
//! and a reader over YAML/JSON documents.

mod reader;
mod script;

pub use reader::{DescriptorReader, ScopeGuard, TableKey};
pub use script::{DescriptorError, ScriptDescriptor};
