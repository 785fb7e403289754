use std::path::PathBuf;

use crate::descriptor::DescriptorError;

/// Why a skill graph could not be loaded. On any of these the graph is left empty.
#[derive(Debug, thiserror::Error)]
pub enum SkillGraphError {
    #[error("couldn't open skill graph file {}: {source}", .path.display())]
    SourceUnopenable {
        path: PathBuf,
        source: DescriptorError,
    },

    #[error("empty 'skill_graph' table in {source_name}")]
    EmptyRoot { source_name: String },

    #[error("couldn't open table 'skill_graph' in {source_name}")]
    RootScopeUnopenable { source_name: String },

    /// `loaded_before_failure` nodes were read before the failing one and then discarded.
    #[error("couldn't open table '{node_id}' in {source_name} ({loaded_before_failure} nodes read before it were discarded)")]
    NodeScopeUnopenable {
        source_name: String,
        node_id: u32,
        loaded_before_failure: usize,
    },

    #[error("skill graph already initialized with {nodes} nodes")]
    AlreadyInitialized { nodes: usize },
}
