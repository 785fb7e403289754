//! Skill graph: the character progression tree loaded from a descriptor file.
//!
//! The graph is loaded once, all-or-nothing: any failure leaves it empty. Node ids are
//! not required to be unique; every node read is kept in source order, and lookup by
//! id returns the first one.

mod error;
mod loader;
mod node;

pub use error::SkillGraphError;
pub use node::SkillNode;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crate::descriptor::{DescriptorReader, ScriptDescriptor};

/// Owns every skill node, in the order the source listed them.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    nodes: Vec<SkillNode>,
    /// Node id -> index of its first occurrence in `nodes`.
    index: HashMap<u32, usize>,
}

impl SkillGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph from a descriptor file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SkillGraphError> {
        let mut graph = Self::new();
        graph.initialize(path)?;
        Ok(graph)
    }

    /// Open `path` and load its nodes into this graph.
    ///
    /// Fails without touching the graph when it already holds nodes.
    pub fn initialize(&mut self, path: impl AsRef<Path>) -> Result<(), SkillGraphError> {
        self.ensure_uninitialized()?;
        let path = path.as_ref();
        let mut script = ScriptDescriptor::open_file(path).map_err(|source| {
            log::warn!("couldn't open file: {}: {}", path.display(), source);
            SkillGraphError::SourceUnopenable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.initialize_from(&mut script)
    }

    /// Load nodes from an already opened reader, starting at its current scope.
    pub fn initialize_from<R: DescriptorReader + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<(), SkillGraphError> {
        self.ensure_uninitialized()?;
        let nodes = loader::read_skill_nodes(reader)?;
        self.install(nodes);
        log::info!(
            "loaded {} skill nodes ({} links) from {}",
            self.nodes.len(),
            self.total_link_count(),
            reader.source_name()
        );
        Ok(())
    }

    fn ensure_uninitialized(&self) -> Result<(), SkillGraphError> {
        if self.nodes.is_empty() {
            Ok(())
        } else {
            Err(SkillGraphError::AlreadyInitialized {
                nodes: self.nodes.len(),
            })
        }
    }

    fn install(&mut self, nodes: Vec<SkillNode>) {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            match index.entry(node.id()) {
                Entry::Vacant(e) => {
                    e.insert(i);
                }
                Entry::Occupied(_) => {
                    log::warn!(
                        "duplicate skill node id {}; lookups return the first one",
                        node.id()
                    );
                }
            }
        }
        self.nodes = nodes;
        self.index = index;
    }

    /// The node with the given id, or None. With duplicate ids, the first one loaded.
    pub fn get_skill_node(&self, id: u32) -> Option<&SkillNode> {
        self.index.get(&id).and_then(|&i| self.nodes.get(i))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// All nodes in load order, duplicates included.
    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of outgoing link counts over all nodes.
    pub fn total_link_count(&self) -> usize {
        self.nodes.iter().map(|n| n.node_links().len()).sum()
    }
}
