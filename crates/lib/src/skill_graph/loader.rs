//! Reads skill nodes out of a descriptor.
//!
//! Layout: a root table `skill_graph` keyed by node id. Each node table holds
//! `x_location`, `y_location`, `icon_file`, `experience_points_needed` and
//! `skill_id_learned`, plus the optional `items_needed` (item id -> quantity),
//! `stats` (stat id -> amount) and `links` (list of node ids).

use crate::descriptor::{DescriptorReader, ScopeGuard, TableKey};

use super::error::SkillGraphError;
use super::node::SkillNode;

const ROOT_TABLE: &str = "skill_graph";
const ITEMS_NEEDED_TABLE: &str = "items_needed";
const STATS_TABLE: &str = "stats";
const LINKS_FIELD: &str = "links";

/// Read every node under the root table, in key order of the source.
///
/// Node tables are opened by position, so nodes sharing an id are each read from
/// their own table. Stops at the first node whose table can't be opened. Scopes
/// opened here are closed on every return path.
pub(crate) fn read_skill_nodes<R: DescriptorReader + ?Sized>(
    reader: &mut R,
) -> Result<Vec<SkillNode>, SkillGraphError> {
    let source_name = reader.source_name().to_string();

    let node_ids = reader.read_table_keys(ROOT_TABLE.into());
    if node_ids.is_empty() {
        log::warn!("empty '{}' table in {}", ROOT_TABLE, source_name);
        return Err(SkillGraphError::EmptyRoot { source_name });
    }

    let Some(mut root) = ScopeGuard::open(reader, ROOT_TABLE.into()) else {
        log::warn!("couldn't open table '{}' in {}", ROOT_TABLE, source_name);
        return Err(SkillGraphError::RootScopeUnopenable { source_name });
    };

    let mut nodes = Vec::with_capacity(node_ids.len());
    for (position, node_id) in node_ids.into_iter().enumerate() {
        let Some(mut scope) = ScopeGuard::open(&mut *root, TableKey::Entry(position)) else {
            log::warn!("couldn't open table '{}' in {}", node_id, source_name);
            return Err(SkillGraphError::NodeScopeUnopenable {
                source_name,
                node_id,
                loaded_before_failure: nodes.len(),
            });
        };

        let mut node = read_base_data(&*scope, node_id);
        read_items_needed(&mut *scope, &mut node);
        read_stats_upgrades(&mut *scope, &mut node);
        read_node_links(&*scope, &mut node);

        log::debug!(
            "skill node {}: {} items, {} stats, {} links",
            node_id,
            node.items_needed().len(),
            node.stats_upgrades().len(),
            node.node_links().len()
        );
        nodes.push(node);
    }
    Ok(nodes)
}

fn read_base_data<R: DescriptorReader + ?Sized>(reader: &R, node_id: u32) -> SkillNode {
    let x = required_uint(reader, node_id, "x_location");
    let y = required_uint(reader, node_id, "y_location");
    let icon_file = reader.read_string("icon_file".into()).unwrap_or_else(|| {
        log::warn!(
            "{}: node {} has no string 'icon_file', using empty path",
            reader.source_name(),
            node_id
        );
        String::new()
    });
    let experience_points_needed = required_uint(reader, node_id, "experience_points_needed");
    let skill_id_learned = required_uint(reader, node_id, "skill_id_learned");
    SkillNode::new(node_id, x, y, icon_file, experience_points_needed, skill_id_learned)
}

/// Missing or invalid values read as 0, with a warning.
fn required_uint<R: DescriptorReader + ?Sized>(reader: &R, node_id: u32, field: &str) -> u32 {
    reader.read_uint(field.into()).unwrap_or_else(|| {
        log::warn!(
            "{}: node {} has no unsigned integer '{}', using 0",
            reader.source_name(),
            node_id,
            field
        );
        0
    })
}

fn read_items_needed<R: DescriptorReader + ?Sized>(reader: &mut R, node: &mut SkillNode) {
    for (item_id, quantity) in read_uint_table(reader, ITEMS_NEEDED_TABLE) {
        node.add_needed_item(item_id, quantity);
    }
}

fn read_stats_upgrades<R: DescriptorReader + ?Sized>(reader: &mut R, node: &mut SkillNode) {
    for (stat_id, upgrade) in read_uint_table(reader, STATS_TABLE) {
        node.add_stat_upgrade(stat_id, upgrade);
    }
}

/// No links is fine: the node ends a branch.
fn read_node_links<R: DescriptorReader + ?Sized>(reader: &R, node: &mut SkillNode) {
    for target in reader.read_uint_vector(LINKS_FIELD.into()) {
        node.add_node_link(target);
    }
}

/// Entries of an optional `id -> uint` table. Absent or empty tables yield nothing.
fn read_uint_table<R: DescriptorReader + ?Sized>(reader: &mut R, table: &str) -> Vec<(u32, u32)> {
    let ids = reader.read_table_keys(table.into());
    if ids.is_empty() {
        return Vec::new();
    }
    let Some(scope) = ScopeGuard::open(reader, table.into()) else {
        return Vec::new();
    };
    ids.into_iter()
        .map(|id| {
            let value = scope.read_uint(TableKey::Id(id)).unwrap_or_else(|| {
                log::warn!(
                    "{}: '{}' entry {} is not an unsigned integer, using 0",
                    scope.source_name(),
                    table,
                    id
                );
                0
            });
            (id, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ScriptDescriptor;

    /// Delegates to a document reader but refuses to open one root entry, and
    /// records which root entries were opened.
    struct RefusingReader {
        inner: ScriptDescriptor,
        refuse: usize,
        opened: Vec<usize>,
    }

    impl DescriptorReader for RefusingReader {
        fn source_name(&self) -> &str {
            self.inner.source_name()
        }
        fn read_table_keys(&self, table: TableKey<'_>) -> Vec<u32> {
            self.inner.read_table_keys(table)
        }
        fn open_table(&mut self, key: TableKey<'_>) -> bool {
            if let TableKey::Entry(position) = key {
                if self.inner.scope_depth() == 1 {
                    if position == self.refuse {
                        return false;
                    }
                    self.opened.push(position);
                }
            }
            self.inner.open_table(key)
        }
        fn close_table(&mut self) {
            self.inner.close_table()
        }
        fn scope_depth(&self) -> usize {
            self.inner.scope_depth()
        }
        fn read_uint(&self, key: TableKey<'_>) -> Option<u32> {
            self.inner.read_uint(key)
        }
        fn read_string(&self, key: TableKey<'_>) -> Option<String> {
            self.inner.read_string(key)
        }
        fn read_uint_vector(&self, key: TableKey<'_>) -> Vec<u32> {
            self.inner.read_uint_vector(key)
        }
    }

    const THREE_NODES: &str = r#"
skill_graph:
  1:
    x_location: 0
    y_location: 0
    icon_file: a.png
    experience_points_needed: 0
    skill_id_learned: 0
    links: [2]
  2:
    x_location: 10
    y_location: 0
    icon_file: b.png
    experience_points_needed: 50
    skill_id_learned: 0
    links: [3]
  3:
    x_location: 20
    y_location: 0
    icon_file: c.png
    experience_points_needed: 90
    skill_id_learned: 0
"#;

    fn script(text: &str) -> ScriptDescriptor {
        ScriptDescriptor::from_yaml_str("test.yaml", text).unwrap()
    }

    #[test]
    fn node_failure_stops_loading_and_closes_every_scope() {
        let mut reader = RefusingReader {
            inner: script(THREE_NODES),
            refuse: 1,
            opened: Vec::new(),
        };
        let err = read_skill_nodes(&mut reader).unwrap_err();
        match err {
            SkillGraphError::NodeScopeUnopenable {
                node_id,
                loaded_before_failure,
                ..
            } => {
                assert_eq!(node_id, 2);
                assert_eq!(loaded_before_failure, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(reader.opened, vec![0]);
        assert_eq!(reader.scope_depth(), 0);
    }

    #[test]
    fn repeated_ids_each_read_their_own_table() {
        let mut reader = script(
            r#"
skill_graph:
  4:
    x_location: 1
    y_location: 2
    icon_file: first.png
    experience_points_needed: 10
    skill_id_learned: 0
    links: [5]
  "4":
    x_location: 30
    y_location: 40
    icon_file: second.png
    experience_points_needed: 20
    skill_id_learned: 8
    items_needed:
      3001: 2
"#,
        );
        let nodes = read_skill_nodes(&mut reader).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id(), 4);
        assert_eq!(nodes[0].position(), (1, 2));
        assert_eq!(nodes[0].node_links(), &[5]);
        assert!(nodes[0].items_needed().is_empty());
        assert_eq!(nodes[1].id(), 4);
        assert_eq!(nodes[1].position(), (30, 40));
        assert_eq!(nodes[1].icon_file(), "second.png");
        assert_eq!(nodes[1].learned_skill(), Some(8));
        assert_eq!(nodes[1].items_needed().get(&3001), Some(&2));
        assert!(nodes[1].is_leaf());
        assert_eq!(reader.scope_depth(), 0);
    }

    #[test]
    fn missing_scalars_default_to_zero() {
        let mut reader = script("skill_graph:\n  5:\n    icon_file: only-icon.png\n");
        let nodes = read_skill_nodes(&mut reader).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].position(), (0, 0));
        assert_eq!(nodes[0].experience_points_needed(), 0);
        assert_eq!(nodes[0].icon_file(), "only-icon.png");
    }

    #[test]
    fn empty_optional_tables_leave_collections_empty() {
        let mut reader = script(
            "skill_graph:\n  1:\n    x_location: 1\n    y_location: 2\n    icon_file: i.png\n    experience_points_needed: 3\n    skill_id_learned: 4\n    items_needed: {}\n    stats: {}\n    links: []\n",
        );
        let nodes = read_skill_nodes(&mut reader).unwrap();
        assert!(nodes[0].items_needed().is_empty());
        assert!(nodes[0].stats_upgrades().is_empty());
        assert!(nodes[0].is_leaf());
        assert_eq!(reader.scope_depth(), 0);
    }

    #[test]
    fn root_that_is_not_a_table_has_no_nodes() {
        let mut reader = script("skill_graph: 12\n");
        assert!(matches!(
            read_skill_nodes(&mut reader),
            Err(SkillGraphError::EmptyRoot { .. })
        ));
    }
}
