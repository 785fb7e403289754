use serde::Serialize;
use std::collections::BTreeMap;

/// One node of the skill graph: layout position, unlock costs, the skill it grants
/// and its outgoing links.
///
/// Nodes are built by the loader and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    id: u32,
    x: u32,
    y: u32,
    icon_file: String,
    experience_points_needed: u32,
    /// 0 when the node grants no skill.
    skill_id_learned: u32,
    /// Item id -> required quantity.
    items_needed: BTreeMap<u32, u32>,
    /// Stat id -> upgrade amount.
    stats_upgrades: BTreeMap<u32, u32>,
    /// Target node ids, in declared order. Not checked against the loaded graph.
    node_links: Vec<u32>,
}

impl SkillNode {
    pub(crate) fn new(
        id: u32,
        x: u32,
        y: u32,
        icon_file: impl Into<String>,
        experience_points_needed: u32,
        skill_id_learned: u32,
    ) -> Self {
        Self {
            id,
            x,
            y,
            icon_file: icon_file.into(),
            experience_points_needed,
            skill_id_learned,
            items_needed: BTreeMap::new(),
            stats_upgrades: BTreeMap::new(),
            node_links: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Layout position as (x, y).
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn icon_file(&self) -> &str {
        &self.icon_file
    }

    /// Experience that must be accumulated before the node can be unlocked.
    pub fn experience_points_needed(&self) -> u32 {
        self.experience_points_needed
    }

    /// Raw granted-skill id; 0 means none. See [`SkillNode::learned_skill`].
    pub fn skill_id_learned(&self) -> u32 {
        self.skill_id_learned
    }

    pub fn learned_skill(&self) -> Option<u32> {
        (self.skill_id_learned != 0).then_some(self.skill_id_learned)
    }

    pub fn items_needed(&self) -> &BTreeMap<u32, u32> {
        &self.items_needed
    }

    pub fn stats_upgrades(&self) -> &BTreeMap<u32, u32> {
        &self.stats_upgrades
    }

    pub fn node_links(&self) -> &[u32] {
        &self.node_links
    }

    /// True when the node has no outgoing links (end of a branch).
    pub fn is_leaf(&self) -> bool {
        self.node_links.is_empty()
    }

    /// Record an item requirement. A repeated item id overwrites the earlier quantity.
    pub(crate) fn add_needed_item(&mut self, item_id: u32, quantity: u32) {
        self.items_needed.insert(item_id, quantity);
    }

    /// Record a stat upgrade. A repeated stat id overwrites the earlier amount.
    pub(crate) fn add_stat_upgrade(&mut self, stat_id: u32, upgrade: u32) {
        self.stats_upgrades.insert(stat_id, upgrade);
    }

    pub(crate) fn add_node_link(&mut self, node_id: u32) {
        self.node_links.push(node_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_has_empty_collections() {
        let node = SkillNode::new(4, 10, 20, "img/icons/skill.png", 150, 0);
        assert_eq!(node.position(), (10, 20));
        assert_eq!(node.learned_skill(), None);
        assert!(node.items_needed().is_empty());
        assert!(node.stats_upgrades().is_empty());
        assert!(node.is_leaf());
    }

    #[test]
    fn repeated_keys_overwrite_and_links_keep_order() {
        let mut node = SkillNode::new(1, 0, 0, "", 0, 12);
        node.add_needed_item(3000, 1);
        node.add_needed_item(3000, 2);
        node.add_stat_upgrade(5, 8);
        node.add_node_link(9);
        node.add_node_link(2);
        node.add_node_link(9);
        assert_eq!(node.items_needed().get(&3000), Some(&2));
        assert_eq!(node.stats_upgrades().len(), 1);
        assert_eq!(node.node_links(), &[9, 2, 9]);
        assert_eq!(node.learned_skill(), Some(12));
    }

    #[test]
    fn serializes_camel_case() {
        let mut node = SkillNode::new(2, 1, 1, "icon.png", 10, 0);
        node.add_needed_item(7, 1);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["experiencePointsNeeded"], 10);
        assert_eq!(json["itemsNeeded"]["7"], 1);
        assert_eq!(json["nodeLinks"], serde_json::json!([]));
    }
}
