//! Skill graph core library: the character progression graph, the descriptor reader
//! it is loaded through, and the config/init helpers used by the CLI.

pub mod config;
pub mod descriptor;
pub mod init;
pub mod skill_graph;

pub use skill_graph::{SkillGraph, SkillGraphError, SkillNode};
