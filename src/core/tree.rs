use crate::db::queries::{count_speeches_per_section, load_sections_by_instance};
use crate::errors::AppResult;
use crate::models::Section;
use rusqlite::Connection;
use std::collections::HashMap;

/// A section together with its direct speech count and child sections.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub section: Section,
    pub speeches: usize,
    pub children: Vec<TreeNode>,
}

pub struct TreeLogic;

impl TreeLogic {
    /// Build the section forest of an instance, children in creation order.
    pub fn build(conn: &Connection, instance_id: i64) -> AppResult<Vec<TreeNode>> {
        let sections = load_sections_by_instance(conn, instance_id)?;
        let counts = count_speeches_per_section(conn, instance_id)?;

        let mut by_parent: HashMap<Option<i64>, Vec<Section>> = HashMap::new();
        for s in sections {
            by_parent.entry(s.parent_id).or_default().push(s);
        }

        Ok(Self::attach(None, &mut by_parent, &counts))
    }

    fn attach(
        parent: Option<i64>,
        by_parent: &mut HashMap<Option<i64>, Vec<Section>>,
        counts: &HashMap<i64, usize>,
    ) -> Vec<TreeNode> {
        let Some(level) = by_parent.remove(&parent) else {
            return Vec::new();
        };

        level
            .into_iter()
            .map(|section| {
                let children = Self::attach(Some(section.id), by_parent, counts);
                TreeNode {
                    speeches: counts.get(&section.id).copied().unwrap_or(0),
                    section,
                    children,
                }
            })
            .collect()
    }

    /// Render the forest as an indented outline, one section per line.
    pub fn render(nodes: &[TreeNode]) -> String {
        let mut out = String::new();
        for n in nodes {
            Self::render_node(n, 0, &mut out);
        }
        out
    }

    fn render_node(node: &TreeNode, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("[{}] {}", node.section.id, node.section.title));
        if node.speeches > 0 {
            out.push_str(&format!(" ({} speeches)", node.speeches));
        }
        out.push('\n');

        for c in &node.children {
            Self::render_node(c, depth + 1, out);
        }
    }
}
