//! Lineage forest built from the all-time roster after a run ends.
//!
//! Every agent that ever lived becomes one horizontal track spanning
//! `[birth_step, death_step]` at a unique vertical slot; a child connects to
//! its parent's slot at the child's birth step. Founders are independent
//! root tracks.

use petgraph::graph::{DiGraph, NodeIndex};
use petri_data::{Bacterium, BacteriumId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LineageTrack {
    pub id: BacteriumId,
    /// Vertical slot, unique across the whole forest.
    pub slot: usize,
    pub birth_step: u64,
    pub death_step: u64,
    /// Slot of the parent track, `None` for founders.
    pub parent_slot: Option<usize>,
    pub color: [f64; 3],
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LineageForest {
    pub tracks: Vec<LineageTrack>,
}

impl LineageForest {
    /// Lays out the full forest. Agents still alive are drawn out to
    /// `final_step`; `max_start_speed`/`max_start_energy` normalize colors.
    pub fn build(
        roster: &[Bacterium],
        final_step: u64,
        max_start_speed: f64,
        max_start_energy: f64,
    ) -> Self {
        let mut tracks = Vec::with_capacity(roster.len());
        let mut next_slot = 0;
        for founder in roster.iter().filter(|b| b.parent.is_none()) {
            next_slot = layout(
                roster,
                founder.id,
                None,
                next_slot,
                final_step,
                max_start_speed,
                max_start_energy,
                &mut tracks,
            );
        }
        Self { tracks }
    }

    /// Export as Graphviz DOT, one node per track.
    pub fn to_dot(&self) -> String {
        let mut graph: DiGraph<&LineageTrack, ()> = DiGraph::new();
        let mut slot_map: HashMap<usize, NodeIndex> = HashMap::new();
        for track in &self.tracks {
            let idx = graph.add_node(track);
            slot_map.insert(track.slot, idx);
        }
        for track in &self.tracks {
            if let Some(parent_slot) = track.parent_slot {
                if let (Some(&p_idx), Some(&c_idx)) =
                    (slot_map.get(&parent_slot), slot_map.get(&track.slot))
                {
                    graph.add_edge(p_idx, c_idx, ());
                }
            }
        }

        let mut dot = String::from("digraph Lineage {\n");
        dot.push_str("  node [shape=box, style=filled, fontname=\"Arial\"];\n");
        for idx in graph.node_indices() {
            let track = graph[idx];
            dot.push_str(&format!(
                "  \"b{}\" [label=\"#{} [{}..{}]\", fillcolor=\"#e1f5fe\"];\n",
                track.id.0, track.id.0, track.birth_step, track.death_step
            ));
        }
        for edge in graph.edge_indices() {
            let (from, to) = graph.edge_endpoints(edge).expect("edge endpoints");
            dot.push_str(&format!("  \"b{}\" -> \"b{}\";\n", graph[from].id.0, graph[to].id.0));
        }
        dot.push_str("}\n");
        dot
    }
}

/// Depth-first layout of one subtree. Takes the next free slot and returns
/// the next free slot after the subtree, so slot assignment needs no shared
/// mutable state. Children recurse in birth-step-descending order.
#[allow(clippy::too_many_arguments)]
fn layout(
    roster: &[Bacterium],
    id: BacteriumId,
    parent_slot: Option<usize>,
    next_slot: usize,
    final_step: u64,
    max_start_speed: f64,
    max_start_energy: f64,
    out: &mut Vec<LineageTrack>,
) -> usize {
    let b = &roster[id.0 as usize];
    let slot = next_slot;
    out.push(LineageTrack {
        id,
        slot,
        birth_step: b.birth_step,
        death_step: b.death_step.unwrap_or(final_step),
        parent_slot,
        color: b.color(max_start_speed, max_start_energy),
    });

    let mut children = b.children.clone();
    children.sort_by(|a, c| {
        roster[c.0 as usize]
            .birth_step
            .cmp(&roster[a.0 as usize].birth_step)
    });

    let mut next = slot + 1;
    for child in children {
        next = layout(
            roster,
            child,
            Some(slot),
            next,
            final_step,
            max_start_speed,
            max_start_energy,
            out,
        );
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use petri_data::BacteriumId;

    fn specimen(id: u32, parent: Option<u32>, birth: u64, death: Option<u64>) -> Bacterium {
        Bacterium {
            id: BacteriumId(id),
            parent: parent.map(BacteriumId),
            x: 0.0,
            y: 0.0,
            speed: 1.0,
            max_energy: 10.0,
            energy: 5.0,
            meal: None,
            birth_step: birth,
            death_step: death,
            children: Vec::new(),
        }
    }

    fn roster_with_two_children() -> Vec<Bacterium> {
        let mut founder = specimen(0, None, 0, None);
        founder.children = vec![BacteriumId(1), BacteriumId(2)];
        vec![
            founder,
            specimen(1, Some(0), 5, Some(20)),
            specimen(2, Some(0), 12, None),
        ]
    }

    #[test]
    fn slots_are_unique_and_cover_the_roster() {
        let forest = LineageForest::build(&roster_with_two_children(), 50, 5.0, 100.0);
        assert_eq!(forest.tracks.len(), 3);
        let mut slots: Vec<_> = forest.tracks.iter().map(|t| t.slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn children_recurse_in_birth_step_descending_order() {
        let forest = LineageForest::build(&roster_with_two_children(), 50, 5.0, 100.0);
        // Founder first, then the later-born child, then the earlier one.
        let ids: Vec<_> = forest.tracks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![0, 2, 1]);
        assert_eq!(forest.tracks[1].parent_slot, Some(0));
        assert_eq!(forest.tracks[2].parent_slot, Some(0));
    }

    #[test]
    fn living_tracks_extend_to_the_final_step() {
        let forest = LineageForest::build(&roster_with_two_children(), 50, 5.0, 100.0);
        let founder = forest.tracks.iter().find(|t| t.id.0 == 0).unwrap();
        let dead_child = forest.tracks.iter().find(|t| t.id.0 == 1).unwrap();
        assert_eq!(founder.death_step, 50);
        assert_eq!(dead_child.death_step, 20);
    }

    #[test]
    fn dot_export_contains_every_track_and_edge() {
        let forest = LineageForest::build(&roster_with_two_children(), 50, 5.0, 100.0);
        let dot = forest.to_dot();
        assert!(dot.contains("\"b0\""));
        assert!(dot.contains("\"b0\" -> \"b1\""));
        assert!(dot.contains("\"b0\" -> \"b2\""));
    }
}
