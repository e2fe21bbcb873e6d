//! The ordered, duplicate-free set of selected targets.

use std::ops::Index;

use crate::interaction::{InteractionTarget, is_valid};
use crate::world::{World, find_entity};

/// Selected targets in the order they were added.
///
/// Holds at most one entry per entity. Path node masks are merged: there is
/// at most one [`InteractionTarget::PathNodes`] entry per path, holding the
/// union of every node subset added for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<InteractionTarget>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target.
    ///
    /// Node masks are unioned into the existing entry for the same path.
    /// Other targets are appended unless already present.
    pub fn add(&mut self, target: InteractionTarget) {
        if let InteractionTarget::PathNodes(incoming) = &target {
            for entry in &mut self.entries {
                if let InteractionTarget::PathNodes(selected) = entry
                    && selected.id == incoming.id
                {
                    selected.nodes.union_with(&incoming.nodes);
                    return;
                }
            }
        } else if self.contains(&target) {
            return;
        }

        self.entries.push(target);
    }

    /// Removes a target.
    ///
    /// For node masks the given nodes are cleared from the entry for the
    /// same path, and the entry is dropped once no nodes remain.
    pub fn remove(&mut self, target: &InteractionTarget) {
        if let InteractionTarget::PathNodes(outgoing) = target {
            let position = self.entries.iter().position(|entry| {
                matches!(entry, InteractionTarget::PathNodes(selected) if selected.id == outgoing.id)
            });

            if let Some(position) = position
                && let InteractionTarget::PathNodes(selected) = &mut self.entries[position]
            {
                selected.nodes.difference_with(&outgoing.nodes);
                if selected.nodes.is_empty() {
                    self.entries.remove(position);
                }
            }
        } else if let Some(position) = self.entries.iter().position(|entry| entry == target) {
            self.entries.remove(position);
        }
    }

    /// Adds the target if absent, removes it otherwise.
    pub fn toggle(&mut self, target: InteractionTarget) {
        if crate::interaction::is_selected(&target, self) {
            self.remove(&target);
        } else {
            self.add(target);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractionTarget> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&InteractionTarget> {
        self.entries.get(index)
    }

    /// Whether an identical entry is present.
    pub fn contains(&self, target: &InteractionTarget) -> bool {
        self.entries.contains(target)
    }

    pub fn as_slice(&self) -> &[InteractionTarget] {
        &self.entries
    }

    /// Drops entries referring to entities that no longer exist and trims
    /// node masks to their path's current length. Returns the number of
    /// entries dropped.
    pub fn remove_invalid(&mut self, world: &World) -> usize {
        let before = self.entries.len();

        for entry in &mut self.entries {
            if let InteractionTarget::PathNodes(mask) = entry
                && let Some(path) = find_entity(world, mask.id)
            {
                mask.nodes.truncate(path.nodes.len());
            }
        }
        self.entries.retain(|entry| is_valid(entry, world));

        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("dropped {removed} stale selection entries");
        }
        removed
    }
}

impl Index<usize> for Selection {
    type Output = InteractionTarget;

    fn index(&self, index: usize) -> &InteractionTarget {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a InteractionTarget;
    type IntoIter = std::slice::Iter<'a, InteractionTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// What is hovered and what is selected.
#[derive(Debug, Clone, Default)]
pub struct InteractionTargets {
    pub hovered: Option<InteractionTarget>,
    pub selection: Selection,
}

impl InteractionTargets {
    /// Forgets hovered and selected targets that no longer exist.
    pub fn prune(&mut self, world: &World) {
        if let Some(hovered) = &self.hovered
            && !is_valid(hovered, world)
        {
            self.hovered = None;
        }
        self.selection.remove_invalid(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::interaction::{NodeMask, PathIdNodeMask};
    use crate::world::WorldLimits;

    fn nodes(path: u32, indices: &[usize]) -> InteractionTarget {
        PathIdNodeMask::new(PathId::from_raw(path), indices.iter().copied().collect()).into()
    }

    fn object(raw: u32) -> InteractionTarget {
        ObjectId::from_raw(raw).into()
    }

    #[test]
    fn add_is_duplicate_free() {
        let mut selection = Selection::new();
        selection.add(object(1));
        selection.add(object(2));
        selection.add(object(1));
        assert_eq!(selection.len(), 2);
        assert_eq!(selection[0], object(1));
        assert_eq!(selection[1], object(2));
    }

    #[test]
    fn same_raw_id_different_kind_is_distinct() {
        let mut selection = Selection::new();
        selection.add(object(1));
        selection.add(LightId::from_raw(1).into());
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn path_node_masks_union() {
        let mut selection = Selection::new();
        selection.add(nodes(7, &[2]));
        selection.add(nodes(7, &[5]));

        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0], nodes(7, &[2, 5]));
    }

    #[test]
    fn path_node_masks_difference() {
        let mut selection = Selection::new();
        selection.add(nodes(7, &[2]));
        selection.add(nodes(7, &[5]));

        selection.remove(&nodes(7, &[2]));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0], nodes(7, &[5]));

        selection.remove(&nodes(7, &[5]));
        assert!(selection.is_empty());
    }

    #[test]
    fn node_masks_are_per_path() {
        let mut selection = Selection::new();
        selection.add(nodes(1, &[0]));
        selection.add(nodes(2, &[0]));
        selection.remove(&nodes(1, &[0, 1]));

        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0], nodes(2, &[0]));
    }

    #[test]
    fn removing_unselected_nodes_keeps_entry() {
        let mut selection = Selection::new();
        selection.add(nodes(1, &[3]));
        selection.remove(&nodes(1, &[4]));
        assert_eq!(selection[0], nodes(1, &[3]));
    }

    #[test]
    fn remove_preserves_order() {
        let mut selection = Selection::new();
        for raw in 0..4 {
            selection.add(object(raw));
        }
        selection.remove(&object(1));
        let remaining: Vec<_> = selection.iter().cloned().collect();
        assert_eq!(remaining, vec![object(0), object(2), object(3)]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut selection = Selection::new();
        selection.add(object(1));
        selection.remove(&object(2));
        selection.remove(&nodes(1, &[0]));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle(object(3));
        assert!(selection.contains(&object(3)));
        selection.toggle(object(3));
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_and_get() {
        let mut selection = Selection::new();
        selection.add(object(1));
        assert_eq!(selection.get(0), Some(&object(1)));
        assert_eq!(selection.get(1), None);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn remove_invalid_drops_stale_entries() {
        let mut world = World::new(WorldLimits { max_entities: 4 });
        let kept = world.acquire_id::<Object>();
        let gone = world.acquire_id::<Object>();
        world.objects.push(Object {
            id: kept,
            ..Default::default()
        });
        let path = world.acquire_id::<Path>();
        world.paths.push(Path {
            id: path,
            nodes: vec![PathNode::default(); 2],
            ..Default::default()
        });

        let mut targets = InteractionTargets {
            hovered: Some(gone.into()),
            selection: Selection::new(),
        };
        targets.selection.add(kept.into());
        targets.selection.add(gone.into());
        targets
            .selection
            .add(PathIdNodeMask::new(path, [1, 4].into_iter().collect::<NodeMask>()).into());

        targets.prune(&world);

        assert_eq!(targets.hovered, None);
        assert_eq!(targets.selection.len(), 2);
        assert_eq!(targets.selection[0], InteractionTarget::from(kept));
        assert_eq!(
            targets.selection[1],
            InteractionTarget::from(PathIdNodeMask::single(path, 1))
        );
    }
}
