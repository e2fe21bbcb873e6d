//! References to entities being interacted with.
//!
//! An [`InteractionTarget`] names one hovered or selected thing: an entity
//! of any kind, or a subset of one path's nodes ([`PathIdNodeMask`]). Path
//! nodes have no ids of their own; a node mask keeps multi-node selection
//! out of the global id space.

use std::fmt;

use fixedbitset::FixedBitSet;

use crate::entities::*;
use crate::id::Id;
use crate::selection::Selection;
use crate::world::{World, WorldEntity, find_entity};

/// Number of node indices a [`NodeMask`] can address.
pub const MAX_PATH_NODES: usize = 256;

/// A fixed-width set of path node indices.
///
/// Indices at or above [`MAX_PATH_NODES`] are ignored by [`set`](Self::set)
/// and never reported as present.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeMask {
    bits: FixedBitSet,
}

impl NodeMask {
    pub fn new() -> Self {
        Self {
            bits: FixedBitSet::with_capacity(MAX_PATH_NODES),
        }
    }

    /// A mask with a single node set.
    pub fn single(index: usize) -> Self {
        let mut mask = Self::new();
        mask.set(index);
        mask
    }

    pub fn set(&mut self, index: usize) {
        if index < MAX_PATH_NODES {
            self.bits.insert(index);
        } else {
            log::warn!("path node index {index} is outside the node mask");
        }
    }

    pub fn reset(&mut self, index: usize) {
        if index < MAX_PATH_NODES {
            self.bits.set(index, false);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Set node indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    pub fn union_with(&mut self, other: &NodeMask) {
        self.bits.union_with(&other.bits);
    }

    /// Clears every node set in `other`.
    pub fn difference_with(&mut self, other: &NodeMask) {
        self.bits.difference_with(&other.bits);
    }

    pub fn is_subset(&self, other: &NodeMask) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Clears every node at or above `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < MAX_PATH_NODES {
            self.bits.set_range(len.., false);
        }
    }
}

impl Default for NodeMask {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl FromIterator<usize> for NodeMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Self::new();
        for index in iter {
            mask.set(index);
        }
        mask
    }
}

/// A subset of one path's nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathIdNodeMask {
    pub id: PathId,
    pub nodes: NodeMask,
}

impl PathIdNodeMask {
    pub fn new(id: PathId, nodes: NodeMask) -> Self {
        Self { id, nodes }
    }

    /// A mask selecting only `node_index`.
    pub fn single(id: PathId, node_index: usize) -> Self {
        debug_assert!(node_index < MAX_PATH_NODES);
        Self::new(id, NodeMask::single(node_index))
    }
}

/// Something hovered or selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractionTarget {
    Object(ObjectId),
    Light(LightId),
    Path(PathId),
    PathNodes(PathIdNodeMask),
    Region(RegionId),
    Sector(SectorId),
    Portal(PortalId),
    Hintnode(HintnodeId),
    Barrier(BarrierId),
    PlanningHub(PlanningHubId),
    PlanningConnection(PlanningConnectionId),
    Boundary(BoundaryId),
    Measurement(MeasurementId),
    Block(BlockId),
}

impl InteractionTarget {
    /// The kind of entity referenced. Path node masks report
    /// [`EntityKind::Path`].
    pub fn kind(&self) -> EntityKind {
        match self {
            InteractionTarget::Object(_) => EntityKind::Object,
            InteractionTarget::Light(_) => EntityKind::Light,
            InteractionTarget::Path(_) | InteractionTarget::PathNodes(_) => EntityKind::Path,
            InteractionTarget::Region(_) => EntityKind::Region,
            InteractionTarget::Sector(_) => EntityKind::Sector,
            InteractionTarget::Portal(_) => EntityKind::Portal,
            InteractionTarget::Hintnode(_) => EntityKind::Hintnode,
            InteractionTarget::Barrier(_) => EntityKind::Barrier,
            InteractionTarget::PlanningHub(_) => EntityKind::PlanningHub,
            InteractionTarget::PlanningConnection(_) => EntityKind::PlanningConnection,
            InteractionTarget::Boundary(_) => EntityKind::Boundary,
            InteractionTarget::Measurement(_) => EntityKind::Measurement,
            InteractionTarget::Block(_) => EntityKind::Block,
        }
    }

    pub fn is_path_nodes(&self) -> bool {
        matches!(self, InteractionTarget::PathNodes(_))
    }
}

impl<E: WorldEntity> From<Id<E>> for InteractionTarget {
    fn from(id: Id<E>) -> Self {
        E::target(id)
    }
}

impl From<PathIdNodeMask> for InteractionTarget {
    fn from(mask: PathIdNodeMask) -> Self {
        InteractionTarget::PathNodes(mask)
    }
}

/// Whether `target` is selected.
///
/// A path node mask counts as selected when every one of its nodes is part
/// of the selection entry for its path.
pub fn is_selected(target: &InteractionTarget, selection: &Selection) -> bool {
    match target {
        InteractionTarget::PathNodes(mask) => selection.iter().any(|selected| {
            matches!(selected, InteractionTarget::PathNodes(selected)
                if selected.id == mask.id && mask.nodes.is_subset(&selected.nodes))
        }),
        _ => selection.contains(target),
    }
}

/// Whether the path itself or any of its nodes is selected.
pub fn is_path_selected(id: PathId, selection: &Selection) -> bool {
    selection.iter().any(|selected| match selected {
        InteractionTarget::Path(selected) => *selected == id,
        InteractionTarget::PathNodes(selected) => selected.id == id,
        _ => false,
    })
}

pub fn is_path_node_selected(id: PathId, node_index: usize, selection: &Selection) -> bool {
    selection.iter().any(|selected| {
        matches!(selected, InteractionTarget::PathNodes(selected)
            if selected.id == id && selected.nodes.contains(node_index))
    })
}

/// Whether `target` still refers to something that exists in `world`.
///
/// A node mask is valid when its path exists, the mask is not empty and
/// every node in it exists.
pub fn is_valid(target: &InteractionTarget, world: &World) -> bool {
    match target {
        InteractionTarget::Object(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Light(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Path(id) => find_entity(world, *id).is_some(),
        InteractionTarget::PathNodes(mask) => find_entity(world, mask.id).is_some_and(|path| {
            !mask.nodes.is_empty() && mask.nodes.iter().all(|index| index < path.nodes.len())
        }),
        InteractionTarget::Region(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Sector(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Portal(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Hintnode(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Barrier(id) => find_entity(world, *id).is_some(),
        InteractionTarget::PlanningHub(id) => find_entity(world, *id).is_some(),
        InteractionTarget::PlanningConnection(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Boundary(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Measurement(id) => find_entity(world, *id).is_some(),
        InteractionTarget::Block(id) => find_entity(world, *id).is_some(),
    }
}
