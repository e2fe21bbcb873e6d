//! Removing entities from the world.
//!
//! Deletes capture the entity and its position in the collection so that
//! reverting puts it back exactly where it was. Deleting an entity that
//! other entities refer to by name also unlinks those references, and the
//! unlinks are restored on revert.

use std::sync::Arc;

use worldedit_core::abstract_editor::{Edit, EditFlags};

use crate::context::EditContext;
use crate::entities::*;
use crate::id::Id;
use crate::interaction::{InteractionTarget, PathIdNodeMask};
use crate::object_class::ObjectClassLibrary;
use crate::world::{World, WorldEntity, entity_index, expect_entity_mut, find_entity};

/// Removes an entity with no references to unlink.
#[derive(Debug)]
pub struct DeleteEntity<E> {
    entity: E,
    index: usize,
    description: String,
    flags: EditFlags,
}

impl<E: WorldEntity> DeleteEntity<E> {
    /// Captures the entity with the given id. `None` if it does not exist.
    pub fn new(world: &World, id: Id<E>) -> Option<Self> {
        let index = entity_index(world, id)?;
        Some(Self {
            entity: E::collection(world)[index].clone(),
            index,
            description: format!("Delete {}", E::KIND),
            flags: EditFlags::default(),
        })
    }
}

fn remove_at<E: WorldEntity>(world: &mut World, index: usize, id: Id<E>) -> E {
    let entities = E::collection_mut(world);
    assert!(
        entities.get(index).is_some_and(|entity| entity.id() == id),
        "{} {id} is not at index {index}",
        E::KIND
    );
    entities.remove(index)
}

impl<E: WorldEntity> Edit<EditContext> for DeleteEntity<E> {
    fn apply(&mut self, context: &mut EditContext) {
        remove_at(&mut context.world, self.index, self.entity.id());
    }

    fn revert(&mut self, context: &mut EditContext) {
        E::collection_mut(&mut context.world).insert(self.index, self.entity.clone());
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// An entry of a sector's object list naming the deleted object.
#[derive(Debug, Clone)]
struct SectorEntry {
    sector: SectorId,
    index: usize,
    entry: String,
}

/// Removes an object, releases its class and unlinks it from the object
/// lists of sectors.
#[derive(Debug)]
pub struct DeleteObject {
    object: Object,
    index: usize,
    sector_entries: Vec<SectorEntry>,
    library: Arc<dyn ObjectClassLibrary>,
    flags: EditFlags,
}

impl DeleteObject {
    pub fn new(world: &World, id: ObjectId, library: Arc<dyn ObjectClassLibrary>) -> Option<Self> {
        let index = entity_index(world, id)?;
        let object = world.objects[index].clone();

        let name = object.name.as_str();
        let sector_entries = world
            .sectors
            .iter()
            .flat_map(move |sector| {
                sector
                    .objects
                    .iter()
                    .enumerate()
                    .filter(move |(_, entry)| entry.eq_ignore_ascii_case(name))
                    .map(move |(index, entry)| SectorEntry {
                        sector: sector.id,
                        index,
                        entry: entry.clone(),
                    })
            })
            .collect();

        Some(Self {
            object,
            index,
            sector_entries,
            library,
            flags: EditFlags::default(),
        })
    }
}

impl Edit<EditContext> for DeleteObject {
    fn apply(&mut self, context: &mut EditContext) {
        // Descending order keeps the recorded indices valid.
        for unlinked in self.sector_entries.iter().rev() {
            let sector = expect_entity_mut(&mut context.world, unlinked.sector);
            sector.objects.remove(unlinked.index);
        }

        let removed = remove_at(&mut context.world, self.index, self.object.id);
        self.library.free(removed.class_handle);
    }

    fn revert(&mut self, context: &mut EditContext) {
        let mut object = self.object.clone();
        object.class_handle = self.library.acquire(&object.class_name);
        context.world.objects.insert(self.index, object);

        for unlinked in &self.sector_entries {
            let sector = expect_entity_mut(&mut context.world, unlinked.sector);
            sector.objects.insert(unlinked.index, unlinked.entry.clone());
        }
    }

    fn description(&self) -> &str {
        "Delete object"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// A portal side that named the deleted sector.
#[derive(Debug, Clone, Copy)]
struct PortalLink {
    portal: PortalId,
    sector1: bool,
    sector2: bool,
}

/// Removes a sector and clears the portal sides naming it.
#[derive(Debug)]
pub struct DeleteSector {
    sector: Sector,
    index: usize,
    portal_links: Vec<PortalLink>,
    flags: EditFlags,
}

impl DeleteSector {
    pub fn new(world: &World, id: SectorId) -> Option<Self> {
        let index = entity_index(world, id)?;
        let sector = world.sectors[index].clone();

        let portal_links = world
            .portals
            .iter()
            .map(|portal| PortalLink {
                portal: portal.id,
                sector1: portal.sector1.eq_ignore_ascii_case(&sector.name),
                sector2: portal.sector2.eq_ignore_ascii_case(&sector.name),
            })
            .filter(|link| link.sector1 || link.sector2)
            .collect();

        Some(Self {
            sector,
            index,
            portal_links,
            flags: EditFlags::default(),
        })
    }
}

impl Edit<EditContext> for DeleteSector {
    fn apply(&mut self, context: &mut EditContext) {
        remove_at(&mut context.world, self.index, self.sector.id);

        for link in &self.portal_links {
            let portal = expect_entity_mut(&mut context.world, link.portal);
            if link.sector1 {
                portal.sector1.clear();
            }
            if link.sector2 {
                portal.sector2.clear();
            }
        }
    }

    fn revert(&mut self, context: &mut EditContext) {
        context.world.sectors.insert(self.index, self.sector.clone());

        for link in &self.portal_links {
            let portal = expect_entity_mut(&mut context.world, link.portal);
            if link.sector1 {
                portal.sector1.clone_from(&self.sector.name);
            }
            if link.sector2 {
                portal.sector2.clone_from(&self.sector.name);
            }
        }
    }

    fn description(&self) -> &str {
        "Delete sector"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Removes a planning hub together with every connection touching it.
#[derive(Debug)]
pub struct DeletePlanningHub {
    hub: PlanningHub,
    index: usize,
    /// Broken connections with their indices, ascending.
    connections: Vec<(usize, PlanningConnection)>,
    flags: EditFlags,
}

impl DeletePlanningHub {
    pub fn new(world: &World, id: PlanningHubId) -> Option<Self> {
        let index = entity_index(world, id)?;

        let connections = world
            .planning_connections
            .iter()
            .enumerate()
            .filter(|(_, connection)| connection.touches(id))
            .map(|(index, connection)| (index, connection.clone()))
            .collect();

        Some(Self {
            hub: world.planning_hubs[index].clone(),
            index,
            connections,
            flags: EditFlags::default(),
        })
    }
}

impl Edit<EditContext> for DeletePlanningHub {
    fn apply(&mut self, context: &mut EditContext) {
        for (index, connection) in self.connections.iter().rev() {
            remove_at(&mut context.world, *index, connection.id);
        }
        remove_at(&mut context.world, self.index, self.hub.id);
    }

    fn revert(&mut self, context: &mut EditContext) {
        context.world.planning_hubs.insert(self.index, self.hub.clone());
        for (index, connection) in &self.connections {
            context.world.planning_connections.insert(*index, connection.clone());
        }
    }

    fn description(&self) -> &str {
        "Delete planning hub"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Removes a subset of one path's nodes, keeping the path itself.
#[derive(Debug)]
pub struct DeletePathNodes {
    id: PathId,
    /// Removed nodes with their indices, ascending.
    nodes: Vec<(usize, PathNode)>,
    flags: EditFlags,
}

impl DeletePathNodes {
    /// Captures the nodes of `mask` that exist. `None` if the path does not
    /// exist or none of the nodes do.
    pub fn new(world: &World, mask: &PathIdNodeMask) -> Option<Self> {
        let path = find_entity(world, mask.id)?;
        let nodes: Vec<_> = mask
            .nodes
            .iter()
            .filter_map(|index| path.nodes.get(index).map(|node| (index, node.clone())))
            .collect();

        if nodes.is_empty() {
            return None;
        }

        Some(Self {
            id: mask.id,
            nodes,
            flags: EditFlags::default(),
        })
    }
}

impl Edit<EditContext> for DeletePathNodes {
    fn apply(&mut self, context: &mut EditContext) {
        let path = expect_entity_mut(&mut context.world, self.id);
        for (index, _) in self.nodes.iter().rev() {
            assert!(*index < path.nodes.len(), "path {} has no node {index}", self.id);
            path.nodes.remove(*index);
        }
    }

    fn revert(&mut self, context: &mut EditContext) {
        let path = expect_entity_mut(&mut context.world, self.id);
        for (index, node) in &self.nodes {
            path.nodes.insert(*index, node.clone());
        }
    }

    fn description(&self) -> &str {
        "Delete path nodes"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

fn boxed<E: Edit<EditContext> + 'static>(edit: Option<E>) -> Option<Box<dyn Edit<EditContext>>> {
    edit.map(|edit| Box::new(edit) as Box<dyn Edit<EditContext>>)
}

/// Builds the delete edit for a hovered or selected target.
///
/// A node mask covering every node of its path deletes the whole path.
/// Returns `None` when the target no longer exists.
pub fn make_delete_entity(
    target: &InteractionTarget,
    world: &World,
    library: &Arc<dyn ObjectClassLibrary>,
) -> Option<Box<dyn Edit<EditContext>>> {
    match target {
        InteractionTarget::Object(id) => boxed(DeleteObject::new(world, *id, Arc::clone(library))),
        InteractionTarget::Light(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Path(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::PathNodes(mask) => {
            let path = find_entity(world, mask.id)?;
            let covers_path = (0..path.nodes.len()).all(|index| mask.nodes.contains(index));
            if covers_path {
                boxed(DeleteEntity::new(world, mask.id))
            } else {
                boxed(DeletePathNodes::new(world, mask))
            }
        }
        InteractionTarget::Region(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Sector(id) => boxed(DeleteSector::new(world, *id)),
        InteractionTarget::Portal(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Hintnode(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Barrier(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::PlanningHub(id) => boxed(DeletePlanningHub::new(world, *id)),
        InteractionTarget::PlanningConnection(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Boundary(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Measurement(id) => boxed(DeleteEntity::new(world, *id)),
        InteractionTarget::Block(id) => boxed(DeleteEntity::new(world, *id)),
    }
}
