//! The world value object and per-kind entity access.
//!
//! A [`World`] holds one [`PinnedVec`] per entity kind. Each collection
//! reserves its maximum size when the world is created, so inserting and
//! removing entities never relocates the storage of the others.
//!
//! Per-kind access is centralised in the [`WorldEntity`] trait, implemented
//! for every kind by a single table at the bottom of this file. Generic code
//! (lookups, insert and delete edits, the creation slot) goes through it
//! instead of matching on the kind at every call site.

use std::fmt;
use std::ops::Range;

use worldedit_core::pinned::PinnedVec;

use crate::creation::CreationEntity;
use crate::entities::*;
use crate::fields::Field;
use crate::id::{Id, IdGenerator};
use crate::interaction::InteractionTarget;

/// Hard upper bound on entities per kind.
pub const MAX_ENTITIES: usize = 1_048_576;

/// Entities per kind reserved by [`WorldLimits::default`].
pub const DEFAULT_MAX_ENTITIES: usize = 16_384;

/// Sizing of a world's entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldLimits {
    /// Maximum number of entities of each kind. Clamped to [`MAX_ENTITIES`].
    pub max_entities: usize,
}

impl Default for WorldLimits {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

/// Id generators for every entity kind.
#[derive(Debug, Default)]
pub struct NextIds {
    pub objects: IdGenerator<Object>,
    pub lights: IdGenerator<Light>,
    pub paths: IdGenerator<Path>,
    pub regions: IdGenerator<Region>,
    pub sectors: IdGenerator<Sector>,
    pub portals: IdGenerator<Portal>,
    pub hintnodes: IdGenerator<Hintnode>,
    pub barriers: IdGenerator<Barrier>,
    pub planning_hubs: IdGenerator<PlanningHub>,
    pub planning_connections: IdGenerator<PlanningConnection>,
    pub boundaries: IdGenerator<Boundary>,
    pub measurements: IdGenerator<Measurement>,
    pub blocks: IdGenerator<Block>,
}

/// All entities of one world.
#[derive(Debug)]
pub struct World {
    pub name: String,

    pub objects: PinnedVec<Object>,
    pub lights: PinnedVec<Light>,
    pub paths: PinnedVec<Path>,
    pub regions: PinnedVec<Region>,
    pub sectors: PinnedVec<Sector>,
    pub portals: PinnedVec<Portal>,
    pub hintnodes: PinnedVec<Hintnode>,
    pub barriers: PinnedVec<Barrier>,
    pub planning_hubs: PinnedVec<PlanningHub>,
    pub planning_connections: PinnedVec<PlanningConnection>,
    pub boundaries: PinnedVec<Boundary>,
    pub measurements: PinnedVec<Measurement>,
    pub blocks: PinnedVec<Block>,

    pub next_id: NextIds,

    limits: WorldLimits,
}

impl World {
    pub fn new(limits: WorldLimits) -> Self {
        let max = limits.max_entities.min(MAX_ENTITIES);
        log::debug!("creating world with room for {max} entities per kind");

        Self {
            name: String::new(),
            objects: PinnedVec::new(max),
            lights: PinnedVec::new(max),
            paths: PinnedVec::new(max),
            regions: PinnedVec::new(max),
            sectors: PinnedVec::new(max),
            portals: PinnedVec::new(max),
            hintnodes: PinnedVec::new(max),
            barriers: PinnedVec::new(max),
            planning_hubs: PinnedVec::new(max),
            planning_connections: PinnedVec::new(max),
            boundaries: PinnedVec::new(max),
            measurements: PinnedVec::new(max),
            blocks: PinnedVec::new(max),
            next_id: NextIds::default(),
            limits: WorldLimits { max_entities: max },
        }
    }

    pub fn limits(&self) -> WorldLimits {
        self.limits
    }

    /// The collection holding entities of kind `E`.
    pub fn entities<E: WorldEntity>(&self) -> &PinnedVec<E> {
        E::collection(self)
    }

    pub fn entities_mut<E: WorldEntity>(&mut self) -> &mut PinnedVec<E> {
        E::collection_mut(self)
    }

    /// Acquires a fresh id for a new entity of kind `E`.
    pub fn acquire_id<E: WorldEntity>(&mut self) -> Id<E> {
        E::id_generator(&mut self.next_id).acquire()
    }

    /// Whether the collection for `E` has reached its maximum size.
    pub fn is_full<E: WorldEntity>(&self) -> bool {
        E::collection(self).is_full()
    }

    /// Total number of live entities across all kinds.
    pub fn entity_count(&self) -> usize {
        self.objects.len()
            + self.lights.len()
            + self.paths.len()
            + self.regions.len()
            + self.sectors.len()
            + self.portals.len()
            + self.hintnodes.len()
            + self.barriers.len()
            + self.planning_hubs.len()
            + self.planning_connections.len()
            + self.boundaries.len()
            + self.measurements.len()
            + self.blocks.len()
    }

    /// Byte ranges of the live elements of every collection.
    pub fn collection_address_ranges(&self) -> [Range<usize>; 13] {
        [
            self.objects.address_range(),
            self.lights.address_range(),
            self.paths.address_range(),
            self.regions.address_range(),
            self.sectors.address_range(),
            self.portals.address_range(),
            self.hintnodes.address_range(),
            self.barriers.address_range(),
            self.planning_hubs.address_range(),
            self.planning_connections.address_range(),
            self.boundaries.address_range(),
            self.measurements.address_range(),
            self.blocks.address_range(),
        ]
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldLimits::default())
    }
}

/// Finds an entity by id.
pub fn find_entity<E: WorldEntity>(world: &World, id: Id<E>) -> Option<&E> {
    E::collection(world).iter().find(|entity| entity.id() == id)
}

pub fn find_entity_mut<E: WorldEntity>(world: &mut World, id: Id<E>) -> Option<&mut E> {
    E::collection_mut(world)
        .iter_mut()
        .find(|entity| entity.id() == id)
}

/// Position of an entity inside its collection.
pub fn entity_index<E: WorldEntity>(world: &World, id: Id<E>) -> Option<usize> {
    E::collection(world).iter().position(|entity| entity.id() == id)
}

/// Looks up an entity an edit expects to exist.
///
/// # Panics
///
/// Panics if the entity is missing. Edits are only ever run against the
/// world state they were built for, so a missing entity is a bug.
pub(crate) fn expect_entity_mut<E: WorldEntity>(world: &mut World, id: Id<E>) -> &mut E {
    match find_entity_mut(world, id) {
        Some(entity) => entity,
        None => panic!("{} {id} does not exist", E::KIND),
    }
}

/// Per-kind access shared by every entity type.
pub trait WorldEntity: Clone + fmt::Debug + PartialEq + Send + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Id<Self>;

    fn set_id(&mut self, id: Id<Self>);

    /// Display name, `None` for kinds without one.
    fn name(&self) -> Option<&str>;

    fn name_mut(&mut self) -> Option<&mut String>;

    /// Descriptor of the name field, for edits that rename.
    fn name_field() -> Option<Field<Self, String>>;

    fn collection(world: &World) -> &PinnedVec<Self>;

    fn collection_mut(world: &mut World) -> &mut PinnedVec<Self>;

    fn id_generator(next_id: &mut NextIds) -> &mut IdGenerator<Self>;

    /// The staged entity, if the creation slot holds this kind.
    fn from_creation(entity: &CreationEntity) -> Option<&Self>;

    fn from_creation_mut(entity: &mut CreationEntity) -> Option<&mut Self>;

    fn into_creation(self) -> CreationEntity;

    fn target(id: Id<Self>) -> InteractionTarget;
}

macro_rules! impl_world_entity {
    (@name $entity:ident, true) => { Some($entity.name.as_str()) };
    (@name $entity:ident, false) => { None };
    (@name_mut $entity:ident, true) => { Some(&mut $entity.name) };
    (@name_mut $entity:ident, false) => { None };
    (@name_field $ty:ident, true) => { Some(crate::field!($ty, name: String)) };
    (@name_field $ty:ident, false) => { None };

    ($($ty:ident => $collection:ident, named: $named:tt;)*) => {
        $(
            impl WorldEntity for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn id(&self) -> Id<Self> {
                    self.id
                }

                fn set_id(&mut self, id: Id<Self>) {
                    self.id = id;
                }

                fn name(&self) -> Option<&str> {
                    impl_world_entity!(@name self, $named)
                }

                fn name_mut(&mut self) -> Option<&mut String> {
                    impl_world_entity!(@name_mut self, $named)
                }

                fn name_field() -> Option<Field<Self, String>> {
                    impl_world_entity!(@name_field $ty, $named)
                }

                fn collection(world: &World) -> &PinnedVec<Self> {
                    &world.$collection
                }

                fn collection_mut(world: &mut World) -> &mut PinnedVec<Self> {
                    &mut world.$collection
                }

                fn id_generator(next_id: &mut NextIds) -> &mut IdGenerator<Self> {
                    &mut next_id.$collection
                }

                fn from_creation(entity: &CreationEntity) -> Option<&Self> {
                    match entity {
                        CreationEntity::$ty(entity) => Some(entity),
                        _ => None,
                    }
                }

                fn from_creation_mut(entity: &mut CreationEntity) -> Option<&mut Self> {
                    match entity {
                        CreationEntity::$ty(entity) => Some(entity),
                        _ => None,
                    }
                }

                fn into_creation(self) -> CreationEntity {
                    CreationEntity::$ty(self)
                }

                fn target(id: Id<Self>) -> InteractionTarget {
                    InteractionTarget::$ty(id)
                }
            }

            impl From<$ty> for CreationEntity {
                fn from(entity: $ty) -> Self {
                    CreationEntity::$ty(entity)
                }
            }
        )*
    };
}

impl_world_entity! {
    Object => objects, named: true;
    Light => lights, named: true;
    Path => paths, named: true;
    Region => regions, named: true;
    Sector => sectors, named: true;
    Portal => portals, named: true;
    Hintnode => hintnodes, named: true;
    Barrier => barriers, named: true;
    PlanningHub => planning_hubs, named: true;
    PlanningConnection => planning_connections, named: true;
    Boundary => boundaries, named: true;
    Measurement => measurements, named: true;
    Block => blocks, named: false;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn small_world() -> World {
        World::new(WorldLimits { max_entities: 4 })
    }

    #[test]
    fn find_by_id() {
        let mut world = small_world();
        let a = world.acquire_id::<Object>();
        let b = world.acquire_id::<Object>();
        world.objects.push(Object {
            name: "a".into(),
            id: a,
            ..Default::default()
        });
        world.objects.push(Object {
            name: "b".into(),
            id: b,
            ..Default::default()
        });

        assert_eq!(find_entity(&world, b).map(|o| o.name.as_str()), Some("b"));
        assert_eq!(entity_index(&world, b), Some(1));

        find_entity_mut(&mut world, a).unwrap().name = "renamed".into();
        assert_eq!(world.objects[0].name, "renamed");
    }

    #[test]
    fn missing_id_is_none() {
        let mut world = small_world();
        let id = world.acquire_id::<Light>();
        assert!(find_entity(&world, id).is_none());
        assert!(entity_index(&world, id).is_none());
    }

    #[test]
    #[should_panic(expected = "sector #0 does not exist")]
    fn expect_missing_entity_panics() {
        let mut world = small_world();
        let id = world.acquire_id::<Sector>();
        expect_entity_mut(&mut world, id);
    }

    #[test]
    fn limits_are_clamped() {
        let world = World::new(WorldLimits {
            max_entities: MAX_ENTITIES * 2,
        });
        assert_eq!(world.limits().max_entities, MAX_ENTITIES);
    }

    #[test]
    fn is_full_per_kind() {
        let mut world = World::new(WorldLimits { max_entities: 1 });
        assert!(!world.is_full::<Hintnode>());
        let id = world.acquire_id::<Hintnode>();
        world.hintnodes.push(Hintnode {
            id,
            ..Default::default()
        });
        assert!(world.is_full::<Hintnode>());
        assert!(!world.is_full::<Barrier>());
        assert_eq!(world.entity_count(), 1);
    }

    #[rstest]
    #[case::object(Object::KIND, EntityKind::Object)]
    #[case::planning_connection(PlanningConnection::KIND, EntityKind::PlanningConnection)]
    #[case::block(Block::KIND, EntityKind::Block)]
    fn kinds_match_table(#[case] kind: EntityKind, #[case] expected: EntityKind) {
        assert_eq!(kind, expected);
    }

    #[test]
    fn blocks_have_no_name() {
        let block = Block::default();
        assert_eq!(block.name(), None);

        let mut path = Path {
            name: "patrol".into(),
            ..Default::default()
        };
        assert_eq!(path.name(), Some("patrol"));
        if let Some(name) = path.name_mut() {
            name.push('2');
        }
        assert_eq!(path.name, "patrol2");

        assert!(Block::name_field().is_none());
        let name = Path::name_field().unwrap();
        assert_eq!(name.get(&path), "patrol2");
    }

    #[test]
    fn id_generators_are_per_kind() {
        let mut world = small_world();
        assert_eq!(world.acquire_id::<Object>().raw(), 0);
        assert_eq!(world.acquire_id::<Object>().raw(), 1);
        assert_eq!(world.acquire_id::<Light>().raw(), 0);
    }
}
