//! World data model for the world editor.
//!
//! - [`World`]: fixed-capacity, address-stable entity collections
//! - [`InteractionTarget`] / [`Selection`]: what the user points at
//! - [`CreationEntity`]: the entity being placed
//! - [`EditContext`]: the target every world edit runs against
//! - [`edits`]: the reversible edits tools build
//! - [`ObjectClassLibrary`]: reference counting of object classes

pub mod context;
pub mod creation;
pub mod edits;
pub mod entities;
pub mod fields;
pub mod id;
pub mod interaction;
pub mod naming;
pub mod object_class;
pub mod selection;
pub mod world;

pub use context::EditContext;
pub use creation::CreationEntity;
pub use entities::*;
pub use fields::Field;
pub use id::{Id, IdGenerator};
pub use interaction::{
    InteractionTarget, MAX_PATH_NODES, NodeMask, PathIdNodeMask, is_path_node_selected,
    is_path_selected, is_selected, is_valid,
};
pub use naming::unique_name;
pub use object_class::{ObjectClassHandle, ObjectClassLibrary, RefCountedClassLibrary};
pub use selection::{InteractionTargets, Selection};
pub use world::{
    DEFAULT_MAX_ENTITIES, MAX_ENTITIES, NextIds, World, WorldEntity, WorldLimits, entity_index,
    find_entity, find_entity_mut,
};
