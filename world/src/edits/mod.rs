//! Concrete edits on an [`EditContext`](crate::EditContext).
//!
//! Every edit here resolves its target through ids and [`Field`]
//! descriptors when it runs, so edits stay valid while other entities are
//! inserted and removed around them.
//!
//! [`Field`]: crate::fields::Field

mod creation;
mod delete_entity;
mod insert_entity;
mod set_value;

pub use creation::{
    Location, SetCreationEntity, SetCreationLocation, SetCreationPathNodeLocation,
    SetCreationValue,
};
pub use delete_entity::{
    DeleteEntity, DeleteObject, DeletePathNodes, DeletePlanningHub, DeleteSector,
    make_delete_entity,
};
pub use insert_entity::{InsertEntity, InsertObject, make_insert_entity};
pub use set_value::{FieldValue, SetContextValue, SetIndexedValue, SetPathNodeValue, SetValue};
