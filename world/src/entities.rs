//! Entity kinds stored in a [`World`](crate::World).

use std::fmt;

use worldedit_core::math::{Quat, Vec2, Vec3, quat_identity};

use crate::id::Id;
use crate::object_class::ObjectClassHandle;

pub type ObjectId = Id<Object>;
pub type LightId = Id<Light>;
pub type PathId = Id<Path>;
pub type RegionId = Id<Region>;
pub type SectorId = Id<Sector>;
pub type PortalId = Id<Portal>;
pub type HintnodeId = Id<Hintnode>;
pub type BarrierId = Id<Barrier>;
pub type PlanningHubId = Id<PlanningHub>;
pub type PlanningConnectionId = Id<PlanningConnection>;
pub type BoundaryId = Id<Boundary>;
pub type MeasurementId = Id<Measurement>;
pub type BlockId = Id<Block>;

/// The closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Object,
    Light,
    Path,
    Region,
    Sector,
    Portal,
    Hintnode,
    Barrier,
    PlanningHub,
    PlanningConnection,
    Boundary,
    Measurement,
    Block,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Object,
        EntityKind::Light,
        EntityKind::Path,
        EntityKind::Region,
        EntityKind::Sector,
        EntityKind::Portal,
        EntityKind::Hintnode,
        EntityKind::Barrier,
        EntityKind::PlanningHub,
        EntityKind::PlanningConnection,
        EntityKind::Boundary,
        EntityKind::Measurement,
        EntityKind::Block,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Object => "object",
            EntityKind::Light => "light",
            EntityKind::Path => "path",
            EntityKind::Region => "region",
            EntityKind::Sector => "sector",
            EntityKind::Portal => "portal",
            EntityKind::Hintnode => "hintnode",
            EntityKind::Barrier => "barrier",
            EntityKind::PlanningHub => "planning hub",
            EntityKind::PlanningConnection => "planning connection",
            EntityKind::Boundary => "boundary",
            EntityKind::Measurement => "measurement",
            EntityKind::Block => "block",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed instance of an object class.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub layer: i32,
    pub rotation: Quat,
    pub position: Vec3,
    pub team: i32,
    pub class_name: String,
    /// Reference into the object-class library, managed by insert, delete
    /// and creation edits.
    pub class_handle: ObjectClassHandle,
    pub hidden: bool,
    pub id: ObjectId,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            name: String::new(),
            layer: 0,
            rotation: quat_identity(),
            position: Vec3::zeros(),
            team: 0,
            class_name: String::new(),
            class_handle: ObjectClassHandle::NULL,
            hidden: false,
            id: ObjectId::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LightType {
    Directional,
    #[default]
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub layer: i32,
    pub rotation: Quat,
    pub position: Vec3,
    pub color: Vec3,
    pub light_type: LightType,
    pub range: f32,
    pub hidden: bool,
    pub id: LightId,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: String::new(),
            layer: 0,
            rotation: quat_identity(),
            position: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            light_type: LightType::default(),
            range: 8.0,
            hidden: false,
            id: LightId::default(),
        }
    }
}

/// A node of a [`Path`]. Not an entity of its own: it is addressed by the
/// owning path's id and its index.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub rotation: Quat,
    pub position: Vec3,
}

impl Default for PathNode {
    fn default() -> Self {
        Self {
            rotation: quat_identity(),
            position: Vec3::zeros(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub name: String,
    pub layer: i32,
    pub nodes: Vec<PathNode>,
    pub hidden: bool,
    pub id: PathId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub layer: i32,
    pub rotation: Quat,
    pub position: Vec3,
    pub size: Vec3,
    pub description: String,
    pub hidden: bool,
    pub id: RegionId,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            name: String::new(),
            layer: 0,
            rotation: quat_identity(),
            position: Vec3::zeros(),
            size: Vec3::new(1.0, 1.0, 1.0),
            description: String::new(),
            hidden: false,
            id: RegionId::default(),
        }
    }
}

/// A vertical prism used for visibility. Portals and objects refer to
/// sectors by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sector {
    pub name: String,
    pub base: f32,
    pub height: f32,
    pub points: Vec<Vec2>,
    /// Names of objects listed as belonging to the sector.
    pub objects: Vec<String>,
    pub hidden: bool,
    pub id: SectorId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub name: String,
    pub rotation: Quat,
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    /// Name of the first linked sector, empty if unlinked.
    pub sector1: String,
    /// Name of the second linked sector, empty if unlinked.
    pub sector2: String,
    pub hidden: bool,
    pub id: PortalId,
}

impl Default for Portal {
    fn default() -> Self {
        Self {
            name: String::new(),
            rotation: quat_identity(),
            position: Vec3::zeros(),
            width: 2.0,
            height: 2.0,
            sector1: String::new(),
            sector2: String::new(),
            hidden: false,
            id: PortalId::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hintnode {
    pub name: String,
    pub layer: i32,
    pub rotation: Quat,
    pub position: Vec3,
    pub hint_type: i32,
    pub hidden: bool,
    pub id: HintnodeId,
}

impl Default for Hintnode {
    fn default() -> Self {
        Self {
            name: String::new(),
            layer: 0,
            rotation: quat_identity(),
            position: Vec3::zeros(),
            hint_type: 0,
            hidden: false,
            id: HintnodeId::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Barrier {
    pub name: String,
    pub position: Vec3,
    pub size: Vec2,
    /// Rotation around the vertical axis, in radians.
    pub rotation_angle: f32,
    pub flags: u32,
    pub hidden: bool,
    pub id: BarrierId,
}

impl Default for Barrier {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::zeros(),
            size: Vec2::new(1.0, 1.0),
            rotation_angle: 0.0,
            flags: 0,
            hidden: false,
            id: BarrierId::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningHub {
    pub name: String,
    pub position: Vec3,
    pub radius: f32,
    pub hidden: bool,
    pub id: PlanningHubId,
}

impl Default for PlanningHub {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::zeros(),
            radius: 4.0,
            hidden: false,
            id: PlanningHubId::default(),
        }
    }
}

/// A directed link between two planning hubs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningConnection {
    pub name: String,
    pub start_hub: PlanningHubId,
    pub end_hub: PlanningHubId,
    pub flags: u32,
    pub hidden: bool,
    pub id: PlanningConnectionId,
}

impl PlanningConnection {
    pub fn touches(&self, hub: PlanningHubId) -> bool {
        self.start_hub == hub || self.end_hub == hub
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub name: String,
    pub position: Vec3,
    pub size: Vec2,
    pub hidden: bool,
    pub id: BoundaryId,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::zeros(),
            size: Vec2::new(64.0, 64.0),
            hidden: false,
            id: BoundaryId::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub start: Vec3,
    pub end: Vec3,
    pub hidden: bool,
    pub id: MeasurementId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockShape {
    #[default]
    Box,
    Ramp,
    Quad,
    Cylinder,
    Stairway,
    Cone,
    Hemisphere,
    Pyramid,
}

/// A piece of terrain geometry. Blocks have no name.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub layer: i32,
    pub rotation: Quat,
    pub position: Vec3,
    pub size: Vec3,
    pub shape: BlockShape,
    pub hidden: bool,
    pub id: BlockId,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            layer: 0,
            rotation: quat_identity(),
            position: Vec3::zeros(),
            size: Vec3::new(1.0, 1.0, 1.0),
            shape: BlockShape::default(),
            hidden: false,
            id: BlockId::default(),
        }
    }
}
