use std::fmt;

use glam::{Quat, Vec3};

/// Shape primitive of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
    Capsule,
    Torus,
    Cone,
    Plane,
}

/// Linear RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Position, orientation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Pose { position, ..Pose::IDENTITY }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

/// Handle to an object in a [`Scene`].
///
/// Handles stay valid while the object is deactivated; they go stale only
/// when the slot is explicitly destroyed. A stale handle never resolves,
/// even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// An editable object: a shape with a pose and a color.
///
/// `active: false` marks the object as deleted but resurrectable; deletion
/// through commands never frees the slot, so undo can reactivate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: ShapeKind,
    pub pose: Pose,
    pub color: Rgba,
    pub active: bool,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<SceneObject>,
}

/// Generational arena holding every object in the editing session
#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
}

impl Scene {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a new active object, reusing a destroyed slot when one is free
    pub fn spawn(&mut self, shape: ShapeKind, pose: Pose, color: Rgba) -> ObjectId {
        let object = SceneObject { shape, pose, color, active: true };

        if let Some(index) = self.slots.iter().position(|s| s.object.is_none()) {
            let slot = &mut self.slots[index];
            slot.object = Some(object);
            return ObjectId { index: index as u32, generation: slot.generation };
        }

        self.slots.push(Slot { generation: 0, object: Some(object) });
        ObjectId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Free an object's slot. The handle (and any copy of it) goes stale
    /// permanently. Returns false if the handle was already stale.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.object.is_some() => {
                slot.object = None;
                slot.generation += 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.object.as_mut())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live objects (active or deactivated)
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.object.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                let id = ObjectId {
                    index: index as u32,
                    generation: slot.generation,
                };
                (id, object)
            })
        })
    }
}
