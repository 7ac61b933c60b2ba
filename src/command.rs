use std::fmt;

use glam::{Quat, Vec3};

use crate::scene::{ObjectId, Pose, Rgba, Scene, ShapeKind};

/// Errors that can occur when applying a command to the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The target object was destroyed between recording and replay
    ObjectNotFound(ObjectId),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::ObjectNotFound(id) => write!(f, "object not found: {}", id),
        }
    }
}

impl std::error::Error for CommandError {}

pub type CommandResult = Result<(), CommandError>;

/// Per-object entry of a grouped transform change
#[derive(Debug, Clone)]
pub struct TransformEntry {
    pub id: ObjectId,
    pub old_position: Vec3,
    pub new_position: Vec3,
    pub old_rotation: Quat,
    pub new_rotation: Quat,
}

/// A reversible edit to the scene.
///
/// Each variant owns copies of the before/after state it governs and refers
/// to its target object by handle only. `undo` after `execute` restores the
/// exact prior state of that object, and `execute` after `undo` restores the
/// exact posterior state, indefinitely.
#[derive(Debug, Clone)]
pub enum Command {
    /// Change an object's position
    Move {
        id: ObjectId,
        old_position: Vec3,
        new_position: Vec3,
    },
    /// Change an object's position and rotation together
    Transform {
        id: ObjectId,
        old_position: Vec3,
        new_position: Vec3,
        old_rotation: Quat,
        new_rotation: Quat,
    },
    /// Change position and rotation of several objects as one unit.
    /// Applied and undone atomically: every handle is validated before
    /// any entry is written.
    MultiTransform(Vec<TransformEntry>),
    /// Change an object's scale
    Scale {
        id: ObjectId,
        old_scale: Vec3,
        new_scale: Vec3,
    },
    /// Change an object's color
    ChangeColor {
        id: ObjectId,
        old_color: Rgba,
        new_color: Rgba,
    },
    /// Bring an object into the scene. The object is spawned before the
    /// command is recorded; execute reactivates it at the recorded spawn
    /// state, undo deactivates it without freeing the slot.
    Create {
        id: ObjectId,
        shape: ShapeKind,
        pose: Pose,
        color: Rgba,
    },
    /// Remove an object from the scene by deactivating it. The pose is
    /// captured at deletion time so undo can restore it exactly.
    Delete { id: ObjectId, pose: Pose },
}

impl Command {
    /// Human-readable kind tag for logging and UI
    pub fn name(&self) -> &'static str {
        match self {
            Command::Move { .. } => "Move Object",
            Command::Transform { .. } => "Transform Object",
            Command::MultiTransform(_) => "Transform Objects",
            Command::Scale { .. } => "Scale Object",
            Command::ChangeColor { .. } => "Change Color",
            Command::Create { .. } => "Create Object",
            Command::Delete { .. } => "Delete Object",
        }
    }

    /// Apply the forward effect to the scene.
    ///
    /// Safe to call again after [`Command::undo`]; re-execution on commit is
    /// idempotent with the mutation the editing feature already applied.
    pub fn execute(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Move { id, new_position, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.position = *new_position;
            }
            Command::Transform { id, new_position, new_rotation, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.position = *new_position;
                obj.pose.rotation = *new_rotation;
            }
            Command::MultiTransform(entries) => {
                validate_entries(scene, entries)?;
                for entry in entries {
                    if let Some(obj) = scene.get_mut(entry.id) {
                        obj.pose.position = entry.new_position;
                        obj.pose.rotation = entry.new_rotation;
                    }
                }
            }
            Command::Scale { id, new_scale, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.scale = *new_scale;
            }
            Command::ChangeColor { id, new_color, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.color = *new_color;
            }
            Command::Create { id, pose, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.active = true;
                obj.pose = *pose;
            }
            Command::Delete { id, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.active = false;
            }
        }
        Ok(())
    }

    /// Apply the exact inverse effect to the scene
    pub fn undo(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Move { id, old_position, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.position = *old_position;
            }
            Command::Transform { id, old_position, old_rotation, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.position = *old_position;
                obj.pose.rotation = *old_rotation;
            }
            Command::MultiTransform(entries) => {
                validate_entries(scene, entries)?;
                for entry in entries {
                    if let Some(obj) = scene.get_mut(entry.id) {
                        obj.pose.position = entry.old_position;
                        obj.pose.rotation = entry.old_rotation;
                    }
                }
            }
            Command::Scale { id, old_scale, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.pose.scale = *old_scale;
            }
            Command::ChangeColor { id, old_color, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.color = *old_color;
            }
            Command::Create { id, .. } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.active = false;
            }
            Command::Delete { id, pose } => {
                let obj = scene.get_mut(*id).ok_or(CommandError::ObjectNotFound(*id))?;
                obj.active = true;
                obj.pose = *pose;
            }
        }
        Ok(())
    }
}

/// Resolve every handle in a batch before touching any of it
fn validate_entries(scene: &Scene, entries: &[TransformEntry]) -> CommandResult {
    for entry in entries {
        if !scene.contains(entry.id) {
            return Err(CommandError::ObjectNotFound(entry.id));
        }
    }
    Ok(())
}
