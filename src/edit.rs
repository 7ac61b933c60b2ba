//! Snapshot capture for edits.
//!
//! Editing features mutate the scene directly while an edit is in progress
//! (a grab, a drag along a scale axis, a color swatch hover). The snapshot
//! taken when the edit begins, paired with the object's state when it ends,
//! is what becomes the recorded command.

use crate::command::{Command, CommandError, TransformEntry};
use crate::scene::{ObjectId, Pose, Rgba, Scene};

/// State of an object captured when an edit begins
#[derive(Debug, Clone, Copy)]
pub struct EditSnapshot {
    pub id: ObjectId,
    pub pose: Pose,
    pub color: Rgba,
}

impl EditSnapshot {
    /// Capture the current state of an object before editing it
    pub fn capture(scene: &Scene, id: ObjectId) -> Result<Self, CommandError> {
        let obj = scene.get(id).ok_or(CommandError::ObjectNotFound(id))?;
        Ok(Self {
            id,
            pose: obj.pose,
            color: obj.color,
        })
    }

    /// Build a move command from this snapshot and the object's current position
    pub fn finish_move(&self, scene: &Scene) -> Result<Command, CommandError> {
        let obj = scene.get(self.id).ok_or(CommandError::ObjectNotFound(self.id))?;
        Ok(Command::Move {
            id: self.id,
            old_position: self.pose.position,
            new_position: obj.pose.position,
        })
    }

    /// Build a transform command covering position and rotation
    pub fn finish_transform(&self, scene: &Scene) -> Result<Command, CommandError> {
        let obj = scene.get(self.id).ok_or(CommandError::ObjectNotFound(self.id))?;
        Ok(Command::Transform {
            id: self.id,
            old_position: self.pose.position,
            new_position: obj.pose.position,
            old_rotation: self.pose.rotation,
            new_rotation: obj.pose.rotation,
        })
    }

    /// Build a scale command from this snapshot and the object's current scale
    pub fn finish_scale(&self, scene: &Scene) -> Result<Command, CommandError> {
        let obj = scene.get(self.id).ok_or(CommandError::ObjectNotFound(self.id))?;
        Ok(Command::Scale {
            id: self.id,
            old_scale: self.pose.scale,
            new_scale: obj.pose.scale,
        })
    }

    /// Build a color command from this snapshot and the object's current color
    pub fn finish_recolor(&self, scene: &Scene) -> Result<Command, CommandError> {
        let obj = scene.get(self.id).ok_or(CommandError::ObjectNotFound(self.id))?;
        Ok(Command::ChangeColor {
            id: self.id,
            old_color: self.color,
            new_color: obj.color,
        })
    }
}

/// Build one grouped transform command from per-object snapshots, as taken
/// when a multi-selection is grabbed and moved together
pub fn finish_multi_transform(
    scene: &Scene,
    snapshots: &[EditSnapshot],
) -> Result<Command, CommandError> {
    let mut entries = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let obj = scene
            .get(snapshot.id)
            .ok_or(CommandError::ObjectNotFound(snapshot.id))?;
        entries.push(TransformEntry {
            id: snapshot.id,
            old_position: snapshot.pose.position,
            new_position: obj.pose.position,
            old_rotation: snapshot.pose.rotation,
            new_rotation: obj.pose.rotation,
        });
    }
    Ok(Command::MultiTransform(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeKind;
    use glam::{Quat, Vec3};

    #[test]
    fn test_capture_then_finish_move() {
        let mut scene = Scene::new();
        let id = scene.spawn(ShapeKind::Cube, Pose::IDENTITY, Rgba::WHITE);

        let snapshot = EditSnapshot::capture(&scene, id).unwrap();
        scene.get_mut(id).unwrap().pose.position = Vec3::new(3.0, 0.0, 0.0);

        let cmd = snapshot.finish_move(&scene).unwrap();
        cmd.undo(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().pose.position, Vec3::ZERO);

        cmd.execute(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().pose.position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_capture_stale_handle() {
        let mut scene = Scene::new();
        let id = scene.spawn(ShapeKind::Cube, Pose::IDENTITY, Rgba::WHITE);
        scene.destroy(id);

        assert_eq!(
            EditSnapshot::capture(&scene, id).unwrap_err(),
            CommandError::ObjectNotFound(id)
        );
    }

    #[test]
    fn test_finish_recolor_uses_snapshot_as_before() {
        let mut scene = Scene::new();
        let id = scene.spawn(ShapeKind::Sphere, Pose::IDENTITY, Rgba::WHITE);

        let snapshot = EditSnapshot::capture(&scene, id).unwrap();
        let green = Rgba::new(0.0, 1.0, 0.0, 1.0);
        scene.get_mut(id).unwrap().color = green;

        let cmd = snapshot.finish_recolor(&scene).unwrap();
        cmd.undo(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().color, Rgba::WHITE);
    }

    #[test]
    fn test_finish_multi_transform_covers_all_snapshots() {
        let mut scene = Scene::new();
        let a = scene.spawn(ShapeKind::Cube, Pose::IDENTITY, Rgba::WHITE);
        let b = scene.spawn(ShapeKind::Sphere, Pose::IDENTITY, Rgba::WHITE);

        let snapshots = vec![
            EditSnapshot::capture(&scene, a).unwrap(),
            EditSnapshot::capture(&scene, b).unwrap(),
        ];

        let offset = Vec3::new(0.0, 2.0, 0.0);
        let spin = Quat::from_rotation_x(0.7);
        for id in [a, b] {
            let obj = scene.get_mut(id).unwrap();
            obj.pose.position += offset;
            obj.pose.rotation = spin;
        }

        let cmd = finish_multi_transform(&scene, &snapshots).unwrap();
        cmd.undo(&mut scene).unwrap();
        for id in [a, b] {
            let obj = scene.get(id).unwrap();
            assert_eq!(obj.pose.position, Vec3::ZERO);
            assert_eq!(obj.pose.rotation, Quat::IDENTITY);
        }
    }
}
