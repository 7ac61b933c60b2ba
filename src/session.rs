//! Top-level editing session tying a scene to its command history.
//!
//! Features receive `&mut EditSession` instead of reaching for a global
//! manager; one session owns one scene and one history for its lifetime.

use tracing::debug;

use crate::command::{Command, CommandError};
use crate::config::SessionConfig;
use crate::edit::{finish_multi_transform, EditSnapshot};
use crate::history::CommandHistory;
use crate::scene::{ObjectId, Pose, Rgba, Scene, ShapeKind};

pub struct EditSession {
    scene: Scene,
    history: CommandHistory,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            history: CommandHistory::new(),
        }
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        Self {
            scene: Scene::new(),
            history: CommandHistory::with_depth(config.max_undo_depth),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for an in-progress edit. Changes made here are
    /// not recorded until the matching `commit_*` call.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Spawn a new object and record its creation
    pub fn create_object(
        &mut self,
        shape: ShapeKind,
        pose: Pose,
        color: Rgba,
    ) -> Result<ObjectId, CommandError> {
        let id = self.scene.spawn(shape, pose, color);
        debug!("create object {}", id);
        self.history.execute_command(
            Command::Create { id, shape, pose, color },
            &mut self.scene,
        )?;
        Ok(id)
    }

    /// Spawn a copy of an existing object at its current pose and record
    /// the creation
    pub fn duplicate_object(&mut self, source: ObjectId) -> Result<ObjectId, CommandError> {
        let (shape, pose, color) = {
            let obj = self
                .scene
                .get(source)
                .ok_or(CommandError::ObjectNotFound(source))?;
            (obj.shape, obj.pose, obj.color)
        };
        debug!("duplicate object {}", source);
        self.create_object(shape, pose, color)
    }

    /// Deactivate an object, recording its pose at deletion time so undo
    /// can restore it exactly
    pub fn delete_object(&mut self, id: ObjectId) -> Result<(), CommandError> {
        let pose = self
            .scene
            .get(id)
            .ok_or(CommandError::ObjectNotFound(id))?
            .pose;
        debug!("delete object {}", id);
        self.history
            .execute_command(Command::Delete { id, pose }, &mut self.scene)
    }

    /// Capture an object's state before an edit begins
    pub fn begin_edit(&self, id: ObjectId) -> Result<EditSnapshot, CommandError> {
        EditSnapshot::capture(&self.scene, id)
    }

    /// Record a finished move edit
    pub fn commit_move(&mut self, snapshot: EditSnapshot) -> Result<(), CommandError> {
        let command = snapshot.finish_move(&self.scene)?;
        self.record(command)
    }

    /// Record a finished position+rotation edit
    pub fn commit_transform(&mut self, snapshot: EditSnapshot) -> Result<(), CommandError> {
        let command = snapshot.finish_transform(&self.scene)?;
        self.record(command)
    }

    /// Record a finished scale edit
    pub fn commit_scale(&mut self, snapshot: EditSnapshot) -> Result<(), CommandError> {
        let command = snapshot.finish_scale(&self.scene)?;
        self.record(command)
    }

    /// Record a finished color edit
    pub fn commit_recolor(&mut self, snapshot: EditSnapshot) -> Result<(), CommandError> {
        let command = snapshot.finish_recolor(&self.scene)?;
        self.record(command)
    }

    /// Record a finished multi-selection grab as one atomic command
    pub fn commit_multi_transform(
        &mut self,
        snapshots: &[EditSnapshot],
    ) -> Result<(), CommandError> {
        let command = finish_multi_transform(&self.scene, snapshots)?;
        self.record(command)
    }

    fn record(&mut self, command: Command) -> Result<(), CommandError> {
        debug!("commit {}", command.name());
        self.history.execute_command(command, &mut self.scene)
    }

    pub fn undo(&mut self) -> Result<bool, CommandError> {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> Result<bool, CommandError> {
        self.history.redo(&mut self.scene)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
