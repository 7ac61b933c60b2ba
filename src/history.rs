use tracing::info;

use crate::command::{Command, CommandError, CommandResult};
use crate::scene::Scene;

/// Bounded undo/redo history over scene commands.
///
/// The single authority for what happened and what can be reversed. One
/// history serves one editing session; it is handed to the features that
/// record edits rather than reached through a global.
#[derive(Debug)]
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Default maximum number of commands retained for undo
    pub const DEFAULT_MAX_DEPTH: usize = 50;

    pub fn new() -> Self {
        Self::with_depth(Self::DEFAULT_MAX_DEPTH)
    }

    /// Depth is fixed for the lifetime of the history
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Execute a command and record it.
    ///
    /// Clears the redo stack (a new edit invalidates any pending redo) and
    /// evicts the oldest entries once the depth bound is exceeded. On error
    /// the command is not recorded and both stacks are left unchanged.
    pub fn execute_command(&mut self, command: Command, scene: &mut Scene) -> CommandResult {
        command.execute(scene)?;
        self.undo_stack.push(command);
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        Ok(())
    }

    /// Undo the most recent command, moving it to the redo stack.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. On a command
    /// error the command stays on the undo stack.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<bool, CommandError> {
        let command = match self.undo_stack.pop() {
            Some(command) => command,
            None => {
                info!("undo: no command to undo");
                return Ok(false);
            }
        };

        if let Err(e) = command.undo(scene) {
            self.undo_stack.push(command);
            return Err(e);
        }

        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-execute the most recently undone command, moving it back to the
    /// undo stack. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<bool, CommandError> {
        let command = match self.redo_stack.pop() {
            Some(command) => command,
            None => {
                info!("redo: no command to redo");
                return Ok(false);
            }
        };

        if let Err(e) = command.execute(scene) {
            self.redo_stack.push(command);
            return Err(e);
        }

        self.undo_stack.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the command the next undo would revert
    pub fn peek_undo(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Name of the command the next redo would re-apply
    pub fn peek_redo(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|c| c.name())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Empty both stacks; used on session reset
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectId, Pose, Rgba, ShapeKind};
    use glam::Vec3;

    fn make_scene() -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let id = scene.spawn(ShapeKind::Cube, Pose::IDENTITY, Rgba::WHITE);
        (scene, id)
    }

    fn move_x(id: ObjectId, from: f32, to: f32) -> Command {
        Command::Move {
            id,
            old_position: Vec3::new(from, 0.0, 0.0),
            new_position: Vec3::new(to, 0.0, 0.0),
        }
    }

    fn position_x(scene: &Scene, id: ObjectId) -> f32 {
        scene.get(id).unwrap().pose.position.x
    }

    #[test]
    fn test_execute_records_and_applies() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();

        assert_eq!(position_x(&scene, id), 1.0);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_stack_discipline() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        history.execute_command(move_x(id, 1.0, 2.0), &mut scene).unwrap();

        // first undo reverts only the second command
        assert!(history.undo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 1.0);

        assert!(history.undo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 0.0);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();

        assert!(history.undo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 0.0);
        assert!(!history.can_undo());
        assert!(history.can_redo());

        assert!(history.redo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 1.0);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        history.undo(&mut scene).unwrap();
        assert!(history.can_redo());

        history.execute_command(move_x(id, 0.0, 5.0), &mut scene).unwrap();
        assert!(!history.can_redo());

        // redo is a no-op now
        assert!(!history.redo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 5.0);
    }

    #[test]
    fn test_noop_on_empty_history() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        assert!(!history.undo(&mut scene).unwrap());
        assert!(!history.redo(&mut scene).unwrap());
        assert_eq!(position_x(&scene, id), 0.0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_bound_evicts_oldest() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        for i in 0..60 {
            let cmd = move_x(id, i as f32, (i + 1) as f32);
            history.execute_command(cmd, &mut scene).unwrap();
        }

        assert_eq!(history.undo_depth(), 50);
        assert_eq!(position_x(&scene, id), 60.0);

        // undoing everything retained stops at the eviction horizon
        let mut undone = 0;
        while history.undo(&mut scene).unwrap() {
            undone += 1;
        }
        assert_eq!(undone, 50);
        assert!(!history.can_undo());
        assert_eq!(position_x(&scene, id), 10.0);
    }

    #[test]
    fn test_custom_depth() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::with_depth(3);

        for i in 0..5 {
            history
                .execute_command(move_x(id, i as f32, (i + 1) as f32), &mut scene)
                .unwrap();
        }

        assert_eq!(history.undo_depth(), 3);
    }

    #[test]
    fn test_failed_execute_records_nothing() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        scene.destroy(id);

        let err = history
            .execute_command(move_x(id, 0.0, 1.0), &mut scene)
            .unwrap_err();
        assert_eq!(err, CommandError::ObjectNotFound(id));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_failed_undo_keeps_command_on_stack() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        scene.destroy(id);

        assert!(history.undo(&mut scene).is_err());
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_failed_redo_keeps_command_on_stack() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        history.undo(&mut scene).unwrap();
        scene.destroy(id);

        assert!(history.redo(&mut scene).is_err());
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_peek_names() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        assert_eq!(history.peek_undo(), None);

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        assert_eq!(history.peek_undo(), Some("Move Object"));

        history.undo(&mut scene).unwrap();
        assert_eq!(history.peek_redo(), Some("Move Object"));
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let (mut scene, id) = make_scene();
        let mut history = CommandHistory::new();

        history.execute_command(move_x(id, 0.0, 1.0), &mut scene).unwrap();
        history.execute_command(move_x(id, 1.0, 2.0), &mut scene).unwrap();
        history.undo(&mut scene).unwrap();

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        // clearing history does not touch the scene
        assert_eq!(position_x(&scene, id), 1.0);
    }
}
