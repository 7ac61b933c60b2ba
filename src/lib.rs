//! Editing core for a spatial object editor: a scene of shape objects with
//! poses and colors, and a bounded undo/redo command history that makes
//! every edit reversible.
//!
//! Editing features mutate the scene directly while an edit is in progress,
//! then commit a snapshot-derived command through the session; undo and redo
//! replay the recorded commands against the scene.

mod command;
mod config;
mod edit;
mod history;
mod scene;
mod session;

pub use command::{Command, CommandError, CommandResult, TransformEntry};
pub use config::SessionConfig;
pub use edit::{finish_multi_transform, EditSnapshot};
pub use history::CommandHistory;
pub use scene::{ObjectId, Pose, Rgba, Scene, SceneObject, ShapeKind};
pub use session::EditSession;
