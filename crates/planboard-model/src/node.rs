//! Tree node records
//!
//! [`TreeNode`] mirrors what the persistence layer stores for one board item.
//! Optional fields are *stored overrides*: `None` means "not set" and the
//! engine derives an effective value instead.

use crate::geometry::{Point, Size};
use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// Node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The absolute root of the board
    Root,
    /// A project grouping
    Project,
    /// A plain work item
    #[default]
    Item,
    /// A narrative node with inline body text
    Story,
}

impl NodeKind {
    /// Whether this is a story node
    #[inline]
    #[must_use]
    pub const fn is_story(self) -> bool {
        matches!(self, Self::Story)
    }
}

/// Task status of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not a task
    #[default]
    None,
    /// Open task
    Todo,
    /// Completed task
    Done,
}

/// Legacy checklist entry on a story node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStep {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Completion summary of a node's story steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoryProgress {
    pub done: usize,
    pub total: usize,
}

impl StoryProgress {
    /// True when every step is done (vacuously true for no steps)
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.done == self.total
    }
}

/// A node in the planning hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub task_status: TaskStatus,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub story_steps: Vec<StoryStep>,
}

impl TreeNode {
    /// Create a node with only the structural fields set
    #[must_use]
    pub fn new(id: impl Into<NodeId>, parent_id: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            parent_id,
            title: String::new(),
            kind,
            task_status: TaskStatus::None,
            body: String::new(),
            color: None,
            x: None,
            y: None,
            width: None,
            height: None,
            story_steps: Vec::new(),
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With body text
    #[inline]
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// With a stored position override
    #[inline]
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// With a stored size override
    #[inline]
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// With story checklist steps
    #[inline]
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StoryStep>) -> Self {
        self.story_steps = steps;
        self
    }

    /// True for the absolute root (no parent)
    #[inline]
    #[must_use]
    pub fn is_absolute_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Apply the stored position override on top of a computed position.
    ///
    /// Each axis is overridden independently.
    #[inline]
    #[must_use]
    pub fn effective_position(&self, computed: Point) -> Point {
        Point::new(self.x.unwrap_or(computed.x), self.y.unwrap_or(computed.y))
    }

    /// Stored size override, if both axes are absent returns `None`
    #[must_use]
    pub fn stored_size(&self) -> Option<(Option<f32>, Option<f32>)> {
        if self.width.is_none() && self.height.is_none() {
            None
        } else {
            Some((self.width, self.height))
        }
    }

    /// Resolve the stored size against a default, axis by axis
    #[must_use]
    pub fn stored_size_or(&self, default: Size) -> Size {
        Size::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }

    /// Summarize the legacy story checklist
    #[must_use]
    pub fn story_progress(&self) -> StoryProgress {
        StoryProgress {
            done: self.story_steps.iter().filter(|s| s.done).count(),
            total: self.story_steps.len(),
        }
    }
}
