/**
 * Column Model
 *
 * A column belongs to exactly one board for its whole life and holds the
 * ordered sequence of its task ids.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sequence::Sequence;

/// Display color shared by columns and tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    #[default]
    Blue,
    Green,
    Yellow,
    Purple,
}

/// Column document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Owning board; immutable
    pub board_id: Uuid,
    #[serde(default)]
    pub tasks: Sequence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(board_id: Uuid, title: impl Into<String>, color: Option<Color>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            color,
            board_id,
            tasks: Sequence::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
