/**
 * Board Model
 *
 * A board is the top-level container. Its creator is fixed at creation and
 * is always the first entry of `members`. `columns` is the ordered sequence
 * of column ids shown on the board.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sequence::Sequence;

/// Board document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Creator; never changes after creation
    pub created_by: Uuid,
    /// Ordered member list, creator first, no duplicates
    pub members: Vec<Uuid>,
    #[serde(default)]
    pub columns: Sequence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: impl Into<String>, description: impl Into<String>, creator: Uuid, members: &[Uuid]) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            description: description.into(),
            created_by: creator,
            members: member_list(creator, members),
            columns: Sequence::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_creator(&self, user: &Uuid) -> bool {
        self.created_by == *user
    }

    pub fn is_member(&self, user: &Uuid) -> bool {
        self.members.contains(user)
    }

    /// Replace the member list, keeping the creator at the front
    pub fn set_members(&mut self, members: &[Uuid]) {
        self.members = member_list(self.created_by, members);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn member_list(creator: Uuid, members: &[Uuid]) -> Vec<Uuid> {
    let mut list = vec![creator];
    for member in members {
        if !list.contains(member) {
            list.push(*member);
        }
    }
    list
}
