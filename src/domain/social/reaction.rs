use crate::domain::shared::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use ts_rs::TS;

/// Closed set of reactions a user can leave on a review.
///
/// Declaration order is the display order of classified reactions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    TS,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ReactionKind {
    Love,
    Good,
    Fun,
    Sad,
    Angry,
    Surprise,
    Thanks,
    Sympathy,
    Curious,
    Cool,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 10] = [
        ReactionKind::Love,
        ReactionKind::Good,
        ReactionKind::Fun,
        ReactionKind::Sad,
        ReactionKind::Angry,
        ReactionKind::Surprise,
        ReactionKind::Thanks,
        ReactionKind::Sympathy,
        ReactionKind::Curious,
        ReactionKind::Cool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Love => "LOVE",
            ReactionKind::Good => "GOOD",
            ReactionKind::Fun => "FUN",
            ReactionKind::Sad => "SAD",
            ReactionKind::Angry => "ANGRY",
            ReactionKind::Surprise => "SURPRISE",
            ReactionKind::Thanks => "THANKS",
            ReactionKind::Sympathy => "SYMPATHY",
            ReactionKind::Curious => "CURIOUS",
            ReactionKind::Cool => "COOL",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ReactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::ValidationError(format!("unknown reaction: {}", wanted)))
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reaction {
    pub id: i64,
    pub review_id: i64,
    pub user_id: i64,
    #[sqlx(rename = "reaction_type")]
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionResponse {
    pub kind: ReactionKind,
    pub count: i64,
    pub is_reacted: bool,
}

/// Groups a review's reactions by kind.
///
/// Only kinds with at least one reaction are reported. `is_reacted` tells whether
/// `viewer_id` is among the reactors of that kind; an anonymous viewer never is.
pub fn classify_reaction_responses(
    viewer_id: Option<i64>,
    reactions: &[Reaction],
) -> Vec<ReactionResponse> {
    let mut grouped: BTreeMap<ReactionKind, (i64, bool)> = BTreeMap::new();
    for reaction in reactions {
        let entry = grouped.entry(reaction.kind).or_insert((0, false));
        entry.0 += 1;
        if viewer_id == Some(reaction.user_id) {
            entry.1 = true;
        }
    }

    grouped
        .into_iter()
        .map(|(kind, (count, is_reacted))| ReactionResponse {
            kind,
            count,
            is_reacted,
        })
        .collect()
}
