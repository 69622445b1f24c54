//! # Domain Models
//!
//! These structs represent the core entities of Overboard.
//! Identity is always an id (UUID v4), never value equality.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Identity of a user within a board.
    UserId
);
entity_id!(
    /// Identity of a question, stable for the board's lifetime.
    QuestionId
);
entity_id!(
    /// Identity of an answer, stable for the board's lifetime.
    AnswerId
);

/// A board member. Reputation only moves through votes and acceptances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    reputation: i64,
    created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: UserId::new(),
            name,
            reputation: 0,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reputation(&self) -> i64 {
        self.reputation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn adjust_reputation(&mut self, delta: i64) {
        self.reputation += delta;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Active ballots on a single question or answer.
///
/// Each voter holds at most one direction; casting again replaces it.
/// Ballots are only cast through `Board`, which rejects self-votes first:
///
/// ```compile_fail
/// let mut votes = ob_core::VoteState::default();
/// votes.cast(ob_core::UserId::new(), ob_core::VoteDirection::Up);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteState {
    ballots: BTreeMap<UserId, VoteDirection>,
}

impl VoteState {
    /// Records `direction` for `voter` and returns the ballot it replaced.
    pub(crate) fn cast(&mut self, voter: UserId, direction: VoteDirection) -> Option<VoteDirection> {
        self.ballots.insert(voter, direction)
    }

    pub fn direction_of(&self, voter: &UserId) -> Option<VoteDirection> {
        self.ballots.get(voter).copied()
    }

    pub fn up_voters(&self) -> impl Iterator<Item = &UserId> {
        self.voters(VoteDirection::Up)
    }

    pub fn down_voters(&self) -> impl Iterator<Item = &UserId> {
        self.voters(VoteDirection::Down)
    }

    pub fn up_count(&self) -> usize {
        self.up_voters().count()
    }

    pub fn down_count(&self) -> usize {
        self.down_voters().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    fn voters(&self, direction: VoteDirection) -> impl Iterator<Item = &UserId> {
        self.ballots
            .iter()
            .filter(move |(_, cast)| **cast == direction)
            .map(|(voter, _)| voter)
    }
}

/// A question asked on a board. Answers are kept in the order they arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    pub(crate) author: UserId,
    body: String,
    answers: Vec<AnswerId>,
    pub(crate) votes: VoteState,
    created_at: DateTime<Utc>,
}

impl Question {
    pub(crate) fn new(author: UserId, body: String) -> Self {
        Self {
            id: QuestionId::new(),
            author,
            body,
            answers: Vec::new(),
            votes: VoteState::default(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn answers(&self) -> &[AnswerId] {
        &self.answers
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn push_answer(&mut self, answer: AnswerId) {
        self.answers.push(answer);
    }
}

/// An answer to a question. `accepted` only ever moves from false to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    id: AnswerId,
    question: QuestionId,
    pub(crate) author: UserId,
    body: String,
    pub(crate) votes: VoteState,
    accepted: bool,
    created_at: DateTime<Utc>,
}

impl Answer {
    /// Reputation awarded to the answer's author when it is accepted.
    pub const ACCEPTED_BONUS: i64 = 15;

    pub(crate) fn new(question: QuestionId, author: UserId, body: String) -> Self {
        Self {
            id: AnswerId::new(),
            question,
            author,
            body,
            votes: VoteState::default(),
            accepted: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> AnswerId {
        self.id
    }

    pub fn question_id(&self) -> QuestionId {
        self.question
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the answer accepted. Returns `true` only on the first call.
    pub fn accept(&mut self) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        true
    }
}

/// Target of a vote: either a question or an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PostRef {
    Question(QuestionId),
    Answer(AnswerId),
}

impl From<QuestionId> for PostRef {
    fn from(id: QuestionId) -> Self {
        Self::Question(id)
    }
}

impl From<AnswerId> for PostRef {
    fn from(id: AnswerId) -> Self {
        Self::Answer(id)
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question(id) => write!(f, "question {id}"),
            Self::Answer(id) => write!(f, "answer {id}"),
        }
    }
}
