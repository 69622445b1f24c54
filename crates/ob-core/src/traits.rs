//! # Core Traits
//!
//! Anything a user can vote on implements `Votable`.
//! Weights are per type; the ballot bookkeeping is shared.

use crate::models::{Answer, Question, UserId, VoteDirection, VoteState};

/// Vote bookkeeping shared by questions and answers.
pub trait Votable {
    /// Reputation granted to the author for each up vote.
    const UP_VOTE_WEIGHT: i64;
    /// Reputation granted to the author for each down vote (negative).
    const DOWN_VOTE_WEIGHT: i64;

    fn author(&self) -> UserId;
    fn votes(&self) -> &VoteState;
    fn votes_mut(&mut self) -> &mut VoteState;

    fn is_author(&self, user: &UserId) -> bool {
        self.author() == *user
    }

    fn weight(direction: VoteDirection) -> i64 {
        match direction {
            VoteDirection::Up => Self::UP_VOTE_WEIGHT,
            VoteDirection::Down => Self::DOWN_VOTE_WEIGHT,
        }
    }

    /// Records the ballot and returns the reputation delta owed to the author.
    ///
    /// Repeating a ballot yields 0. Switching direction reverses the old
    /// weight before applying the new one.
    ///
    /// Does not check authorship; callers reject self-votes first.
    fn register_vote(&mut self, voter: UserId, direction: VoteDirection) -> i64 {
        match self.votes_mut().cast(voter, direction) {
            Some(previous) if previous == direction => 0,
            Some(previous) => Self::weight(direction) - Self::weight(previous),
            None => Self::weight(direction),
        }
    }

    /// Net ballots: up voters minus down voters.
    fn score(&self) -> i64 {
        self.votes().up_count() as i64 - self.votes().down_count() as i64
    }
}

impl Votable for Question {
    const UP_VOTE_WEIGHT: i64 = 5;
    const DOWN_VOTE_WEIGHT: i64 = -1;

    fn author(&self) -> UserId {
        self.author
    }

    fn votes(&self) -> &VoteState {
        &self.votes
    }

    fn votes_mut(&mut self) -> &mut VoteState {
        &mut self.votes
    }
}

impl Votable for Answer {
    const UP_VOTE_WEIGHT: i64 = 10;
    const DOWN_VOTE_WEIGHT: i64 = -1;

    fn author(&self) -> UserId {
        self.author
    }

    fn votes(&self) -> &VoteState {
        &self.votes
    }

    fn votes_mut(&mut self) -> &mut VoteState {
        &mut self.votes
    }
}
