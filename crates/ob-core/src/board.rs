//! # Board
//!
//! A named forum instance. The board owns every user, question and
//! answer, and every action names the acting user explicitly.
//!
//! Not internally synchronised: wrap a `Board` in a lock when sharing it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::{Answer, AnswerId, PostRef, Question, QuestionId, User, UserId, VoteDirection};
use crate::traits::Votable;

#[derive(Debug, Clone, Serialize)]
pub struct Board {
    name: String,
    users: HashMap<UserId, User>,
    /// Name index; names are unique within a board.
    names: HashMap<String, UserId>,
    questions: HashMap<QuestionId, Question>,
    question_order: Vec<QuestionId>,
    answers: HashMap<AnswerId, Answer>,
    created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: HashMap::new(),
            names: HashMap::new(),
            questions: HashMap::new(),
            question_order: Vec::new(),
            answers: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ── Users ───────────────────────────────────────────────────────────────

    /// Registers a new user with zero reputation.
    pub fn create_user(&mut self, name: impl Into<String>) -> Result<UserId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::ValidationError("user name must not be blank".into()));
        }
        if self.names.contains_key(&name) {
            warn!(board = %self.name, user = %name, "rejected duplicate user name");
            return Err(AppError::Conflict(format!(
                "user {name} already exists on board {}",
                self.name
            )));
        }

        let user = User::new(name);
        let id = user.id();
        info!(board = %self.name, user = %user.name(), %id, "registered user");
        self.names.insert(user.name().to_string(), id);
        self.users.insert(id, user);
        Ok(id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.names.get(name).and_then(|id| self.users.get(id))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn reputation(&self, id: &UserId) -> Result<i64> {
        Ok(self.require_user(id)?.reputation())
    }

    // ── Posting ─────────────────────────────────────────────────────────────

    /// Asks a new question as `author`. Asking earns no reputation.
    pub fn ask_question(&mut self, author: UserId, body: impl Into<String>) -> Result<QuestionId> {
        self.require_user(&author)?;

        let question = Question::new(author, body.into());
        let id = question.id();
        debug!(board = %self.name, %author, question = %id, "question asked");
        self.question_order.push(id);
        self.questions.insert(id, question);
        Ok(id)
    }

    /// Answers `question` as `author`, appending to its answer list.
    pub fn answer_question(
        &mut self,
        author: UserId,
        question: QuestionId,
        body: impl Into<String>,
    ) -> Result<AnswerId> {
        self.require_user(&author)?;
        let parent = self
            .questions
            .get_mut(&question)
            .ok_or_else(|| AppError::not_found("Question", question))?;

        let answer = Answer::new(question, author, body.into());
        let id = answer.id();
        parent.push_answer(id);
        self.answers.insert(id, answer);
        debug!(board = %self.name, %author, %question, answer = %id, "question answered");
        Ok(id)
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Questions in the order they were asked.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.question_order
            .iter()
            .filter_map(|id| self.questions.get(id))
    }

    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.get(id)
    }

    /// Answers to `question` in the order they were posted.
    pub fn answers_to(&self, question: &QuestionId) -> impl Iterator<Item = &Answer> {
        self.questions
            .get(question)
            .map(Question::answers)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.answers.get(id))
    }

    pub fn accepted_answer(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers_to(question).find(|answer| answer.is_accepted())
    }

    // ── Voting ──────────────────────────────────────────────────────────────

    /// Up votes `target` as `voter`. Returns the reputation delta applied
    /// to the target's author.
    pub fn up_vote(&mut self, voter: UserId, target: impl Into<PostRef>) -> Result<i64> {
        self.cast_vote(voter, target.into(), VoteDirection::Up)
    }

    /// Down votes `target` as `voter`. Returns the reputation delta applied
    /// to the target's author.
    pub fn down_vote(&mut self, voter: UserId, target: impl Into<PostRef>) -> Result<i64> {
        self.cast_vote(voter, target.into(), VoteDirection::Down)
    }

    fn cast_vote(&mut self, voter: UserId, target: PostRef, direction: VoteDirection) -> Result<i64> {
        self.require_user(&voter)?;

        let (author, delta) = match target {
            PostRef::Question(id) => {
                let question = self
                    .questions
                    .get_mut(&id)
                    .ok_or_else(|| AppError::not_found("Question", id))?;
                register(question, voter, direction)
            }
            PostRef::Answer(id) => {
                let answer = self
                    .answers
                    .get_mut(&id)
                    .ok_or_else(|| AppError::not_found("Answer", id))?;
                register(answer, voter, direction)
            }
        }
        .inspect_err(|_| warn!(%voter, %target, "rejected self vote"))?;

        self.credit(author, delta)?;
        debug!(%voter, %target, %direction, delta, "vote registered");
        Ok(delta)
    }

    // ── Acceptance ──────────────────────────────────────────────────────────

    /// Accepts `answer` on behalf of `actor`, who must have asked the question.
    ///
    /// Returns `true` when the bonus was awarded; accepting the same answer
    /// again is a no-op returning `false`.
    pub fn accept_answer(&mut self, actor: UserId, answer: AnswerId) -> Result<bool> {
        self.require_user(&actor)?;
        let (question_id, answerer) = {
            let target = self
                .answers
                .get(&answer)
                .ok_or_else(|| AppError::not_found("Answer", answer))?;
            (target.question_id(), target.author())
        };
        let question = self
            .questions
            .get(&question_id)
            .ok_or_else(|| AppError::not_found("Question", question_id))?;

        if !question.is_author(&actor) {
            let questioner = self.require_user(&question.author())?.name().to_string();
            warn!(%actor, %answer, %questioner, "rejected answer acceptance");
            return Err(AppError::AnswerAcceptance { questioner });
        }

        if let Some(existing) = self.accepted_answer(&question_id) {
            if existing.id() != answer {
                return Err(AppError::Conflict(format!(
                    "question {question_id} already has accepted answer {}",
                    existing.id()
                )));
            }
        }

        let first = self
            .answers
            .get_mut(&answer)
            .map(Answer::accept)
            .unwrap_or(false);
        if !first {
            debug!(%answer, "answer already accepted, no bonus awarded");
            return Ok(false);
        }

        self.credit(answerer, Answer::ACCEPTED_BONUS)?;
        debug!(%actor, %answer, %answerer, "answer accepted");
        Ok(true)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn require_user(&self, id: &UserId) -> Result<&User> {
        self.users
            .get(id)
            .ok_or_else(|| AppError::not_found("User", id))
    }

    fn credit(&mut self, user: UserId, delta: i64) -> Result<()> {
        self.users
            .get_mut(&user)
            .ok_or_else(|| AppError::not_found("User", user))?
            .adjust_reputation(delta);
        Ok(())
    }
}

fn register<V: Votable>(item: &mut V, voter: UserId, direction: VoteDirection) -> Result<(UserId, i64)> {
    if item.is_author(&voter) {
        return Err(AppError::Voting);
    }
    Ok((item.author(), item.register_vote(voter, direction)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        board: Board,
        questioner: UserId,
        answerer: UserId,
        question: QuestionId,
        answer: AnswerId,
    }

    fn setup() -> Fixture {
        let mut board = Board::new("Java");
        let questioner = board.create_user("Safet").unwrap();
        let answerer = board.create_user("Leila").unwrap();
        let question = board.ask_question(questioner, "What's up? ").unwrap();
        let answer = board.answer_question(answerer, question, "Nothing.").unwrap();
        Fixture {
            board,
            questioner,
            answerer,
            question,
            answer,
        }
    }

    #[test]
    fn test_create_user_starts_at_zero() {
        let f = setup();
        assert_eq!(f.board.reputation(&f.questioner).unwrap(), 0);
        assert_eq!(f.board.user_by_name("Leila").unwrap().id(), f.answerer);
        assert_eq!(f.board.users().count(), 2);
    }

    #[test]
    fn test_duplicate_name_is_conflict() {
        let mut f = setup();
        let err = f.board.create_user("Safet").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(f.board.users().count(), 2);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut board = Board::new("Java");
        assert!(matches!(
            board.create_user("   "),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_answer_is_linked_and_ordered() {
        let mut f = setup();
        let second = f
            .board
            .answer_question(f.questioner, f.question, "Answering myself.")
            .unwrap();

        let ids: Vec<_> = f.board.answers_to(&f.question).map(Answer::id).collect();
        assert_eq!(ids, vec![f.answer, second]);
        assert_eq!(f.board.answer(&f.answer).unwrap().question_id(), f.question);
    }

    #[test]
    fn test_posting_does_not_change_reputation() {
        let f = setup();
        assert_eq!(f.board.reputation(&f.questioner).unwrap(), 0);
        assert_eq!(f.board.reputation(&f.answerer).unwrap(), 0);
    }

    #[test]
    fn test_up_vote_question_gives_five() {
        let mut f = setup();
        assert_eq!(f.board.up_vote(f.answerer, f.question).unwrap(), 5);
        assert_eq!(f.board.reputation(&f.questioner).unwrap(), 5);
    }

    #[test]
    fn test_up_vote_answer_gives_ten() {
        let mut f = setup();
        f.board.up_vote(f.questioner, f.answer).unwrap();
        assert_eq!(f.board.reputation(&f.answerer).unwrap(), 10);
    }

    #[test]
    fn test_self_vote_leaves_state_untouched() {
        let mut f = setup();
        assert_eq!(f.board.up_vote(f.questioner, f.question), Err(AppError::Voting));
        assert_eq!(f.board.down_vote(f.answerer, f.answer), Err(AppError::Voting));

        assert!(f.board.question(&f.question).unwrap().votes().is_empty());
        assert!(f.board.answer(&f.answer).unwrap().votes().is_empty());
        assert_eq!(f.board.reputation(&f.questioner).unwrap(), 0);
        assert_eq!(f.board.reputation(&f.answerer).unwrap(), 0);
    }

    #[test]
    fn test_switching_vote_reverses_then_applies() {
        let mut f = setup();
        f.board.up_vote(f.answerer, f.question).unwrap();
        assert_eq!(f.board.down_vote(f.answerer, f.question).unwrap(), -6);
        assert_eq!(f.board.reputation(&f.questioner).unwrap(), -1);

        let question = f.board.question(&f.question).unwrap();
        assert_eq!(question.votes().down_count(), 1);
        assert_eq!(question.votes().up_count(), 0);
    }

    #[test]
    fn test_vote_on_unknown_target() {
        let mut f = setup();
        let missing = QuestionId::new();
        assert!(matches!(
            f.board.up_vote(f.answerer, missing),
            Err(AppError::NotFound(kind, _)) if kind == "Question"
        ));
    }

    #[test]
    fn test_unknown_voter_is_not_found() {
        let mut f = setup();
        assert!(matches!(
            f.board.up_vote(UserId::new(), f.question),
            Err(AppError::NotFound(kind, _)) if kind == "User"
        ));
    }

    #[test]
    fn test_accept_awards_bonus_once() {
        let mut f = setup();
        assert!(f.board.accept_answer(f.questioner, f.answer).unwrap());
        assert!(!f.board.accept_answer(f.questioner, f.answer).unwrap());

        assert_eq!(f.board.reputation(&f.answerer).unwrap(), 15);
        assert!(f.board.answer(&f.answer).unwrap().is_accepted());
        assert_eq!(f.board.accepted_answer(&f.question).unwrap().id(), f.answer);
    }

    #[test]
    fn test_only_questioner_may_accept() {
        let mut f = setup();
        let err = f.board.accept_answer(f.answerer, f.answer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only Safet can accept this answer as it is their question"
        );
        assert!(!f.board.answer(&f.answer).unwrap().is_accepted());
        assert_eq!(f.board.reputation(&f.answerer).unwrap(), 0);
    }

    #[test]
    fn test_second_accepted_answer_is_conflict() {
        let mut f = setup();
        let other = f.board.create_user("Amir").unwrap();
        let second = f.board.answer_question(other, f.question, "Everything.").unwrap();

        f.board.accept_answer(f.questioner, f.answer).unwrap();
        let err = f.board.accept_answer(f.questioner, second).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(!f.board.answer(&second).unwrap().is_accepted());
        assert_eq!(f.board.reputation(&other).unwrap(), 0);
    }

    #[test]
    fn test_board_can_move_across_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Board>();

        let f = setup();
        let handle = std::thread::spawn(move || f.board.reputation(&f.questioner));
        assert_eq!(handle.join().unwrap().unwrap(), 0);
    }

    #[test]
    fn test_questions_keep_ask_order() {
        let mut f = setup();
        let later = f.board.ask_question(f.answerer, "Why?").unwrap();
        let ids: Vec<_> = f.board.questions().map(Question::id).collect();
        assert_eq!(ids, vec![f.question, later]);
    }
}
