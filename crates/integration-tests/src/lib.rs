//! Shared fixtures for the Overboard integration tests.

use ob_core::{AnswerId, Board, QuestionId, UserId};

/// The reference exchange: Safet asks on "Java", Leila answers.
pub struct Exchange {
    pub board: Board,
    pub questioner: UserId,
    pub answerer: UserId,
    pub question: QuestionId,
    pub answer: AnswerId,
}

impl Exchange {
    pub fn new() -> Self {
        let mut board = Board::new("Java");
        let questioner = board.create_user("Safet").expect("fresh board accepts Safet");
        let answerer = board.create_user("Leila").expect("fresh board accepts Leila");
        let question = board
            .ask_question(questioner, "What's up? ")
            .expect("questioner is registered");
        let answer = board
            .answer_question(answerer, question, "Nothing.")
            .expect("question exists");

        Self {
            board,
            questioner,
            answerer,
            question,
            answer,
        }
    }

    pub fn reputation_of(&self, user: UserId) -> i64 {
        self.board.reputation(&user).expect("user is registered")
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
