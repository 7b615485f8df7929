// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Multiple-choice quiz over a fixed sequence of cards.
//!
//! A quiz starts in mode selection. Picking a direction moves it to the
//! first card; each correct answer moves it to the next card, and the last
//! correct answer completes it. Wrong answers are counted and leave the
//! quiz on the same card with the same options.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::rng::sample;
use crate::rng::shuffle;
use crate::types::card::Card;
use crate::types::card::Side;

/// The correct answer plus at most this many minus one distractors.
pub const MAX_OPTIONS: usize = 4;

/// How long front ends show the correct/incorrect message before moving on.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Show the term, pick the definition.
    TermToDefinition,
    /// Show the definition, pick the term.
    DefinitionToTerm,
}

impl Direction {
    pub fn prompt_side(self) -> Side {
        self.answer_side().opposite()
    }

    pub fn answer_side(self) -> Side {
        match self {
            Direction::TermToDefinition => Side::Definition,
            Direction::DefinitionToTerm => Side::Term,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TermToDefinition => "term-to-definition",
            Direction::DefinitionToTerm => "definition-to-term",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "term-to-definition" => Ok(Direction::TermToDefinition),
            "definition-to-term" => Ok(Direction::DefinitionToTerm),
            _ => Err(ErrorReport::new(format!("invalid quiz direction: '{s}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizState {
    ModeSelection {
        cards: Vec<Card>,
    },
    InProgress {
        cards: Vec<Card>,
        direction: Direction,
        index: usize,
        errors: usize,
        options: Vec<String>,
    },
    Completed {
        errors: usize,
    },
}

/// The current question, as presented to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    /// Zero-based position in the card sequence.
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub answer: String,
    pub options: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Moved on to the next card.
    Correct,
    /// Still on the same card; the error count went up.
    Incorrect,
    /// The last card was answered correctly.
    Completed { errors: usize },
}

pub struct Quiz {
    state: QuizState,
    rng: TinyRng,
}

impl Quiz {
    pub fn new(cards: Vec<Card>, rng: TinyRng) -> Self {
        Self {
            state: QuizState::ModeSelection { cards },
            rng,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Number of cards in the quiz, or zero once completed.
    pub fn len(&self) -> usize {
        match &self.state {
            QuizState::ModeSelection { cards } | QuizState::InProgress { cards, .. } => cards.len(),
            QuizState::Completed { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.state {
            QuizState::InProgress { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    pub fn errors(&self) -> usize {
        match &self.state {
            QuizState::ModeSelection { .. } => 0,
            QuizState::InProgress { errors, .. } | QuizState::Completed { errors } => *errors,
        }
    }

    /// Leave mode selection and draw the first question.
    pub fn start(&mut self, direction: Direction) -> Fallible<()> {
        let cards = match &mut self.state {
            QuizState::ModeSelection { cards } => {
                if cards.is_empty() {
                    return Err(ErrorReport::no_cards());
                }
                std::mem::take(cards)
            }
            _ => {
                return Err(ErrorReport::with_kind(
                    ErrorKind::InvalidState,
                    "the quiz has already started",
                ));
            }
        };
        let options = draw_options(&cards, 0, direction, &mut self.rng);
        log::debug!("Starting {direction} quiz over {} cards", cards.len());
        self.state = QuizState::InProgress {
            cards,
            direction,
            index: 0,
            errors: 0,
            options,
        };
        Ok(())
    }

    pub fn question(&self) -> Option<Question> {
        match &self.state {
            QuizState::InProgress {
                cards,
                direction,
                index,
                options,
                ..
            } => {
                let card = &cards[*index];
                Some(Question {
                    index: *index,
                    total: cards.len(),
                    prompt: card.side(direction.prompt_side()).to_string(),
                    answer: card.side(direction.answer_side()).to_string(),
                    options: options.clone(),
                })
            }
            _ => None,
        }
    }

    /// Score a selected option by exact string match.
    pub fn answer(&mut self, selected: &str) -> Fallible<AnswerOutcome> {
        let QuizState::InProgress {
            cards,
            direction,
            index,
            errors,
            options,
        } = &mut self.state
        else {
            return Err(ErrorReport::with_kind(
                ErrorKind::InvalidState,
                "there is no question to answer",
            ));
        };
        let correct = cards[*index].side(direction.answer_side());
        if selected != correct {
            *errors += 1;
            return Ok(AnswerOutcome::Incorrect);
        }
        if *index + 1 < cards.len() {
            *index += 1;
            *options = draw_options(cards, *index, *direction, &mut self.rng);
            Ok(AnswerOutcome::Correct)
        } else {
            let errors = *errors;
            self.state = QuizState::Completed { errors };
            Ok(AnswerOutcome::Completed { errors })
        }
    }
}

/// The correct answer for `cards[index]` plus up to three distractors drawn
/// from the other cards, in random order. Distractors equal to the correct
/// answer are skipped; other duplicates are not.
fn draw_options(cards: &[Card], index: usize, direction: Direction, rng: &mut TinyRng) -> Vec<String> {
    let side = direction.answer_side();
    let correct = cards[index].side(side);
    let candidates: Vec<&str> = cards
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, card)| card.side(side))
        .filter(|value| *value != correct)
        .collect();
    let mut options: Vec<String> = sample(candidates, MAX_OPTIONS - 1, rng)
        .into_iter()
        .map(String::from)
        .collect();
    options.push(correct.to_string());
    shuffle(options, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(pairs: &[(&str, &str)]) -> Vec<Card> {
        pairs.iter().map(|(t, d)| Card::new(*t, *d)).collect()
    }

    fn abcd() -> Vec<Card> {
        deck(&[("A", "1"), ("B", "2"), ("C", "3"), ("D", "4")])
    }

    fn started(cards: Vec<Card>, direction: Direction, seed: u64) -> Fallible<Quiz> {
        let mut quiz = Quiz::new(cards, TinyRng::from_seed(seed));
        quiz.start(direction)?;
        Ok(quiz)
    }

    #[test]
    fn test_first_question_of_four_card_deck() -> Fallible<()> {
        let quiz = started(abcd(), Direction::TermToDefinition, 1)?;
        let question = quiz.question().unwrap();
        assert_eq!(question.prompt, "A");
        assert_eq!(question.answer, "1");
        let mut options = question.options.clone();
        options.sort();
        assert_eq!(options, vec!["1", "2", "3", "4"]);
        Ok(())
    }

    #[test]
    fn test_option_count_and_correct_answer_once() -> Fallible<()> {
        for n in 1..=8 {
            let cards: Vec<Card> = (0..n)
                .map(|i| Card::new(format!("t{i}"), format!("d{i}")))
                .collect();
            for seed in 0..20 {
                let quiz = started(cards.clone(), Direction::TermToDefinition, seed)?;
                let question = quiz.question().unwrap();
                assert_eq!(question.options.len(), n.min(MAX_OPTIONS));
                let hits = question
                    .options
                    .iter()
                    .filter(|o| **o == question.answer)
                    .count();
                assert_eq!(hits, 1);
            }
        }
        Ok(())
    }

    #[test]
    fn test_correct_answer_position_varies() -> Fallible<()> {
        let mut positions = [false; MAX_OPTIONS];
        for seed in 0..100 {
            let quiz = started(abcd(), Direction::TermToDefinition, seed)?;
            let question = quiz.question().unwrap();
            let pos = question
                .options
                .iter()
                .position(|o| *o == question.answer)
                .unwrap();
            positions[pos] = true;
        }
        assert!(positions.iter().all(|p| *p));
        Ok(())
    }

    #[test]
    fn test_single_card_deck() -> Fallible<()> {
        let mut quiz = started(deck(&[("X", "9")]), Direction::DefinitionToTerm, 3)?;
        let question = quiz.question().unwrap();
        assert_eq!(question.prompt, "9");
        assert_eq!(question.options, vec!["X"]);
        assert_eq!(quiz.answer("X")?, AnswerOutcome::Completed { errors: 0 });
        assert_eq!(quiz.state(), &QuizState::Completed { errors: 0 });
        Ok(())
    }

    #[test]
    fn test_empty_deck_does_not_start() {
        let mut quiz = Quiz::new(Vec::new(), TinyRng::from_seed(0));
        let err = quiz.start(Direction::TermToDefinition).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoCards);
        assert!(matches!(quiz.state(), QuizState::ModeSelection { .. }));
        assert!(quiz.question().is_none());
    }

    #[test]
    fn test_wrong_answer_stays_on_card() -> Fallible<()> {
        let mut quiz = started(abcd(), Direction::TermToDefinition, 4)?;
        let before = quiz.question().unwrap();
        assert_eq!(quiz.answer("2")?, AnswerOutcome::Incorrect);
        assert_eq!(quiz.answer("not an option")?, AnswerOutcome::Incorrect);
        let after = quiz.question().unwrap();
        assert_eq!(before, after);
        assert_eq!(quiz.errors(), 2);
        Ok(())
    }

    #[test]
    fn test_correct_answer_advances() -> Fallible<()> {
        let mut quiz = started(abcd(), Direction::TermToDefinition, 4)?;
        assert_eq!(quiz.answer("1")?, AnswerOutcome::Correct);
        let question = quiz.question().unwrap();
        assert_eq!(question.index, 1);
        assert_eq!(question.prompt, "B");
        assert_eq!(question.answer, "2");
        Ok(())
    }

    #[test]
    fn test_error_count_independent_of_order() -> Fallible<()> {
        let cards = abcd();
        let schedules: [&[usize]; 3] = [&[3, 0, 0, 0], &[0, 0, 0, 3], &[1, 1, 0, 1]];
        for wrong_per_card in schedules {
            let mut quiz = started(cards.clone(), Direction::TermToDefinition, 11)?;
            let mut outcome = AnswerOutcome::Correct;
            for (card, wrong) in cards.iter().zip(wrong_per_card) {
                for _ in 0..*wrong {
                    assert_eq!(quiz.answer("wrong")?, AnswerOutcome::Incorrect);
                }
                outcome = quiz.answer(&card.definition)?;
            }
            assert_eq!(outcome, AnswerOutcome::Completed { errors: 3 });
            assert_eq!(quiz.errors(), 3);
        }
        Ok(())
    }

    #[test]
    fn test_duplicates_of_correct_answer_are_excluded() -> Fallible<()> {
        let cards = deck(&[("A", "same"), ("B", "same"), ("C", "other")]);
        for seed in 0..20 {
            let quiz = started(cards.clone(), Direction::TermToDefinition, seed)?;
            let mut options = quiz.question().unwrap().options;
            options.sort();
            assert_eq!(options, vec!["other", "same"]);
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_distractors_are_kept() -> Fallible<()> {
        let cards = deck(&[("A", "1"), ("B", "dup"), ("C", "dup")]);
        let quiz = started(cards, Direction::TermToDefinition, 0)?;
        let mut options = quiz.question().unwrap().options;
        options.sort();
        assert_eq!(options, vec!["1", "dup", "dup"]);
        Ok(())
    }

    #[test]
    fn test_answer_before_start_is_rejected() {
        let mut quiz = Quiz::new(abcd(), TinyRng::from_seed(0));
        let err = quiz.answer("1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(quiz.errors(), 0);
    }

    #[test]
    fn test_answer_after_completion_is_rejected() -> Fallible<()> {
        let mut quiz = started(deck(&[("X", "9")]), Direction::TermToDefinition, 0)?;
        quiz.answer("9")?;
        assert!(quiz.answer("9").is_err());
        assert!(quiz.start(Direction::TermToDefinition).is_err());
        assert_eq!(quiz.errors(), 0);
        Ok(())
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(
            "definition-to-term".parse::<Direction>(),
            Ok(Direction::DefinitionToTerm)
        );
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::TermToDefinition.prompt_side(), Side::Term);
    }
}
