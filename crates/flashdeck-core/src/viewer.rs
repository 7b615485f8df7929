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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::Side;

/// Flip-card browsing over a card list: one card at a time, front first.
#[derive(Clone, Debug)]
pub struct Viewer {
    cards: Vec<Card>,
    index: usize,
    revealed: bool,
    front: Side,
}

impl Viewer {
    pub fn new(cards: Vec<Card>, front: Side) -> Fallible<Self> {
        if cards.is_empty() {
            return Err(ErrorReport::no_cards());
        }
        Ok(Self {
            cards,
            index: 0,
            revealed: false,
            front,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn front_side(&self) -> Side {
        self.front
    }

    pub fn current(&self) -> &Card {
        &self.cards[self.index]
    }

    pub fn front(&self) -> &str {
        self.current().side(self.front)
    }

    pub fn back(&self) -> &str {
        self.current().side(self.front.opposite())
    }

    /// The face currently showing.
    pub fn visible(&self) -> &str {
        if self.revealed { self.back() } else { self.front() }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.cards.len();
        self.revealed = false;
    }

    pub fn previous(&mut self) {
        self.index = if self.index == 0 {
            self.cards.len() - 1
        } else {
            self.index - 1
        };
        self.revealed = false;
    }

    pub fn toggle(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Swap which side is shown first.
    pub fn set_front_side(&mut self, side: Side) {
        self.front = side;
        self.revealed = false;
    }
}
