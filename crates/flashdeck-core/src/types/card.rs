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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub term: String,
    pub definition: String,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    pub fn side(&self, side: Side) -> &str {
        match side {
            Side::Term => &self.term,
            Side::Definition => &self.definition,
        }
    }
}

/// One of the two faces of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Term,
    Definition,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Term => Side::Definition,
            Side::Definition => Side::Term,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Term => "term",
            Side::Definition => "definition",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "term" => Ok(Side::Term),
            "definition" => Ok(Side::Definition),
            _ => Err(ErrorReport::new(format!("invalid card side: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_lookup() {
        let card = Card::new("A", "1");
        assert_eq!(card.side(Side::Term), "A");
        assert_eq!(card.side(Side::Definition), "1");
        assert_eq!(Side::Term.opposite(), Side::Definition);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("definition".parse::<Side>(), Ok(Side::Definition));
        assert_eq!(Side::Term.to_string().parse::<Side>(), Ok(Side::Term));
        assert!("front".parse::<Side>().is_err());
    }
}
