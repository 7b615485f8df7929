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

//! Required-field checks run before anything is sent to the backend.

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::flashcard_set::NewFlashcardSet;
use crate::types::user::RegistrationForm;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn require(fields: &[(&str, &str)]) -> Fallible<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| blank(value))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ErrorReport::validation(format!(
            "Required fields are missing: {}",
            missing.join(", ")
        )))
    }
}

pub fn validate_credentials(login: &str, password: &str) -> Fallible<()> {
    require(&[("login", login), ("password", password)])
}

pub fn validate_registration(form: &RegistrationForm) -> Fallible<()> {
    require(&[
        ("name", form.name.as_str()),
        ("surname", form.surname.as_str()),
        ("login", form.login.as_str()),
        ("password", form.password.as_str()),
    ])
}

pub fn validate_new_set(set: &NewFlashcardSet) -> Fallible<()> {
    if blank(&set.name) {
        return Err(ErrorReport::validation("Enter a name for the set"));
    }
    if set.cards.is_empty()
        || set
            .cards
            .iter()
            .any(|card| blank(&card.term) || blank(&card.definition))
    {
        return Err(ErrorReport::validation(
            "Every card needs a term and a definition",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::card::Card;

    fn set(name: &str, cards: Vec<Card>) -> NewFlashcardSet {
        NewFlashcardSet {
            name: name.to_string(),
            description: String::new(),
            cards,
            user_id: 1,
        }
    }

    #[test]
    fn test_credentials() {
        assert!(validate_credentials("ann", "secret").is_ok());
        let err = validate_credentials(" ", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(err.message(), "Required fields are missing: login, password");
    }

    #[test]
    fn test_registration_names_missing_fields() {
        let form = RegistrationForm {
            name: "Ann".to_string(),
            surname: String::new(),
            login: "ann".to_string(),
            password: "  ".to_string(),
        };
        let err = validate_registration(&form).unwrap_err();
        assert_eq!(err.message(), "Required fields are missing: surname, password");
    }

    #[test]
    fn test_new_set() {
        assert!(validate_new_set(&set("Capitals", vec![Card::new("France", "Paris")])).is_ok());
        assert_eq!(
            validate_new_set(&set(" ", vec![Card::new("a", "b")]))
                .unwrap_err()
                .message(),
            "Enter a name for the set"
        );
        assert!(validate_new_set(&set("Empty", vec![])).is_err());
        assert!(validate_new_set(&set("Half", vec![Card::new("a", " ")])).is_err());
    }
}
