use std::sync::Arc;

use super::ContentError;

/// One odd-one-out question: candidate items, the odd item and why.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Question {
    items: Vec<String>,
    odd: usize,
    rationale: String,
}

impl Question {
    /// Builds a question, checking that `odd` appears exactly once in `items`.
    ///
    /// `number` is only used to label validation errors.
    pub fn new<I, S>(
        number: usize,
        items: I,
        odd: &str,
        rationale: impl Into<String>,
    ) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.len() < 2 {
            return Err(ContentError::TooFewItems {
                question: number,
                items: items.len(),
            });
        }

        let count = items.iter().filter(|item| *item == odd).count();
        match count {
            0 => Err(ContentError::OddItemMissing {
                question: number,
                odd: odd.to_owned(),
            }),
            1 => {
                let odd = items.iter().position(|item| item == odd).unwrap_or(0);
                Ok(Self {
                    items,
                    odd,
                    rationale: rationale.into(),
                })
            }
            count => Err(ContentError::OddItemAmbiguous {
                question: number,
                odd: odd.to_owned(),
                count,
            }),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn odd_index(&self) -> usize {
        self.odd
    }

    pub fn odd_item(&self) -> &str {
        &self.items[self.odd]
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn position_of(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }
}

/// Immutable, pre-ordered list of questions shared between engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::EmptyBank);
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_the_odd_item() {
        let q = Question::new(
            1,
            ["🍎", "🍌", "🍇", "🚗"],
            "🚗",
            "Car is a vehicle, others are fruits.",
        )
        .unwrap();
        assert_eq!(q.odd_index(), 3);
        assert_eq!(q.odd_item(), "🚗");
        assert_eq!(q.position_of("🍌"), Some(1));
    }

    #[test]
    fn rejects_malformed_questions() {
        assert!(matches!(
            Question::new(1, ["a"], "a", ""),
            Err(ContentError::TooFewItems { items: 1, .. })
        ));
        assert!(matches!(
            Question::new(2, ["a", "b"], "c", ""),
            Err(ContentError::OddItemMissing { question: 2, .. })
        ));
        assert!(matches!(
            Question::new(3, ["a", "b", "b"], "b", ""),
            Err(ContentError::OddItemAmbiguous { count: 2, .. })
        ));
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert_eq!(QuestionBank::new(Vec::new()), Err(ContentError::EmptyBank));
    }
}
