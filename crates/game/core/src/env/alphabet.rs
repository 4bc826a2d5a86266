use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::ContentError;

/// Index of a symbol inside an [`Alphabet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(pub u16);

impl Symbol {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed, ordered set of symbols a game draws from.
///
/// Engines only ever see [`Symbol`] indices; labels exist for presentation
/// and for resolving typed input back to a symbol. Cloning is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    labels: Arc<[String]>,
}

impl Alphabet {
    pub const MAX_SYMBOLS: usize = u16::MAX as usize;

    pub fn new<I, S>(labels: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ContentError::EmptyAlphabet);
        }
        if labels.len() > Self::MAX_SYMBOLS {
            return Err(ContentError::AlphabetTooLarge {
                len: labels.len(),
                max: Self::MAX_SYMBOLS,
            });
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ContentError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self {
            labels: labels.into(),
        })
    }

    /// Alphabet labelled `0..len` (digits, grid positions).
    pub fn numbered(len: u16) -> Result<Self, ContentError> {
        Self::new((0..len).map(|i| i.to_string()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.index() < self.labels.len()
    }

    pub fn label(&self, symbol: Symbol) -> Option<&str> {
        self.labels.get(symbol.index()).map(String::as_str)
    }

    /// Resolves a label back to its symbol.
    pub fn symbol_of(&self, label: &str) -> Option<Symbol> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| Symbol(i as u16))
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.labels.len()).map(|i| Symbol(i as u16))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
