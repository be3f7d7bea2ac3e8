//! Content banks: static data the games draw from
//!
//! Phrases for the reflex wait, symbol patterns for recall, riddles for the
//! puzzle stage. Built-in banks ship with the crate; replacements can be
//! loaded from JSON or YAML and are validated before use.

use std::collections::HashSet;

use mc_core::{ArcadeError, ArcadeResult};
use serde::{Deserialize, Serialize};

/// A single displayable symbol (usually an emoji)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of distinct symbols shown together in one recall round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolPattern(pub Vec<Symbol>);

impl SymbolPattern {
    pub fn new(symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Self {
        Self(symbols.into_iter().map(Into::into).collect())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One answer option of a riddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl Answer {
    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: true,
        }
    }

    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }
}

/// Multiple-choice riddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub prompt: String,
    pub answers: Vec<Answer>,
    /// Shown after a correct answer
    #[serde(default)]
    pub insight: String,
}

impl Riddle {
    /// Index of the first correct answer
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.correct)
    }
}

/// All static content used by the controllers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBanks {
    /// Shown while the reflex stage waits for its cue
    pub phrases: Vec<String>,
    /// Recall line-ups
    pub patterns: Vec<SymbolPattern>,
    /// Puzzle riddles
    pub riddles: Vec<Riddle>,
}

impl ContentBanks {
    /// The built-in Mind Circus banks
    pub fn mind_circus() -> Self {
        Self {
            phrases: vec![
                "Wait for the banana to shout \"GO!\" 🍌".into(),
                "Hold still. The neurons are stretching. 🧠".into(),
                "Patience, padawan of giggles… 😌".into(),
                "Shhh… comedy elves are loading punchlines. 🤫".into(),
            ],
            patterns: vec![
                SymbolPattern::new(["🤡", "🥦", "🪴", "🦄"]),
                SymbolPattern::new(["🐙", "🍉", "🪩", "🧠"]),
                SymbolPattern::new(["🦖", "🍕", "🚀", "🧃"]),
                SymbolPattern::new(["🎈", "🛼", "🫧", "🛸"]),
                SymbolPattern::new(["🐼", "🍩", "🧠", "🧊"]),
            ],
            riddles: vec![
                Riddle {
                    prompt: "Which brain buddy keeps calm under pressure?".into(),
                    answers: vec![
                        Answer::right("Zen the Alpaca doing yoga"),
                        Answer::wrong("Larry the latte after 5 shots"),
                        Answer::wrong("Captain Crunchy Snack on a sugar rush"),
                    ],
                    insight: "Deep breaths calm the amygdala. Stress shrinks when silliness \
                              meets mindfulness."
                        .into(),
                },
                Riddle {
                    prompt: "Pick the combo that supercharges memory the most:".into(),
                    answers: vec![
                        Answer::right("Sleep + laughter breaks"),
                        Answer::wrong("Doomscrolling + spicy chips"),
                        Answer::wrong("Three coffees + dramatic sighs"),
                    ],
                    insight: "REM sleep consolidates learning, and laughter lowers cortisol. \
                              Science says giggle-nap!"
                        .into(),
                },
                Riddle {
                    prompt: "What is the brain’s favorite playground warm-up?".into(),
                    answers: vec![
                        Answer::right("Juggling ideas & doodling plans"),
                        Answer::wrong("Reading the fridge magnets"),
                        Answer::wrong("Moodily staring at socks"),
                    ],
                    insight: "Creativity exercises ignite the prefrontal cortex and make \
                              problem-solving smoother."
                        .into(),
                },
            ],
        }
    }

    /// Builder: replace the pattern bank
    pub fn with_patterns(mut self, patterns: Vec<SymbolPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Builder: replace the riddle bank
    pub fn with_riddles(mut self, riddles: Vec<Riddle>) -> Self {
        self.riddles = riddles;
        self
    }

    /// Check that every bank is usable by its controller
    pub fn validate(&self) -> ArcadeResult<()> {
        if self.phrases.is_empty() {
            return Err(ArcadeError::InvalidContent("phrase bank is empty".into()));
        }
        if self.patterns.is_empty() {
            return Err(ArcadeError::InvalidContent("pattern bank is empty".into()));
        }
        for (i, pattern) in self.patterns.iter().enumerate() {
            if pattern.len() < 2 {
                return Err(ArcadeError::InvalidContent(format!(
                    "pattern {} needs at least two symbols",
                    i
                )));
            }
            // Removal is by identity, so duplicates would vanish together
            let distinct: HashSet<_> = pattern.symbols().iter().collect();
            if distinct.len() != pattern.len() {
                return Err(ArcadeError::InvalidContent(format!(
                    "pattern {} repeats a symbol",
                    i
                )));
            }
        }
        if self.riddles.is_empty() {
            return Err(ArcadeError::InvalidContent("riddle bank is empty".into()));
        }
        for riddle in &self.riddles {
            if riddle.correct_index().is_none() {
                return Err(ArcadeError::InvalidContent(format!(
                    "riddle has no correct answer: {}",
                    riddle.prompt
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate JSON
    pub fn from_json(json: &str) -> ArcadeResult<Self> {
        let banks: Self =
            serde_json::from_str(json).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        banks.validate()?;
        Ok(banks)
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> ArcadeResult<Self> {
        let banks: Self =
            serde_yml::from_str(yaml).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        banks.validate()?;
        Ok(banks)
    }
}

impl Default for ContentBanks {
    fn default() -> Self {
        Self::mind_circus()
    }
}
