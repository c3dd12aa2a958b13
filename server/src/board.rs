//! Board generation: shuffled 25-card grids with the fixed team quota.

use rand::seq::SliceRandom;
use rand::Rng;
use shared::{Card, CardColor, ASSASSIN_CARDS, BLUE_CARDS, GRID_SIZE, NEUTRAL_CARDS, RED_CARDS};
use std::path::Path;

use crate::error::GameError;

const BUILT_IN_WORDS: &str = include_str!("../assets/words.txt");

/// Candidate words boards are drawn from. A bank must hold at least
/// [`GRID_SIZE`] words before it can produce a board.
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// The word list compiled into the binary.
    pub fn built_in() -> Self {
        Self::parse(BUILT_IN_WORDS)
    }

    /// Loads a bank from a file with one word per line. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Builds a bank from an explicit candidate list.
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    fn parse(raw: &str) -> Self {
        let words = raw
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Generates a fresh grid: 25 distinct words drawn without replacement,
/// zipped with a uniformly shuffled multiset of 9 red, 8 blue, 7 neutral
/// and 1 assassin labels. The label permutation is independent of the word
/// draw. Red carries the 9-card quota because red always moves first.
pub fn generate(bank: &WordBank, rng: &mut impl Rng) -> Result<Vec<Card>, GameError> {
    if bank.words.len() < GRID_SIZE {
        return Err(GameError::InsufficientWords {
            available: bank.words.len(),
        });
    }

    let words: Vec<&String> = bank.words.choose_multiple(rng, GRID_SIZE).collect();

    let mut assignments = Vec::with_capacity(GRID_SIZE);
    assignments.extend(std::iter::repeat(CardColor::Red).take(RED_CARDS as usize));
    assignments.extend(std::iter::repeat(CardColor::Blue).take(BLUE_CARDS as usize));
    assignments.extend(std::iter::repeat(CardColor::Neutral).take(NEUTRAL_CARDS as usize));
    assignments.extend(std::iter::repeat(CardColor::Assassin).take(ASSASSIN_CARDS as usize));
    assignments.shuffle(rng);

    Ok(words
        .into_iter()
        .zip(assignments)
        .map(|(word, team)| Card {
            word: word.clone(),
            team,
            revealed: false,
        })
        .collect())
}
