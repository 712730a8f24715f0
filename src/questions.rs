//! True/false question bank
//!
//! Loaded once at startup from a JSON object keyed by level id:
//! `{"1": [{"text": "...", "answer": true}, ...], "2": [...], "3": [...]}`.
//! Shape problems are fatal; an empty level list is not.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Levels every bank file has to provide
pub const REQUIRED_LEVELS: [&str; 3] = ["1", "2", "3"];

#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question bank root must be an object keyed by level")]
    NotAnObject,
    #[error("level {0} not found in question bank")]
    MissingLevel(String),
    #[error("level {0} should contain a list")]
    LevelNotList(String),
    #[error("level {level} entry {index} is malformed: {source}")]
    BadEntry {
        level: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: bool,
}

impl Question {
    /// Canned question used when a level has nothing to ask
    pub fn fallback(level_id: u32) -> Self {
        Self {
            text: format!(
                "Default question for level {}: Distractions reduce productivity.",
                level_id
            ),
            answer: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    levels: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn from_json_str(json: &str) -> Result<Self, QuestionBankError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(mut map) = root else {
            return Err(QuestionBankError::NotAnObject);
        };

        let mut levels = BTreeMap::new();
        for level in REQUIRED_LEVELS {
            let entries = match map.remove(level) {
                Some(Value::Array(entries)) => entries,
                Some(_) => return Err(QuestionBankError::LevelNotList(level.to_string())),
                None => return Err(QuestionBankError::MissingLevel(level.to_string())),
            };
            let questions = entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| {
                    serde_json::from_value::<Question>(entry).map_err(|source| {
                        QuestionBankError::BadEntry {
                            level: level.to_string(),
                            index,
                            source,
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            levels.insert(level.to_string(), questions);
        }

        Ok(Self { levels })
    }

    pub fn load(path: &Path) -> Result<Self, QuestionBankError> {
        let json = std::fs::read_to_string(path).map_err(|source| QuestionBankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} questions from {}",
            bank.total(),
            path.display()
        );
        Ok(bank)
    }

    pub fn total(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn questions(&self, level_id: u32) -> &[Question] {
        self.levels
            .get(&level_id.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Uniform pick for a level. Unknown levels ask level-1 questions; an
    /// empty list yields the canned fallback.
    pub fn pick(&self, level_id: u32, rng: &mut impl Rng) -> Question {
        let level_id = if self.levels.contains_key(&level_id.to_string()) {
            level_id
        } else {
            log::warn!("Level {} not found in questions, using level 1", level_id);
            1
        };

        match self.questions(level_id).choose(rng) {
            Some(q) => q.clone(),
            None => {
                log::warn!("No questions for level {}", level_id);
                Question::fallback(level_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SAMPLE: &str = r#"{
        "1": [{"text": "Checking chat mid-task helps focus.", "answer": false}],
        "2": [{"text": "a", "answer": true}, {"text": "b", "answer": false}],
        "3": []
    }"#;

    #[test]
    fn test_loads_sample() {
        let bank = QuestionBank::from_json_str(SAMPLE).unwrap();
        assert_eq!(bank.total(), 3);
        assert_eq!(bank.questions(2).len(), 2);
    }

    #[test]
    fn test_pick_falls_back_to_level_one() {
        let bank = QuestionBank::from_json_str(SAMPLE).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let q = bank.pick(7, &mut rng);
        assert_eq!(q.text, "Checking chat mid-task helps focus.");
    }

    #[test]
    fn test_empty_level_uses_canned_question() {
        let bank = QuestionBank::from_json_str(SAMPLE).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let q = bank.pick(3, &mut rng);
        assert_eq!(q, Question::fallback(3));
        assert!(q.answer);
    }

    #[test]
    fn test_pick_stays_in_level() {
        let bank = QuestionBank::from_json_str(SAMPLE).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..20 {
            let q = bank.pick(2, &mut rng);
            assert!(q.text == "a" || q.text == "b");
        }
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            QuestionBank::from_json_str("[]"),
            Err(QuestionBankError::NotAnObject)
        ));
        assert!(matches!(
            QuestionBank::from_json_str(r#"{"1": [], "2": []}"#),
            Err(QuestionBankError::MissingLevel(l)) if l == "3"
        ));
        assert!(matches!(
            QuestionBank::from_json_str(r#"{"1": {}, "2": [], "3": []}"#),
            Err(QuestionBankError::LevelNotList(l)) if l == "1"
        ));
        assert!(matches!(
            QuestionBank::from_json_str(r#"{"1": [{"text": 3}], "2": [], "3": []}"#),
            Err(QuestionBankError::BadEntry { index: 0, .. })
        ));
        assert!(matches!(
            QuestionBank::from_json_str("{"),
            Err(QuestionBankError::Parse(_))
        ));
    }

    #[test]
    fn test_shipped_bank_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/questions.json");
        let bank = QuestionBank::load(&path).unwrap();
        for level in 1..=3 {
            assert!(!bank.questions(level).is_empty());
        }
    }
}
