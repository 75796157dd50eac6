//! Question definitions and the answer interpreter.
//!
//! Questions are loaded once at startup from a YAML file (or the built-in
//! set) and drive both the interactive prompt and per-answer validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{JournalError, Result};

/// Value kind a question produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Int,
    Text,
}

impl QuestionKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "int" => Ok(Self::Int),
            "text" => Ok(Self::Text),
            other => Err(JournalError::UnsupportedKind(other.to_string())),
        }
    }
}

/// A single field definition: how to prompt for it and how to validate the
/// raw answer. Immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Field name in the journal entry ("mood", "note", etc.).
    pub field: String,
    /// Prompt text shown to the user.
    pub text: String,
    pub kind: QuestionKind,
    pub required: bool,
    /// Inclusive numeric bounds, int questions only.
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Minimum trimmed length, text questions only.
    pub min_length: Option<usize>,
}

/// Raw YAML shape. The kind stays a string here so a bad literal is reported
/// as the literal itself rather than a generic enum error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuestion {
    id: String,
    field: String,
    text: String,
    #[serde(alias = "type")]
    kind: String,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
    #[serde(default)]
    min_length: Option<usize>,
}

fn default_required() -> bool {
    true
}

impl TryFrom<RawQuestion> for Question {
    type Error = JournalError;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        let kind = QuestionKind::parse(&raw.kind)?;
        Ok(Self {
            id: raw.id,
            field: raw.field,
            text: raw.text,
            kind,
            required: raw.required,
            min: raw.min,
            max: raw.max,
            min_length: raw.min_length,
        })
    }
}

/// Load question definitions from a YAML file.
///
/// Malformed definitions (missing fields, unknown keys, bad kind literals)
/// fail here, before any interaction begins.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let contents = std::fs::read_to_string(path)?;
    let raw: Vec<RawQuestion> = serde_yaml::from_str(&contents)
        .map_err(|e| JournalError::Config(format!("{}: {}", path.display(), e)))?;
    raw.into_iter().map(Question::try_from).collect()
}

/// The built-in question set, used when no questions file is configured.
pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question {
            id: "mood".into(),
            field: "mood".into(),
            text: "How is your mood today? (1-10)".into(),
            kind: QuestionKind::Int,
            required: true,
            min: Some(1),
            max: Some(10),
            min_length: None,
        },
        Question {
            id: "energy".into(),
            field: "energy".into(),
            text: "How is your energy? (1-10, enter to skip)".into(),
            kind: QuestionKind::Int,
            required: false,
            min: Some(1),
            max: Some(10),
            min_length: None,
        },
        Question {
            id: "note".into(),
            field: "note".into(),
            text: "Anything worth noting? (enter to skip)".into(),
            kind: QuestionKind::Text,
            required: false,
            min: None,
            max: None,
            min_length: None,
        },
        Question {
            id: "tags".into(),
            field: "tags".into(),
            text: "Tags, comma separated (enter to skip)".into(),
            kind: QuestionKind::Text,
            required: false,
            min: None,
            max: None,
            min_length: None,
        },
    ]
}

/// A typed, validated answer. Absence is modelled as `None` by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Int(i64),
    Text(String),
}

/// Interpret one raw answer under a question's rules.
///
/// Pure function of (question, raw). An empty answer to an optional question
/// and a blank text answer both resolve to `Ok(None)`; the prompt loop is
/// responsible for re-asking required questions that resolve to no value.
pub fn interpret(question: &Question, raw: &str) -> Result<Option<Answer>> {
    if raw.is_empty() && !question.required {
        return Ok(None);
    }

    match question.kind {
        QuestionKind::Int => {
            let value: i64 = raw
                .trim()
                .parse()
                .map_err(|_| JournalError::InvalidFormat("must be an integer".into()))?;
            if let Some(min) = question.min {
                if value < min {
                    return Err(JournalError::OutOfRange(format!("must be >= {}", min)));
                }
            }
            if let Some(max) = question.max {
                if value > max {
                    return Err(JournalError::OutOfRange(format!("must be <= {}", max)));
                }
            }
            Ok(Some(Answer::Int(value)))
        }
        QuestionKind::Text => {
            let value = raw.trim();
            if let Some(min_length) = question.min_length {
                if value.chars().count() < min_length {
                    return Err(JournalError::TooShort(format!(
                        "must be at least {} characters",
                        min_length
                    )));
                }
            }
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Answer::Text(value.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_question(min: Option<i64>, max: Option<i64>, required: bool) -> Question {
        Question {
            id: "mood".into(),
            field: "mood".into(),
            text: "Mood?".into(),
            kind: QuestionKind::Int,
            required,
            min,
            max,
            min_length: None,
        }
    }

    fn text_question(min_length: Option<usize>, required: bool) -> Question {
        Question {
            id: "note".into(),
            field: "note".into(),
            text: "Note?".into(),
            kind: QuestionKind::Text,
            required,
            min: None,
            max: None,
            min_length,
        }
    }

    #[test]
    fn test_int_in_bounds() {
        let q = int_question(Some(1), Some(10), true);
        assert_eq!(interpret(&q, "7").unwrap(), Some(Answer::Int(7)));
        assert_eq!(interpret(&q, "1").unwrap(), Some(Answer::Int(1)));
        assert_eq!(interpret(&q, "10").unwrap(), Some(Answer::Int(10)));
    }

    #[test]
    fn test_int_out_of_range() {
        let q = int_question(Some(1), Some(10), true);
        assert!(matches!(
            interpret(&q, "11").unwrap_err(),
            JournalError::OutOfRange(_)
        ));
        assert!(matches!(
            interpret(&q, "0").unwrap_err(),
            JournalError::OutOfRange(_)
        ));
    }

    #[test]
    fn test_int_invalid_format() {
        let q = int_question(Some(1), Some(10), true);
        assert!(matches!(
            interpret(&q, "abc").unwrap_err(),
            JournalError::InvalidFormat(_)
        ));
        // Required question left blank also fails the parse.
        assert!(matches!(
            interpret(&q, "").unwrap_err(),
            JournalError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_int_one_sided_bounds() {
        let q = int_question(Some(0), None, true);
        assert_eq!(interpret(&q, "9999").unwrap(), Some(Answer::Int(9999)));
        assert!(matches!(
            interpret(&q, "-1").unwrap_err(),
            JournalError::OutOfRange(_)
        ));
    }

    #[test]
    fn test_optional_int_blank_is_absent() {
        let q = int_question(Some(1), Some(10), false);
        assert_eq!(interpret(&q, "").unwrap(), None);
    }

    #[test]
    fn test_text_trims() {
        let q = text_question(None, false);
        assert_eq!(
            interpret(&q, "  fine, actually  ").unwrap(),
            Some(Answer::Text("fine, actually".into()))
        );
    }

    #[test]
    fn test_text_too_short() {
        let q = text_question(Some(5), true);
        assert!(matches!(
            interpret(&q, "hey").unwrap_err(),
            JournalError::TooShort(_)
        ));
        assert_eq!(
            interpret(&q, "hey there").unwrap(),
            Some(Answer::Text("hey there".into()))
        );
    }

    #[test]
    fn test_blank_text_is_absent_even_when_required() {
        // The interpreter treats whitespace-only text as unset; the prompt
        // loop re-asks required questions that resolve to no value.
        let q = text_question(None, true);
        assert_eq!(interpret(&q, "   ").unwrap(), None);
    }

    #[test]
    fn test_load_questions_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.yml");
        std::fs::write(
            &path,
            r#"
- id: mood
  field: mood
  text: "Mood (1-10)?"
  kind: int
  min: 1
  max: 10
- id: note
  field: note
  type: text
  text: "Note?"
  required: false
"#,
        )
        .unwrap();

        let questions = load_questions(&path).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].kind, QuestionKind::Int);
        assert_eq!(questions[0].min, Some(1));
        assert!(questions[0].required); // defaults to true
        assert_eq!(questions[1].kind, QuestionKind::Text);
        assert!(!questions[1].required);
    }

    #[test]
    fn test_unknown_kind_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.yml");
        std::fs::write(
            &path,
            "- id: ok\n  field: ok\n  text: \"Ok?\"\n  kind: bool\n",
        )
        .unwrap();

        let err = load_questions(&path).unwrap_err();
        match err {
            JournalError::UnsupportedKind(kind) => assert_eq!(kind, "bool"),
            other => panic!("expected UnsupportedKind, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.yml");
        std::fs::write(&path, "- id: mood\n  kind: int\n").unwrap();

        assert!(matches!(
            load_questions(&path).unwrap_err(),
            JournalError::Config(_)
        ));
    }

    #[test]
    fn test_builtin_questions_are_well_formed() {
        let questions = builtin_questions();
        assert_eq!(questions.len(), 4);
        assert!(questions.iter().any(|q| q.field == "mood" && q.required));
        assert!(questions
            .iter()
            .filter(|q| q.field != "mood")
            .all(|q| !q.required));
    }
}
