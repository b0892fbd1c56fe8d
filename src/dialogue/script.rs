//! RON dialogue scripts and the story sessions that play them.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::DialogueError;
use super::story::Story;

/// One spoken line.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptLine {
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
}

/// A choice offered after a knot's lines. A `None` divert ends the story.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptChoice {
    pub text: String,
    #[serde(default)]
    pub divert: Option<String>,
}

/// A named section of a script.
///
/// Lines play in order. Afterwards the player picks one of the `choices`,
/// or, when there are none, the story follows `next` (ending if unset).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Knot {
    #[serde(default)]
    pub lines: Vec<ScriptLine>,
    #[serde(default)]
    pub choices: Vec<ScriptChoice>,
    #[serde(default)]
    pub next: Option<String>,
}

fn default_start() -> String {
    "start".to_string()
}

/// A whole dialogue script as read from `assets/data/dialogue/<id>.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueScript {
    #[serde(default = "default_start")]
    pub start: String,
    pub knots: HashMap<String, Knot>,
}

impl DialogueScript {
    /// Parse and validate a script.
    pub fn from_ron(script_id: &str, contents: &str) -> Result<Self, DialogueError> {
        let script: DialogueScript =
            ron::from_str(contents).map_err(|e| DialogueError::ParseError {
                script: script_id.to_string(),
                details: e.to_string(),
            })?;
        script.validate(script_id)?;
        Ok(script)
    }

    /// Check that the start knot and every divert exist.
    pub fn validate(&self, script_id: &str) -> Result<(), DialogueError> {
        if !self.knots.contains_key(&self.start) {
            return Err(DialogueError::UnknownStartKnot {
                script: script_id.to_string(),
                knot: self.start.clone(),
            });
        }

        for (name, knot) in &self.knots {
            let diverts = knot
                .next
                .iter()
                .chain(knot.choices.iter().filter_map(|c| c.divert.as_ref()));
            for target in diverts {
                if !self.knots.contains_key(target) {
                    return Err(DialogueError::InvalidDivert {
                        script: script_id.to_string(),
                        from: name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Where a story goes from its current position.
enum Cursor<'a> {
    Line { knot: &'a str, index: usize },
    Choices { knot: &'a str },
    End,
}

/// A playthrough of a `DialogueScript`.
#[derive(Debug, Clone)]
pub struct ScriptStory {
    script: Arc<DialogueScript>,
    knot: String,
    next_line: usize,
    current_text: String,
    current_speaker: Option<String>,
    ended: bool,
}

impl ScriptStory {
    pub fn new(script: Arc<DialogueScript>) -> Self {
        let knot = script.start.clone();
        Self {
            script,
            knot,
            next_line: 0,
            current_text: String::new(),
            current_speaker: None,
            ended: false,
        }
    }

    /// Follow `next` diverts through exhausted knots. Bounded by the number
    /// of knots so a loop of empty knots cannot spin forever.
    fn cursor(&self) -> Cursor<'_> {
        if self.ended {
            return Cursor::End;
        }

        let mut name = self.knot.as_str();
        let mut index = self.next_line;
        for _ in 0..=self.script.knots.len() {
            let Some(knot) = self.script.knots.get(name) else {
                return Cursor::End;
            };
            if index < knot.lines.len() {
                return Cursor::Line { knot: name, index };
            }
            if !knot.choices.is_empty() {
                return Cursor::Choices { knot: name };
            }
            let Some(next) = knot.next.as_deref() else {
                return Cursor::End;
            };
            name = next;
            index = 0;
        }

        Cursor::End
    }
}

impl Story for ScriptStory {
    fn can_continue(&self) -> bool {
        matches!(self.cursor(), Cursor::Line { .. })
    }

    fn continue_story(&mut self) -> String {
        let Cursor::Line { knot, index } = self.cursor() else {
            self.current_text.clear();
            self.current_speaker = None;
            return String::new();
        };

        let knot = knot.to_string();
        let line = self.script.knots[&knot].lines[index].clone();

        self.knot = knot;
        self.next_line = index + 1;
        self.current_text = line.text;
        self.current_speaker = line.speaker;
        self.current_text.clone()
    }

    fn current_text(&self) -> &str {
        &self.current_text
    }

    fn current_speaker(&self) -> Option<&str> {
        self.current_speaker.as_deref()
    }

    fn current_choices(&self) -> Vec<String> {
        match self.cursor() {
            Cursor::Choices { knot } => self.script.knots[knot]
                .choices
                .iter()
                .map(|choice| choice.text.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn choose_choice_index(&mut self, index: usize) -> Result<(), DialogueError> {
        let divert = match self.cursor() {
            Cursor::Choices { knot } => {
                let choices = &self.script.knots[knot].choices;
                let choice = choices.get(index).ok_or(DialogueError::ChoiceOutOfRange {
                    index,
                    available: choices.len(),
                })?;
                choice.divert.clone()
            }
            _ => {
                return Err(DialogueError::ChoiceOutOfRange {
                    index,
                    available: 0,
                })
            }
        };

        match divert {
            Some(target) => {
                self.knot = target;
                self.next_line = 0;
            }
            None => self.ended = true,
        }
        Ok(())
    }
}
