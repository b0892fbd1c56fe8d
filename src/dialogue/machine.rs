//! Dialogue progression state machine.
//!
//! Owns one story session at a time and the typing scheduler revealing its
//! current line. Everything here is plain data driven by method calls; the
//! Bevy side lives in `plugin.rs`.

use bevy::prelude::*;

use super::error::DialogueError;
use super::story::{Story, StorySource};
use super::typing::{TypingScheduler, TypingStep};

/// Where the conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueState {
    /// No conversation. Panel hidden, nothing displayed.
    Idle,
    /// The current line is being revealed.
    Typing,
    /// The whole line is shown; the next advance moves the story on.
    AwaitingAdvance,
    /// The whole line is shown and the story waits for a choice.
    AwaitingChoice,
}

/// What a call to `enter` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// The first line started typing.
    Started,
    /// A conversation was already running; nothing changed.
    AlreadyActive,
    /// The machine was disabled at startup; nothing changed.
    Disabled,
    /// The script had no content, so the conversation closed again at once.
    Ended,
    /// The script opens straight onto a choice.
    AwaitingChoice,
}

/// What a call to `advance` or `choose` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Nothing to do (idle, disabled, or still typing for `choose`).
    Ignored,
    /// The line was typing and is now fully shown.
    SkippedToEnd,
    /// The next line started typing.
    NextLine,
    /// The story waits for a choice.
    AwaitingChoice,
    /// The story ran out; the conversation is closed.
    Ended,
}

/// What one frame of typing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No line is typing.
    Idle,
    Waiting,
    Revealed(char),
    /// The line finished typing this frame.
    LineComplete,
}

/// Identity of one conversation, fresh on every successful `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// A running conversation.
#[derive(Debug)]
pub struct DialogueSession<S> {
    id: SessionId,
    script_id: String,
    story: S,
}

impl<S> DialogueSession<S> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn script_id(&self) -> &str {
        &self.script_id
    }
}

/// Drives a story line by line with a typewriter reveal.
#[derive(Resource, Debug)]
pub struct DialogueMachine<S> {
    session: Option<DialogueSession<S>>,
    typing: TypingScheduler,
    char_interval: f32,
    disabled: bool,
    next_session: u64,
}

impl<S: Story> DialogueMachine<S> {
    pub fn new(char_interval: f32) -> Self {
        Self {
            session: None,
            typing: TypingScheduler::default(),
            char_interval,
            disabled: false,
            next_session: 0,
        }
    }

    /// Seconds between revealed characters for lines started from now on.
    pub fn set_char_interval(&mut self, char_interval: f32) {
        self.char_interval = char_interval;
    }

    pub fn char_interval(&self) -> f32 {
        self.char_interval
    }

    /// Start a conversation from `script_id`.
    ///
    /// A resolution failure is returned without touching any state.
    pub fn enter<L>(&mut self, script_id: &str, source: &L) -> Result<EnterOutcome, DialogueError>
    where
        L: StorySource<Story = S>,
    {
        if self.disabled {
            return Ok(EnterOutcome::Disabled);
        }
        if self.session.is_some() {
            return Ok(EnterOutcome::AlreadyActive);
        }

        let story = source.resolve(script_id)?;
        let id = SessionId(self.next_session);
        self.next_session += 1;
        self.session = Some(DialogueSession {
            id,
            script_id: script_id.to_string(),
            story,
        });
        self.typing.clear();

        Ok(match self.continue_story() {
            AdvanceOutcome::Ended => EnterOutcome::Ended,
            AdvanceOutcome::AwaitingChoice => EnterOutcome::AwaitingChoice,
            _ => EnterOutcome::Started,
        })
    }

    /// The player asked to move on.
    ///
    /// While typing this only finishes the current line; otherwise the story
    /// continues, waits for a choice, or ends.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let Some(session) = self.session.as_ref() else {
            return AdvanceOutcome::Ignored;
        };

        if let Some(handle) = self.typing.active_handle() {
            let full_text = session.story.current_text().to_string();
            self.typing.complete_immediately(handle, &full_text);
            return AdvanceOutcome::SkippedToEnd;
        }

        self.continue_story()
    }

    /// Pick one of the offered choices and continue with it.
    pub fn choose(&mut self, index: usize) -> Result<AdvanceOutcome, DialogueError> {
        if self.typing.is_typing() {
            return Ok(AdvanceOutcome::Ignored);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(AdvanceOutcome::Ignored);
        };

        session.story.choose_choice_index(index)?;
        Ok(self.continue_story())
    }

    /// Drive the typing scheduler for one frame.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        match self.typing.step(dt) {
            None => TickOutcome::Idle,
            Some(TypingStep::Waiting) => TickOutcome::Waiting,
            Some(TypingStep::Revealed(letter)) => TickOutcome::Revealed(letter),
            Some(TypingStep::Finished) => TickOutcome::LineComplete,
        }
    }

    /// Close the conversation and clear the display. Returns the script id
    /// of the session that was closed.
    pub fn exit(&mut self) -> Option<String> {
        self.typing.clear();
        self.session.take().map(|session| session.script_id)
    }

    fn continue_story(&mut self) -> AdvanceOutcome {
        let Some(session) = self.session.as_mut() else {
            return AdvanceOutcome::Ignored;
        };

        if let Some(handle) = self.typing.active_handle() {
            self.typing.cancel(handle);
        }

        if session.story.can_continue() {
            let line = session.story.continue_story();
            self.typing.start_typing(&line, self.char_interval);
            AdvanceOutcome::NextLine
        } else if !session.story.current_choices().is_empty() {
            AdvanceOutcome::AwaitingChoice
        } else {
            self.exit();
            AdvanceOutcome::Ended
        }
    }

    /// Stop accepting conversations, e.g. when the dialogue UI is missing.
    pub fn disable(&mut self) {
        self.exit();
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> DialogueState {
        match &self.session {
            None => DialogueState::Idle,
            Some(_) if self.typing.is_typing() => DialogueState::Typing,
            Some(session) if !session.story.current_choices().is_empty() => {
                DialogueState::AwaitingChoice
            }
            Some(_) => DialogueState::AwaitingAdvance,
        }
    }

    /// The panel is shown exactly while a conversation runs.
    pub fn panel_visible(&self) -> bool {
        self.is_active()
    }

    pub fn displayed_text(&self) -> &str {
        self.typing.displayed()
    }

    /// Full text of the line being shown, including what has not been
    /// revealed yet.
    pub fn pending_full_text(&self) -> &str {
        self.session
            .as_ref()
            .map_or("", |session| session.story.current_text())
    }

    pub fn current_speaker(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.story.current_speaker())
    }

    /// Choices to show. Empty while the line is still typing.
    pub fn current_choices(&self) -> Vec<String> {
        match &self.session {
            Some(session) if !self.typing.is_typing() => session.story.current_choices(),
            _ => Vec::new(),
        }
    }

    pub fn session(&self) -> Option<&DialogueSession<S>> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Linear story over fixed lines, with optional choices at the end.
    #[derive(Debug, Clone, Default)]
    struct LineStory {
        lines: Vec<String>,
        next: usize,
        current: String,
        choices: Vec<String>,
        after_choice: Vec<String>,
    }

    impl LineStory {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                ..Default::default()
            }
        }

        fn with_choices(mut self, choices: &[&str], after_choice: &[&str]) -> Self {
            self.choices = choices.iter().map(|c| c.to_string()).collect();
            self.after_choice = after_choice.iter().map(|l| l.to_string()).collect();
            self
        }
    }

    impl Story for LineStory {
        fn can_continue(&self) -> bool {
            self.next < self.lines.len()
        }

        fn continue_story(&mut self) -> String {
            self.current = self.lines.get(self.next).cloned().unwrap_or_default();
            self.next += 1;
            self.current.clone()
        }

        fn current_text(&self) -> &str {
            &self.current
        }

        fn current_choices(&self) -> Vec<String> {
            if self.can_continue() {
                Vec::new()
            } else {
                self.choices.clone()
            }
        }

        fn choose_choice_index(&mut self, index: usize) -> Result<(), DialogueError> {
            if index >= self.current_choices().len() {
                return Err(DialogueError::ChoiceOutOfRange {
                    index,
                    available: self.current_choices().len(),
                });
            }
            self.choices.clear();
            self.lines.append(&mut self.after_choice);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Library(HashMap<String, LineStory>);

    impl Library {
        fn with(mut self, id: &str, story: LineStory) -> Self {
            self.0.insert(id.to_string(), story);
            self
        }
    }

    impl StorySource for Library {
        type Story = LineStory;

        fn resolve(&self, script_id: &str) -> Result<LineStory, DialogueError> {
            self.0
                .get(script_id)
                .cloned()
                .ok_or_else(|| DialogueError::ScriptNotFound(script_id.to_string()))
        }
    }

    fn type_out(machine: &mut DialogueMachine<LineStory>) {
        for _ in 0..100 {
            if machine.tick(machine.char_interval()) == TickOutcome::LineComplete {
                return;
            }
        }
        panic!("line never finished typing");
    }

    #[test]
    fn enter_starts_typing_the_first_line() {
        let library = Library::default().with("a", LineStory::new(&["hi", "bye"]));
        let mut machine = DialogueMachine::new(0.05);

        assert_eq!(machine.enter("a", &library), Ok(EnterOutcome::Started));
        assert_eq!(machine.state(), DialogueState::Typing);
        assert!(machine.panel_visible());
        assert_eq!(machine.displayed_text(), "");
        assert_eq!(machine.pending_full_text(), "hi");

        assert_eq!(machine.tick(0.0), TickOutcome::Revealed('h'));
        assert_eq!(machine.tick(0.05), TickOutcome::Revealed('i'));
        assert_eq!(machine.displayed_text(), "hi");
        assert_eq!(machine.tick(0.05), TickOutcome::LineComplete);
        assert_eq!(machine.state(), DialogueState::AwaitingAdvance);
    }

    #[test]
    fn advance_while_typing_only_finishes_the_line() {
        let library = Library::default().with("a", LineStory::new(&["hello", "bye"]));
        let mut machine = DialogueMachine::new(0.05);
        machine.enter("a", &library).unwrap();
        machine.tick(0.0);

        assert_eq!(machine.advance(), AdvanceOutcome::SkippedToEnd);
        assert_eq!(machine.displayed_text(), "hello");
        assert_eq!(machine.state(), DialogueState::AwaitingAdvance);
        assert_eq!(machine.tick(0.05), TickOutcome::Idle);

        assert_eq!(machine.advance(), AdvanceOutcome::NextLine);
        assert_eq!(machine.pending_full_text(), "bye");
        assert_eq!(machine.displayed_text(), "");
    }

    #[test]
    fn running_out_of_story_returns_to_idle() {
        let library = Library::default().with("a", LineStory::new(&["only"]));
        let mut machine = DialogueMachine::new(0.05);
        machine.enter("a", &library).unwrap();
        type_out(&mut machine);

        assert_eq!(machine.advance(), AdvanceOutcome::Ended);
        assert_eq!(machine.state(), DialogueState::Idle);
        assert!(!machine.is_active());
        assert!(!machine.panel_visible());
        assert_eq!(machine.displayed_text(), "");
        assert_eq!(machine.advance(), AdvanceOutcome::Ignored);
    }

    #[test]
    fn enter_while_active_changes_nothing() {
        let library = Library::default()
            .with("a", LineStory::new(&["first line"]))
            .with("b", LineStory::new(&["other"]));
        let mut machine = DialogueMachine::new(0.05);
        machine.enter("a", &library).unwrap();
        machine.tick(0.0);

        let session = machine.session().map(DialogueSession::id);
        let shown = machine.displayed_text().to_string();
        let state = machine.state();

        assert_eq!(machine.enter("b", &library), Ok(EnterOutcome::AlreadyActive));
        assert_eq!(machine.session().map(DialogueSession::id), session);
        assert_eq!(machine.displayed_text(), shown);
        assert_eq!(machine.state(), state);
        assert_eq!(machine.session().map(DialogueSession::script_id), Some("a"));
    }

    #[test]
    fn unknown_script_leaves_state_unchanged() {
        let library = Library::default();
        let mut machine: DialogueMachine<LineStory> = DialogueMachine::new(0.05);

        assert_eq!(
            machine.enter("missing", &library),
            Err(DialogueError::ScriptNotFound("missing".to_string()))
        );
        assert_eq!(machine.state(), DialogueState::Idle);
        assert!(machine.session().is_none());
    }

    #[test]
    fn empty_script_closes_immediately() {
        let library = Library::default().with("empty", LineStory::new(&[]));
        let mut machine = DialogueMachine::new(0.05);

        assert_eq!(machine.enter("empty", &library), Ok(EnterOutcome::Ended));
        assert!(!machine.is_active());
    }

    #[test]
    fn choices_wait_for_a_pick() {
        let story = LineStory::new(&["question?"]).with_choices(&["yes", "no"], &["answer"]);
        let library = Library::default().with("q", story);
        let mut machine = DialogueMachine::new(0.05);
        machine.enter("q", &library).unwrap();
        assert!(machine.current_choices().is_empty(), "hidden while typing");
        assert_eq!(machine.choose(0), Ok(AdvanceOutcome::Ignored));

        type_out(&mut machine);
        assert_eq!(machine.state(), DialogueState::AwaitingChoice);
        assert_eq!(machine.current_choices(), vec!["yes", "no"]);
        assert_eq!(machine.advance(), AdvanceOutcome::AwaitingChoice);

        assert!(matches!(
            machine.choose(7),
            Err(DialogueError::ChoiceOutOfRange { index: 7, .. })
        ));
        assert_eq!(machine.state(), DialogueState::AwaitingChoice);

        assert_eq!(machine.choose(1), Ok(AdvanceOutcome::NextLine));
        assert_eq!(machine.pending_full_text(), "answer");
        assert_eq!(machine.state(), DialogueState::Typing);
    }

    #[test]
    fn disabled_machine_is_inert() {
        let library = Library::default().with("a", LineStory::new(&["hi"]));
        let mut machine = DialogueMachine::new(0.05);
        machine.disable();

        assert_eq!(machine.enter("a", &library), Ok(EnterOutcome::Disabled));
        assert_eq!(machine.state(), DialogueState::Idle);
        assert_eq!(machine.advance(), AdvanceOutcome::Ignored);
    }

    #[test]
    fn exit_tears_down_mid_line() {
        let library = Library::default().with("a", LineStory::new(&["hello"]));
        let mut machine = DialogueMachine::new(0.05);
        machine.enter("a", &library).unwrap();
        machine.tick(0.0);

        assert_eq!(machine.exit(), Some("a".to_string()));
        assert_eq!(machine.displayed_text(), "");
        assert_eq!(machine.tick(0.05), TickOutcome::Idle);
        assert_eq!(machine.exit(), None);
    }
}
