//! Typewriter reveal of dialogue lines, one character per step.
//!
//! A task is a resumable step function. The dialogue plugin drives it once
//! per frame with the frame's delta time, so cancelling or finishing a line
//! early is just a method call between frames.

use rand::Rng;

/// Identifies one typing task. Stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Result of driving the scheduler for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStep {
    /// One more character is on screen
    Revealed(char),
    /// Between characters
    Waiting,
    /// The task ran to completion and was cleared this frame
    Finished,
}

/// One in-flight reveal of a line. Cancelling a task drops it.
#[derive(Debug)]
pub struct TypingTask {
    handle: TaskHandle,
    chars: Vec<char>,
    revealed_count: usize,
    char_interval: f32,
    /// Time left before the next step may run
    wait: f32,
}

impl TypingTask {
    fn new(handle: TaskHandle, full_text: &str, char_interval: f32) -> Self {
        Self {
            handle,
            chars: full_text.chars().collect(),
            revealed_count: 0,
            char_interval: char_interval.max(0.0),
            wait: 0.0,
        }
    }

    pub fn handle(&self) -> TaskHandle {
        self.handle
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// At most one character per call; after the last character the task
    /// still waits one interval before it reports `Finished`.
    fn poll(&mut self, dt: f32) -> TypingStep {
        self.wait -= dt;
        if self.wait > 0.0 {
            return TypingStep::Waiting;
        }

        let Some(&letter) = self.chars.get(self.revealed_count) else {
            return TypingStep::Finished;
        };
        self.revealed_count += 1;
        self.wait = self.char_interval;
        TypingStep::Revealed(letter)
    }
}

/// Owns the displayed text buffer and at most one typing task.
#[derive(Debug, Default)]
pub struct TypingScheduler {
    task: Option<TypingTask>,
    displayed: String,
    next_handle: u64,
}

impl TypingScheduler {
    /// Clear the buffer and start revealing `full_text`. Any task already
    /// running is dropped first, so it never takes another step.
    pub fn start_typing(&mut self, full_text: &str, char_interval: f32) -> TaskHandle {
        self.task = None;

        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.displayed.clear();
        self.task = Some(TypingTask::new(handle, full_text, char_interval));
        handle
    }

    /// Stop revealing. Whatever is already on screen stays.
    pub fn cancel(&mut self, handle: TaskHandle) {
        if self.active_handle() == Some(handle) {
            self.task = None;
        }
    }

    /// Cancel the task and show the full text in one go.
    pub fn complete_immediately(&mut self, handle: TaskHandle, full_text: &str) {
        if self.active_handle() == Some(handle) {
            self.task = None;
            self.displayed.clear();
            self.displayed.push_str(full_text);
        }
    }

    /// Drop any task and empty the buffer.
    pub fn clear(&mut self) {
        self.task = None;
        self.displayed.clear();
    }

    /// Run one step of the active task. `None` when nothing is typing.
    pub fn step(&mut self, dt: f32) -> Option<TypingStep> {
        let task = self.task.as_mut()?;
        let step = task.poll(dt);
        match step {
            TypingStep::Revealed(letter) => self.displayed.push(letter),
            TypingStep::Finished => self.task = None,
            TypingStep::Waiting => {}
        }
        Some(step)
    }

    pub fn is_typing(&self) -> bool {
        self.task.is_some()
    }

    pub fn active_handle(&self) -> Option<TaskHandle> {
        self.task.as_ref().map(TypingTask::handle)
    }

    pub fn task(&self) -> Option<&TypingTask> {
        self.task.as_ref()
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }
}

/// Pick a typing sound uniformly at random, or nothing from an empty set.
pub fn pick_sound_index<R: Rng + ?Sized>(sound_count: usize, rng: &mut R) -> Option<usize> {
    (sound_count > 0).then(|| rng.gen_range(0..sound_count))
}
