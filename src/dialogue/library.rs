//! Dialogue script loading from RON files.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::error::DialogueError;
use super::script::{DialogueScript, ScriptStory};
use super::story::StorySource;

/// Directory scanned for `<script id>.ron` files at startup.
pub const DIALOGUE_DIR: &str = "assets/data/dialogue";

/// Resource holding all loaded dialogue scripts, keyed by script id.
#[derive(Resource, Default)]
pub struct ScriptLibrary {
    scripts: HashMap<String, Arc<DialogueScript>>,
}

impl ScriptLibrary {
    pub fn contains(&self, script_id: &str) -> bool {
        self.scripts.contains_key(script_id)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn insert(&mut self, script_id: impl Into<String>, script: DialogueScript) {
        self.scripts.insert(script_id.into(), Arc::new(script));
    }

    /// Parse, validate and store a script from RON source.
    pub fn insert_ron(&mut self, script_id: &str, contents: &str) -> Result<(), DialogueError> {
        let script = DialogueScript::from_ron(script_id, contents)?;
        self.insert(script_id, script);
        Ok(())
    }

    /// Read one script file. The script id is the file stem.
    pub fn load_file(&mut self, path: &Path) -> Result<String, DialogueError> {
        let script_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let contents = fs::read_to_string(path).map_err(|e| DialogueError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        self.insert_ron(&script_id, &contents)?;
        Ok(script_id)
    }
}

impl StorySource for ScriptLibrary {
    type Story = ScriptStory;

    fn resolve(&self, script_id: &str) -> Result<ScriptStory, DialogueError> {
        self.scripts
            .get(script_id)
            .cloned()
            .map(ScriptStory::new)
            .ok_or_else(|| DialogueError::ScriptNotFound(script_id.to_string()))
    }
}

/// Load all dialogue scripts from the assets/data/dialogue/ directory.
pub fn load_dialogue_scripts(mut library: ResMut<ScriptLibrary>) {
    let dialogue_dir = Path::new(DIALOGUE_DIR);

    if !dialogue_dir.exists() {
        warn!("Dialogue script directory not found: {:?}", dialogue_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(dialogue_dir) else {
        warn!("Failed to read dialogue script directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            match library.load_file(&path) {
                Ok(script_id) => info!("Loaded dialogue script: {}", script_id),
                Err(e) => error!("{}", e),
            }
        }
    }

    if library.is_empty() {
        warn!("No dialogue scripts in {:?}; every conversation will be skipped", dialogue_dir);
    } else {
        info!("Loaded {} dialogue scripts", library.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::story::Story;

    #[test]
    fn resolves_fresh_sessions() {
        let mut library = ScriptLibrary::default();
        library
            .insert_ron("hello", r#"(knots: { "start": (lines: [(text: "Hi")]) })"#)
            .unwrap();

        let mut first = library.resolve("hello").unwrap();
        assert_eq!(first.continue_story(), "Hi");
        assert!(!first.can_continue());

        let second = library.resolve("hello").unwrap();
        assert!(second.can_continue(), "each session starts from the top");
    }

    #[test]
    fn unknown_id_is_reported() {
        let library = ScriptLibrary::default();
        assert!(matches!(
            library.resolve("nobody"),
            Err(DialogueError::ScriptNotFound(id)) if id == "nobody"
        ));
    }

    #[test]
    fn invalid_script_is_not_stored() {
        let mut library = ScriptLibrary::default();
        let result = library.insert_ron("broken", r#"(start: "x", knots: {})"#);

        assert!(result.is_err());
        assert!(!library.contains("broken"));
    }

    #[test]
    fn empty_until_something_is_inserted() {
        let mut library = ScriptLibrary::default();
        assert!(library.is_empty());

        library
            .insert_ron("hello", r#"(knots: { "start": (lines: [(text: "Hi")]) })"#)
            .unwrap();
        assert!(!library.is_empty());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn shipped_scripts_parse() {
        let mut library = ScriptLibrary::default();
        for entry in fs::read_dir(DIALOGUE_DIR).unwrap().flatten() {
            library.load_file(&entry.path()).unwrap();
        }
        assert!(library.contains("claire"));
    }
}
