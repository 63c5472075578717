//! Simulator session container.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the session lasts for the
//! browser tab and is gone on reload.
//!
//! The session owns exactly one engine, for the character currently shown.
//! Loading another character replaces it; nothing carries over.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ark::catalogue::Catalogue;
use crate::ark::engine::AllocationEngine;
use crate::ark::snapshot::Snapshot;
use crate::ark::tooltip::TooltipTable;
use crate::config::SimConfig;
use crate::error::{Error, Result};

/// Character whose baseline is loaded.
#[derive(Debug, Clone)]
pub struct Character {
    pub class: String,
    pub name: String,
    /// Armory snapshot as received, kept so a catalogue reload can re-import it.
    pub baseline: Snapshot,
}

#[derive(Default)]
pub struct Session {
    pub config: SimConfig,
    pub catalogue: Option<Catalogue>,
    pub tooltips: TooltipTable,
    pub character: Option<Character>,
    pub engine: Option<AllocationEngine>,
    /// Latest snapshot published by the engine, not yet handed to the page.
    published: Rc<RefCell<Option<Snapshot>>>,
}

impl Session {
    /// Replace the config. A loaded character is rebuilt under it with its
    /// edits carried over; icon templates apply from the next catalogue load.
    pub fn load_config(&mut self, json: &str) -> Result<()> {
        self.config = SimConfig::from_json(json)?;
        if let Some(character) = self.character.clone() {
            let edits = self.engine.as_ref().map(|e| e.diff()).unwrap_or_default();
            self.start(character)?;
            if let Some(engine) = self.engine.as_mut() {
                engine.apply_deltas(&edits);
            }
        }
        Ok(())
    }

    /// Replace the catalogue and re-import the current character against it.
    pub fn load_catalogue(&mut self, json: &str) -> Result<usize> {
        let catalogue = Catalogue::from_json(json, &self.config)?;
        let classes = catalogue.class_names().len();
        self.catalogue = Some(catalogue);
        if let Some(character) = self.character.take() {
            if let Err(e) = self.start(character) {
                tracing::warn!("ark: dropping character after catalogue reload: {}", e);
                self.engine = None;
                *self.published.borrow_mut() = None;
            }
        }
        Ok(classes)
    }

    pub fn load_tooltips(&mut self, json: &str) -> Result<usize> {
        self.tooltips = TooltipTable::from_json(json)?;
        Ok(self.tooltips.len())
    }

    /// Switch to a character. The old working copy is discarded entirely.
    pub fn load_character(&mut self, class: &str, name: &str, snapshot_json: &str) -> Result<()> {
        let baseline = Snapshot::from_json(snapshot_json)?;
        self.start(Character {
            class: class.trim().to_string(),
            name: name.trim().to_string(),
            baseline,
        })
    }

    fn start(&mut self, character: Character) -> Result<()> {
        let catalogue = self.catalogue.as_ref().ok_or(Error::NoCatalogue)?;
        let class = catalogue
            .class(&character.class)
            .ok_or_else(|| Error::UnknownClass(character.class.clone()))?;
        let mut engine = AllocationEngine::new(class, self.config.clone(), &character.baseline);
        let slot = Rc::clone(&self.published);
        engine.set_sink(Box::new(move |s: &Snapshot| {
            *slot.borrow_mut() = Some(s.clone());
        }));
        *self.published.borrow_mut() = Some(engine.snapshot());
        tracing::debug!("ark: loaded {} ({})", character.name, character.class);
        self.engine = Some(engine);
        self.character = Some(character);
        Ok(())
    }

    pub fn engine(&self) -> Result<&AllocationEngine> {
        self.engine.as_ref().ok_or(Error::NoCharacter)
    }

    pub fn engine_mut(&mut self) -> Result<&mut AllocationEngine> {
        self.engine.as_mut().ok_or(Error::NoCharacter)
    }

    pub fn class_name(&self) -> &str {
        self.character.as_ref().map_or("", |c| c.class.as_str())
    }

    /// Take the snapshot published since the last call, if any.
    pub fn take_published(&self) -> Option<Snapshot> {
        self.published.borrow_mut().take()
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the whole session (used on full page reset and by tests).
pub fn replace_session(new_session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = new_session;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ark::catalogue::NodeKey;
    use crate::ark::category::Category;
    use crate::ark::fixtures;

    fn loaded() -> Session {
        let mut session = Session::default();
        session.load_catalogue(fixtures::CATALOGUE_JSON).unwrap();
        session
            .load_character(fixtures::CLASS, "테스트", fixtures::BASELINE_JSON)
            .unwrap();
        session
    }

    #[test]
    fn character_requires_catalogue() {
        let mut session = Session::default();
        let err = session
            .load_character(fixtures::CLASS, "테스트", fixtures::BASELINE_JSON)
            .unwrap_err();
        assert!(matches!(err, Error::NoCatalogue));
        assert!(session.engine().is_err());
    }

    #[test]
    fn unknown_class_is_rejected() {
        let mut session = Session::default();
        session.load_catalogue(fixtures::CATALOGUE_JSON).unwrap();
        let err = session
            .load_character("바드", "테스트", fixtures::BASELINE_JSON)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownClass(ref c) if c == "바드"));
    }

    #[test]
    fn loading_publishes_initial_snapshot() {
        let session = loaded();
        let published = session.take_published().unwrap();
        assert_eq!(published.effects.len(), 5);
        assert!(session.take_published().is_none());
    }

    #[test]
    fn engine_commits_reach_the_session() {
        let mut session = loaded();
        session.take_published();
        let crit = NodeKey::new(Category::Evolution, "치명");
        session.engine_mut().unwrap().adjust_level(&crit, 2);
        let published = session.take_published().unwrap();
        assert!(published.effects[0].description.contains("Lv.12"));
    }

    #[test]
    fn switching_character_discards_edits() {
        let mut session = loaded();
        let crit = NodeKey::new(Category::Evolution, "치명");
        session.engine_mut().unwrap().adjust_level(&crit, 5);

        session
            .load_character(fixtures::CLASS, "다른 캐릭터", fixtures::OTHER_BASELINE_JSON)
            .unwrap();
        let engine = session.engine().unwrap();
        assert_eq!(engine.level_of(&crit), 0);
        assert_eq!(engine.revision(), 0);
        assert_eq!(session.character.as_ref().unwrap().name, "다른 캐릭터");
    }

    #[test]
    fn catalogue_reload_reimports_character() {
        let mut session = loaded();
        session
            .engine_mut()
            .unwrap()
            .adjust_level(&NodeKey::new(Category::Evolution, "치명"), 5);
        session.load_catalogue(fixtures::CATALOGUE_JSON).unwrap();
        let engine = session.engine().unwrap();
        assert_eq!(engine.level_of(&NodeKey::new(Category::Evolution, "치명")), 10);
    }

    #[test]
    fn catalogue_without_current_class_drops_character() {
        let mut session = loaded();
        let json = r#"{"소서리스":{"진화":[{"name":"치명","tier":1,"max":30}]}}"#;
        assert_eq!(session.load_catalogue(json).unwrap(), 1);
        assert!(session.character.is_none());
        assert!(session.engine().is_err());
        assert_eq!(session.class_name(), "");
        assert!(session.take_published().is_none());
    }

    #[test]
    fn config_reaches_loaded_engine() {
        let mut session = loaded();
        let crit = NodeKey::new(Category::Evolution, "치명");
        session.engine_mut().unwrap().adjust_level(&crit, 3);

        session
            .load_config(r#"{"bulk_step":5,"point_label":"{category} {points}"}"#)
            .unwrap();
        let engine = session.engine().unwrap();
        assert_eq!(engine.config().bulk_step, 5);
        assert_eq!(engine.level_of(&crit), 13);
        assert_eq!(engine.points_for(Category::Evolution).label, "진화 33");
    }

    #[test]
    fn failed_loads_keep_previous_state() {
        let mut session = loaded();
        assert!(session.load_catalogue("{").is_err());
        assert!(session.load_config("[").is_err());
        assert!(session.load_tooltips("nope").is_err());
        assert!(session.engine().is_ok());
        assert_eq!(session.config, SimConfig::default());
    }

    #[test]
    fn thread_local_session_roundtrip() {
        replace_session(loaded());
        with_session(|s| assert_eq!(s.class_name(), fixtures::CLASS));
        with_session_mut(|s| s.engine = None);
        with_session(|s| assert!(s.engine().is_err()));
        replace_session(Session::default());
    }
}
