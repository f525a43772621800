//! services/player/src/session/state.rs
//!
//! Defines the state of one player session and how it reacts to commands and to
//! events coming back from the playback surface.

use std::sync::Arc;
use std::time::Duration;

use course_player_core::{
    calculate_progress, format_time, CatalogState, CatalogStore, ControlOutcome, Controls,
    Navigator, NoteStore, PlaybackSurface, Rejection, SnapshotStore, SurfaceEvent, Transition,
};
use tracing::{debug, info};

use crate::error::PlayerError;
use crate::session::command::{self, Command, HELP};
use crate::session::render::{self, View};

/// What the event loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

//=========================================================================================
// PlayerSession
//=========================================================================================

/// Everything one learner's session owns. All mutation goes through `&mut self`,
/// one event at a time.
pub struct PlayerSession<S> {
    catalog: CatalogStore,
    notes: NoteStore,
    navigator: Navigator,
    controls: Controls,
    surface: S,
}

impl<S: PolledSurface> PlayerSession<S> {
    /// Loads both stores from `store` and cues up the first lesson.
    pub fn new(store: Arc<dyn SnapshotStore>, surface: S) -> Self {
        let mut catalog = CatalogStore::initialize(Arc::clone(&store));
        catalog.subscribe(log_catalog_progress);
        let notes = NoteStore::initialize(store);

        let mut session = Self {
            catalog,
            notes,
            navigator: Navigator::new(),
            controls: Controls::new(),
            surface,
        };
        session.load_active_lesson();
        session
    }

    pub fn catalog(&self) -> &CatalogState {
        self.catalog.state()
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn view(&self) -> View<'_> {
        View {
            catalog: self.catalog.state(),
            navigator: &self.navigator,
            controls: &self.controls,
            notes: &self.notes,
        }
    }

    /// Parses and runs one line of input.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Reply>, PlayerError> {
        match command::parse(line)? {
            Some(command) => self.handle_command(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn handle_command(&mut self, command: Command) -> Result<Reply, PlayerError> {
        debug!("Handling command {:?}.", command);
        let text = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Key(key) => match self.controls.handle_key(key, &mut self.surface) {
                ControlOutcome::Skip(delta) => {
                    self.navigator
                        .skip(self.catalog.state(), &mut self.surface, delta);
                    render::position_line(&self.view())
                }
                ControlOutcome::Applied => render::controls_line(&self.view()),
                ControlOutcome::Ignored => "Nothing to do.".to_string(),
            },
            Command::Pause => {
                if self.controls.is_playing() {
                    self.controls.toggle_play(&mut self.surface);
                }
                render::controls_line(&self.view())
            }
            Command::Next => {
                let transition = self.navigator.next(self.catalog.state());
                self.after_transition(transition)
            }
            Command::Previous => {
                let transition = self.navigator.previous(self.catalog.state());
                self.after_transition(transition)
            }
            Command::Select {
                course_index,
                lesson_index,
            } => {
                let transition =
                    self.navigator
                        .select_lesson(self.catalog.state(), course_index, lesson_index);
                self.after_transition(transition)
            }
            Command::Seek(time) => {
                self.navigator.seek(&mut self.surface, time);
                render::position_line(&self.view())
            }
            Command::Chapter(index) => {
                let chapter = self
                    .navigator
                    .active_chapters(self.catalog.state())
                    .get(index)
                    .cloned();
                match chapter {
                    Some(chapter) => {
                        self.navigator.seek(&mut self.surface, chapter.at_sec);
                        format!("Jumped to '{}'.", chapter.label)
                    }
                    None => format!("This lesson has no chapter {}.", index + 1),
                }
            }
            Command::AddNote(text) => self.add_note(&text)?,
            Command::DeleteNote(id) => {
                if self.notes.remove(id) {
                    "Note deleted.".to_string()
                } else {
                    "No such note.".to_string()
                }
            }
            Command::Notes => render::notes(&self.view()),
            Command::Courses => render::courses(&self.view()),
            Command::Resources => render::resources(&self.view()),
            Command::Transcript => render::transcript(&self.view()),
            Command::Status => render::status(&self.view()),
            Command::Help => HELP.to_string(),
        };

        let mut lines = vec![text];
        lines.extend(self.pump_surface());
        Ok(Reply::Text(lines.join("\n")))
    }

    /// Routes one surface event. Returns a message worth showing, if any.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> Option<String> {
        match event {
            SurfaceEvent::TimeUpdate(time) => {
                if !self.navigator.report_time(&mut self.catalog, time) {
                    return None;
                }
                let view = self.view();
                let lesson = view.lesson()?;
                let course = view.course()?;
                Some(format!(
                    "Completed '{}'. {} is {}% done.",
                    lesson.title,
                    course.title,
                    calculate_progress(&course.lessons)
                ))
            }
            SurfaceEvent::LoadedDuration(duration) => {
                self.navigator.on_loaded_duration(duration);
                None
            }
            SurfaceEvent::Ended => {
                self.controls.on_stopped();
                let transition = self.navigator.on_ended(self.catalog.state());
                Some(self.after_transition(transition))
            }
        }
    }

    fn after_transition(&mut self, transition: Transition) -> String {
        match transition {
            Transition::Moved { from, to } if from != to => {
                self.load_active_lesson();
                render::now_playing(&self.view())
            }
            Transition::Moved { .. } => {
                self.surface.seek(0.0);
                format!("Restarted at {}.", format_time(0.0))
            }
            Transition::Rejected(reason) => describe_rejection(self.catalog.state(), reason),
        }
    }

    fn load_active_lesson(&mut self) {
        if let Some(lesson) = self.navigator.active_lesson(self.catalog.state()) {
            info!("Loading lesson {}.", lesson.id);
            self.surface.load(lesson);
            self.controls.on_media_loaded(&mut self.surface);
        }
    }

    /// Advances the surface clock and handles whatever it reported.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<String> {
        self.surface.advance(elapsed);
        self.pump_surface()
    }

    fn pump_surface(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        loop {
            let events = self.surface.drain_events();
            if events.is_empty() {
                return messages;
            }
            for event in events {
                messages.extend(self.handle_surface_event(event));
            }
        }
    }

    fn add_note(&mut self, text: &str) -> Result<String, PlayerError> {
        let view = self.view();
        let (Some(course), Some(lesson)) = (view.course(), view.lesson()) else {
            return Err(PlayerError::Internal("no active lesson".to_string()));
        };
        let (course_id, lesson_id) = (course.id.clone(), lesson.id.clone());
        let timestamp = self.navigator.current_time();

        let note = self.notes.add(timestamp, text, &lesson_id, &course_id)?;
        Ok(format!(
            "Saved note at {} ({}).",
            format_time(note.timestamp),
            note.id
        ))
    }
}

//=========================================================================================
// Polled Surfaces
//=========================================================================================

/// A playback surface whose events the session pulls instead of receiving
/// callbacks. The clock only moves when the session advances it.
pub trait PolledSurface: PlaybackSurface {
    fn advance(&mut self, elapsed: Duration);

    /// Takes every event queued since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<SurfaceEvent>;
}

fn describe_rejection(catalog: &CatalogState, reason: Rejection) -> String {
    match reason {
        Rejection::Locked {
            course_index,
            lesson_index,
        } => match catalog.lesson(course_index, lesson_index) {
            Some(lesson) => format!("'{}' is locked.", lesson.title),
            None => "That lesson is locked.".to_string(),
        },
        Rejection::OutOfRange {
            course_index,
            lesson_index,
        } => format!(
            "There is no lesson {} in course {}.",
            lesson_index + 1,
            course_index + 1
        ),
        Rejection::NoNextLesson => "This is the last lesson.".to_string(),
        Rejection::NoPreviousLesson => "This is the first lesson.".to_string(),
    }
}

fn log_catalog_progress(catalog: &CatalogState) {
    let (completed, total) = catalog
        .courses()
        .iter()
        .flat_map(|course| course.lessons.iter())
        .fold((0, 0), |(completed, total), lesson| {
            (completed + usize::from(lesson.completed), total + 1)
        });
    info!("{} of {} lessons completed.", completed, total);
}
