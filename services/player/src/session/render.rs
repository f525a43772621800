//! services/player/src/session/render.rs
//!
//! Turns session state into the text shown at the terminal. Nothing here mutates
//! anything; every function reads a `View` and returns lines.

use std::fmt::Write as _;

use course_player_core::{
    calculate_progress, format_duration, format_time, CatalogState, Controls, Course, Lesson,
    Navigator, NoteStore, ResourceKind,
};

/// Read-only borrow of everything a screen needs.
#[derive(Clone, Copy)]
pub struct View<'a> {
    pub catalog: &'a CatalogState,
    pub navigator: &'a Navigator,
    pub controls: &'a Controls,
    pub notes: &'a NoteStore,
}

impl<'a> View<'a> {
    pub fn course(&self) -> Option<&'a Course> {
        self.catalog.course(self.navigator.cursor().course_index())
    }

    pub fn lesson(&self) -> Option<&'a Lesson> {
        self.navigator.active_lesson(self.catalog)
    }
}

/// `1:05 / 10:00` plus the active chapter and caption, when there are any.
pub fn position_line(view: &View) -> String {
    let mut line = format!(
        "{} / {}",
        format_time(view.navigator.current_time()),
        format_time(view.navigator.duration(view.catalog))
    );
    let chapters = view.navigator.active_chapters(view.catalog);
    if let Some(chapter) = view
        .navigator
        .active_chapter_index(view.catalog)
        .and_then(|index| chapters.get(index))
    {
        let _ = write!(line, "  [{}]", chapter.label);
    }
    if let Some(caption) = view
        .controls
        .caption(view.navigator.active_cue(view.catalog))
    {
        let _ = write!(line, "\n  \"{}\"", caption);
    }
    line
}

pub fn controls_line(view: &View) -> String {
    let controls = view.controls;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    format!(
        "{} | volume {:.0}%{} | speed {}x | captions {} | fullscreen {}",
        if controls.is_playing() { "playing" } else { "paused" },
        controls.volume() * 100.0,
        if controls.is_muted() { " (muted)" } else { "" },
        controls.playback_rate(),
        on_off(controls.captions_on()),
        on_off(controls.is_fullscreen()),
    )
}

/// Header shown when a new lesson becomes active.
pub fn now_playing(view: &View) -> String {
    let (Some(course), Some(lesson)) = (view.course(), view.lesson()) else {
        return "Nothing is playing.".to_string();
    };
    let cursor = view.navigator.cursor();
    let mut text = format!(
        "Now playing {}.{} '{}' ({}) from {}",
        cursor.course_index() + 1,
        cursor.lesson_index() + 1,
        lesson.title,
        format_duration(lesson.duration_sec),
        course.title
    );
    if !lesson.instructor.is_empty() {
        let _ = write!(text, " with {}", lesson.instructor);
    }
    if let Some(breadcrumb) = &course.breadcrumb {
        let _ = write!(text, "\n  {}", breadcrumb.join(" > "));
    }
    if !lesson.description.is_empty() {
        let _ = write!(text, "\n  {}", lesson.description);
    }
    text
}

pub fn status(view: &View) -> String {
    let mut text = now_playing(view);
    if let Some(course) = view.course() {
        let _ = write!(
            text,
            "\nCourse progress: {}%",
            calculate_progress(&course.lessons)
        );
    }
    let _ = write!(text, "\n{}", position_line(view));
    let _ = write!(text, "\n{}", controls_line(view));

    let mut moves = Vec::new();
    if view.navigator.has_prev() {
        moves.push("prev");
    }
    if view.navigator.has_next(view.catalog) {
        moves.push("next");
    }
    if !moves.is_empty() {
        let _ = write!(text, "\nAvailable: {}", moves.join(", "));
    }
    text
}

/// The whole catalog with completion marks and locks.
pub fn courses(view: &View) -> String {
    let cursor = view.navigator.cursor();
    let mut text = String::new();
    for (course_index, course) in view.catalog.courses().iter().enumerate() {
        if course_index > 0 {
            text.push('\n');
        }
        let _ = write!(
            text,
            "{}. {} ({}%)",
            course_index + 1,
            course.title,
            calculate_progress(&course.lessons)
        );
        for (lesson_index, lesson) in course.lessons.iter().enumerate() {
            let active = cursor.course_index() == course_index
                && cursor.lesson_index() == lesson_index;
            let mark = match (lesson.completed, lesson.locked) {
                (true, _) => "x",
                (false, true) => "#",
                (false, false) => " ",
            };
            let _ = write!(
                text,
                "\n {} [{}] {}.{} {} ({})",
                if active { ">" } else { " " },
                mark,
                course_index + 1,
                lesson_index + 1,
                lesson.title,
                format_duration(lesson.duration_sec)
            );
        }
    }
    text
}

pub fn resources(view: &View) -> String {
    let Some(course) = view.course() else {
        return "Nothing is playing.".to_string();
    };
    if course.resources.is_empty() {
        return format!("{} has no resources.", course.title);
    }
    let mut text = format!("Resources for {}:", course.title);
    for resource in &course.resources {
        let label = match resource.classify() {
            ResourceKind::Pdf => "PDF",
            ResourceKind::Archive => "archive",
            ResourceKind::Document => "document",
            ResourceKind::Other => "file",
        };
        let _ = write!(text, "\n  [{}] {}", label, resource.name);
        if let Some(size) = &resource.size {
            let _ = write!(text, ", {}", size);
        }
        let _ = write!(text, " <{}>", resource.url);
    }
    text
}

/// All cues of the active lesson, with the one under the playhead marked.
pub fn transcript(view: &View) -> String {
    let Some(lesson) = view.lesson() else {
        return "Nothing is playing.".to_string();
    };
    let cues = lesson.cues();
    if cues.is_empty() {
        return format!("'{}' has no transcript.", lesson.title);
    }
    let active = view.navigator.active_cue(view.catalog).map(|cue| &cue.id);
    cues.iter()
        .map(|cue| {
            format!(
                "{} {} {}",
                if Some(&cue.id) == active { ">" } else { " " },
                format_time(cue.start_time),
                cue.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notes of the active lesson, earliest timestamp first.
pub fn notes(view: &View) -> String {
    let (Some(course), Some(lesson)) = (view.course(), view.lesson()) else {
        return "Nothing is playing.".to_string();
    };
    let notes = view.notes.for_lesson(&course.id, &lesson.id);
    if notes.is_empty() {
        return format!("No notes for '{}' yet.", lesson.title);
    }
    let mut text = format!("Notes for '{}':", lesson.title);
    for note in notes {
        let _ = write!(
            text,
            "\n  {} {}  ({}, {})",
            format_time(note.timestamp),
            note.text,
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.id
        );
    }
    text
}
