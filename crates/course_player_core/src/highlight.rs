//! Which transcript cue and which chapter line up with the playback position.
//!
//! Both lookups are recomputed on every time report; lessons carry a handful of
//! cues and chapters so there is nothing worth caching.

use crate::domain::{Chapter, TranscriptCue};

/// The cue whose closed interval contains `time`.
///
/// Cues are ordered and only ever touch at a shared boundary; at that instant
/// the cue that is just starting is the one shown.
pub fn active_cue(cues: &[TranscriptCue], time: f64) -> Option<&TranscriptCue> {
    cues.iter()
        .rfind(|cue| cue.start_time <= time && time <= cue.end_time)
}

/// Index into `chapters` (as given, unsorted) of the chapter playing at `time`.
///
/// Chapters are ordered by `at_sec` with a stable sort and scanned from the
/// latest backwards, so among chapters sharing a start the one listed later wins.
pub fn active_chapter_index(chapters: &[Chapter], time: f64) -> Option<usize> {
    let mut order: Vec<usize> = (0..chapters.len()).collect();
    order.sort_by(|&a, &b| chapters[a].at_sec.total_cmp(&chapters[b].at_sec));

    order
        .into_iter()
        .rev()
        .find(|&index| chapters[index].at_sec <= time)
}
