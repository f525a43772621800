//! Time formatting and course progress.

use crate::domain::Lesson;

/// Formats a playback position as `m:ss`. Fractions are dropped and negative or
/// non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a whole-second lesson duration as `m:ss`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Percentage of completed lessons, rounded to the nearest integer.
/// An empty course is 0% complete.
pub fn calculate_progress(lessons: &[Lesson]) -> u8 {
    if lessons.is_empty() {
        return 0;
    }
    let completed = lessons.iter().filter(|lesson| lesson.completed).count();
    let percent = (completed as f64 / lessons.len() as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lessons(total: usize, completed: usize) -> Vec<Lesson> {
        (0..total)
            .map(|i| Lesson {
                id: format!("lesson-{i}"),
                title: format!("Lesson {i}"),
                description: String::new(),
                instructor: String::new(),
                duration_sec: 60,
                url: "/video.mp4".to_string(),
                transcript: None,
                locked: false,
                completed: i < completed,
            })
            .collect()
    }

    #[test]
    fn empty_course_has_zero_progress() {
        assert_eq!(calculate_progress(&[]), 0);
    }

    #[test]
    fn progress_is_share_of_completed_lessons() {
        assert_eq!(calculate_progress(&lessons(4, 2)), 50);
        assert_eq!(calculate_progress(&lessons(3, 1)), 33);
        assert_eq!(calculate_progress(&lessons(5, 0)), 0);
        assert_eq!(calculate_progress(&lessons(5, 5)), 100);
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_time_clamps_bad_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn format_duration_of_seed_lessons() {
        assert_eq!(format_duration(480), "8:00");
        assert_eq!(format_duration(1080), "18:00");
        assert_eq!(format_duration(59), "0:59");
    }
}
