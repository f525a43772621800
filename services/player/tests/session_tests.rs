use std::sync::Arc;
use std::time::Duration;

use course_player_core::{SnapshotStore, CATALOG_KEY, NOTES_KEY};
use player_lib::adapters::{JsonFileStore, MemoryStore, SimulatedSurface};
use player_lib::error::PlayerError;
use player_lib::session::command::CommandError;
use player_lib::session::{self, PlayerSession, Reply};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

fn fresh_session() -> (PlayerSession<SimulatedSurface>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = PlayerSession::new(store.clone(), SimulatedSurface::new());
    (session, store)
}

fn text(reply: Result<Option<Reply>, PlayerError>) -> String {
    match reply {
        Ok(Some(Reply::Text(text))) => text,
        other => panic!("expected a text reply, got {:?}", other),
    }
}

//=========================================================================================
// Commands
//=========================================================================================

#[test]
fn session_starts_on_the_first_lesson_with_media_loaded() {
    let (session, _) = fresh_session();

    let cursor = session.navigator().cursor();
    assert_eq!((cursor.course_index(), cursor.lesson_index()), (0, 0));
    assert_eq!(session.surface().media(), Some("/video.mp4"));
    assert!(!session.controls().is_playing());
}

#[test]
fn selecting_a_locked_lesson_is_refused() {
    let (mut session, _) = fresh_session();

    let reply = text(session.handle_line("select 2 3"));

    assert_eq!(reply, "'ES6+ Features' is locked.");
    let cursor = session.navigator().cursor();
    assert_eq!((cursor.course_index(), cursor.lesson_index()), (0, 0));
}

#[test]
fn next_moves_to_the_following_lesson() {
    let (mut session, _) = fresh_session();

    let reply = text(session.handle_line("next"));

    assert!(reply.starts_with("Now playing 1.2 'Components and JSX'"));
    assert_eq!(session.navigator().cursor().lesson_index(), 1);
}

#[test]
fn previous_on_the_first_lesson_is_refused() {
    let (mut session, _) = fresh_session();

    assert_eq!(text(session.handle_line("prev")), "This is the first lesson.");
}

#[test]
fn seeking_past_the_threshold_completes_and_persists() {
    let (mut session, store) = fresh_session();

    let reply = text(session.handle_line("seek 7:30"));

    assert!(reply.starts_with("7:30 / 8:00"));
    assert!(reply.contains("Completed 'Introduction to React'. React Fundamentals is 25% done."));
    assert!(session.catalog().lesson(0, 0).unwrap().completed);
    let persisted = store.read(CATALOG_KEY).unwrap().unwrap();
    assert!(persisted.contains("\"completed\":true"));
}

#[test]
fn seeking_short_of_the_threshold_does_not_complete() {
    let (mut session, store) = fresh_session();

    session.handle_line("seek 400").unwrap();

    assert!(!session.catalog().lesson(0, 0).unwrap().completed);
    assert!(store.read(CATALOG_KEY).unwrap().is_none());
}

#[test]
fn playing_to_the_end_completes_and_advances() {
    let (mut session, _) = fresh_session();
    session.handle_line("k").unwrap();
    assert!(session.surface().is_playing());

    let messages = session.tick(Duration::from_secs(600));

    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Completed 'Introduction to React'"));
    assert!(messages[1].starts_with("Now playing 1.2"));
    assert!(session.catalog().lesson(0, 0).unwrap().completed);
    assert!(!session.controls().is_playing());
    assert!(!session.surface().is_playing());
}

#[test]
fn pause_never_starts_playback() {
    let (mut session, _) = fresh_session();

    session.handle_line("pause").unwrap();
    assert!(!session.controls().is_playing());
    assert!(!session.surface().is_playing());

    session.handle_line("play").unwrap();
    session.handle_line("pause").unwrap();
    assert!(!session.controls().is_playing());
    assert!(!session.surface().is_playing());
}

#[test]
fn rate_only_changes_while_playing() {
    let (mut session, _) = fresh_session();

    session.handle_line("faster").unwrap();
    assert_eq!(session.controls().playback_rate(), 1.0);

    session.handle_line("play").unwrap();
    session.handle_line("faster").unwrap();
    assert_eq!(session.controls().playback_rate(), 1.25);
    assert_eq!(session.surface().playback_rate(), 1.25);

    // A new lesson starts at normal speed.
    session.handle_line("next").unwrap();
    assert_eq!(session.surface().playback_rate(), 1.0);
}

#[test]
fn skip_stays_inside_the_media() {
    let (mut session, _) = fresh_session();

    let reply = text(session.handle_line("left"));
    assert!(reply.starts_with("0:00 / 8:00"));

    session.handle_line("seek 475").unwrap();
    let reply = text(session.handle_line("right"));
    assert!(reply.starts_with("8:00 / 8:00"));
}

#[test]
fn chapter_jumps_to_its_start() {
    let (mut session, _) = fresh_session();

    assert_eq!(
        text(session.handle_line("chapter 2")),
        "Jumped to 'React vs Other Frameworks'."
    );
    assert_eq!(session.navigator().current_time(), 120.0);
    assert_eq!(
        text(session.handle_line("chapter 9")),
        "This lesson has no chapter 9."
    );
}

#[test]
fn notes_can_be_added_listed_and_deleted() {
    let (mut session, store) = fresh_session();
    session.handle_line("seek 65").unwrap();

    let reply = text(session.handle_line("note  props flow down "));
    assert!(reply.starts_with("Saved note at 1:05"));

    let note = session.notes().all()[0].clone();
    assert_eq!(note.text, "props flow down");
    assert_eq!(note.lesson_id, "lesson-1-1");
    assert_eq!(note.course_id, "course-1");
    assert!(text(session.handle_line("notes")).contains("1:05 props flow down"));

    let reply = text(session.handle_line(&format!("delnote {}", note.id)));
    assert_eq!(reply, "Note deleted.");
    assert!(session.notes().is_empty());
    assert_eq!(store.read(NOTES_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn bad_input_is_reported_as_an_error() {
    let (mut session, _) = fresh_session();

    assert!(matches!(
        session.handle_line("rewind"),
        Err(PlayerError::Command(CommandError::Unknown(_)))
    ));
    assert!(matches!(session.handle_line("   "), Ok(None)));
    assert!(matches!(session.handle_line("quit"), Ok(Some(Reply::Quit))));
}

#[test]
fn progress_and_notes_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());
        let mut session = PlayerSession::new(store, SimulatedSurface::new());
        session.handle_line("seek 470").unwrap();
        session.handle_line("note keep this").unwrap();
    }

    let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let session = PlayerSession::new(store, SimulatedSurface::new());

    assert!(session.catalog().lesson(0, 0).unwrap().completed);
    assert_eq!(session.notes().len(), 1);
    assert_eq!(session.notes().all()[0].text, "keep this");
}

//=========================================================================================
// Event Loop
//=========================================================================================

#[tokio::test]
async fn event_loop_runs_commands_until_quit() {
    let (mut session, _) = fresh_session();
    let input: &[u8] = b"next\nbogus\nquit\nnext\n";
    let mut output = Vec::new();

    session::run(
        &mut session,
        BufReader::new(input),
        &mut output,
        Duration::from_millis(10),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with("Now playing 1.1 'Introduction to React'"));
    assert!(output.contains("Now playing 1.2 'Components and JSX'"));
    assert!(output.contains("error: Unknown command 'bogus'"));
    // Nothing after quit is handled.
    assert_eq!(session.navigator().cursor().lesson_index(), 1);
}

#[tokio::test]
async fn event_loop_stops_on_cancellation() {
    let (mut session, _) = fresh_session();
    // The other half stays open, so input never ends on its own.
    let (_keep_open, input) = tokio::io::duplex(64);
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let result = session::run(
        &mut session,
        BufReader::new(input),
        tokio::io::sink(),
        Duration::from_millis(10),
        shutdown,
    )
    .await;

    assert!(result.is_ok());
}
