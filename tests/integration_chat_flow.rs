//! Integration tests for the chat demo workflow
//!
//! Tests the complete flow of persisting chatrooms across restarts and
//! driving a chat session from initial load through a simulated reply.

use chatterbox::config::Config;
use chatterbox::history::DummyHistory;
use chatterbox::message::{MessageBody, Sender};
use chatterbox::responders::create_responder;
use chatterbox::rooms::RoomList;
use chatterbox::session::{ChatSession, ReplyOutcome, SessionState};
use chatterbox::store::RoomStore;
use tempfile::TempDir;

fn open_list(dir: &TempDir) -> RoomList {
    let store = RoomStore::new(dir.path().join("rooms.db")).expect("open store");
    RoomList::load(store)
}

#[test]
fn test_rooms_survive_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let created = {
        let mut rooms = open_list(&temp_dir);
        let a = rooms.create("general").expect("create room");
        let b = rooms.create("random").expect("create room");
        vec![a, b]
    };

    // Reopen the same database, as a fresh process would
    let rooms = open_list(&temp_dir);
    assert_eq!(rooms.len(), 2);
    for room in &created {
        assert_eq!(rooms.get(room.id), Some(room));
    }
}

#[test]
fn test_room_crud_and_filter() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut rooms = open_list(&temp_dir);

    let general = rooms.create("General chat").expect("create room");
    rooms.create("Work notes").expect("create room");
    rooms.create("generated art").expect("create room");

    // Case-insensitive substring filter
    let hits = rooms.filter("gen");
    assert_eq!(hits.len(), 2);

    // Empty titles are rejected and persist nothing
    assert!(rooms.create("   ").is_err());
    assert_eq!(rooms.len(), 3);

    assert!(rooms.delete(general.id));
    assert!(!rooms.delete(general.id));
    assert_eq!(rooms.len(), 2);

    // The deletion is visible after a reopen
    let rooms = open_list(&temp_dir);
    assert_eq!(rooms.len(), 2);
    assert!(rooms.get(general.id).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_full_session_flow() {
    let config = Config::default();
    let responder = create_responder("echo").expect("create responder");
    let history = DummyHistory::generate(
        config.history.total_messages,
        config.history.page_size,
        config.history_interval(),
    );
    let mut session = ChatSession::new(1, history, responder, config.session_timing());

    assert_eq!(session.state(), SessionState::LoadingInitial);
    session.load_initial().await;
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.messages().len(), 20);

    // Scrolling to the top pulls in the next-older page
    let loaded = session.scroll_to_top();
    assert_eq!(loaded, 20);
    assert_eq!(session.messages().len(), 40);

    // Sending transitions to awaiting-reply and the echo arrives
    session.send("hello there", None).expect("send message");
    assert_eq!(session.state(), SessionState::AwaitingReply);
    assert!(session.send("too soon", None).is_err());

    let outcome = session.recv_reply().await;
    assert_eq!(outcome, ReplyOutcome::Replied);
    assert_eq!(session.state(), SessionState::Ready);

    let last = session.messages().last().expect("reply message");
    assert_eq!(last.sender, Sender::Assistant);
    assert_eq!(
        last.body,
        MessageBody::Text("Echo says: hello there".to_string())
    );

    // The reply text is copyable
    let index = session.messages().len() - 1;
    assert_eq!(
        session.copyable_text(index).expect("copyable"),
        "Echo says: hello there"
    );
}
