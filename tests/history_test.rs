use aswa::deezer::normalize;
use aswa::discovery::TrackHistory;
use aswa::types::{ExternalId, RawTrack, Track};

fn create_track(id: i64) -> Track {
    normalize(RawTrack {
        id: Some(ExternalId::Int(id)),
        title: Some(format!("Track {}", id)),
        ..RawTrack::default()
    })
}

fn create_history(n: i64) -> TrackHistory {
    let mut history = TrackHistory::new();
    history.extend((1..=n).map(create_track));
    history
}

#[test]
fn test_new_history_starts_before_first() {
    let history = create_history(3);

    assert_eq!(history.cursor(), -1);
    assert!(history.current().is_none());
    assert_eq!(history.remaining(), 3);
}

#[test]
fn test_advance_walks_forward_and_stops_at_end() {
    let mut history = create_history(2);

    assert_eq!(history.advance().map(|t| t.title().to_string()), Some("Track 1".into()));
    assert_eq!(history.advance().map(|t| t.title().to_string()), Some("Track 2".into()));
    assert!(history.advance().is_none());
    assert_eq!(history.cursor(), 1);
    assert_eq!(history.remaining(), 0);
}

#[test]
fn test_retreat_clamps_at_first() {
    let mut history = create_history(3);
    history.advance();
    history.advance();

    assert_eq!(history.retreat().map(|t| t.title().to_string()), Some("Track 1".into()));
    assert_eq!(history.retreat().map(|t| t.title().to_string()), Some("Track 1".into()));
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_retreat_before_start_is_none() {
    let mut history = create_history(3);

    assert!(history.retreat().is_none());
    assert_eq!(history.cursor(), -1);
}

#[test]
fn test_append_after_end_allows_advance() {
    let mut history = create_history(1);
    history.advance();
    assert!(history.advance().is_none());

    history.append(create_track(2));

    assert_eq!(history.advance().map(|t| t.title().to_string()), Some("Track 2".into()));
    assert_eq!(history.cursor(), 1);
    assert_eq!(history.len(), 2);
}

#[test]
fn test_empty_history() {
    let mut history = TrackHistory::new();

    assert!(history.is_empty());
    assert!(history.advance().is_none());
    assert_eq!(history.cursor(), -1);
    assert_eq!(history.remaining(), 0);
}
