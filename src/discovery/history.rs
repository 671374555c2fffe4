use crate::types::Track;

/// Tracks served so far, in serve order, with a cursor on the current one.
///
/// The cursor starts before the first entry (reported as `-1`) and never
/// moves past the last one.
#[derive(Debug, Clone, Default)]
pub struct TrackHistory {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl TrackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Moves to the next entry. `None` means the cursor is on the last entry
    /// and the history has to be refilled first.
    pub fn advance(&mut self) -> Option<&Track> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.tracks.len() {
            return None;
        }
        self.cursor = Some(next);
        self.tracks.get(next)
    }

    /// Moves to the previous entry, staying on the first one once there.
    /// `None` when nothing has been served yet.
    pub fn retreat(&mut self) -> Option<&Track> {
        let cursor = self.cursor?;
        let prev = cursor.saturating_sub(1);
        self.cursor = Some(prev);
        self.tracks.get(prev)
    }

    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    /// Cursor position, `-1` before the first advance.
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Entries after the cursor that can be advanced to without fetching.
    pub fn remaining(&self) -> usize {
        let consumed = self.cursor.map_or(0, |c| c + 1);
        self.tracks.len().saturating_sub(consumed)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
