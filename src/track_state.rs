use anyhow::{Context, Result};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::TrackStateConfig;
use crate::store::Store;
use crate::track::{self, Track};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// The editable state of the track editor. Owned by the application context
/// and handed to the map and drag collaborators, which share the same
/// underlying stores through cloned handles.
#[derive(Clone, Debug)]
pub struct TrackState {
    track: Store<Track>,
    dragging_track: Store<Option<Track>>,
}

impl TrackState {
    pub fn new() -> Self {
        Self::with_track(track::default_track())
    }

    pub fn with_track(initial_track: Track) -> Self {
        Self {
            track: Store::named("track", initial_track),
            dragging_track: Store::named("dragging_track", None),
        }
    }

    pub fn from_config(config: &TrackStateConfig) -> Result<Self> {
        let initial_track = match &config.initial_track {
            Some(points) => points.clone(),
            None => track::default_track(),
        };
        if config.validate {
            track::validate_track(&initial_track).context("invalid initial track")?;
        }
        info!(
            "track state created with {} initial points",
            initial_track.len()
        );
        Ok(Self::with_track(initial_track))
    }

    pub fn track(&self) -> &Store<Track> {
        &self.track
    }

    pub fn dragging_track(&self) -> &Store<Option<Track>> {
        &self.dragging_track
    }

    pub fn drag_phase(&self) -> DragPhase {
        if self.is_dragging() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_track.with(|dragging| dragging.is_some())
    }

    /// Starts a drag from the current track.
    pub fn begin_drag(&self) {
        let current = self.track.get();
        debug!("begin drag with {} points", current.len());
        self.dragging_track.set(Some(current));
    }

    pub fn drag_to(&self, points: Track) {
        self.dragging_track.set(Some(points));
    }

    /// Moves the dragged track into `track` and clears the drag. Returns
    /// `false` when there is no drag in progress.
    pub fn commit_drag(&self) -> bool {
        let Some(dragged) = self.dragging_track.get() else {
            return false;
        };
        debug!("commit drag with {} points", dragged.len());
        self.track.set(dragged);
        self.dragging_track.set(None);
        true
    }

    pub fn cancel_drag(&self) {
        if self.is_dragging() {
            debug!("cancel drag");
            self.dragging_track.set(None);
        }
    }
}
