//! libVLC events
//!
//! ```text
//! native thread                         binding
//! ─────────────                         ───────
//! libvlc_event_t ──► event_trampoline ──► decode (once, eagerly)
//!                         │                    │
//!                         │ Arc<Subscription>  ▼
//!                         └──────────────► handler(&Event)
//!                                              │ optional
//!                                              ▼
//!                                         EventQueue (bounded)
//! ```
//!
//! Every subscription on every object shares the same trampoline; the
//! subscription record travels as the native user-data pointer.

mod decode;
mod manager;
mod queue;

pub use decode::{decode, PayloadCursor};
pub use manager::{EventManager, SubscriptionId};
pub use queue::EventQueue;

use std::ffi::c_int;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::discoverer::Discoverer;
use crate::error::{Error, Result};
use crate::ffi::{libvlc_event_manager_t, LibVlc};
use crate::handle::ObjectKind;
use crate::media::Media;
use crate::types::{MediaState, Meta};

raw_enum! {
    /// Event type tags, grouped by emitting object
    pub enum EventType {
        MediaMetaChanged = 0x000,
        MediaSubItemAdded = 0x001,
        MediaDurationChanged = 0x002,
        MediaParsedChanged = 0x003,
        MediaFreed = 0x004,
        MediaStateChanged = 0x005,

        MediaPlayerMediaChanged = 0x100,
        MediaPlayerNothingSpecial = 0x101,
        MediaPlayerOpening = 0x102,
        MediaPlayerBuffering = 0x103,
        MediaPlayerPlaying = 0x104,
        MediaPlayerPaused = 0x105,
        MediaPlayerStopped = 0x106,
        MediaPlayerForward = 0x107,
        MediaPlayerBackward = 0x108,
        MediaPlayerEndReached = 0x109,
        MediaPlayerEncounteredError = 0x10a,
        MediaPlayerTimeChanged = 0x10b,
        MediaPlayerPositionChanged = 0x10c,
        MediaPlayerSeekableChanged = 0x10d,
        MediaPlayerPausableChanged = 0x10e,
        MediaPlayerTitleChanged = 0x10f,
        MediaPlayerSnapshotTaken = 0x110,
        MediaPlayerLengthChanged = 0x111,

        MediaListItemAdded = 0x200,
        MediaListWillAddItem = 0x201,
        MediaListItemDeleted = 0x202,
        MediaListWillDeleteItem = 0x203,

        MediaListViewItemAdded = 0x300,
        MediaListViewWillAddItem = 0x301,
        MediaListViewItemDeleted = 0x302,
        MediaListViewWillDeleteItem = 0x303,

        MediaListPlayerPlayed = 0x400,
        MediaListPlayerNextItemSet = 0x401,
        MediaListPlayerStopped = 0x402,

        MediaDiscovererStarted = 0x500,
        MediaDiscovererEnded = 0x501,

        VlmMediaAdded = 0x600,
        VlmMediaRemoved = 0x601,
        VlmMediaChanged = 0x602,
        VlmMediaInstanceStarted = 0x603,
        VlmMediaInstanceStopped = 0x604,
        VlmMediaInstanceStatusInit = 0x605,
        VlmMediaInstanceStatusOpening = 0x606,
        VlmMediaInstanceStatusPlaying = 0x607,
        VlmMediaInstanceStatusPause = 0x608,
        VlmMediaInstanceStatusEnd = 0x609,
        VlmMediaInstanceStatusError = 0x60a,
    }
}

/// Event manager a facade creates on first use of `events()`
pub(crate) fn cached_manager<'a, F>(
    cell: &'a OnceCell<EventManager>,
    api: &Arc<LibVlc>,
    owner: ObjectKind,
    lookup: F,
) -> Result<&'a EventManager>
where
    F: FnOnce() -> Result<*mut libvlc_event_manager_t>,
{
    cell.get_or_try_init(|| {
        let ptr = lookup()?;
        if ptr.is_null() {
            return Err(Error::native(api));
        }
        Ok(EventManager::new(api.clone(), owner, ptr))
    })
}

/// Layout of an event's payload, implied by its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    None,
    Meta,
    State,
    Int64,
    Int32,
    Float32,
    Flag,
    Text,
    TextPair,
    Media,
    Discoverer,
}

impl EventType {
    /// Payload layout for this tag
    pub fn shape(self) -> PayloadShape {
        use EventType::*;

        match self {
            MediaMetaChanged => PayloadShape::Meta,
            MediaStateChanged => PayloadShape::State,
            MediaDurationChanged | MediaPlayerTimeChanged | MediaPlayerLengthChanged => PayloadShape::Int64,
            MediaParsedChanged | MediaPlayerTitleChanged => PayloadShape::Int32,
            MediaPlayerPositionChanged => PayloadShape::Float32,
            MediaPlayerSeekableChanged | MediaPlayerPausableChanged => PayloadShape::Flag,
            MediaPlayerSnapshotTaken => PayloadShape::Text,
            MediaSubItemAdded
            | MediaFreed
            | MediaPlayerMediaChanged
            | MediaListItemAdded
            | MediaListWillAddItem
            | MediaListItemDeleted
            | MediaListWillDeleteItem
            | MediaListViewItemAdded
            | MediaListViewWillAddItem
            | MediaListViewItemDeleted
            | MediaListViewWillDeleteItem
            | MediaListPlayerNextItemSet => PayloadShape::Media,
            MediaDiscovererStarted | MediaDiscovererEnded => PayloadShape::Discoverer,
            VlmMediaAdded
            | VlmMediaRemoved
            | VlmMediaChanged
            | VlmMediaInstanceStarted
            | VlmMediaInstanceStopped
            | VlmMediaInstanceStatusInit
            | VlmMediaInstanceStatusOpening
            | VlmMediaInstanceStatusPlaying
            | VlmMediaInstanceStatusPause
            | VlmMediaInstanceStatusEnd
            | VlmMediaInstanceStatusError => PayloadShape::TextPair,
            MediaPlayerNothingSpecial
            | MediaPlayerOpening
            | MediaPlayerBuffering
            | MediaPlayerPlaying
            | MediaPlayerPaused
            | MediaPlayerStopped
            | MediaPlayerForward
            | MediaPlayerBackward
            | MediaPlayerEndReached
            | MediaPlayerEncounteredError
            | MediaListPlayerPlayed
            | MediaListPlayerStopped => PayloadShape::None,
        }
    }

    /// State a player transition tag announces
    pub fn implied_state(self) -> Option<MediaState> {
        use EventType::*;

        match self {
            MediaPlayerNothingSpecial => Some(MediaState::NothingSpecial),
            MediaPlayerOpening => Some(MediaState::Opening),
            MediaPlayerBuffering => Some(MediaState::Buffering),
            MediaPlayerPlaying | MediaListPlayerPlayed => Some(MediaState::Playing),
            MediaPlayerPaused => Some(MediaState::Paused),
            MediaPlayerStopped | MediaListPlayerStopped => Some(MediaState::Stopped),
            MediaPlayerEndReached => Some(MediaState::Ended),
            MediaPlayerEncounteredError => Some(MediaState::Error),
            _ => None,
        }
    }

    /// libVLC's own name for this tag
    pub fn native_name(self, api: &LibVlc) -> Result<String> {
        api.event_type_name(self.as_raw())
    }
}

/// Decoded event payload
#[derive(Debug)]
pub enum EventData {
    /// State transitions carry nothing
    None,
    Meta(Meta),
    State(MediaState),
    /// Milliseconds
    Duration(i64),
    /// Milliseconds
    Time(i64),
    /// Milliseconds
    Length(i64),
    Parsed(i32),
    Title(i32),
    Position(f32),
    Flag(bool),
    /// Snapshot file path
    Text(String),
    Vlm { media: String, instance: String },
    /// Borrowed for the handler's duration unless retained
    Media(Media),
    /// Borrowed for the handler's duration
    Discoverer(Discoverer),
    /// Enumeration value this binding does not know
    Unrecognized(c_int),
}

/// One delivered event
#[derive(Debug)]
pub struct Event {
    kind: EventType,
    data: EventData,
}

impl Event {
    pub fn new(kind: EventType, data: EventData) -> Self {
        Self { kind, data }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn into_data(self) -> EventData {
        self.data
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::EventMismatch {
            event: self.kind,
            expected,
        }
    }

    /// Changed meta key (MediaMetaChanged)
    pub fn meta(&self) -> Result<Meta> {
        match self.data {
            EventData::Meta(meta) => Ok(meta),
            _ => Err(self.mismatch("a meta key")),
        }
    }

    /// New state (MediaStateChanged), or the state a transition tag announces
    pub fn state(&self) -> Result<MediaState> {
        match self.data {
            EventData::State(state) => Ok(state),
            _ => self.kind.implied_state().ok_or_else(|| self.mismatch("a state")),
        }
    }

    /// Media duration in milliseconds (MediaDurationChanged)
    pub fn duration(&self) -> Result<i64> {
        match self.data {
            EventData::Duration(ms) => Ok(ms),
            _ => Err(self.mismatch("a duration")),
        }
    }

    /// Playback time in milliseconds (MediaPlayerTimeChanged)
    pub fn time(&self) -> Result<i64> {
        match self.data {
            EventData::Time(ms) => Ok(ms),
            _ => Err(self.mismatch("a time")),
        }
    }

    /// Media length in milliseconds (MediaPlayerLengthChanged)
    pub fn length(&self) -> Result<i64> {
        match self.data {
            EventData::Length(ms) => Ok(ms),
            _ => Err(self.mismatch("a length")),
        }
    }

    /// Parsed status (MediaParsedChanged)
    pub fn parsed(&self) -> Result<bool> {
        match self.data {
            EventData::Parsed(status) => Ok(status != 0),
            _ => Err(self.mismatch("a parsed status")),
        }
    }

    /// New title index (MediaPlayerTitleChanged)
    pub fn title(&self) -> Result<i32> {
        match self.data {
            EventData::Title(title) => Ok(title),
            _ => Err(self.mismatch("a title")),
        }
    }

    /// Playback position in `[0, 1]` (MediaPlayerPositionChanged)
    pub fn position(&self) -> Result<f32> {
        match self.data {
            EventData::Position(position) => Ok(position),
            _ => Err(self.mismatch("a position")),
        }
    }

    /// Seekable/pausable flag
    pub fn flag(&self) -> Result<bool> {
        match self.data {
            EventData::Flag(flag) => Ok(flag),
            _ => Err(self.mismatch("a flag")),
        }
    }

    /// Snapshot file path (MediaPlayerSnapshotTaken)
    pub fn snapshot_path(&self) -> Result<&str> {
        match &self.data {
            EventData::Text(path) => Ok(path),
            _ => Err(self.mismatch("a file name")),
        }
    }

    /// VLM media and instance names
    pub fn vlm(&self) -> Result<(&str, &str)> {
        match &self.data {
            EventData::Vlm { media, instance } => Ok((media, instance)),
            _ => Err(self.mismatch("VLM names")),
        }
    }

    /// Media the event refers to
    pub fn media(&self) -> Result<&Media> {
        match &self.data {
            EventData::Media(media) => Ok(media),
            _ => Err(self.mismatch("a media")),
        }
    }

    /// Discoverer the event refers to
    pub fn discoverer(&self) -> Result<&Discoverer> {
        match &self.data {
            EventData::Discoverer(discoverer) => Ok(discoverer),
            _ => Err(self.mismatch("a discoverer")),
        }
    }

    /// Copy that may outlive the handler invocation.
    ///
    /// Media payloads are retained into owned facades, except for
    /// `MediaFreed`, whose media is already going away. Discoverers cannot
    /// be retained and are dropped from the copy.
    pub fn retained(&self) -> Result<Event> {
        let data = match &self.data {
            EventData::None => EventData::None,
            EventData::Meta(meta) => EventData::Meta(*meta),
            EventData::State(state) => EventData::State(*state),
            EventData::Duration(v) => EventData::Duration(*v),
            EventData::Time(v) => EventData::Time(*v),
            EventData::Length(v) => EventData::Length(*v),
            EventData::Parsed(v) => EventData::Parsed(*v),
            EventData::Title(v) => EventData::Title(*v),
            EventData::Position(v) => EventData::Position(*v),
            EventData::Flag(v) => EventData::Flag(*v),
            EventData::Text(path) => EventData::Text(path.clone()),
            EventData::Vlm { media, instance } => EventData::Vlm {
                media: media.clone(),
                instance: instance.clone(),
            },
            EventData::Media(_) if self.kind == EventType::MediaFreed => EventData::None,
            EventData::Media(media) if !media.is_live() => EventData::None,
            EventData::Media(media) => EventData::Media(media.retain()?),
            EventData::Discoverer(_) => EventData::None,
            EventData::Unrecognized(raw) => EventData::Unrecognized(*raw),
        };

        Ok(Event::new(self.kind, data))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.data {
            EventData::None => Ok(()),
            EventData::Meta(meta) => write!(f, "({})", meta),
            EventData::State(state) => write!(f, "({})", state),
            EventData::Duration(v) | EventData::Time(v) | EventData::Length(v) => write!(f, "({} ms)", v),
            EventData::Parsed(v) | EventData::Title(v) => write!(f, "({})", v),
            EventData::Position(v) => write!(f, "({:.3})", v),
            EventData::Flag(v) => write!(f, "({})", v),
            EventData::Text(path) => write!(f, "({})", path),
            EventData::Vlm { media, instance } => write!(f, "({}, {})", media, instance),
            EventData::Media(_) => write!(f, "(media)"),
            EventData::Discoverer(_) => write!(f, "(discoverer)"),
            EventData::Unrecognized(raw) => write!(f, "(raw {})", raw),
        }
    }
}
