//! Media: something libVLC can play

use std::ffi::c_int;
use std::ptr;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::{c_string, libvlc_media_stats_t, libvlc_media_t, libvlc_media_track_info_t, LibVlc};
use crate::handle::{Handle, ObjectKind};
use crate::media_list::MediaList;
use crate::player::Player;
use crate::track::{MediaStats, TrackInfo};
use crate::types::{MediaOption, MediaState, Meta};

/// A media resource with its options and meta data
#[derive(Debug)]
pub struct Media {
    // Declared first so subscriptions are detached before the release
    events: OnceCell<EventManager>,
    handle: Handle,
}

facade_handle!(Media, libvlc_media_t);

impl Media {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            events: OnceCell::new(),
            handle,
        }
    }

    /// Wrap a media pointer lent by libVLC, e.g. inside an event
    pub(crate) fn borrowed(api: Arc<LibVlc>, ptr: *mut libvlc_media_t) -> Self {
        Self::from_handle(Handle::borrowed(api, ObjectKind::Media, ptr))
    }

    /// Take ownership of a reference returned by libVLC; null is `None`
    pub(crate) fn from_returned(api: &Arc<LibVlc>, ptr: *mut libvlc_media_t) -> Option<Self> {
        (!ptr.is_null()).then(|| Self::from_handle(Handle::owned(api.clone(), ObjectKind::Media, ptr)))
    }

    /// Another owner of the same native media
    pub fn retain(&self) -> Result<Media> {
        Ok(Self::from_handle(self.handle.retain()?))
    }

    /// Give back this facade's reference; later calls fail with `InvalidHandle`
    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    /// Add a `:option` applied when the media is played
    pub fn add_option(&self, option: &str) -> Result<()> {
        let option = c_string(option)?;
        native!(self.api(), libvlc_media_add_option(self.raw()?, option.as_ptr()));
        Ok(())
    }

    /// Add an option with explicit flags
    pub fn add_option_flag(&self, option: &str, flags: MediaOption) -> Result<()> {
        let option = c_string(option)?;
        native!(self.api(), libvlc_media_add_option_flag(self.raw()?, option.as_ptr(), flags.bits()));
        Ok(())
    }

    /// Media resource locator
    pub fn mrl(&self) -> Result<String> {
        let api = self.api();
        let text = native!(api, libvlc_media_get_mrl(self.raw()?));
        api.take_string(text).ok_or_else(|| Error::native(api))
    }

    /// Read one meta field; `None` when unset.
    ///
    /// Only meaningful once the media has been parsed.
    pub fn meta(&self, meta: Meta) -> Result<Option<String>> {
        let api = self.api();
        let text = native!(api, libvlc_media_get_meta(self.raw()?, meta.as_raw()));
        Ok(api.take_string(text))
    }

    /// Set a meta field in memory; see [`save_meta`](Self::save_meta)
    pub fn set_meta(&self, meta: Meta, value: &str) -> Result<()> {
        let value = c_string(value)?;
        native!(self.api(), libvlc_media_set_meta(self.raw()?, meta.as_raw(), value.as_ptr()));
        Ok(())
    }

    /// Write changed meta data back to the resource
    pub fn save_meta(&self) -> Result<()> {
        let api = self.api();
        // 1 on success
        if native!(api, libvlc_media_save_meta(self.raw()?)) == 0 {
            return Err(Error::native(api));
        }
        Ok(())
    }

    pub fn state(&self) -> Result<MediaState> {
        let raw = native!(self.api(), libvlc_media_get_state(self.raw()?));
        Ok(MediaState::from_native(raw))
    }

    /// Playback statistics; fails until the media has been played or parsed
    pub fn stats(&self) -> Result<MediaStats> {
        let api = self.api();
        let mut raw = libvlc_media_stats_t::default();
        if native!(api, libvlc_media_get_stats(self.raw()?, &mut raw)) == 0 {
            return Err(Error::native(api));
        }
        Ok(MediaStats::from(raw))
    }

    /// Sub-items (e.g. playlist entries), `None` when the media has none
    pub fn subitems(&self) -> Result<Option<MediaList>> {
        let api = self.api();
        let list = native!(api, libvlc_media_subitems(self.raw()?));
        Ok(MediaList::from_returned(api, list))
    }

    /// Duration in milliseconds, -1 when not yet known
    pub fn duration(&self) -> Result<i64> {
        Ok(native!(self.api(), libvlc_media_get_duration(self.raw()?)))
    }

    /// Read meta data and tracks, blocking until done
    pub fn parse(&self) -> Result<()> {
        native!(self.api(), libvlc_media_parse(self.raw()?));
        Ok(())
    }

    /// Start parsing in the background; completion raises `MediaParsedChanged`
    pub fn parse_async(&self) -> Result<()> {
        native!(self.api(), libvlc_media_parse_async(self.raw()?));
        Ok(())
    }

    pub fn is_parsed(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_is_parsed(self.raw()?)) != 0)
    }

    /// Elementary streams; empty until the media has been parsed
    pub fn tracks_info(&self) -> Result<Vec<TrackInfo>> {
        let api = self.api();
        let mut tracks: *mut libvlc_media_track_info_t = ptr::null_mut();
        let count: c_int = native!(api, libvlc_media_get_tracks_info(self.raw()?, &mut tracks));

        if count < 0 {
            return Err(Error::native(api));
        }
        if tracks.is_null() {
            return Ok(Vec::new());
        }

        let infos = unsafe { std::slice::from_raw_parts(tracks, count as usize) }
            .iter()
            .map(TrackInfo::from)
            .collect();
        api.free(tracks.cast());
        Ok(infos)
    }

    /// Independent copy with the same location and options
    pub fn duplicate(&self) -> Result<Media> {
        let api = self.api();
        let ptr = native!(api, libvlc_media_duplicate(self.raw()?));
        Handle::from_constructor(api, ObjectKind::Media, ptr).map(Self::from_handle)
    }

    /// Player preloaded with this media
    pub fn new_player(&self) -> Result<Player> {
        let api = self.api();
        let ptr = native!(api, libvlc_media_player_new_from_media(self.raw()?));
        Handle::from_constructor(api, ObjectKind::Player, ptr).map(Player::from_handle)
    }

    /// Event subscriptions for this media
    pub fn events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::Media, || {
            Ok(native!(api, libvlc_media_event_manager(self.raw()?)))
        })
    }
}
