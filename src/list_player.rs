//! Playlist playback over a media list

use std::ffi::c_int;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::error::{check_error, check_status, Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::libvlc_media_list_player_t;
use crate::handle::{Handle, ObjectKind};
use crate::media::Media;
use crate::media_list::MediaList;
use crate::player::Player;
use crate::render::RenderSlot;
use crate::types::{MediaState, PlaybackMode};

/// Plays the items of a [`MediaList`] through a [`Player`]
#[derive(Debug)]
pub struct ListPlayer {
    events: OnceCell<EventManager>,
    handle: Handle,
    // Renderer of the attached player, which may outlive its facade
    render: Mutex<Option<Arc<RenderSlot>>>,
}

facade_handle!(ListPlayer, libvlc_media_list_player_t);

impl ListPlayer {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            events: OnceCell::new(),
            handle,
            render: Mutex::new(None),
        }
    }

    pub fn retain(&self) -> Result<ListPlayer> {
        Ok(Self {
            events: OnceCell::new(),
            handle: self.handle.retain()?,
            render: Mutex::new(self.render.lock().clone()),
        })
    }

    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    /// Output items through `player` instead of an internal one
    pub fn set_player(&self, player: &Player) -> Result<()> {
        native!(
            self.api(),
            libvlc_media_list_player_set_media_player(self.raw()?, player.raw()?)
        );
        *self.render.lock() = Some(player.render_slot().clone());
        Ok(())
    }

    pub fn set_media_list(&self, list: &MediaList) -> Result<()> {
        native!(self.api(), libvlc_media_list_player_set_media_list(self.raw()?, list.raw()?));
        Ok(())
    }

    /// Start from the current item
    pub fn play(&self) -> Result<()> {
        let api = self.api();
        let raw = self.raw()?;
        api.clear_error();
        native!(api, libvlc_media_list_player_play(raw));
        check_error(api)
    }

    /// Toggle pause
    pub fn pause(&self) -> Result<()> {
        native!(self.api(), libvlc_media_list_player_pause(self.raw()?));
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        native!(self.api(), libvlc_media_list_player_stop(self.raw()?));
        Ok(())
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_list_player_is_playing(self.raw()?)) != 0)
    }

    pub fn state(&self) -> Result<MediaState> {
        let raw = native!(self.api(), libvlc_media_list_player_get_state(self.raw()?));
        Ok(MediaState::from_native(raw))
    }

    pub fn play_item_at_index(&self, index: usize) -> Result<()> {
        let index = c_int::try_from(index)
            .map_err(|_| Error::InvalidArgument(format!("index {} out of range", index)))?;
        let status = native!(self.api(), libvlc_media_list_player_play_item_at_index(self.raw()?, index));
        check_status(self.api(), status)
    }

    /// Jump to `media`, which must be in the list
    pub fn play_item(&self, media: &Media) -> Result<()> {
        let status = native!(self.api(), libvlc_media_list_player_play_item(self.raw()?, media.raw()?));
        check_status(self.api(), status)
    }

    pub fn next(&self) -> Result<()> {
        let status = native!(self.api(), libvlc_media_list_player_next(self.raw()?));
        check_status(self.api(), status)
    }

    pub fn previous(&self) -> Result<()> {
        let status = native!(self.api(), libvlc_media_list_player_previous(self.raw()?));
        check_status(self.api(), status)
    }

    pub fn set_playback_mode(&self, mode: PlaybackMode) -> Result<()> {
        native!(
            self.api(),
            libvlc_media_list_player_set_playback_mode(self.raw()?, mode.as_raw())
        );
        Ok(())
    }

    /// `MediaListPlayerPlayed`, `MediaListPlayerNextItemSet`, `MediaListPlayerStopped`
    pub fn events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::ListPlayer, || {
            Ok(native!(api, libvlc_media_list_player_event_manager(self.raw()?)))
        })
    }
}
