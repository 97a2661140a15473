//! Service discovery (SAP, UPnP, podcasts, ...)

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::{libvlc_media_discoverer_t, LibVlc};
use crate::handle::{Handle, ObjectKind};
use crate::media_list::MediaList;

/// A running service discovery module.
///
/// libVLC has no retain for discoverers: each one has a single owner.
#[derive(Debug)]
pub struct Discoverer {
    events: OnceCell<EventManager>,
    handle: Handle,
}

facade_handle!(Discoverer, libvlc_media_discoverer_t);

impl Discoverer {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            events: OnceCell::new(),
            handle,
        }
    }

    pub(crate) fn borrowed(api: Arc<LibVlc>, ptr: *mut libvlc_media_discoverer_t) -> Self {
        Self::from_handle(Handle::borrowed(api, ObjectKind::Discoverer, ptr))
    }

    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    /// Human-readable service name
    pub fn localized_name(&self) -> Result<String> {
        let api = self.api();
        let text = native!(api, libvlc_media_discoverer_localized_name(self.raw()?));
        api.take_string(text).ok_or_else(|| Error::native(api))
    }

    /// Items found so far; the list is read-only
    pub fn media_list(&self) -> Result<MediaList> {
        let api = self.api();
        let list = native!(api, libvlc_media_discoverer_media_list(self.raw()?));
        Handle::from_constructor(api, ObjectKind::MediaList, list).map(MediaList::from_handle)
    }

    pub fn is_running(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_discoverer_is_running(self.raw()?)) != 0)
    }

    /// `MediaDiscovererStarted` / `MediaDiscovererEnded`
    pub fn events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::Discoverer, || {
            Ok(native!(api, libvlc_media_discoverer_event_manager(self.raw()?)))
        })
    }
}
