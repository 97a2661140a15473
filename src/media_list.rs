//! Media lists and their native lock

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{check_status, Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::{libvlc_media_list_t, LibVlc};
use crate::handle::{Handle, ObjectKind};
use crate::media::Media;

/// An ordered, refcounted list of media.
///
/// Item access goes through [`lock`](Self::lock), which holds the native
/// list lock for the lifetime of the returned guard.
#[derive(Debug)]
pub struct MediaList {
    events: OnceCell<EventManager>,
    handle: Handle,
}

facade_handle!(MediaList, libvlc_media_list_t);

impl MediaList {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            events: OnceCell::new(),
            handle,
        }
    }

    pub(crate) fn from_returned(api: &Arc<LibVlc>, ptr: *mut libvlc_media_list_t) -> Option<Self> {
        (!ptr.is_null()).then(|| Self::from_handle(Handle::owned(api.clone(), ObjectKind::MediaList, ptr)))
    }

    pub fn retain(&self) -> Result<MediaList> {
        Ok(Self::from_handle(self.handle.retain()?))
    }

    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    /// Associate a media with the list (e.g. the playlist file it came from)
    pub fn set_media(&self, media: &Media) -> Result<()> {
        native!(self.api(), libvlc_media_list_set_media(self.raw()?, media.raw()?));
        Ok(())
    }

    /// Media associated with the list, if any
    pub fn media(&self) -> Result<Option<Media>> {
        let api = self.api();
        let media = native!(api, libvlc_media_list_media(self.raw()?));
        Ok(Media::from_returned(api, media))
    }

    /// Read-only lists (discovery results, sub-items) reject edits
    pub fn is_readonly(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_list_is_readonly(self.raw()?)) != 0)
    }

    /// Take the native list lock
    pub fn lock(&self) -> Result<MediaListLock<'_>> {
        native!(self.api(), libvlc_media_list_lock(self.raw()?));
        Ok(MediaListLock {
            list: self,
            locked: true,
        })
    }

    /// Item count, taking the lock for the duration of the call
    pub fn len(&self) -> Result<usize> {
        self.lock()?.count()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Item events (`MediaListItemAdded`, `MediaListWillDeleteItem`, ...)
    pub fn events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::MediaList, || {
            Ok(native!(api, libvlc_media_list_event_manager(self.raw()?)))
        })
    }
}

/// Held native lock on a [`MediaList`].
///
/// Dropping the guard unlocks. Item edits made without the lock are
/// rejected by libVLC.
pub struct MediaListLock<'a> {
    list: &'a MediaList,
    locked: bool,
}

impl<'a> MediaListLock<'a> {
    fn raw(&self) -> Result<*mut libvlc_media_list_t> {
        self.list.raw()
    }

    fn api(&self) -> &Arc<LibVlc> {
        self.list.api()
    }

    /// Append an item; the list takes its own reference
    pub fn add(&self, media: &Media) -> Result<()> {
        let status = native!(self.api(), libvlc_media_list_add_media(self.raw()?, media.raw()?));
        check_status(self.api(), status)
    }

    /// Insert before `index`
    pub fn insert(&self, media: &Media, index: usize) -> Result<()> {
        let status = native!(
            self.api(),
            libvlc_media_list_insert_media(self.raw()?, media.raw()?, to_index(index)?)
        );
        check_status(self.api(), status)
    }

    pub fn remove(&self, index: usize) -> Result<()> {
        let status = native!(self.api(), libvlc_media_list_remove_index(self.raw()?, to_index(index)?));
        check_status(self.api(), status)
    }

    pub fn count(&self) -> Result<usize> {
        let count = native!(self.api(), libvlc_media_list_count(self.raw()?));
        Ok(count.max(0) as usize)
    }

    /// Owned reference to the item at `index`
    pub fn item_at(&self, index: usize) -> Result<Media> {
        let api = self.api();
        let media = native!(api, libvlc_media_list_item_at_index(self.raw()?, to_index(index)?));
        if media.is_null() {
            let detail = crate::error::take_error(api).unwrap_or_else(|| format!("no item at {}", index));
            return Err(Error::NotFound(detail));
        }
        Handle::from_constructor(api, ObjectKind::Media, media).map(Media::from_handle)
    }

    /// Position of `media`, `NotFound` when absent
    pub fn index_of(&self, media: &Media) -> Result<usize> {
        let api = self.api();
        let index = native!(api, libvlc_media_list_index_of_item(self.raw()?, media.raw()?));
        if index < 0 {
            // Absent items also leave a native message behind
            let detail = crate::error::take_error(api).unwrap_or_else(|| "item not in list".to_string());
            return Err(Error::NotFound(detail));
        }
        Ok(index as usize)
    }

    /// Owned references to every item, in order
    pub fn items(&self) -> Result<Vec<Media>> {
        (0..self.count()?).map(|i| self.item_at(i)).collect()
    }

    /// Release the native lock now
    pub fn unlock(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.locked {
            return Ok(());
        }
        self.locked = false;
        native!(self.api(), libvlc_media_list_unlock(self.list.raw()?));
        Ok(())
    }
}

impl Drop for MediaListLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("Failed to unlock media list: {}", e);
        }
    }
}

impl fmt::Debug for MediaListLock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaListLock").field("locked", &self.locked).finish()
    }
}

fn to_index(index: usize) -> Result<std::ffi::c_int> {
    std::ffi::c_int::try_from(index).map_err(|_| Error::InvalidArgument(format!("index {} out of range", index)))
}
