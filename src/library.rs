//! The user's media library

use once_cell::sync::OnceCell;

use crate::error::{check_status, Result};
use crate::ffi::libvlc_media_library_t;
use crate::handle::{Handle, ObjectKind};
use crate::media_list::MediaList;

/// Persistent media library; [`load`](Self::load) before reading it
#[derive(Debug)]
pub struct Library {
    handle: Handle,
    // Set once `load` succeeds
    loaded: OnceCell<()>,
}

facade_handle!(Library, libvlc_media_library_t);

impl Library {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            loaded: OnceCell::new(),
        }
    }

    pub fn retain(&self) -> Result<Library> {
        Ok(Self::from_handle(self.handle.retain()?))
    }

    pub fn release(&mut self) -> Result<()> {
        self.handle.release()
    }

    /// Read the library from disk
    pub fn load(&self) -> Result<()> {
        let status = native!(self.api(), libvlc_media_library_load(self.raw()?));
        check_status(self.api(), status)?;
        let _ = self.loaded.set(());
        log::debug!("Loaded media library");
        Ok(())
    }

    /// Whether [`load`](Self::load) succeeded through this facade
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// The library's top-level list
    pub fn media_list(&self) -> Result<MediaList> {
        let api = self.api();
        let list = native!(api, libvlc_media_library_media_list(self.raw()?));
        Handle::from_constructor(api, ObjectKind::MediaList, list).map(MediaList::from_handle)
    }
}
