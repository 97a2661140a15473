//! Reference-counted native object handles
//!
//! Every facade owns exactly one [`Handle`]. A handle is either *owned*
//! (it holds one native reference and gives it back exactly once) or
//! *borrowed* (a rewrap of a pointer libVLC lent us, e.g. inside an event
//! payload, which is never released). A null pointer marks a dead handle.

use std::ffi::c_void;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ffi::LibVlc;

/// Native object kinds the binding wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Instance,
    Media,
    Player,
    MediaList,
    ListPlayer,
    Library,
    Discoverer,
    Log,
    LogIterator,
    TrackDescriptionList,
    AudioOutputList,
}

impl ObjectKind {
    /// Whether libVLC offers a retain entry point for this kind
    pub fn is_retainable(self) -> bool {
        matches!(
            self,
            ObjectKind::Instance
                | ObjectKind::Media
                | ObjectKind::Player
                | ObjectKind::MediaList
                | ObjectKind::ListPlayer
                | ObjectKind::Library
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Instance => "instance",
            ObjectKind::Media => "media",
            ObjectKind::Player => "media player",
            ObjectKind::MediaList => "media list",
            ObjectKind::ListPlayer => "media list player",
            ObjectKind::Library => "media library",
            ObjectKind::Discoverer => "media discoverer",
            ObjectKind::Log => "log",
            ObjectKind::LogIterator => "log iterator",
            ObjectKind::TrackDescriptionList => "track description list",
            ObjectKind::AudioOutputList => "audio output list",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a handle holds a native reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// One native reference, released on `release()` or drop
    Owned,
    /// Lent by libVLC; never released
    Borrowed,
}

/// One native object pointer plus its kind
pub struct Handle {
    ptr: *mut c_void,
    kind: ObjectKind,
    ownership: Ownership,
    api: Arc<LibVlc>,
}

// libVLC objects are internally synchronized
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

impl Handle {
    /// Take ownership of one native reference.
    ///
    /// A null `ptr` yields a dead handle.
    pub fn owned<T>(api: Arc<LibVlc>, kind: ObjectKind, ptr: *mut T) -> Self {
        Self {
            ptr: ptr.cast(),
            kind,
            ownership: Ownership::Owned,
            api,
        }
    }

    /// Rewrap a pointer without touching its refcount
    pub fn borrowed<T>(api: Arc<LibVlc>, kind: ObjectKind, ptr: *mut T) -> Self {
        Self {
            ptr: ptr.cast(),
            kind,
            ownership: Ownership::Borrowed,
            api,
        }
    }

    /// Wrap the result of a native constructor.
    ///
    /// Null means the constructor failed; the pending native error is taken
    /// immediately.
    pub(crate) fn from_constructor<T>(api: &Arc<LibVlc>, kind: ObjectKind, ptr: *mut T) -> Result<Self> {
        if ptr.is_null() {
            return Err(Error::native(api));
        }
        Ok(Self::owned(api.clone(), kind, ptr))
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn api(&self) -> &Arc<LibVlc> {
        &self.api
    }

    /// Whether the handle still refers to a native object
    pub fn is_live(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Raw pointer, null once dead
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }

    /// Typed pointer for a native call; fails on a dead handle
    pub fn cast<T>(&self) -> Result<*mut T> {
        if self.ptr.is_null() {
            return Err(Error::InvalidHandle(self.kind));
        }
        Ok(self.ptr.cast())
    }

    /// Acquire another native reference and return a new owner for it
    pub fn retain(&self) -> Result<Handle> {
        let ptr = self.cast::<c_void>()?;
        let api = &self.api;

        match self.kind {
            ObjectKind::Instance => native!(api, libvlc_retain(ptr.cast())),
            ObjectKind::Media => native!(api, libvlc_media_retain(ptr.cast())),
            ObjectKind::Player => native!(api, libvlc_media_player_retain(ptr.cast())),
            ObjectKind::MediaList => native!(api, libvlc_media_list_retain(ptr.cast())),
            ObjectKind::ListPlayer => native!(api, libvlc_media_list_player_retain(ptr.cast())),
            ObjectKind::Library => native!(api, libvlc_media_library_retain(ptr.cast())),
            kind => return Err(Error::NotRetainable(kind)),
        }

        Ok(Handle::owned(self.api.clone(), self.kind, ptr))
    }

    /// Give back the native reference this handle owns.
    ///
    /// Idempotent: a dead handle returns `Ok(())`. A borrowed handle only
    /// goes dead. The native object may survive if other owners remain.
    pub fn release(&mut self) -> Result<()> {
        if self.ptr.is_null() {
            return Ok(());
        }

        if self.ownership == Ownership::Owned {
            self.release_native(self.ptr)?;
        }

        self.ptr = ptr::null_mut();
        Ok(())
    }

    fn release_native(&self, ptr: *mut c_void) -> Result<()> {
        let api = &self.api;

        match self.kind {
            ObjectKind::Instance => native!(api, libvlc_release(ptr.cast())),
            ObjectKind::Media => native!(api, libvlc_media_release(ptr.cast())),
            ObjectKind::Player => native!(api, libvlc_media_player_release(ptr.cast())),
            ObjectKind::MediaList => native!(api, libvlc_media_list_release(ptr.cast())),
            ObjectKind::ListPlayer => native!(api, libvlc_media_list_player_release(ptr.cast())),
            ObjectKind::Library => native!(api, libvlc_media_library_release(ptr.cast())),
            ObjectKind::Discoverer => native!(api, libvlc_media_discoverer_release(ptr.cast())),
            ObjectKind::Log => native!(api, libvlc_log_close(ptr.cast())),
            ObjectKind::LogIterator => native!(api, libvlc_log_iterator_free(ptr.cast())),
            ObjectKind::AudioOutputList => native!(api, libvlc_audio_output_list_release(ptr.cast())),
            ObjectKind::TrackDescriptionList => {
                // Renamed after 1.1; either name frees the whole chain
                if api.symbols().libvlc_track_description_list_release.is_some() {
                    native!(api, libvlc_track_description_list_release(ptr.cast()))
                } else {
                    native!(api, libvlc_track_description_release(ptr.cast()))
                }
            }
        }

        Ok(())
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("Failed to release {} handle: {}", self.kind, e);
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.kind)
            .field("ptr", &self.ptr)
            .field("ownership", &self.ownership)
            .finish()
    }
}

/// Accessors shared by every facade wrapping a `handle` field
macro_rules! facade_handle {
    ($facade:ident, $raw:ty) => {
        impl $facade {
            pub(crate) fn raw(&self) -> $crate::error::Result<*mut $raw> {
                self.handle.cast()
            }

            pub(crate) fn api(&self) -> &std::sync::Arc<$crate::ffi::LibVlc> {
                self.handle.api()
            }

            /// Whether the native object is still held
            pub fn is_live(&self) -> bool {
                self.handle.is_live()
            }

            /// Underlying handle
            pub fn handle(&self) -> &$crate::handle::Handle {
                &self.handle
            }
        }
    };
}
