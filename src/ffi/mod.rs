//! Raw libVLC ABI
//!
//! Opaque object types, the `#[repr(C)]` records the binding reads out of
//! native memory, and the callback signatures handed to libVLC. Entry points
//! are not linked: they are resolved at runtime into a [`LibVlc`] table.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_float, c_int, c_uint, c_void, CString};
use std::path::Path;
use std::ptr;

use crate::error::{Error, Result};

/// Call a resolved libVLC entry point.
///
/// Fails the enclosing function with `Error::MissingSymbol` when the loaded
/// library does not export the entry point.
macro_rules! native {
    ($api:expr, $name:ident ( $($arg:expr),* $(,)? )) => {{
        let entry = $api
            .symbols()
            .$name
            .ok_or($crate::error::Error::MissingSymbol(stringify!($name)))?;
        #[allow(unused_unsafe)]
        let value = unsafe { entry($($arg),*) };
        value
    }};
}

mod api;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{LibVlc, Symbols};

/// Marshal a Rust string for libVLC
pub(crate) fn c_string(text: &str) -> Result<CString> {
    Ok(CString::new(text)?)
}

/// Marshal an optional string; `None` becomes a null pointer via [`opt_ptr`]
pub(crate) fn opt_c_string(text: Option<&str>) -> Result<Option<CString>> {
    text.map(c_string).transpose()
}

pub(crate) fn opt_ptr(text: &Option<CString>) -> *const c_char {
    text.as_ref().map_or(ptr::null(), |s| s.as_ptr())
}

/// libVLC takes file paths as UTF-8
pub(crate) fn path_c_string(path: &Path) -> Result<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::InvalidArgument(format!("path {} is not valid UTF-8", path.display())))?;
    c_string(text)
}

/// Owned argument vector plus the pointer array libVLC reads
pub(crate) struct CStringArray {
    _owned: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl CStringArray {
    pub(crate) fn new<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let owned = items
            .iter()
            .map(|s| c_string(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let pointers = owned.iter().map(|s| s.as_ptr()).collect();
        Ok(Self {
            _owned: owned,
            pointers,
        })
    }

    pub(crate) fn len(&self) -> c_int {
        self.pointers.len() as c_int
    }

    /// Null for an empty array
    pub(crate) fn as_ptr(&self) -> *const *const c_char {
        if self.pointers.is_empty() {
            ptr::null()
        } else {
            self.pointers.as_ptr()
        }
    }
}

// =============================================================================
// Opaque Objects
// =============================================================================

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque!(
    libvlc_instance_t,
    libvlc_media_t,
    libvlc_media_player_t,
    libvlc_media_list_t,
    libvlc_media_list_player_t,
    libvlc_media_library_t,
    libvlc_media_discoverer_t,
    libvlc_event_manager_t,
    libvlc_log_t,
    libvlc_log_iterator_t,
);

/// Milliseconds
pub type libvlc_time_t = i64;

// =============================================================================
// Events
// =============================================================================

/// Size of the payload union in `libvlc_event_t`
///
/// The largest members are the two-pointer VLM record and the 64-bit
/// integers; both fit in 16 bytes on every supported target.
pub const EVENT_PAYLOAD_LEN: usize = 16;

/// Native event record: tag, emitting object, payload union
#[repr(C)]
pub struct libvlc_event_t {
    pub type_: c_int,
    pub p_obj: *mut c_void,
    pub u: EventPayload,
}

/// Payload union, kept as raw bytes and decoded by tag
#[repr(C)]
#[derive(Clone, Copy)]
pub union EventPayload {
    pub bytes: [u8; EVENT_PAYLOAD_LEN],
    _align: [u64; EVENT_PAYLOAD_LEN / 8],
}

impl EventPayload {
    pub fn new(bytes: [u8; EVENT_PAYLOAD_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; EVENT_PAYLOAD_LEN] {
        unsafe { &self.bytes }
    }
}

pub type libvlc_callback_t = unsafe extern "C" fn(event: *const libvlc_event_t, data: *mut c_void);

// =============================================================================
// Video Memory Rendering
// =============================================================================

/// Number of picture planes libVLC hands to the lock callback
pub const PICTURE_PLANE_MAX: usize = 5;

pub type libvlc_video_lock_cb =
    unsafe extern "C" fn(opaque: *mut c_void, planes: *mut *mut c_void) -> *mut c_void;
pub type libvlc_video_unlock_cb =
    unsafe extern "C" fn(opaque: *mut c_void, picture: *mut c_void, planes: *const *mut c_void);
pub type libvlc_video_display_cb = unsafe extern "C" fn(opaque: *mut c_void, picture: *mut c_void);

// =============================================================================
// Value Records
// =============================================================================

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct libvlc_media_stats_t {
    pub i_read_bytes: c_int,
    pub f_input_bitrate: c_float,
    pub i_demux_read_bytes: c_int,
    pub f_demux_bitrate: c_float,
    pub i_demux_corrupted: c_int,
    pub i_demux_discontinuity: c_int,
    pub i_decoded_video: c_int,
    pub i_decoded_audio: c_int,
    pub i_displayed_pictures: c_int,
    pub i_lost_pictures: c_int,
    pub i_played_abuffers: c_int,
    pub i_lost_abuffers: c_int,
    pub i_sent_packets: c_int,
    pub i_sent_bytes: c_int,
    pub f_send_bitrate: c_float,
}

/// Audio or video half of `libvlc_media_track_info_t`
///
/// Video stores height before width.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct track_info_dims {
    pub first: c_uint,
    pub second: c_uint,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct libvlc_media_track_info_t {
    pub i_codec: u32,
    pub i_id: c_int,
    pub i_type: c_int,
    pub i_profile: c_int,
    pub i_level: c_int,
    pub u: track_info_dims,
}

#[repr(C)]
pub struct libvlc_track_description_t {
    pub i_id: c_int,
    pub psz_name: *mut c_char,
    pub p_next: *mut libvlc_track_description_t,
}

#[repr(C)]
pub struct libvlc_audio_output_t {
    pub psz_name: *mut c_char,
    pub psz_description: *mut c_char,
    pub p_next: *mut libvlc_audio_output_t,
}

/// Message record filled by `libvlc_log_iterator_next`
///
/// The caller provides the buffer and sets `sizeof_msg`; the string fields
/// point into the log and stay valid until the log is cleared or closed.
#[repr(C)]
pub struct libvlc_log_message_t {
    pub sizeof_msg: c_uint,
    pub i_severity: c_int,
    pub psz_type: *const c_char,
    pub psz_name: *const c_char,
    pub psz_header: *const c_char,
    pub psz_message: *const c_char,
}

impl Default for libvlc_log_message_t {
    fn default() -> Self {
        Self {
            sizeof_msg: std::mem::size_of::<Self>() as c_uint,
            i_severity: 0,
            psz_type: std::ptr::null(),
            psz_name: std::ptr::null(),
            psz_header: std::ptr::null(),
            psz_message: std::ptr::null(),
        }
    }
}
