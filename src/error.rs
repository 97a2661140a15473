//! Error types for vlc-bridge
//!
//! libVLC reports failures through a sentinel return value plus a
//! thread-local error message. [`take_error`] is the only reader of that
//! slot: it must run right after the failing call, on the same thread,
//! before any other libVLC call overwrites the message.

use std::ffi::{c_int, CStr, NulError};

use thiserror::Error;

use crate::event::EventType;
use crate::ffi::LibVlc;
use crate::handle::ObjectKind;

/// Result type alias for vlc-bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when libVLC signalled failure without setting its error slot
const UNSPECIFIED_NATIVE_ERROR: &str = "libvlc reported a failure without an error message";

/// Error types for libVLC operations
#[derive(Error, Debug)]
pub enum Error {
    /// Operation on a released or null-backed object
    #[error("Invalid {0} handle")]
    InvalidHandle(ObjectKind),

    /// libVLC signalled failure
    #[error("libvlc error: {0}")]
    Native(String),

    /// Unknown subscription id or absent list item
    #[error("Not found: {0}")]
    NotFound(String),

    /// The object kind has no native retain entry point
    #[error("{0} handles cannot be retained")]
    NotRetainable(ObjectKind),

    /// Entry point missing from the loaded libVLC build
    #[error("libvlc symbol not available: {0}")]
    MissingSymbol(&'static str),

    /// libVLC could not be loaded
    #[error("Failed to load libvlc: {0}")]
    LibraryLoad(String),

    /// Argument cannot be marshaled for libVLC
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Event accessor does not match the event's payload shape
    #[error("{event} event does not carry {expected}")]
    EventMismatch {
        event: EventType,
        expected: &'static str,
    },
}

impl Error {
    /// Build a native error from the thread-local libVLC error slot
    pub fn native(api: &LibVlc) -> Self {
        Error::Native(take_error(api).unwrap_or_else(|| UNSPECIFIED_NATIVE_ERROR.to_string()))
    }

    /// Whether this error came from libVLC itself
    pub fn is_native(&self) -> bool {
        matches!(self, Error::Native(_))
    }
}

impl From<NulError> for Error {
    fn from(e: NulError) -> Self {
        Error::InvalidArgument(format!("string contains an interior NUL byte at {}", e.nul_position()))
    }
}

/// Take the pending libVLC error message for the current thread.
///
/// Copies the message into an owned string and clears the native slot,
/// which releases libVLC's buffer. Returns `None` when no error is pending.
pub fn take_error(api: &LibVlc) -> Option<String> {
    let errmsg = api.symbols().libvlc_errmsg?;

    let message = unsafe { errmsg() };
    if message.is_null() {
        return None;
    }

    let text = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();

    match api.symbols().libvlc_clearerr {
        Some(clearerr) => unsafe { clearerr() },
        None => log::warn!("libvlc_clearerr unavailable; error slot left set"),
    }

    Some(text)
}

/// Fail if a void libVLC call left an error behind
pub(crate) fn check_error(api: &LibVlc) -> Result<()> {
    match take_error(api) {
        Some(message) => Err(Error::Native(message)),
        None => Ok(()),
    }
}

/// Map the usual `0` / `-1` status return of a libVLC call
pub(crate) fn check_status(api: &LibVlc, status: c_int) -> Result<()> {
    if status != 0 {
        return Err(Error::native(api));
    }
    Ok(())
}
