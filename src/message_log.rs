//! Instance message log

use std::ffi::{c_char, CStr};
use std::fmt;

use crate::error::{Error, Result};
use crate::ffi::{libvlc_log_iterator_t, libvlc_log_message_t, libvlc_log_t};
use crate::handle::{Handle, ObjectKind};
use crate::types::LogPriority;

/// Messages libVLC logged for an instance.
///
/// Closed on release; not retainable.
#[derive(Debug)]
pub struct Log {
    handle: Handle,
}

facade_handle!(Log, libvlc_log_t);

impl Log {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn release(&mut self) -> Result<()> {
        self.handle.release()
    }

    /// Messages currently held
    pub fn count(&self) -> Result<usize> {
        Ok(native!(self.api(), libvlc_log_count(self.raw()?)) as usize)
    }

    pub fn clear(&self) -> Result<()> {
        native!(self.api(), libvlc_log_clear(self.raw()?));
        Ok(())
    }

    /// Walk the messages held right now
    pub fn iter(&self) -> Result<LogIterator<'_>> {
        let api = self.api();
        let iterator = native!(api, libvlc_log_get_iterator(self.raw()?));
        let handle = Handle::from_constructor(api, ObjectKind::LogIterator, iterator)?;
        Ok(LogIterator { handle, _log: self })
    }

    /// Copy out every message, failing on the first native error
    pub fn messages(&self) -> Result<Vec<LogMessage>> {
        let mut iterator = self.iter()?;
        let mut messages = Vec::new();
        while let Some(message) = iterator.next_message()? {
            messages.push(message);
        }
        Ok(messages)
    }
}

/// One log entry, copied out of the native buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// `None` for a severity this binding does not know
    pub severity: Option<LogPriority>,
    pub module_type: String,
    pub name: String,
    pub header: Option<String>,
    pub message: String,
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Some(LogPriority::Info) => "info",
            Some(LogPriority::Error) => "error",
            Some(LogPriority::Warning) => "warning",
            Some(LogPriority::Debug) => "debug",
            None => "unknown",
        };
        write!(f, "[{} {}] {}: {}", self.module_type, self.name, severity, self.message)
    }
}

fn copy_text(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

impl From<&libvlc_log_message_t> for LogMessage {
    fn from(raw: &libvlc_log_message_t) -> Self {
        Self {
            severity: LogPriority::from_raw(raw.i_severity),
            module_type: copy_text(raw.psz_type).unwrap_or_default(),
            name: copy_text(raw.psz_name).unwrap_or_default(),
            header: copy_text(raw.psz_header),
            message: copy_text(raw.psz_message).unwrap_or_default(),
        }
    }
}

/// Cursor over a [`Log`], freed on drop
pub struct LogIterator<'a> {
    handle: Handle,
    _log: &'a Log,
}

impl LogIterator<'_> {
    pub fn has_next(&self) -> Result<bool> {
        let raw: *mut libvlc_log_iterator_t = self.handle.cast()?;
        Ok(native!(self.handle.api(), libvlc_log_iterator_has_next(raw)) != 0)
    }

    /// Next message, `None` once the log is exhausted
    pub fn next_message(&mut self) -> Result<Option<LogMessage>> {
        if !self.has_next()? {
            return Ok(None);
        }

        let api = self.handle.api();
        let raw: *mut libvlc_log_iterator_t = self.handle.cast()?;
        let mut buffer = libvlc_log_message_t::default();
        let filled = native!(api, libvlc_log_iterator_next(raw, &mut buffer));
        if filled.is_null() {
            return Err(Error::native(api));
        }

        // Strings point into the log and are only valid until the next call
        Ok(Some(LogMessage::from(unsafe { &*filled })))
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Iterator for LogIterator<'_> {
    type Item = LogMessage;

    fn next(&mut self) -> Option<LogMessage> {
        match self.next_message() {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Stopping log iteration: {}", e);
                None
            }
        }
    }
}

impl fmt::Debug for LogIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogIterator").field("handle", &self.handle).finish()
    }
}
