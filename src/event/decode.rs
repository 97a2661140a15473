//! Payload decoding for `libvlc_event_t`

use std::ffi::c_char;
use std::io::Cursor;
use std::sync::Arc;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{EventData, EventType, PayloadShape};
use crate::discoverer::Discoverer;
use crate::ffi::{libvlc_media_discoverer_t, libvlc_media_t, LibVlc};
use crate::media::Media;
use crate::types::{MediaState, Meta};

/// Sequential little-endian reader over a payload union.
///
/// Reads past the end yield zero.
pub struct PayloadCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> PayloadCursor<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(payload),
        }
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.inner.position()
    }

    pub fn read_u32(&mut self) -> u32 {
        self.inner.read_u32::<LittleEndian>().unwrap_or(0)
    }

    pub fn read_i32(&mut self) -> i32 {
        self.inner.read_i32::<LittleEndian>().unwrap_or(0)
    }

    pub fn read_i64(&mut self) -> i64 {
        self.inner.read_i64::<LittleEndian>().unwrap_or(0)
    }

    pub fn read_f32(&mut self) -> f32 {
        self.inner.read_f32::<LittleEndian>().unwrap_or(0.0)
    }

    /// Boolean held in a 64-bit slot; only the low 32 bits (the native
    /// `int`) are significant
    pub fn read_flag(&mut self) -> bool {
        let slot = self.inner.read_u64::<LittleEndian>().unwrap_or(0);
        slot as u32 != 0
    }

    /// Native pointer, pointer-width
    pub fn read_pointer(&mut self) -> usize {
        #[cfg(target_pointer_width = "64")]
        let value = self.inner.read_u64::<LittleEndian>().unwrap_or(0) as usize;
        #[cfg(target_pointer_width = "32")]
        let value = self.inner.read_u32::<LittleEndian>().unwrap_or(0) as usize;
        value
    }
}

/// Decode a raw payload into the shape its tag implies.
///
/// Heap strings are copied and their native buffers freed here, so this
/// must run exactly once per delivered event. Object pointers become
/// borrowed facades.
pub fn decode(api: &Arc<LibVlc>, kind: EventType, payload: &[u8]) -> EventData {
    let mut cursor = PayloadCursor::new(payload);

    match kind.shape() {
        PayloadShape::None => EventData::None,
        PayloadShape::Meta => {
            let raw = cursor.read_u32() as i32;
            Meta::from_raw(raw).map_or(EventData::Unrecognized(raw), EventData::Meta)
        }
        PayloadShape::State => {
            let raw = cursor.read_u32() as i32;
            MediaState::from_raw(raw).map_or(EventData::Unrecognized(raw), EventData::State)
        }
        PayloadShape::Int64 => {
            let value = cursor.read_i64();
            match kind {
                EventType::MediaDurationChanged => EventData::Duration(value),
                EventType::MediaPlayerTimeChanged => EventData::Time(value),
                _ => EventData::Length(value),
            }
        }
        PayloadShape::Int32 => {
            let value = cursor.read_i32();
            match kind {
                EventType::MediaParsedChanged => EventData::Parsed(value),
                _ => EventData::Title(value),
            }
        }
        PayloadShape::Float32 => EventData::Position(cursor.read_f32()),
        PayloadShape::Flag => EventData::Flag(cursor.read_flag()),
        PayloadShape::Text => EventData::Text(take_string(api, &mut cursor)),
        PayloadShape::TextPair => {
            let media = take_string(api, &mut cursor);
            let instance = take_string(api, &mut cursor);
            EventData::Vlm { media, instance }
        }
        PayloadShape::Media => {
            let ptr = cursor.read_pointer() as *mut libvlc_media_t;
            EventData::Media(Media::borrowed(api.clone(), ptr))
        }
        PayloadShape::Discoverer => {
            let ptr = cursor.read_pointer() as *mut libvlc_media_discoverer_t;
            EventData::Discoverer(Discoverer::borrowed(api.clone(), ptr))
        }
    }
}

fn take_string(api: &LibVlc, cursor: &mut PayloadCursor<'_>) -> String {
    let ptr = cursor.read_pointer() as *mut c_char;
    api.take_string(ptr).unwrap_or_default()
}
