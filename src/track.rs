//! Values and native lists read out of libVLC memory

use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::ffi::{
    libvlc_audio_output_t, libvlc_media_stats_t, libvlc_media_track_info_t, libvlc_track_description_t,
    LibVlc,
};
use crate::handle::{Handle, ObjectKind};
use crate::types::TrackType;

/// Input, demux, decode and output counters of a media
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MediaStats {
    pub read_bytes: i32,
    pub input_bitrate: f32,
    pub demux_read_bytes: i32,
    pub demux_bitrate: f32,
    pub demux_corrupted: i32,
    pub demux_discontinuity: i32,
    pub decoded_video: i32,
    pub decoded_audio: i32,
    pub displayed_pictures: i32,
    pub lost_pictures: i32,
    pub played_abuffers: i32,
    pub lost_abuffers: i32,
    pub sent_packets: i32,
    pub sent_bytes: i32,
    pub send_bitrate: f32,
}

impl From<libvlc_media_stats_t> for MediaStats {
    fn from(raw: libvlc_media_stats_t) -> Self {
        Self {
            read_bytes: raw.i_read_bytes,
            input_bitrate: raw.f_input_bitrate,
            demux_read_bytes: raw.i_demux_read_bytes,
            demux_bitrate: raw.f_demux_bitrate,
            demux_corrupted: raw.i_demux_corrupted,
            demux_discontinuity: raw.i_demux_discontinuity,
            decoded_video: raw.i_decoded_video,
            decoded_audio: raw.i_decoded_audio,
            displayed_pictures: raw.i_displayed_pictures,
            lost_pictures: raw.i_lost_pictures,
            played_abuffers: raw.i_played_abuffers,
            lost_abuffers: raw.i_lost_abuffers,
            sent_packets: raw.i_sent_packets,
            sent_bytes: raw.i_sent_bytes,
            send_bitrate: raw.f_send_bitrate,
        }
    }
}

/// Type-specific half of a [`TrackInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDetails {
    Audio { channels: u32, rate: u32 },
    Video { height: u32, width: u32 },
    None,
}

/// One elementary stream of a parsed media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Codec four-character code, little-endian
    pub codec: u32,
    pub id: i32,
    /// `None` for a track type this binding does not know
    pub track_type: Option<TrackType>,
    pub profile: i32,
    pub level: i32,
    pub details: TrackDetails,
}

impl TrackInfo {
    /// Codec as text, e.g. `"h264"`
    pub fn codec_name(&self) -> String {
        self.codec
            .to_le_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect()
    }
}

impl From<&libvlc_media_track_info_t> for TrackInfo {
    fn from(raw: &libvlc_media_track_info_t) -> Self {
        let track_type = TrackType::from_raw(raw.i_type);
        let details = match track_type {
            Some(TrackType::Audio) => TrackDetails::Audio {
                channels: raw.u.first,
                rate: raw.u.second,
            },
            Some(TrackType::Video) => TrackDetails::Video {
                height: raw.u.first,
                width: raw.u.second,
            },
            _ => TrackDetails::None,
        };

        Self {
            codec: raw.i_codec,
            id: raw.i_id,
            track_type,
            profile: raw.i_profile,
            level: raw.i_level,
            details,
        }
    }
}

fn borrowed_text<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        return Cow::Borrowed("");
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
}

// =============================================================================
// Track descriptions
// =============================================================================

/// Chain of `(id, name)` track descriptions owned until drop
pub struct TrackDescriptionList {
    handle: Handle,
}

impl TrackDescriptionList {
    /// Take ownership of a chain head; null is an empty list
    pub(crate) fn from_raw(api: Arc<LibVlc>, head: *mut libvlc_track_description_t) -> Self {
        Self {
            handle: Handle::owned(api, ObjectKind::TrackDescriptionList, head),
        }
    }

    pub fn iter(&self) -> TrackDescriptions<'_> {
        TrackDescriptions {
            next: self.handle.as_ptr().cast(),
            _list: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.as_ptr().is_null()
    }

    /// Owned `(id, name)` pairs
    pub fn to_vec(&self) -> Vec<(i32, String)> {
        self.iter().map(|d| (d.id(), d.name().into_owned())).collect()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl<'a> IntoIterator for &'a TrackDescriptionList {
    type Item = TrackDescription<'a>;
    type IntoIter = TrackDescriptions<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for TrackDescriptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One entry of a [`TrackDescriptionList`]
#[derive(Clone, Copy)]
pub struct TrackDescription<'a> {
    raw: &'a libvlc_track_description_t,
}

impl<'a> TrackDescription<'a> {
    pub fn id(&self) -> i32 {
        self.raw.i_id
    }

    pub fn name(&self) -> Cow<'a, str> {
        borrowed_text(self.raw.psz_name)
    }
}

impl fmt::Debug for TrackDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id(), self.name())
    }
}

pub struct TrackDescriptions<'a> {
    next: *const libvlc_track_description_t,
    _list: PhantomData<&'a TrackDescriptionList>,
}

impl<'a> Iterator for TrackDescriptions<'a> {
    type Item = TrackDescription<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // The chain is immutable and lives as long as the list
        let raw = unsafe { self.next.as_ref() }?;
        self.next = raw.p_next;
        Some(TrackDescription { raw })
    }
}

// =============================================================================
// Audio outputs
// =============================================================================

/// Audio output modules available to an instance
pub struct AudioOutputList {
    handle: Handle,
}

impl AudioOutputList {
    pub(crate) fn from_raw(api: Arc<LibVlc>, head: *mut libvlc_audio_output_t) -> Self {
        Self {
            handle: Handle::owned(api, ObjectKind::AudioOutputList, head),
        }
    }

    pub fn iter(&self) -> AudioOutputs<'_> {
        AudioOutputs {
            next: self.handle.as_ptr().cast(),
            _list: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.as_ptr().is_null()
    }

    /// Module names, e.g. `"alsa"`
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|o| o.name().into_owned()).collect()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl<'a> IntoIterator for &'a AudioOutputList {
    type Item = AudioOutput<'a>;
    type IntoIter = AudioOutputs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for AudioOutputList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[derive(Clone, Copy)]
pub struct AudioOutput<'a> {
    raw: &'a libvlc_audio_output_t,
}

impl<'a> AudioOutput<'a> {
    /// Module name passed to `Player::set_audio_output`
    pub fn name(&self) -> Cow<'a, str> {
        borrowed_text(self.raw.psz_name)
    }

    pub fn description(&self) -> Cow<'a, str> {
        borrowed_text(self.raw.psz_description)
    }
}

impl fmt::Debug for AudioOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

pub struct AudioOutputs<'a> {
    next: *const libvlc_audio_output_t,
    _list: PhantomData<&'a AudioOutputList>,
}

impl<'a> Iterator for AudioOutputs<'a> {
    type Item = AudioOutput<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = unsafe { self.next.as_ref() }?;
        self.next = raw.p_next;
        Some(AudioOutput { raw })
    }
}
