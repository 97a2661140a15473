//! Media player: transport, video, audio and memory rendering

use std::ffi::{c_int, c_uint, c_void};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{check_status, Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::{
    c_string, libvlc_media_player_t, libvlc_video_display_cb, libvlc_video_lock_cb, libvlc_video_unlock_cb,
    opt_c_string, opt_ptr, path_c_string,
};
use crate::handle::{Handle, ObjectKind};
use crate::media::Media;
use crate::render::{display_trampoline, lock_trampoline, unlock_trampoline, RenderSlot, VideoFormat, VideoRenderer};
use crate::track::TrackDescriptionList;
use crate::types::{AdjustOption, AudioChannel, AudioDevice, LogoOption, MarqueeOption, MediaState};

/// Plays one media at a time
#[derive(Debug)]
pub struct Player {
    events: OnceCell<EventManager>,
    handle: Handle,
    // Dropped after the handle: libVLC may call into the slot until release
    render: Arc<RenderSlot>,
}

facade_handle!(Player, libvlc_media_player_t);

impl Player {
    pub(crate) fn from_handle(handle: Handle) -> Self {
        Self {
            events: OnceCell::new(),
            handle,
            render: Arc::new(RenderSlot::default()),
        }
    }

    /// Another owner of the same native player, sharing its renderer slot
    pub fn retain(&self) -> Result<Player> {
        Ok(Self {
            events: OnceCell::new(),
            handle: self.handle.retain()?,
            render: self.render.clone(),
        })
    }

    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    pub(crate) fn render_slot(&self) -> &Arc<RenderSlot> {
        &self.render
    }

    /// `MediaPlayer*` events
    pub fn events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::Player, || {
            Ok(native!(api, libvlc_media_player_event_manager(self.raw()?)))
        })
    }

    // =========================================================================
    // Media and transport
    // =========================================================================

    /// Replace the current media; the player takes its own reference
    pub fn set_media(&self, media: &Media) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_media(self.raw()?, media.raw()?));
        Ok(())
    }

    /// Current media, as a new owned reference
    pub fn media(&self) -> Result<Option<Media>> {
        let api = self.api();
        let media = native!(api, libvlc_media_player_get_media(self.raw()?));
        Ok(Media::from_returned(api, media))
    }

    pub fn play(&self) -> Result<()> {
        let status = native!(self.api(), libvlc_media_player_play(self.raw()?));
        check_status(self.api(), status)
    }

    pub fn set_pause(&self, paused: bool) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_pause(self.raw()?, paused as c_int));
        Ok(())
    }

    /// Toggle pause
    pub fn pause(&self) -> Result<()> {
        native!(self.api(), libvlc_media_player_pause(self.raw()?));
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        native!(self.api(), libvlc_media_player_stop(self.raw()?));
        Ok(())
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_player_is_playing(self.raw()?)) != 0)
    }

    pub fn will_play(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_player_will_play(self.raw()?)) != 0)
    }

    pub fn state(&self) -> Result<MediaState> {
        let raw = native!(self.api(), libvlc_media_player_get_state(self.raw()?));
        Ok(MediaState::from_native(raw))
    }

    pub fn is_seekable(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_player_is_seekable(self.raw()?)) != 0)
    }

    pub fn can_pause(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_media_player_can_pause(self.raw()?)) != 0)
    }

    /// Display the next frame, if paused and supported
    pub fn next_frame(&self) -> Result<()> {
        native!(self.api(), libvlc_media_player_next_frame(self.raw()?));
        Ok(())
    }

    // =========================================================================
    // Timing
    // =========================================================================

    /// Length in milliseconds, -1 without media
    pub fn length(&self) -> Result<i64> {
        Ok(native!(self.api(), libvlc_media_player_get_length(self.raw()?)))
    }

    /// Playback time in milliseconds, -1 without media
    pub fn time(&self) -> Result<i64> {
        Ok(native!(self.api(), libvlc_media_player_get_time(self.raw()?)))
    }

    pub fn set_time(&self, ms: i64) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_time(self.raw()?, ms));
        Ok(())
    }

    /// Position in `[0, 1]`, -1 without media
    pub fn position(&self) -> Result<f32> {
        Ok(native!(self.api(), libvlc_media_player_get_position(self.raw()?)))
    }

    pub fn set_position(&self, position: f32) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_position(self.raw()?, position));
        Ok(())
    }

    pub fn rate(&self) -> Result<f32> {
        Ok(native!(self.api(), libvlc_media_player_get_rate(self.raw()?)))
    }

    /// Playback speed; 1.0 is normal
    pub fn set_rate(&self, rate: f32) -> Result<()> {
        let status = native!(self.api(), libvlc_media_player_set_rate(self.raw()?, rate));
        check_status(self.api(), status)
    }

    pub fn fps(&self) -> Result<f32> {
        Ok(native!(self.api(), libvlc_media_player_get_fps(self.raw()?)))
    }

    // =========================================================================
    // Titles and chapters
    // =========================================================================

    pub fn title(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_media_player_get_title(self.raw()?)))
    }

    pub fn set_title(&self, title: i32) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_title(self.raw()?, title));
        Ok(())
    }

    pub fn title_count(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_media_player_get_title_count(self.raw()?)))
    }

    pub fn title_description(&self) -> Result<TrackDescriptionList> {
        let api = self.api();
        let head = native!(api, libvlc_video_get_title_description(self.raw()?));
        Ok(TrackDescriptionList::from_raw(api.clone(), head))
    }

    pub fn chapter(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_media_player_get_chapter(self.raw()?)))
    }

    pub fn set_chapter(&self, chapter: i32) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_chapter(self.raw()?, chapter));
        Ok(())
    }

    pub fn chapter_count(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_media_player_get_chapter_count(self.raw()?)))
    }

    pub fn chapter_count_for_title(&self, title: i32) -> Result<i32> {
        Ok(native!(self.api(), libvlc_media_player_get_chapter_count_for_title(self.raw()?, title)))
    }

    pub fn chapter_description(&self, title: i32) -> Result<TrackDescriptionList> {
        let api = self.api();
        let head = native!(api, libvlc_video_get_chapter_description(self.raw()?, title));
        Ok(TrackDescriptionList::from_raw(api.clone(), head))
    }

    pub fn previous_chapter(&self) -> Result<()> {
        native!(self.api(), libvlc_media_player_previous_chapter(self.raw()?));
        Ok(())
    }

    pub fn next_chapter(&self) -> Result<()> {
        native!(self.api(), libvlc_media_player_next_chapter(self.raw()?));
        Ok(())
    }

    // =========================================================================
    // Window binding
    // =========================================================================

    /// Render into an X11 window
    pub fn set_xwindow(&self, drawable: u32) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_xwindow(self.raw()?, drawable));
        Ok(())
    }

    pub fn xwindow(&self) -> Result<u32> {
        Ok(native!(self.api(), libvlc_media_player_get_xwindow(self.raw()?)))
    }

    /// Render into a Win32 window; `hwnd` must outlive playback
    pub fn set_hwnd(&self, hwnd: *mut c_void) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_hwnd(self.raw()?, hwnd));
        Ok(())
    }

    pub fn hwnd(&self) -> Result<*mut c_void> {
        Ok(native!(self.api(), libvlc_media_player_get_hwnd(self.raw()?)))
    }

    /// Render into a Cocoa view
    pub fn set_nsobject(&self, view: *mut c_void) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_nsobject(self.raw()?, view));
        Ok(())
    }

    pub fn nsobject(&self) -> Result<*mut c_void> {
        Ok(native!(self.api(), libvlc_media_player_get_nsobject(self.raw()?)))
    }

    /// Render into a Carbon AGL drawable
    pub fn set_agl(&self, drawable: u32) -> Result<()> {
        native!(self.api(), libvlc_media_player_set_agl(self.raw()?, drawable));
        Ok(())
    }

    pub fn agl(&self) -> Result<u32> {
        Ok(native!(self.api(), libvlc_media_player_get_agl(self.raw()?)))
    }

    // =========================================================================
    // Memory rendering
    // =========================================================================

    /// Decode into memory handed out by `renderer`.
    ///
    /// Replacing an installed renderer is atomic with respect to frames in
    /// flight. Takes effect for video outputs created after the call.
    pub fn set_renderer(&self, renderer: Arc<dyn VideoRenderer>) -> Result<()> {
        let raw = self.raw()?;
        let previous = self.render.replace(Some(renderer));

        if previous.is_none() {
            if let Err(e) = self.register_callbacks(raw) {
                self.render.replace(None);
                return Err(e);
            }
        }

        log::debug!("Installed video renderer on player {:?}", raw);
        Ok(())
    }

    fn register_callbacks(&self, raw: *mut libvlc_media_player_t) -> Result<()> {
        native!(
            self.api(),
            libvlc_video_set_callbacks(
                raw,
                Some(lock_trampoline as libvlc_video_lock_cb),
                Some(unlock_trampoline as libvlc_video_unlock_cb),
                Some(display_trampoline as libvlc_video_display_cb),
                self.render.opaque(),
            )
        );
        Ok(())
    }

    /// Drop the installed renderer; later frames get no buffer
    pub fn clear_renderer(&self) -> Option<Arc<dyn VideoRenderer>> {
        self.render.replace(None)
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_set()
    }

    /// Frames displayed through the installed renderers so far
    pub fn frames_rendered(&self) -> u64 {
        self.render.frames()
    }

    /// Pixel layout libVLC decodes into for memory rendering
    pub fn set_video_format(&self, format: &VideoFormat) -> Result<()> {
        let chroma = format.chroma_cstr();
        native!(
            self.api(),
            libvlc_video_set_format(
                self.raw()?,
                chroma.as_ptr().cast(),
                format.width,
                format.height,
                format.pitch,
            )
        );
        Ok(())
    }

    // =========================================================================
    // Video
    // =========================================================================

    /// Number of video outputs
    pub fn has_vout(&self) -> Result<u32> {
        Ok(native!(self.api(), libvlc_media_player_has_vout(self.raw()?)))
    }

    pub fn toggle_fullscreen(&self) -> Result<()> {
        native!(self.api(), libvlc_toggle_fullscreen(self.raw()?));
        Ok(())
    }

    pub fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        native!(self.api(), libvlc_set_fullscreen(self.raw()?, fullscreen as c_int));
        Ok(())
    }

    pub fn is_fullscreen(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_get_fullscreen(self.raw()?)) != 0)
    }

    /// Let libVLC handle key events on its own window
    pub fn set_key_input(&self, enabled: bool) -> Result<()> {
        native!(self.api(), libvlc_video_set_key_input(self.raw()?, enabled as c_uint));
        Ok(())
    }

    pub fn set_mouse_input(&self, enabled: bool) -> Result<()> {
        native!(self.api(), libvlc_video_set_mouse_input(self.raw()?, enabled as c_uint));
        Ok(())
    }

    /// Pixel size of video output `num` as `(width, height)`
    pub fn video_size(&self, num: u32) -> Result<(u32, u32)> {
        let (mut width, mut height) = (0, 0);
        let status = native!(self.api(), libvlc_video_get_size(self.raw()?, num, &mut width, &mut height));
        check_status(self.api(), status)?;
        Ok((width, height))
    }

    /// Mouse position over video output `num` as `(x, y)`
    pub fn cursor(&self, num: u32) -> Result<(i32, i32)> {
        let (mut x, mut y) = (0, 0);
        let status = native!(self.api(), libvlc_video_get_cursor(self.raw()?, num, &mut x, &mut y));
        check_status(self.api(), status)?;
        Ok((x, y))
    }

    /// Zoom factor, 0 for fit-to-window
    pub fn scale(&self) -> Result<f32> {
        Ok(native!(self.api(), libvlc_video_get_scale(self.raw()?)))
    }

    pub fn set_scale(&self, scale: f32) -> Result<()> {
        native!(self.api(), libvlc_video_set_scale(self.raw()?, scale));
        Ok(())
    }

    /// Forced aspect ratio such as `"16:9"`, `None` for the source ratio
    pub fn aspect_ratio(&self) -> Result<Option<String>> {
        let api = self.api();
        let text = native!(api, libvlc_video_get_aspect_ratio(self.raw()?));
        Ok(api.take_string(text))
    }

    pub fn set_aspect_ratio(&self, ratio: Option<&str>) -> Result<()> {
        let ratio = opt_c_string(ratio)?;
        native!(self.api(), libvlc_video_set_aspect_ratio(self.raw()?, opt_ptr(&ratio)));
        Ok(())
    }

    pub fn crop_geometry(&self) -> Result<Option<String>> {
        let api = self.api();
        let text = native!(api, libvlc_video_get_crop_geometry(self.raw()?));
        Ok(api.take_string(text))
    }

    pub fn set_crop_geometry(&self, geometry: Option<&str>) -> Result<()> {
        let geometry = opt_c_string(geometry)?;
        native!(self.api(), libvlc_video_set_crop_geometry(self.raw()?, opt_ptr(&geometry)));
        Ok(())
    }

    /// Deinterlace filter name, or `None` to disable
    pub fn set_deinterlace(&self, mode: Option<&str>) -> Result<()> {
        let mode = opt_c_string(mode)?;
        native!(self.api(), libvlc_video_set_deinterlace(self.raw()?, opt_ptr(&mode)));
        Ok(())
    }

    pub fn teletext(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_teletext(self.raw()?)))
    }

    pub fn set_teletext(&self, page: i32) -> Result<()> {
        native!(self.api(), libvlc_video_set_teletext(self.raw()?, page));
        Ok(())
    }

    pub fn toggle_teletext(&self) -> Result<()> {
        native!(self.api(), libvlc_toggle_teletext(self.raw()?));
        Ok(())
    }

    /// Save a picture of video output `num`; `SnapshotTaken` reports the file
    pub fn take_snapshot(&self, num: u32, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let path = path_c_string(path.as_ref())?;
        let status = native!(
            self.api(),
            libvlc_video_take_snapshot(self.raw()?, num, path.as_ptr(), width, height)
        );
        check_status(self.api(), status)
    }

    pub fn video_track_count(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_track_count(self.raw()?)))
    }

    pub fn video_track_description(&self) -> Result<TrackDescriptionList> {
        let api = self.api();
        let head = native!(api, libvlc_video_get_track_description(self.raw()?));
        Ok(TrackDescriptionList::from_raw(api.clone(), head))
    }

    pub fn video_track(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_track(self.raw()?)))
    }

    pub fn set_video_track(&self, track: i32) -> Result<()> {
        let status = native!(self.api(), libvlc_video_set_track(self.raw()?, track));
        check_status(self.api(), status)
    }

    // =========================================================================
    // Subtitles
    // =========================================================================

    pub fn spu(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_spu(self.raw()?)))
    }

    pub fn spu_count(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_spu_count(self.raw()?)))
    }

    pub fn spu_description(&self) -> Result<TrackDescriptionList> {
        let api = self.api();
        let head = native!(api, libvlc_video_get_spu_description(self.raw()?));
        Ok(TrackDescriptionList::from_raw(api.clone(), head))
    }

    pub fn set_spu(&self, spu: u32) -> Result<()> {
        let status = native!(self.api(), libvlc_video_set_spu(self.raw()?, spu));
        check_status(self.api(), status)
    }

    /// Load an external subtitle file
    pub fn set_subtitle_file(&self, path: &str) -> Result<()> {
        let api = self.api();
        let path = c_string(path)?;
        // Boolean success
        if native!(api, libvlc_video_set_subtitle_file(self.raw()?, path.as_ptr())) == 0 {
            return Err(Error::native(api));
        }
        Ok(())
    }

    // =========================================================================
    // Overlays and filters
    // =========================================================================

    pub fn marquee_int(&self, option: MarqueeOption) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_marquee_int(self.raw()?, option.as_raw() as c_uint)))
    }

    pub fn marquee_string(&self, option: MarqueeOption) -> Result<Option<String>> {
        let api = self.api();
        let text = native!(api, libvlc_video_get_marquee_string(self.raw()?, option.as_raw() as c_uint));
        Ok(api.take_string(text))
    }

    pub fn set_marquee_int(&self, option: MarqueeOption, value: i32) -> Result<()> {
        native!(self.api(), libvlc_video_set_marquee_int(self.raw()?, option.as_raw() as c_uint, value));
        Ok(())
    }

    pub fn set_marquee_string(&self, option: MarqueeOption, value: &str) -> Result<()> {
        let value = c_string(value)?;
        native!(
            self.api(),
            libvlc_video_set_marquee_string(self.raw()?, option.as_raw() as c_uint, value.as_ptr())
        );
        Ok(())
    }

    pub fn logo_int(&self, option: LogoOption) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_logo_int(self.raw()?, option.as_raw() as c_uint)))
    }

    pub fn set_logo_int(&self, option: LogoOption, value: i32) -> Result<()> {
        native!(self.api(), libvlc_video_set_logo_int(self.raw()?, option.as_raw() as c_uint, value));
        Ok(())
    }

    /// `LogoOption::File` takes `"file,delay,alpha;file,..."`
    pub fn set_logo_string(&self, option: LogoOption, value: &str) -> Result<()> {
        let value = c_string(value)?;
        native!(
            self.api(),
            libvlc_video_set_logo_string(self.raw()?, option.as_raw() as c_uint, value.as_ptr())
        );
        Ok(())
    }

    pub fn adjust_int(&self, option: AdjustOption) -> Result<i32> {
        Ok(native!(self.api(), libvlc_video_get_adjust_int(self.raw()?, option.as_raw() as c_uint)))
    }

    pub fn set_adjust_int(&self, option: AdjustOption, value: i32) -> Result<()> {
        native!(self.api(), libvlc_video_set_adjust_int(self.raw()?, option.as_raw() as c_uint, value));
        Ok(())
    }

    pub fn adjust_float(&self, option: AdjustOption) -> Result<f32> {
        Ok(native!(self.api(), libvlc_video_get_adjust_float(self.raw()?, option.as_raw() as c_uint)))
    }

    pub fn set_adjust_float(&self, option: AdjustOption, value: f32) -> Result<()> {
        native!(self.api(), libvlc_video_set_adjust_float(self.raw()?, option.as_raw() as c_uint, value));
        Ok(())
    }

    // =========================================================================
    // Audio
    // =========================================================================

    /// Select an audio output module by name (see `Instance::audio_outputs`)
    pub fn set_audio_output(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_audio_output_set(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    pub fn set_audio_output_device(&self, output: &str, device: &str) -> Result<()> {
        let output = c_string(output)?;
        let device = c_string(device)?;
        native!(
            self.api(),
            libvlc_audio_output_device_set(self.raw()?, output.as_ptr(), device.as_ptr())
        );
        Ok(())
    }

    /// Speaker layout; `None` for a value this binding does not know
    pub fn audio_output_device_type(&self) -> Result<Option<AudioDevice>> {
        let raw = native!(self.api(), libvlc_audio_output_get_device_type(self.raw()?));
        Ok(AudioDevice::from_raw(raw))
    }

    pub fn set_audio_output_device_type(&self, device: AudioDevice) -> Result<()> {
        native!(self.api(), libvlc_audio_output_set_device_type(self.raw()?, device.as_raw()));
        Ok(())
    }

    pub fn toggle_mute(&self) -> Result<()> {
        native!(self.api(), libvlc_audio_toggle_mute(self.raw()?));
        Ok(())
    }

    pub fn is_muted(&self) -> Result<bool> {
        Ok(native!(self.api(), libvlc_audio_get_mute(self.raw()?)) != 0)
    }

    pub fn set_mute(&self, muted: bool) -> Result<()> {
        native!(self.api(), libvlc_audio_set_mute(self.raw()?, muted as c_int));
        Ok(())
    }

    /// Volume in percent, 100 is nominal
    pub fn volume(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_audio_get_volume(self.raw()?)))
    }

    pub fn set_volume(&self, volume: i32) -> Result<()> {
        let status = native!(self.api(), libvlc_audio_set_volume(self.raw()?, volume));
        check_status(self.api(), status)
    }

    pub fn audio_track_count(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_audio_get_track_count(self.raw()?)))
    }

    pub fn audio_track_description(&self) -> Result<TrackDescriptionList> {
        let api = self.api();
        let head = native!(api, libvlc_audio_get_track_description(self.raw()?));
        Ok(TrackDescriptionList::from_raw(api.clone(), head))
    }

    pub fn audio_track(&self) -> Result<i32> {
        Ok(native!(self.api(), libvlc_audio_get_track(self.raw()?)))
    }

    pub fn set_audio_track(&self, track: i32) -> Result<()> {
        let status = native!(self.api(), libvlc_audio_set_track(self.raw()?, track));
        check_status(self.api(), status)
    }

    pub fn audio_channel(&self) -> Result<Option<AudioChannel>> {
        let raw = native!(self.api(), libvlc_audio_get_channel(self.raw()?));
        Ok(AudioChannel::from_raw(raw))
    }

    pub fn set_audio_channel(&self, channel: AudioChannel) -> Result<()> {
        let status = native!(self.api(), libvlc_audio_set_channel(self.raw()?, channel.as_raw()));
        check_status(self.api(), status)
    }

    /// Audio delay in microseconds
    pub fn audio_delay(&self) -> Result<i64> {
        Ok(native!(self.api(), libvlc_audio_get_delay(self.raw()?)))
    }

    pub fn set_audio_delay(&self, delay_us: i64) -> Result<()> {
        let status = native!(self.api(), libvlc_audio_set_delay(self.raw()?, delay_us));
        check_status(self.api(), status)
    }
}
