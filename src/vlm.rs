//! VLM: broadcast and video-on-demand media managed by an instance
//!
//! Every VLM media is addressed by name. Operations on an unknown name fail
//! with the native error message.

use std::ffi::{c_char, c_float, c_int};

use crate::error::{check_status, Error, Result};
use crate::event::{cached_manager, EventManager};
use crate::ffi::{c_string, libvlc_instance_t, opt_c_string, opt_ptr, CStringArray, LibVlc};
use crate::handle::ObjectKind;
use crate::instance::Instance;

impl Instance {
    /// Add a broadcast with a single input
    pub fn vlm_add_broadcast<S: AsRef<str>>(
        &self,
        name: &str,
        input: &str,
        output: &str,
        options: &[S],
        enabled: bool,
        looped: bool,
    ) -> Result<()> {
        let name = c_string(name)?;
        let input = c_string(input)?;
        let output = c_string(output)?;
        let options = CStringArray::new(options)?;
        let status = native!(
            self.api(),
            libvlc_vlm_add_broadcast(
                self.raw()?,
                name.as_ptr(),
                input.as_ptr(),
                output.as_ptr(),
                options.len(),
                options.as_ptr(),
                enabled as c_int,
                looped as c_int,
            )
        );
        check_status(self.api(), status)
    }

    /// Add a video-on-demand media, optionally forcing a mux
    pub fn vlm_add_vod<S: AsRef<str>>(
        &self,
        name: &str,
        input: &str,
        options: &[S],
        enabled: bool,
        mux: Option<&str>,
    ) -> Result<()> {
        let name = c_string(name)?;
        let input = c_string(input)?;
        let options = CStringArray::new(options)?;
        let mux = opt_c_string(mux)?;
        let status = native!(
            self.api(),
            libvlc_vlm_add_vod(
                self.raw()?,
                name.as_ptr(),
                input.as_ptr(),
                options.len(),
                options.as_ptr(),
                enabled as c_int,
                opt_ptr(&mux),
            )
        );
        check_status(self.api(), status)
    }

    pub fn vlm_delete(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_vlm_del_media(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    pub fn vlm_set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(
            self.api(),
            libvlc_vlm_set_enabled(self.raw()?, name.as_ptr(), enabled as c_int)
        );
        check_status(self.api(), status)
    }

    pub fn vlm_set_output(&self, name: &str, output: &str) -> Result<()> {
        self.vlm_with_text(name, output, |api, raw, name, output| {
            Ok(native!(api, libvlc_vlm_set_output(raw, name, output)))
        })
    }

    /// Replace every input with `input`
    pub fn vlm_set_input(&self, name: &str, input: &str) -> Result<()> {
        self.vlm_with_text(name, input, |api, raw, name, input| {
            Ok(native!(api, libvlc_vlm_set_input(raw, name, input)))
        })
    }

    /// Append an input to the media's input list
    pub fn vlm_add_input(&self, name: &str, input: &str) -> Result<()> {
        self.vlm_with_text(name, input, |api, raw, name, input| {
            Ok(native!(api, libvlc_vlm_add_input(raw, name, input)))
        })
    }

    pub fn vlm_set_mux(&self, name: &str, mux: &str) -> Result<()> {
        self.vlm_with_text(name, mux, |api, raw, name, mux| {
            Ok(native!(api, libvlc_vlm_set_mux(raw, name, mux)))
        })
    }

    pub fn vlm_set_loop(&self, name: &str, looped: bool) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_vlm_set_loop(self.raw()?, name.as_ptr(), looped as c_int));
        check_status(self.api(), status)
    }

    /// Redefine a media in one call
    pub fn vlm_change<S: AsRef<str>>(
        &self,
        name: &str,
        input: &str,
        output: &str,
        options: &[S],
        enabled: bool,
        looped: bool,
    ) -> Result<()> {
        let name = c_string(name)?;
        let input = c_string(input)?;
        let output = c_string(output)?;
        let options = CStringArray::new(options)?;
        let status = native!(
            self.api(),
            libvlc_vlm_change_media(
                self.raw()?,
                name.as_ptr(),
                input.as_ptr(),
                output.as_ptr(),
                options.len(),
                options.as_ptr(),
                enabled as c_int,
                looped as c_int,
            )
        );
        check_status(self.api(), status)
    }

    pub fn vlm_play(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_vlm_play_media(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    pub fn vlm_stop(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_vlm_stop_media(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    pub fn vlm_pause(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_vlm_pause_media(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    /// Seek to `percentage` (0-100) of the media
    pub fn vlm_seek(&self, name: &str, percentage: f32) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(
            self.api(),
            libvlc_vlm_seek_media(self.raw()?, name.as_ptr(), percentage as c_float)
        );
        check_status(self.api(), status)
    }

    /// JSON-like description of one media, or of all with an empty name
    pub fn vlm_show(&self, name: &str) -> Result<String> {
        let api = self.api();
        let name = c_string(name)?;
        let text = native!(api, libvlc_vlm_show_media(self.raw()?, name.as_ptr()));
        api.take_string(text).ok_or_else(|| Error::native(api))
    }

    /// Position in `[0, 1]` of running instance `id` of a media
    pub fn vlm_position(&self, name: &str, id: i32) -> Result<f32> {
        let api = self.api();
        let name = c_string(name)?;
        let position = native!(api, libvlc_vlm_get_media_instance_position(self.raw()?, name.as_ptr(), id));
        if position < 0.0 {
            return Err(Error::native(api));
        }
        Ok(position)
    }

    /// Time in milliseconds of running instance `id`
    pub fn vlm_time(&self, name: &str, id: i32) -> Result<i32> {
        let api = self.api();
        let name = c_string(name)?;
        let time = native!(api, libvlc_vlm_get_media_instance_time(self.raw()?, name.as_ptr(), id));
        non_negative(api, time)
    }

    /// Length in milliseconds of running instance `id`
    pub fn vlm_length(&self, name: &str, id: i32) -> Result<i32> {
        let api = self.api();
        let name = c_string(name)?;
        let length = native!(api, libvlc_vlm_get_media_instance_length(self.raw()?, name.as_ptr(), id));
        non_negative(api, length)
    }

    pub fn vlm_rate(&self, name: &str, id: i32) -> Result<i32> {
        let api = self.api();
        let name = c_string(name)?;
        let rate = native!(api, libvlc_vlm_get_media_instance_rate(self.raw()?, name.as_ptr(), id));
        non_negative(api, rate)
    }

    /// `Vlm*` events for every media of this instance
    pub fn vlm_events(&self) -> Result<&EventManager> {
        let api = self.api();
        cached_manager(&self.events, api, ObjectKind::Instance, || {
            Ok(native!(api, libvlc_vlm_get_event_manager(self.raw()?)))
        })
    }

    /// Stop and delete every VLM media, detaching VLM subscriptions first
    pub fn vlm_release(&mut self) -> Result<()> {
        drop(self.events.take());
        native!(self.api(), libvlc_vlm_release(self.raw()?));
        Ok(())
    }

    fn vlm_with_text<F>(&self, name: &str, value: &str, call: F) -> Result<()>
    where
        F: FnOnce(&LibVlc, *mut libvlc_instance_t, *const c_char, *const c_char) -> Result<c_int>,
    {
        let name = c_string(name)?;
        let value = c_string(value)?;
        let status = call(self.api().as_ref(), self.raw()?, name.as_ptr(), value.as_ptr())?;
        check_status(self.api(), status)
    }
}

fn non_negative(api: &LibVlc, value: c_int) -> Result<i32> {
    if value < 0 {
        return Err(Error::native(api));
    }
    Ok(value)
}
