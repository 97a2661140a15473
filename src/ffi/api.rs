//! Runtime-resolved libVLC entry points

use std::ffi::{c_char, c_float, c_int, c_uint, c_void, CStr, OsStr};
use std::fmt;
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::OnceCell;

use super::*;
use crate::config::LoaderConfig;
use crate::error::{Error, Result};

macro_rules! libvlc_api {
    ($( fn $name:ident( $($arg:ty),* $(,)? ) $(-> $ret:ty)?; )*) => {
        /// Entry points resolved from the loaded libVLC
        ///
        /// Every entry is optional. Symbols that a given libVLC release does
        /// not export resolve to `None` and fail when called.
        #[derive(Default, Clone, Copy)]
        pub struct Symbols {
            $( pub $name: Option<unsafe extern "C" fn($($arg),*) $(-> $ret)?>, )*
        }

        impl Symbols {
            /// # Safety
            /// `library` must be a libVLC build whose exports match the
            /// signatures declared in this table.
            unsafe fn resolve(library: &Library) -> Self {
                Self {
                    $(
                        $name: library
                            .get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(
                                concat!(stringify!($name), "\0").as_bytes(),
                            )
                            .ok()
                            .map(|symbol| *symbol),
                    )*
                }
            }

            /// Number of entry points that resolved
            pub fn resolved(&self) -> usize {
                0 $( + self.$name.is_some() as usize )*
            }

            /// Number of entry points in the table
            pub const fn total() -> usize {
                [$(stringify!($name)),*].len()
            }
        }
    };
}

libvlc_api! {
    // Core
    fn libvlc_new(c_int, *const *const c_char) -> *mut libvlc_instance_t;
    fn libvlc_release(*mut libvlc_instance_t);
    fn libvlc_retain(*mut libvlc_instance_t);
    fn libvlc_add_intf(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_wait(*mut libvlc_instance_t);
    fn libvlc_set_user_agent(*mut libvlc_instance_t, *const c_char, *const c_char);
    fn libvlc_get_version() -> *const c_char;
    fn libvlc_get_compiler() -> *const c_char;
    fn libvlc_get_changeset() -> *const c_char;
    fn libvlc_free(*mut c_void);
    fn libvlc_errmsg() -> *const c_char;
    fn libvlc_clearerr();

    // Events
    fn libvlc_event_attach(*mut libvlc_event_manager_t, c_int, Option<libvlc_callback_t>, *mut c_void) -> c_int;
    fn libvlc_event_detach(*mut libvlc_event_manager_t, c_int, Option<libvlc_callback_t>, *mut c_void);
    fn libvlc_event_type_name(c_int) -> *const c_char;

    // Message log
    fn libvlc_get_log_verbosity(*const libvlc_instance_t) -> c_uint;
    fn libvlc_set_log_verbosity(*mut libvlc_instance_t, c_uint);
    fn libvlc_log_open(*mut libvlc_instance_t) -> *mut libvlc_log_t;
    fn libvlc_log_close(*mut libvlc_log_t);
    fn libvlc_log_count(*const libvlc_log_t) -> c_uint;
    fn libvlc_log_clear(*mut libvlc_log_t);
    fn libvlc_log_get_iterator(*const libvlc_log_t) -> *mut libvlc_log_iterator_t;
    fn libvlc_log_iterator_free(*mut libvlc_log_iterator_t);
    fn libvlc_log_iterator_has_next(*const libvlc_log_iterator_t) -> c_int;
    fn libvlc_log_iterator_next(*mut libvlc_log_iterator_t, *mut libvlc_log_message_t) -> *mut libvlc_log_message_t;

    // Audio outputs
    fn libvlc_audio_output_list_get(*mut libvlc_instance_t) -> *mut libvlc_audio_output_t;
    fn libvlc_audio_output_list_release(*mut libvlc_audio_output_t);
    fn libvlc_audio_output_device_count(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_audio_output_device_longname(*mut libvlc_instance_t, *const c_char, c_int) -> *mut c_char;
    fn libvlc_audio_output_device_id(*mut libvlc_instance_t, *const c_char, c_int) -> *mut c_char;

    // Media
    fn libvlc_media_new_location(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_t;
    fn libvlc_media_new_path(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_t;
    fn libvlc_media_new_fd(*mut libvlc_instance_t, c_int) -> *mut libvlc_media_t;
    fn libvlc_media_new_as_node(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_t;
    fn libvlc_media_add_option(*mut libvlc_media_t, *const c_char);
    fn libvlc_media_add_option_flag(*mut libvlc_media_t, *const c_char, c_uint);
    fn libvlc_media_retain(*mut libvlc_media_t);
    fn libvlc_media_release(*mut libvlc_media_t);
    fn libvlc_media_get_mrl(*mut libvlc_media_t) -> *mut c_char;
    fn libvlc_media_duplicate(*mut libvlc_media_t) -> *mut libvlc_media_t;
    fn libvlc_media_get_meta(*mut libvlc_media_t, c_int) -> *mut c_char;
    fn libvlc_media_set_meta(*mut libvlc_media_t, c_int, *const c_char);
    fn libvlc_media_save_meta(*mut libvlc_media_t) -> c_int;
    fn libvlc_media_get_state(*mut libvlc_media_t) -> c_int;
    fn libvlc_media_get_stats(*mut libvlc_media_t, *mut libvlc_media_stats_t) -> c_int;
    fn libvlc_media_subitems(*mut libvlc_media_t) -> *mut libvlc_media_list_t;
    fn libvlc_media_event_manager(*mut libvlc_media_t) -> *mut libvlc_event_manager_t;
    fn libvlc_media_get_duration(*mut libvlc_media_t) -> libvlc_time_t;
    fn libvlc_media_parse(*mut libvlc_media_t);
    fn libvlc_media_parse_async(*mut libvlc_media_t);
    fn libvlc_media_is_parsed(*mut libvlc_media_t) -> c_int;
    fn libvlc_media_get_tracks_info(*mut libvlc_media_t, *mut *mut libvlc_media_track_info_t) -> c_int;

    // Media list
    fn libvlc_media_list_new(*mut libvlc_instance_t) -> *mut libvlc_media_list_t;
    fn libvlc_media_list_release(*mut libvlc_media_list_t);
    fn libvlc_media_list_retain(*mut libvlc_media_list_t);
    fn libvlc_media_list_set_media(*mut libvlc_media_list_t, *mut libvlc_media_t);
    fn libvlc_media_list_media(*mut libvlc_media_list_t) -> *mut libvlc_media_t;
    fn libvlc_media_list_add_media(*mut libvlc_media_list_t, *mut libvlc_media_t) -> c_int;
    fn libvlc_media_list_insert_media(*mut libvlc_media_list_t, *mut libvlc_media_t, c_int) -> c_int;
    fn libvlc_media_list_remove_index(*mut libvlc_media_list_t, c_int) -> c_int;
    fn libvlc_media_list_count(*mut libvlc_media_list_t) -> c_int;
    fn libvlc_media_list_item_at_index(*mut libvlc_media_list_t, c_int) -> *mut libvlc_media_t;
    fn libvlc_media_list_index_of_item(*mut libvlc_media_list_t, *mut libvlc_media_t) -> c_int;
    fn libvlc_media_list_is_readonly(*mut libvlc_media_list_t) -> c_int;
    fn libvlc_media_list_lock(*mut libvlc_media_list_t);
    fn libvlc_media_list_unlock(*mut libvlc_media_list_t);
    fn libvlc_media_list_event_manager(*mut libvlc_media_list_t) -> *mut libvlc_event_manager_t;

    // Media list player
    fn libvlc_media_list_player_new(*mut libvlc_instance_t) -> *mut libvlc_media_list_player_t;
    fn libvlc_media_list_player_release(*mut libvlc_media_list_player_t);
    fn libvlc_media_list_player_retain(*mut libvlc_media_list_player_t);
    fn libvlc_media_list_player_event_manager(*mut libvlc_media_list_player_t) -> *mut libvlc_event_manager_t;
    fn libvlc_media_list_player_set_media_player(*mut libvlc_media_list_player_t, *mut libvlc_media_player_t);
    fn libvlc_media_list_player_set_media_list(*mut libvlc_media_list_player_t, *mut libvlc_media_list_t);
    fn libvlc_media_list_player_play(*mut libvlc_media_list_player_t);
    fn libvlc_media_list_player_pause(*mut libvlc_media_list_player_t);
    fn libvlc_media_list_player_is_playing(*mut libvlc_media_list_player_t) -> c_int;
    fn libvlc_media_list_player_get_state(*mut libvlc_media_list_player_t) -> c_int;
    fn libvlc_media_list_player_play_item_at_index(*mut libvlc_media_list_player_t, c_int) -> c_int;
    fn libvlc_media_list_player_play_item(*mut libvlc_media_list_player_t, *mut libvlc_media_t) -> c_int;
    fn libvlc_media_list_player_stop(*mut libvlc_media_list_player_t);
    fn libvlc_media_list_player_next(*mut libvlc_media_list_player_t) -> c_int;
    fn libvlc_media_list_player_previous(*mut libvlc_media_list_player_t) -> c_int;
    fn libvlc_media_list_player_set_playback_mode(*mut libvlc_media_list_player_t, c_int);

    // Media library
    fn libvlc_media_library_new(*mut libvlc_instance_t) -> *mut libvlc_media_library_t;
    fn libvlc_media_library_release(*mut libvlc_media_library_t);
    fn libvlc_media_library_retain(*mut libvlc_media_library_t);
    fn libvlc_media_library_load(*mut libvlc_media_library_t) -> c_int;
    fn libvlc_media_library_media_list(*mut libvlc_media_library_t) -> *mut libvlc_media_list_t;

    // Media discoverer
    fn libvlc_media_discoverer_new_from_name(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_discoverer_t;
    fn libvlc_media_discoverer_release(*mut libvlc_media_discoverer_t);
    fn libvlc_media_discoverer_localized_name(*mut libvlc_media_discoverer_t) -> *mut c_char;
    fn libvlc_media_discoverer_media_list(*mut libvlc_media_discoverer_t) -> *mut libvlc_media_list_t;
    fn libvlc_media_discoverer_event_manager(*mut libvlc_media_discoverer_t) -> *mut libvlc_event_manager_t;
    fn libvlc_media_discoverer_is_running(*mut libvlc_media_discoverer_t) -> c_int;

    // Media player
    fn libvlc_media_player_new(*mut libvlc_instance_t) -> *mut libvlc_media_player_t;
    fn libvlc_media_player_new_from_media(*mut libvlc_media_t) -> *mut libvlc_media_player_t;
    fn libvlc_media_player_release(*mut libvlc_media_player_t);
    fn libvlc_media_player_retain(*mut libvlc_media_player_t);
    fn libvlc_media_player_set_media(*mut libvlc_media_player_t, *mut libvlc_media_t);
    fn libvlc_media_player_get_media(*mut libvlc_media_player_t) -> *mut libvlc_media_t;
    fn libvlc_media_player_event_manager(*mut libvlc_media_player_t) -> *mut libvlc_event_manager_t;
    fn libvlc_media_player_is_playing(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_play(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_set_pause(*mut libvlc_media_player_t, c_int);
    fn libvlc_media_player_pause(*mut libvlc_media_player_t);
    fn libvlc_media_player_stop(*mut libvlc_media_player_t);
    fn libvlc_media_player_set_nsobject(*mut libvlc_media_player_t, *mut c_void);
    fn libvlc_media_player_get_nsobject(*mut libvlc_media_player_t) -> *mut c_void;
    fn libvlc_media_player_set_agl(*mut libvlc_media_player_t, u32);
    fn libvlc_media_player_get_agl(*mut libvlc_media_player_t) -> u32;
    fn libvlc_media_player_set_xwindow(*mut libvlc_media_player_t, u32);
    fn libvlc_media_player_get_xwindow(*mut libvlc_media_player_t) -> u32;
    fn libvlc_media_player_set_hwnd(*mut libvlc_media_player_t, *mut c_void);
    fn libvlc_media_player_get_hwnd(*mut libvlc_media_player_t) -> *mut c_void;
    fn libvlc_media_player_get_length(*mut libvlc_media_player_t) -> libvlc_time_t;
    fn libvlc_media_player_get_time(*mut libvlc_media_player_t) -> libvlc_time_t;
    fn libvlc_media_player_set_time(*mut libvlc_media_player_t, libvlc_time_t);
    fn libvlc_media_player_get_position(*mut libvlc_media_player_t) -> c_float;
    fn libvlc_media_player_set_position(*mut libvlc_media_player_t, c_float);
    fn libvlc_media_player_set_chapter(*mut libvlc_media_player_t, c_int);
    fn libvlc_media_player_get_chapter(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_get_chapter_count(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_get_chapter_count_for_title(*mut libvlc_media_player_t, c_int) -> c_int;
    fn libvlc_media_player_will_play(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_set_title(*mut libvlc_media_player_t, c_int);
    fn libvlc_media_player_get_title(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_get_title_count(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_previous_chapter(*mut libvlc_media_player_t);
    fn libvlc_media_player_next_chapter(*mut libvlc_media_player_t);
    fn libvlc_media_player_get_rate(*mut libvlc_media_player_t) -> c_float;
    fn libvlc_media_player_set_rate(*mut libvlc_media_player_t, c_float) -> c_int;
    fn libvlc_media_player_get_state(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_get_fps(*mut libvlc_media_player_t) -> c_float;
    fn libvlc_media_player_has_vout(*mut libvlc_media_player_t) -> c_uint;
    fn libvlc_media_player_is_seekable(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_can_pause(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_media_player_next_frame(*mut libvlc_media_player_t);

    // Video
    fn libvlc_video_set_callbacks(
        *mut libvlc_media_player_t,
        Option<libvlc_video_lock_cb>,
        Option<libvlc_video_unlock_cb>,
        Option<libvlc_video_display_cb>,
        *mut c_void,
    );
    fn libvlc_video_set_format(*mut libvlc_media_player_t, *const c_char, c_uint, c_uint, c_uint);
    fn libvlc_toggle_fullscreen(*mut libvlc_media_player_t);
    fn libvlc_set_fullscreen(*mut libvlc_media_player_t, c_int);
    fn libvlc_get_fullscreen(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_set_key_input(*mut libvlc_media_player_t, c_uint);
    fn libvlc_video_set_mouse_input(*mut libvlc_media_player_t, c_uint);
    fn libvlc_video_get_size(*mut libvlc_media_player_t, c_uint, *mut c_uint, *mut c_uint) -> c_int;
    fn libvlc_video_get_cursor(*mut libvlc_media_player_t, c_uint, *mut c_int, *mut c_int) -> c_int;
    fn libvlc_video_get_scale(*mut libvlc_media_player_t) -> c_float;
    fn libvlc_video_set_scale(*mut libvlc_media_player_t, c_float);
    fn libvlc_video_get_aspect_ratio(*mut libvlc_media_player_t) -> *mut c_char;
    fn libvlc_video_set_aspect_ratio(*mut libvlc_media_player_t, *const c_char);
    fn libvlc_video_get_spu(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_get_spu_count(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_get_spu_description(*mut libvlc_media_player_t) -> *mut libvlc_track_description_t;
    fn libvlc_video_set_spu(*mut libvlc_media_player_t, c_uint) -> c_int;
    fn libvlc_video_set_subtitle_file(*mut libvlc_media_player_t, *const c_char) -> c_int;
    fn libvlc_video_get_title_description(*mut libvlc_media_player_t) -> *mut libvlc_track_description_t;
    fn libvlc_video_get_chapter_description(*mut libvlc_media_player_t, c_int) -> *mut libvlc_track_description_t;
    fn libvlc_video_get_crop_geometry(*mut libvlc_media_player_t) -> *mut c_char;
    fn libvlc_video_set_crop_geometry(*mut libvlc_media_player_t, *const c_char);
    fn libvlc_video_get_teletext(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_set_teletext(*mut libvlc_media_player_t, c_int);
    fn libvlc_toggle_teletext(*mut libvlc_media_player_t);
    fn libvlc_video_get_track_count(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_get_track_description(*mut libvlc_media_player_t) -> *mut libvlc_track_description_t;
    fn libvlc_video_get_track(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_video_set_track(*mut libvlc_media_player_t, c_int) -> c_int;
    fn libvlc_video_take_snapshot(*mut libvlc_media_player_t, c_uint, *const c_char, c_uint, c_uint) -> c_int;
    fn libvlc_video_set_deinterlace(*mut libvlc_media_player_t, *const c_char);
    fn libvlc_video_get_marquee_int(*mut libvlc_media_player_t, c_uint) -> c_int;
    fn libvlc_video_get_marquee_string(*mut libvlc_media_player_t, c_uint) -> *mut c_char;
    fn libvlc_video_set_marquee_int(*mut libvlc_media_player_t, c_uint, c_int);
    fn libvlc_video_set_marquee_string(*mut libvlc_media_player_t, c_uint, *const c_char);
    fn libvlc_video_get_logo_int(*mut libvlc_media_player_t, c_uint) -> c_int;
    fn libvlc_video_set_logo_int(*mut libvlc_media_player_t, c_uint, c_int);
    fn libvlc_video_set_logo_string(*mut libvlc_media_player_t, c_uint, *const c_char);
    fn libvlc_video_get_adjust_int(*mut libvlc_media_player_t, c_uint) -> c_int;
    fn libvlc_video_set_adjust_int(*mut libvlc_media_player_t, c_uint, c_int);
    fn libvlc_video_get_adjust_float(*mut libvlc_media_player_t, c_uint) -> c_float;
    fn libvlc_video_set_adjust_float(*mut libvlc_media_player_t, c_uint, c_float);
    fn libvlc_track_description_release(*mut libvlc_track_description_t);
    fn libvlc_track_description_list_release(*mut libvlc_track_description_t);

    // Audio
    fn libvlc_audio_output_set(*mut libvlc_media_player_t, *const c_char) -> c_int;
    fn libvlc_audio_output_device_set(*mut libvlc_media_player_t, *const c_char, *const c_char);
    fn libvlc_audio_output_get_device_type(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_output_set_device_type(*mut libvlc_media_player_t, c_int);
    fn libvlc_audio_toggle_mute(*mut libvlc_media_player_t);
    fn libvlc_audio_get_mute(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_set_mute(*mut libvlc_media_player_t, c_int);
    fn libvlc_audio_get_volume(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_set_volume(*mut libvlc_media_player_t, c_int) -> c_int;
    fn libvlc_audio_get_track_count(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_get_track_description(*mut libvlc_media_player_t) -> *mut libvlc_track_description_t;
    fn libvlc_audio_get_track(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_set_track(*mut libvlc_media_player_t, c_int) -> c_int;
    fn libvlc_audio_get_channel(*mut libvlc_media_player_t) -> c_int;
    fn libvlc_audio_set_channel(*mut libvlc_media_player_t, c_int) -> c_int;
    fn libvlc_audio_get_delay(*mut libvlc_media_player_t) -> i64;
    fn libvlc_audio_set_delay(*mut libvlc_media_player_t, i64) -> c_int;

    // VLM
    fn libvlc_vlm_release(*mut libvlc_instance_t);
    fn libvlc_vlm_add_broadcast(
        *mut libvlc_instance_t,
        *const c_char,
        *const c_char,
        *const c_char,
        c_int,
        *const *const c_char,
        c_int,
        c_int,
    ) -> c_int;
    fn libvlc_vlm_add_vod(
        *mut libvlc_instance_t,
        *const c_char,
        *const c_char,
        c_int,
        *const *const c_char,
        c_int,
        *const c_char,
    ) -> c_int;
    fn libvlc_vlm_del_media(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_vlm_set_enabled(*mut libvlc_instance_t, *const c_char, c_int) -> c_int;
    fn libvlc_vlm_set_output(*mut libvlc_instance_t, *const c_char, *const c_char) -> c_int;
    fn libvlc_vlm_set_input(*mut libvlc_instance_t, *const c_char, *const c_char) -> c_int;
    fn libvlc_vlm_add_input(*mut libvlc_instance_t, *const c_char, *const c_char) -> c_int;
    fn libvlc_vlm_set_loop(*mut libvlc_instance_t, *const c_char, c_int) -> c_int;
    fn libvlc_vlm_set_mux(*mut libvlc_instance_t, *const c_char, *const c_char) -> c_int;
    fn libvlc_vlm_change_media(
        *mut libvlc_instance_t,
        *const c_char,
        *const c_char,
        *const c_char,
        c_int,
        *const *const c_char,
        c_int,
        c_int,
    ) -> c_int;
    fn libvlc_vlm_play_media(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_vlm_stop_media(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_vlm_pause_media(*mut libvlc_instance_t, *const c_char) -> c_int;
    fn libvlc_vlm_seek_media(*mut libvlc_instance_t, *const c_char, c_float) -> c_int;
    fn libvlc_vlm_show_media(*mut libvlc_instance_t, *const c_char) -> *mut c_char;
    fn libvlc_vlm_get_media_instance_position(*mut libvlc_instance_t, *const c_char, c_int) -> c_float;
    fn libvlc_vlm_get_media_instance_time(*mut libvlc_instance_t, *const c_char, c_int) -> c_int;
    fn libvlc_vlm_get_media_instance_length(*mut libvlc_instance_t, *const c_char, c_int) -> c_int;
    fn libvlc_vlm_get_media_instance_rate(*mut libvlc_instance_t, *const c_char, c_int) -> c_int;
    fn libvlc_vlm_get_event_manager(*mut libvlc_instance_t) -> *mut libvlc_event_manager_t;
}

static SHARED: OnceCell<Arc<LibVlc>> = OnceCell::new();

/// A loaded libVLC and its resolved entry points
pub struct LibVlc {
    symbols: Symbols,
    origin: String,
    // Keeps the code behind `symbols` mapped
    _library: Option<Library>,
}

impl LibVlc {
    /// Load libVLC from the first loadable candidate in `config`
    pub fn load(config: &LoaderConfig) -> Result<Self> {
        let mut failures = Vec::new();

        for candidate in config.candidates() {
            match Self::open(&candidate) {
                Ok(api) => return Ok(api),
                Err(e) => {
                    log::debug!("Skipping {}: {}", candidate.display(), e);
                    failures.push(format!("{}: {}", candidate.display(), e));
                }
            }
        }

        Err(Error::LibraryLoad(failures.join("; ")))
    }

    /// Open one shared library file and resolve its entry points
    pub fn open(path: impl AsRef<OsStr>) -> Result<Self> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }.map_err(|e| Error::LibraryLoad(e.to_string()))?;
        let symbols = unsafe { Symbols::resolve(&library) };

        if symbols.libvlc_new.is_none() {
            return Err(Error::LibraryLoad(format!(
                "{} does not export libvlc_new",
                path.to_string_lossy()
            )));
        }

        let api = Self {
            symbols,
            origin: path.to_string_lossy().into_owned(),
            _library: Some(library),
        };

        log::info!(
            "Loaded libvlc {} from {} ({}/{} entry points)",
            api.version().unwrap_or_else(|_| "(unknown version)".to_string()),
            api.origin,
            api.symbols.resolved(),
            Symbols::total()
        );

        Ok(api)
    }

    /// Wrap entry points resolved elsewhere, e.g. from a statically linked libVLC
    pub fn from_symbols(symbols: Symbols, origin: impl Into<String>) -> Self {
        Self {
            symbols,
            origin: origin.into(),
            _library: None,
        }
    }

    /// Process-wide libVLC, loaded on first use with [`LoaderConfig::from_env`]
    pub fn shared() -> Result<Arc<LibVlc>> {
        SHARED
            .get_or_try_init(|| Self::load(&LoaderConfig::from_env()).map(Arc::new))
            .cloned()
    }

    /// Resolved entry point table
    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Path (or label) the table was loaded from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// libVLC version string
    pub fn version(&self) -> Result<String> {
        let text = native!(self, libvlc_get_version());
        Ok(static_string(text))
    }

    /// Compiler used to build libVLC
    pub fn compiler(&self) -> Result<String> {
        let text = native!(self, libvlc_get_compiler());
        Ok(static_string(text))
    }

    /// Source changeset libVLC was built from
    pub fn changeset(&self) -> Result<String> {
        let text = native!(self, libvlc_get_changeset());
        Ok(static_string(text))
    }

    /// Discard any pending error on the current thread
    pub fn clear_error(&self) {
        if let Some(clearerr) = self.symbols.libvlc_clearerr {
            unsafe { clearerr() }
        }
    }

    /// libVLC's own name for a raw event type
    pub fn event_type_name(&self, event_type: c_int) -> Result<String> {
        let text = native!(self, libvlc_event_type_name(event_type));
        Ok(static_string(text))
    }

    /// Copy a heap string returned by libVLC and free the native buffer.
    ///
    /// Null yields `None` and frees nothing.
    pub(crate) fn take_string(&self, ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }

        let text = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        self.free(ptr.cast());
        Some(text)
    }

    /// Release memory allocated by libVLC
    pub(crate) fn free(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }

        match self.symbols.libvlc_free {
            Some(free) => unsafe { free(ptr) },
            None => log::warn!("libvlc_free unavailable; leaking native buffer"),
        }
    }
}

impl fmt::Debug for LibVlc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibVlc")
            .field("origin", &self.origin)
            .field("resolved", &self.symbols.resolved())
            .finish()
    }
}

/// Copy a string owned by libVLC (never freed by the caller)
fn static_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
