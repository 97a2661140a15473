//! libVLC instance: the root every other object is created from

use std::ffi::c_int;
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::InstanceConfig;
use crate::discoverer::Discoverer;
use crate::error::{check_status, Error, Result};
use crate::event::EventManager;
use crate::ffi::{c_string, libvlc_instance_t, path_c_string, CStringArray, LibVlc};
use crate::handle::{Handle, ObjectKind};
use crate::library::Library;
use crate::list_player::ListPlayer;
use crate::media::Media;
use crate::media_list::MediaList;
use crate::message_log::Log;
use crate::player::Player;
use crate::track::AudioOutputList;

/// A libVLC instance.
///
/// Objects created from an instance keep working after the instance facade
/// is dropped; libVLC holds its own reference for them.
#[derive(Debug)]
pub struct Instance {
    // VLM manager, see `Instance::vlm_events`
    pub(crate) events: OnceCell<EventManager>,
    handle: Handle,
}

facade_handle!(Instance, libvlc_instance_t);

impl Instance {
    /// Instance on the process-wide libVLC with default settings
    pub fn new() -> Result<Self> {
        Self::with_api(LibVlc::shared()?)
    }

    /// Instance on an explicitly loaded libVLC
    pub fn with_api(api: Arc<LibVlc>) -> Result<Self> {
        Self::with_config(api, &InstanceConfig::default())
    }

    /// Instance created from `config.args`, then configured from the rest
    pub fn with_config(api: Arc<LibVlc>, config: &InstanceConfig) -> Result<Self> {
        let args = CStringArray::new(&config.args)?;
        let raw = native!(api, libvlc_new(args.len(), args.as_ptr()));
        let handle = Handle::from_constructor(&api, ObjectKind::Instance, raw)?;

        let instance = Self {
            events: OnceCell::new(),
            handle,
        };

        if config.app_name.is_some() || config.user_agent.is_some() {
            let name = config.app_name.as_deref().unwrap_or(env!("CARGO_PKG_NAME"));
            let http = config.user_agent.as_deref().unwrap_or(name);
            instance.set_user_agent(name, http)?;
        }
        if let Some(level) = config.log_verbosity {
            instance.set_log_verbosity(level)?;
        }

        log::info!(
            "Created libvlc instance ({} args) on {}",
            config.args.len(),
            instance.api().origin()
        );
        Ok(instance)
    }

    pub fn retain(&self) -> Result<Instance> {
        Ok(Self {
            events: OnceCell::new(),
            handle: self.handle.retain()?,
        })
    }

    pub fn release(&mut self) -> Result<()> {
        drop(self.events.take());
        self.handle.release()
    }

    // =========================================================================
    // Interfaces and logging
    // =========================================================================

    /// Start the default interface module
    pub fn start_ui(&self) -> Result<()> {
        let status = native!(self.api(), libvlc_add_intf(self.raw()?, ptr::null()));
        check_status(self.api(), status)
    }

    /// Start a named interface module, e.g. `"http"`
    pub fn add_intf(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        let status = native!(self.api(), libvlc_add_intf(self.raw()?, name.as_ptr()));
        check_status(self.api(), status)
    }

    /// Application name and HTTP user agent libVLC reports
    pub fn set_user_agent(&self, name: &str, http: &str) -> Result<()> {
        let name = c_string(name)?;
        let http = c_string(http)?;
        native!(self.api(), libvlc_set_user_agent(self.raw()?, name.as_ptr(), http.as_ptr()));
        Ok(())
    }

    /// Block until an interface asks libVLC to quit
    pub fn wait(&self) -> Result<()> {
        native!(self.api(), libvlc_wait(self.raw()?));
        Ok(())
    }

    pub fn log_verbosity(&self) -> Result<u32> {
        Ok(native!(self.api(), libvlc_get_log_verbosity(self.raw()?)))
    }

    pub fn set_log_verbosity(&self, level: u32) -> Result<()> {
        native!(self.api(), libvlc_set_log_verbosity(self.raw()?, level));
        Ok(())
    }

    /// Open the instance message log
    pub fn open_log(&self) -> Result<Log> {
        let api = self.api();
        let log = native!(api, libvlc_log_open(self.raw()?));
        Handle::from_constructor(api, ObjectKind::Log, log).map(Log::from_handle)
    }

    // =========================================================================
    // Media
    // =========================================================================

    /// Media from an MRL such as `http://host/a.mkv` or `dvd:///dev/sr0`
    pub fn new_media_location(&self, mrl: &str) -> Result<Media> {
        let api = self.api();
        let mrl = c_string(mrl)?;
        let media = native!(api, libvlc_media_new_location(self.raw()?, mrl.as_ptr()));
        Handle::from_constructor(api, ObjectKind::Media, media).map(Media::from_handle)
    }

    /// Alias of [`new_media_location`](Self::new_media_location)
    pub fn open_media_uri(&self, uri: &str) -> Result<Media> {
        self.new_media_location(uri)
    }

    /// Media from a local file path
    pub fn new_media_path(&self, path: impl AsRef<Path>) -> Result<Media> {
        let api = self.api();
        let path = path_c_string(path.as_ref())?;
        let media = native!(api, libvlc_media_new_path(self.raw()?, path.as_ptr()));
        Handle::from_constructor(api, ObjectKind::Media, media).map(Media::from_handle)
    }

    /// Media reading from an open file descriptor.
    ///
    /// The descriptor is not closed by libVLC and must stay open while the
    /// media is in use.
    pub fn new_media_fd(&self, fd: c_int) -> Result<Media> {
        let api = self.api();
        let media = native!(api, libvlc_media_new_fd(self.raw()?, fd));
        Handle::from_constructor(api, ObjectKind::Media, media).map(Media::from_handle)
    }

    /// Empty media acting as a named node for sub-items
    pub fn new_media_node(&self, name: &str) -> Result<Media> {
        let api = self.api();
        let name = c_string(name)?;
        let media = native!(api, libvlc_media_new_as_node(self.raw()?, name.as_ptr()));
        Handle::from_constructor(api, ObjectKind::Media, media).map(Media::from_handle)
    }

    // =========================================================================
    // Objects
    // =========================================================================

    pub fn new_player(&self) -> Result<Player> {
        let api = self.api();
        let player = native!(api, libvlc_media_player_new(self.raw()?));
        Handle::from_constructor(api, ObjectKind::Player, player).map(Player::from_handle)
    }

    pub fn new_media_list(&self) -> Result<MediaList> {
        let api = self.api();
        let list = native!(api, libvlc_media_list_new(self.raw()?));
        Handle::from_constructor(api, ObjectKind::MediaList, list).map(MediaList::from_handle)
    }

    pub fn new_list_player(&self) -> Result<ListPlayer> {
        let api = self.api();
        let player = native!(api, libvlc_media_list_player_new(self.raw()?));
        Handle::from_constructor(api, ObjectKind::ListPlayer, player).map(ListPlayer::from_handle)
    }

    pub fn new_library(&self) -> Result<Library> {
        let api = self.api();
        let library = native!(api, libvlc_media_library_new(self.raw()?));
        Handle::from_constructor(api, ObjectKind::Library, library).map(Library::from_handle)
    }

    /// Start the service discovery module `name` (e.g. `"sap"`)
    pub fn new_discoverer(&self, name: &str) -> Result<Discoverer> {
        let api = self.api();
        let name = c_string(name)?;
        let discoverer = native!(api, libvlc_media_discoverer_new_from_name(self.raw()?, name.as_ptr()));
        Handle::from_constructor(api, ObjectKind::Discoverer, discoverer).map(Discoverer::from_handle)
    }

    // =========================================================================
    // Audio outputs
    // =========================================================================

    /// Available audio output modules
    pub fn audio_outputs(&self) -> Result<AudioOutputList> {
        let api = self.api();
        let head = native!(api, libvlc_audio_output_list_get(self.raw()?));
        Ok(AudioOutputList::from_raw(api.clone(), head))
    }

    /// Number of devices of the audio output module `output`
    pub fn audio_device_count(&self, output: &str) -> Result<usize> {
        let output = c_string(output)?;
        let count = native!(self.api(), libvlc_audio_output_device_count(self.raw()?, output.as_ptr()));
        Ok(count.max(0) as usize)
    }

    /// Display name of device `index` of `output`
    pub fn audio_device_longname(&self, output: &str, index: usize) -> Result<String> {
        let api = self.api();
        let output = c_string(output)?;
        let text = native!(
            api,
            libvlc_audio_output_device_longname(self.raw()?, output.as_ptr(), device_index(index)?)
        );
        api.take_string(text).ok_or_else(|| Error::native(api))
    }

    /// Identifier of device `index` of `output`, for `Player::set_audio_output_device`
    pub fn audio_device_id(&self, output: &str, index: usize) -> Result<String> {
        let api = self.api();
        let output = c_string(output)?;
        let text = native!(
            api,
            libvlc_audio_output_device_id(self.raw()?, output.as_ptr(), device_index(index)?)
        );
        api.take_string(text).ok_or_else(|| Error::native(api))
    }
}

fn device_index(index: usize) -> Result<c_int> {
    c_int::try_from(index).map_err(|_| Error::InvalidArgument(format!("device index {} out of range", index)))
}
