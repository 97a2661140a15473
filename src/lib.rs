//! vlc-bridge - safe Rust bindings for libVLC
//!
//! This crate wraps libVLC's C API:
//! - refcounted native objects behind owning facades
//! - event subscriptions delivered to Rust closures or bounded queues
//! - memory video rendering through a `VideoRenderer` trait
//! - libVLC loaded at runtime, so nothing links against it at build time
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           Facades                   │
//! │  Instance (+VLM), Media, Player,    │
//! │  MediaList, ListPlayer, Library,    │
//! │  Discoverer, Log                    │
//! └─────────────────────────────────────┘
//!          │                  ▲
//!          ▼                  │ events, frames
//! ┌──────────────────┐ ┌────────────────────┐
//! │ Handle + Error   │ │ Event registry,    │
//! │ (refcount, errs) │ │ render slot        │
//! └──────────────────┘ └────────────────────┘
//!          │                  ▲
//!          ▼                  │ trampolines
//! ┌─────────────────────────────────────┐
//! │           FFI Layer                 │
//! │  (entry points resolved at runtime) │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vlc_bridge::{EventType, Instance};
//!
//! # fn main() -> vlc_bridge::Result<()> {
//! vlc_bridge::init();
//! let instance = Instance::new()?;
//! let media = instance.open_media_uri("https://example.org/stream.m3u8")?;
//! let player = media.new_player()?;
//!
//! player.events()?.attach(EventType::MediaPlayerEndReached, |_| {
//!     log::info!("done");
//! })?;
//! player.play()?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod ffi;
#[macro_use]
pub mod types;
#[macro_use]
pub mod handle;

pub mod config;
pub mod discoverer;
pub mod error;
pub mod event;
pub mod instance;
pub mod library;
pub mod list_player;
pub mod media;
pub mod media_list;
pub mod message_log;
pub mod player;
pub mod render;
pub mod track;
#[cfg(feature = "vlm")]
mod vlm;

// Re-export main types
pub use config::{InstanceConfig, LoaderConfig};
pub use discoverer::Discoverer;
pub use error::{take_error, Error, Result};
pub use event::{Event, EventData, EventManager, EventQueue, EventType, SubscriptionId};
pub use ffi::LibVlc;
pub use handle::{Handle, ObjectKind, Ownership};
pub use instance::Instance;
pub use library::Library;
pub use list_player::ListPlayer;
pub use media::Media;
pub use media_list::{MediaList, MediaListLock};
pub use message_log::{Log, LogIterator, LogMessage};
pub use player::Player;
pub use render::{Picture, Planes, RenderCallbacks, VideoFormat, VideoRenderer};
pub use track::{AudioOutputList, MediaStats, TrackDescriptionList, TrackDetails, TrackInfo};
pub use types::{
    AdjustOption, AudioChannel, AudioDevice, LogPriority, LogoOption, MarqueeOption, MediaOption, MediaState, Meta,
    PlaybackMode, TrackType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging (safe to call more than once)
pub fn init() {
    // Info level by default if RUST_LOG is not set
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();

    log::info!("vlc-bridge {} initialized", VERSION);
}

/// Version of the process-wide libVLC, loading it if needed
pub fn version_string() -> Result<String> {
    LibVlc::shared()?.version()
}

/// Compiler the process-wide libVLC was built with
pub fn compiler() -> Result<String> {
    LibVlc::shared()?.compiler()
}

/// Source changeset of the process-wide libVLC
pub fn changeset() -> Result<String> {
    LibVlc::shared()?.changeset()
}

/// Discard the calling thread's pending libVLC error
pub fn clear_error() -> Result<()> {
    LibVlc::shared()?.clear_error();
    Ok(())
}
