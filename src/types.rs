//! libVLC enumerations

use std::ffi::c_int;
use std::fmt;

macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            /// Every variant, in native order
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Map a native value, `None` when libVLC sends something newer
            pub fn from_raw(raw: c_int) -> Option<Self> {
                match raw {
                    $( v if v == $value => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// Native value
            pub fn as_raw(self) -> c_int {
                self as c_int
            }

            /// Variant name
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

raw_enum! {
    /// Media meta data keys
    pub enum Meta {
        Title = 0,
        Artist = 1,
        Genre = 2,
        Copyright = 3,
        Album = 4,
        TrackNumber = 5,
        Description = 6,
        Rating = 7,
        Date = 8,
        Setting = 9,
        Url = 10,
        Language = 11,
        NowPlaying = 12,
        Publisher = 13,
        EncodedBy = 14,
        ArtworkUrl = 15,
        TrackId = 16,
    }
}

raw_enum! {
    /// Playback state shared by media, players and list players
    pub enum MediaState {
        NothingSpecial = 0,
        Opening = 1,
        Buffering = 2,
        Playing = 3,
        Paused = 4,
        Stopped = 5,
        Ended = 6,
        Error = 7,
    }
}

impl Default for MediaState {
    fn default() -> Self {
        Self::NothingSpecial
    }
}

impl MediaState {
    /// State returned by a libVLC getter; unknown values read as `Error`
    pub(crate) fn from_native(raw: c_int) -> Self {
        Self::from_raw(raw).unwrap_or_else(|| {
            log::warn!("Unknown media state {}", raw);
            MediaState::Error
        })
    }
}

raw_enum! {
    /// List player advance behaviour
    pub enum PlaybackMode {
        /// Play the list once
        Default = 0,
        /// Restart the list at the end
        Loop = 1,
        /// Repeat the current item
        Repeat = 2,
    }
}

impl Default for PlaybackMode {
    fn default() -> Self {
        Self::Default
    }
}

raw_enum! {
    pub enum TrackType {
        Unknown = -1,
        Audio = 0,
        Video = 1,
        Text = 2,
    }
}

raw_enum! {
    /// Severity of a message log entry
    pub enum LogPriority {
        Info = 0,
        Error = 1,
        Warning = 2,
        Debug = 3,
    }
}

raw_enum! {
    /// Marquee (text overlay) settings
    pub enum MarqueeOption {
        Enable = 0,
        Text = 1,
        Color = 2,
        Opacity = 3,
        Position = 4,
        Refresh = 5,
        Size = 6,
        Timeout = 7,
        X = 8,
        Y = 9,
    }
}

raw_enum! {
    /// Logo overlay settings
    pub enum LogoOption {
        Enable = 0,
        File = 1,
        X = 2,
        Y = 3,
        Delay = 4,
        Repeat = 5,
        Opacity = 6,
        Position = 7,
    }
}

raw_enum! {
    /// Video adjust filter settings
    pub enum AdjustOption {
        Enable = 0,
        Contrast = 1,
        Brightness = 2,
        Hue = 3,
        Saturation = 4,
        Gamma = 5,
    }
}

raw_enum! {
    /// Audio output device layouts
    pub enum AudioDevice {
        Error = -1,
        Mono = 1,
        Stereo = 2,
        TwoFrontTwoRear = 4,
        ThreeFrontTwoRear = 5,
        Surround5_1 = 6,
        Surround6_1 = 7,
        Surround7_1 = 8,
        Spdif = 10,
    }
}

raw_enum! {
    /// Audio channel routing
    pub enum AudioChannel {
        Error = -1,
        Stereo = 1,
        ReverseStereo = 2,
        Left = 3,
        Right = 4,
        Dolbys = 5,
    }
}

/// Flags for [`Media::add_option_flag`](crate::Media::add_option_flag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MediaOption(u32);

impl MediaOption {
    pub const NONE: MediaOption = MediaOption(0);
    /// Option may set security-sensitive settings
    pub const TRUSTED: MediaOption = MediaOption(0x2);
    /// Option replaces any earlier value for the same key
    pub const UNIQUE: MediaOption = MediaOption(0x100);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: MediaOption) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for MediaOption {
    type Output = MediaOption;

    fn bitor(self, rhs: MediaOption) -> MediaOption {
        MediaOption(self.0 | rhs.0)
    }
}
