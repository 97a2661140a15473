//! Build script for vlc-bridge
//!
//! libVLC is loaded at runtime, so nothing is linked here. This script:
//! 1. Locates libVLC using pkg-config (metadata only, no link flags)
//! 2. Falls back to well-known installation paths
//! 3. Bakes the directory it found into `VLC_BRIDGE_LIBDIR`

use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=VLC_BRIDGE_LIBDIR");

    // An explicit override always wins
    if let Ok(dir) = env::var("VLC_BRIDGE_LIBDIR") {
        println!("cargo:rustc-env=VLC_BRIDGE_LIBDIR={}", dir);
        return;
    }

    match find_libvlc_dir() {
        Some(dir) => {
            println!("cargo:rustc-env=VLC_BRIDGE_LIBDIR={}", dir);
        }
        None => {
            println!("cargo:warning=libvlc not found at build time; relying on the runtime loader search");
        }
    }
}

/// Find the libVLC library directory using pkg-config or fallback paths
fn find_libvlc_dir() -> Option<String> {
    match pkg_config::Config::new()
        .atleast_version("1.1.0")
        .cargo_metadata(false)
        .probe("libvlc")
    {
        Ok(library) => {
            if let Some(path) = library.link_paths.first() {
                println!("cargo:info=Found libvlc via pkg-config in {}", path.display());
                return Some(path.display().to_string());
            }
        }
        Err(e) => {
            println!("cargo:info=pkg-config failed for libvlc: {}", e);
        }
    }

    try_fallback_paths()
}

/// Try common libVLC installation paths
fn try_fallback_paths() -> Option<String> {
    let candidates = [
        // macOS application bundle
        "/Applications/VLC.app/Contents/MacOS/lib",
        // Homebrew
        "/opt/homebrew/lib",
        "/usr/local/lib",
        // Windows default install
        "C:\\Program Files\\VideoLAN\\VLC",
        "C:\\Program Files (x86)\\VideoLAN\\VLC",
    ];

    candidates
        .iter()
        .find(|path| Path::new(path).exists())
        .map(|path| path.to_string())
}
