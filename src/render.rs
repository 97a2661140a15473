//! Memory video rendering
//!
//! libVLC calls three functions per frame, in order, on its video thread:
//! lock (hand out a picture buffer), unlock (picture decoded), display
//! (picture due on screen). Frames may overlap: lock for frame N+1 can run
//! before display for frame N.
//!
//! The player keeps the active [`VideoRenderer`] in a [`RenderSlot`] whose
//! address is the callbacks' opaque pointer. Replacing the renderer swaps an
//! `Arc` under a write lock; each trampoline clones the current `Arc` and
//! calls the renderer outside the lock.

use std::ffi::c_void;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::ffi::PICTURE_PLANE_MAX;

/// Plane pointers exchanged with libVLC
pub type Planes = [*mut c_void; PICTURE_PLANE_MAX];

/// Opaque picture identity returned by lock and echoed back to unlock/display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Picture(*mut c_void);

unsafe impl Send for Picture {}
unsafe impl Sync for Picture {}

impl Picture {
    pub const fn null() -> Self {
        Picture(ptr::null_mut())
    }

    pub fn from_ptr(ptr: *mut c_void) -> Self {
        Picture(ptr)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for Picture {
    fn default() -> Self {
        Self::null()
    }
}

/// Receives decoded video frames in memory.
///
/// Called from libVLC's video thread; the implementor carries whatever
/// context it needs.
pub trait VideoRenderer: Send + Sync {
    /// Point `planes` at writable pixel buffers for the next frame
    fn lock(&self, planes: &mut Planes) -> Picture;

    /// The picture has been decoded into the planes
    fn unlock(&self, _picture: Picture, _planes: &Planes) {}

    /// The picture is due for display
    fn display(&self, _picture: Picture) {}
}

type LockFn = dyn Fn(&mut Planes) -> Picture + Send + Sync;
type UnlockFn = dyn Fn(Picture, &Planes) + Send + Sync;
type DisplayFn = dyn Fn(Picture) + Send + Sync;

/// [`VideoRenderer`] built from closures
pub struct RenderCallbacks {
    lock: Box<LockFn>,
    unlock: Option<Box<UnlockFn>>,
    display: Option<Box<DisplayFn>>,
}

impl RenderCallbacks {
    pub fn new<L>(lock: L) -> Self
    where
        L: Fn(&mut Planes) -> Picture + Send + Sync + 'static,
    {
        Self {
            lock: Box::new(lock),
            unlock: None,
            display: None,
        }
    }

    pub fn on_unlock<U>(mut self, unlock: U) -> Self
    where
        U: Fn(Picture, &Planes) + Send + Sync + 'static,
    {
        self.unlock = Some(Box::new(unlock));
        self
    }

    pub fn on_display<D>(mut self, display: D) -> Self
    where
        D: Fn(Picture) + Send + Sync + 'static,
    {
        self.display = Some(Box::new(display));
        self
    }
}

impl VideoRenderer for RenderCallbacks {
    fn lock(&self, planes: &mut Planes) -> Picture {
        (self.lock)(planes)
    }

    fn unlock(&self, picture: Picture, planes: &Planes) {
        if let Some(unlock) = &self.unlock {
            unlock(picture, planes);
        }
    }

    fn display(&self, picture: Picture) {
        if let Some(display) = &self.display {
            display(picture);
        }
    }
}

impl fmt::Debug for RenderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCallbacks")
            .field("unlock", &self.unlock.is_some())
            .field("display", &self.display.is_some())
            .finish()
    }
}

/// Memory layout libVLC decodes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFormat {
    chroma: [u8; 4],
    pub width: u32,
    pub height: u32,
    /// Bytes per row
    pub pitch: u32,
}

impl VideoFormat {
    /// `chroma` must be a four-character code such as `"RV32"` or `"I420"`
    pub fn new(chroma: &str, width: u32, height: u32, pitch: u32) -> Result<Self> {
        let bytes = chroma.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(Error::InvalidArgument(format!(
                "chroma must be four ASCII characters, got {:?}",
                chroma
            )));
        }

        Ok(Self {
            chroma: [bytes[0], bytes[1], bytes[2], bytes[3]],
            width,
            height,
            pitch,
        })
    }

    /// Packed 32-bit RGB
    pub fn rv32(width: u32, height: u32) -> Self {
        Self {
            chroma: *b"RV32",
            width,
            height,
            pitch: width * 4,
        }
    }

    pub fn chroma(&self) -> &str {
        std::str::from_utf8(&self.chroma).unwrap_or("????")
    }

    /// Bytes in one plane of `pitch * height`
    pub fn plane_len(&self) -> usize {
        self.pitch as usize * self.height as usize
    }

    /// NUL-terminated chroma for libVLC
    pub(crate) fn chroma_cstr(&self) -> [u8; 5] {
        [self.chroma[0], self.chroma[1], self.chroma[2], self.chroma[3], 0]
    }
}

/// Renderer currently installed on one player
#[derive(Default)]
pub(crate) struct RenderSlot {
    current: RwLock<Option<Arc<dyn VideoRenderer>>>,
    frames: AtomicU64,
}

impl RenderSlot {
    /// Swap in a renderer (or none), returning the previous one
    pub(crate) fn replace(&self, renderer: Option<Arc<dyn VideoRenderer>>) -> Option<Arc<dyn VideoRenderer>> {
        std::mem::replace(&mut *self.current.write(), renderer)
    }

    pub(crate) fn current(&self) -> Option<Arc<dyn VideoRenderer>> {
        self.current.read().clone()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.current.read().is_some()
    }

    /// Frames displayed through this slot
    pub(crate) fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Address handed to libVLC as the callbacks' opaque pointer
    pub(crate) fn opaque(self: &Arc<Self>) -> *mut c_void {
        Arc::as_ptr(self) as *mut c_void
    }
}

impl fmt::Debug for RenderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSlot")
            .field("installed", &self.is_set())
            .field("frames", &self.frames())
            .finish()
    }
}

/// # Safety
/// `opaque` is null or the address of a live `RenderSlot`
unsafe fn slot<'a>(opaque: *mut c_void) -> Option<&'a RenderSlot> {
    (opaque as *const RenderSlot).as_ref()
}

pub(crate) unsafe extern "C" fn lock_trampoline(opaque: *mut c_void, planes: *mut *mut c_void) -> *mut c_void {
    let Some(renderer) = slot(opaque).and_then(RenderSlot::current) else {
        return ptr::null_mut();
    };
    if planes.is_null() {
        return ptr::null_mut();
    }

    let planes = &mut *(planes as *mut Planes);
    match catch_unwind(AssertUnwindSafe(|| renderer.lock(planes))) {
        Ok(picture) => picture.as_ptr(),
        Err(_) => {
            log::error!("Video lock callback panicked; returning no picture");
            ptr::null_mut()
        }
    }
}

pub(crate) unsafe extern "C" fn unlock_trampoline(
    opaque: *mut c_void,
    picture: *mut c_void,
    planes: *const *mut c_void,
) {
    let Some(renderer) = slot(opaque).and_then(RenderSlot::current) else {
        return;
    };
    if planes.is_null() {
        return;
    }

    let planes = &*(planes as *const Planes);
    if catch_unwind(AssertUnwindSafe(|| renderer.unlock(Picture(picture), planes))).is_err() {
        log::error!("Video unlock callback panicked");
    }
}

pub(crate) unsafe extern "C" fn display_trampoline(opaque: *mut c_void, picture: *mut c_void) {
    let Some(slot) = slot(opaque) else {
        return;
    };
    let Some(renderer) = slot.current() else {
        return;
    };

    slot.frames.fetch_add(1, Ordering::Relaxed);
    if catch_unwind(AssertUnwindSafe(|| renderer.display(Picture(picture)))).is_err() {
        log::error!("Video display callback panicked");
    }
}
