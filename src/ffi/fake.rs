//! In-process stand-in for libVLC used by the unit tests
//!
//! Objects are leaked heap records with an atomic refcount, so tests can
//! inspect them after the binding released its last reference. Strings
//! handed out are leaked too; `libvlc_free` only records the address, which
//! keeps "freed exactly once" checks exact across parallel tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::{c_char, c_float, c_int, c_uint, c_void, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, ReentrantMutex};

use super::*;
use crate::event::EventType;

pub(crate) const VERSION: &str = "1.1.9 Fake";
const COMPILER: &CStr = c"rustc (fake)";
const CHANGESET: &CStr = c"fake-0000";
const VERSION_C: &CStr = c"1.1.9 Fake";
const UNKNOWN_EVENT: &CStr = c"Unknown Event";

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

static FREED: Lazy<Mutex<HashSet<usize>>> = Lazy::new(|| Mutex::new(HashSet::new()));
static DOUBLE_FREES: Lazy<Mutex<HashSet<usize>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Set the calling thread's error slot
pub(crate) fn set_error(msg: &str) {
    LAST_ERROR.with(|e| *e.borrow_mut() = CString::new(msg).ok());
}

/// Hand out a string the binding must free with `libvlc_free`
pub(crate) fn leak_string(text: &str) -> *mut c_char {
    CString::new(text).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

/// Whether `ptr` went through `libvlc_free`
pub(crate) fn was_freed<T>(ptr: *const T) -> bool {
    FREED.lock().contains(&(ptr as usize))
}

/// Whether `ptr` went through `libvlc_free` more than once
pub(crate) fn double_freed<T>(ptr: *const T) -> bool {
    DOUBLE_FREES.lock().contains(&(ptr as usize))
}

// =============================================================================
// Objects
// =============================================================================

#[derive(Clone, Copy)]
struct Listener {
    event_type: c_int,
    callback: libvlc_callback_t,
    data: usize,
}

#[derive(Default)]
pub(crate) struct FakeEventManager {
    listeners: Mutex<Vec<Listener>>,
    sending: ReentrantMutex<()>,
    fail_attach: AtomicBool,
}

#[derive(Clone, Copy)]
struct FakeRender {
    lock: Option<libvlc_video_lock_cb>,
    unlock: Option<libvlc_video_unlock_cb>,
    display: Option<libvlc_video_display_cb>,
    opaque: usize,
}

struct FakeMessage {
    severity: c_int,
    module_type: CString,
    name: CString,
    header: Option<CString>,
    text: CString,
}

#[derive(Default)]
struct FakeState {
    mrl: String,
    options: Vec<(String, c_uint)>,
    meta: HashMap<c_int, String>,
    media: Option<usize>,
    items: Vec<usize>,
    locked: bool,
    readonly: bool,
    playing: bool,
    paused: bool,
    time: i64,
    position: f32,
    rate: f32,
    volume: c_int,
    muted: bool,
    xwindow: u32,
    hwnd: usize,
    render: Option<FakeRender>,
    format: Option<(String, u32, u32, u32)>,
    user_agent: Option<(String, String)>,
    verbosity: c_uint,
    messages: Vec<FakeMessage>,
    cursor: usize,
    parsed: bool,
    player: Option<usize>,
    list: Option<usize>,
    mode: c_int,
    broadcasts: HashMap<String, String>,
    released: bool,
}

pub(crate) struct FakeObject {
    kind: &'static str,
    refs: AtomicUsize,
    over_released: AtomicBool,
    events: FakeEventManager,
    state: Mutex<FakeState>,
}

fn new_object<T>(kind: &'static str, mrl: &str) -> *mut T {
    let object = FakeObject {
        kind,
        refs: AtomicUsize::new(1),
        over_released: AtomicBool::new(false),
        events: FakeEventManager::default(),
        state: Mutex::new(FakeState {
            mrl: mrl.to_string(),
            rate: 1.0,
            volume: 100,
            ..FakeState::default()
        }),
    };
    Box::into_raw(Box::new(object)).cast()
}

fn object<'a, T>(ptr: *mut T) -> &'a FakeObject {
    unsafe { &*(ptr as *const FakeObject) }
}

fn event_manager<'a>(ptr: *mut libvlc_event_manager_t) -> &'a FakeEventManager {
    unsafe { &*(ptr as *const FakeEventManager) }
}

fn text<'a>(ptr: *const c_char) -> &'a str {
    if ptr.is_null() {
        return "";
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

/// Current native refcount of a fake object
pub(crate) fn refcount<T>(ptr: *mut T) -> usize {
    object(ptr).refs.load(Ordering::SeqCst)
}

/// Whether the binding released a fake object more times than it owned it
pub(crate) fn over_released<T>(ptr: *mut T) -> bool {
    object(ptr).over_released.load(Ordering::SeqCst)
}

/// Kind label of a fake object
pub(crate) fn kind_of<T>(ptr: *mut T) -> &'static str {
    object(ptr).kind
}

/// Number of native listeners registered on an object's event manager
pub(crate) fn listener_count<T>(ptr: *mut T) -> usize {
    object(ptr).events.listeners.lock().len()
}

/// Make the next `libvlc_event_attach` on this object fail
pub(crate) fn fail_next_attach<T>(ptr: *mut T) {
    object(ptr).events.fail_attach.store(true, Ordering::SeqCst);
}

/// Options added to a fake media
pub(crate) fn options<T>(ptr: *mut T) -> Vec<(String, c_uint)> {
    object(ptr).state.lock().options.clone()
}

/// Chroma and geometry configured with `libvlc_video_set_format`
pub(crate) fn video_format<T>(ptr: *mut T) -> Option<(String, u32, u32, u32)> {
    object(ptr).state.lock().format.clone()
}

/// Whether a track or output list head went through its release function
pub(crate) fn list_released<T>(ptr: *mut T) -> bool {
    RELEASED_LISTS.lock().contains(&(ptr as usize))
}

static RELEASED_LISTS: Lazy<Mutex<HashSet<usize>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Deliver an event to every matching listener of an object, like libVLC does
/// from its own threads
pub(crate) fn emit<T>(ptr: *mut T, event_type: EventType, payload: [u8; EVENT_PAYLOAD_LEN]) {
    emit_raw(&object(ptr).events, ptr.cast(), event_type.as_raw(), payload);
}

fn emit_raw(
    manager: &FakeEventManager,
    source: *mut c_void,
    event_type: c_int,
    payload: [u8; EVENT_PAYLOAD_LEN],
) {
    let _sending = manager.sending.lock();

    let targets: Vec<Listener> = manager
        .listeners
        .lock()
        .iter()
        .filter(|l| l.event_type == event_type)
        .copied()
        .collect();

    let event = libvlc_event_t {
        type_: event_type,
        p_obj: source,
        u: EventPayload::new(payload),
    };

    for listener in targets {
        // A listener detached by an earlier handler in this round is skipped
        let still_attached = manager.listeners.lock().iter().any(|l| {
            l.event_type == listener.event_type
                && l.data == listener.data
                && l.callback as usize == listener.callback as usize
        });
        if still_attached {
            unsafe { (listener.callback)(&event, listener.data as *mut c_void) };
        }
    }
}

/// Payload whose first slot holds a pointer
pub(crate) fn pointer_payload<T>(ptr: *const T) -> [u8; EVENT_PAYLOAD_LEN] {
    let mut payload = [0u8; EVENT_PAYLOAD_LEN];
    let bytes = (ptr as usize).to_le_bytes();
    payload[..bytes.len()].copy_from_slice(&bytes);
    payload
}

/// Run one frame through the render callbacks registered on a player.
///
/// Returns the picture produced by lock and the first plane, or `None`
/// when no callbacks are registered.
pub(crate) fn render_frame<T>(player: *mut T) -> Option<(*mut c_void, *mut c_void)> {
    let render = object(player).state.lock().render?;
    let opaque = render.opaque as *mut c_void;
    let mut planes = [ptr::null_mut::<c_void>(); PICTURE_PLANE_MAX];

    let picture = match render.lock {
        Some(lock) => unsafe { lock(opaque, planes.as_mut_ptr()) },
        None => ptr::null_mut(),
    };
    if let Some(unlock) = render.unlock {
        unsafe { unlock(opaque, picture, planes.as_ptr()) };
    }
    if let Some(display) = render.display {
        unsafe { display(opaque, picture) };
    }

    Some((picture, planes[0]))
}

/// Queue a message in a fake instance's log
pub(crate) fn push_log_message<T>(instance: *mut T, severity: c_int, name: &str, message: &str) {
    let fake = FakeMessage {
        severity,
        module_type: c"main".to_owned(),
        name: CString::new(name).unwrap_or_default(),
        header: None,
        text: CString::new(message).unwrap_or_default(),
    };
    object(instance).state.lock().messages.push(fake);
}

// =============================================================================
// Core
// =============================================================================

unsafe extern "C" fn errmsg() -> *const c_char {
    LAST_ERROR.with(|e| e.borrow().as_ref().map_or(ptr::null(), |m| m.as_ptr()))
}

unsafe extern "C" fn clearerr() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

unsafe extern "C" fn free(ptr: *mut c_void) {
    if !FREED.lock().insert(ptr as usize) {
        DOUBLE_FREES.lock().insert(ptr as usize);
    }
}

unsafe extern "C" fn get_version() -> *const c_char {
    VERSION_C.as_ptr()
}

unsafe extern "C" fn get_compiler() -> *const c_char {
    COMPILER.as_ptr()
}

unsafe extern "C" fn get_changeset() -> *const c_char {
    CHANGESET.as_ptr()
}

unsafe extern "C" fn event_type_name(event_type: c_int) -> *const c_char {
    match EventType::from_raw(event_type) {
        Some(EventType::MediaPlayerStopped) => c"MediaPlayerStopped".as_ptr(),
        _ => UNKNOWN_EVENT.as_ptr(),
    }
}

unsafe extern "C" fn new_instance(argc: c_int, argv: *const *const c_char) -> *mut libvlc_instance_t {
    let args: Vec<&str> = (0..argc.max(0) as usize)
        .map(|i| text(*argv.add(i)))
        .collect();

    if args.contains(&"--fake-refuse") {
        set_error("fake: instance creation refused");
        return ptr::null_mut();
    }

    new_object("instance", &args.join(" "))
}

unsafe extern "C" fn retain<T>(ptr: *mut T) {
    object(ptr).refs.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn release<T>(ptr: *mut T) {
    let fake = object(ptr);
    let previous = fake
        .refs
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    if previous.is_err() {
        fake.over_released.store(true, Ordering::SeqCst);
    }
}

unsafe extern "C" fn add_intf(instance: *mut libvlc_instance_t, name: *const c_char) -> c_int {
    if text(name) == "missing" {
        set_error("fake: no such interface");
        return -1;
    }
    let _ = instance;
    0
}

unsafe extern "C" fn wait(_instance: *mut libvlc_instance_t) {}

unsafe extern "C" fn set_user_agent(instance: *mut libvlc_instance_t, name: *const c_char, http: *const c_char) {
    object(instance).state.lock().user_agent = Some((text(name).to_string(), text(http).to_string()));
}

/// User agent recorded by `libvlc_set_user_agent`
pub(crate) fn user_agent<T>(instance: *mut T) -> Option<(String, String)> {
    object(instance).state.lock().user_agent.clone()
}

// =============================================================================
// Events
// =============================================================================

unsafe extern "C" fn event_manager_of<T>(ptr: *mut T) -> *mut libvlc_event_manager_t {
    &object(ptr).events as *const FakeEventManager as *mut libvlc_event_manager_t
}

unsafe extern "C" fn event_attach(
    em: *mut libvlc_event_manager_t,
    event_type: c_int,
    callback: Option<libvlc_callback_t>,
    data: *mut c_void,
) -> c_int {
    let manager = event_manager(em);
    if manager.fail_attach.swap(false, Ordering::SeqCst) {
        set_error("fake: attach refused");
        return -1;
    }
    let Some(callback) = callback else {
        set_error("fake: null callback");
        return -1;
    };
    manager.listeners.lock().push(Listener {
        event_type,
        callback,
        data: data as usize,
    });
    0
}

unsafe extern "C" fn event_detach(
    em: *mut libvlc_event_manager_t,
    event_type: c_int,
    callback: Option<libvlc_callback_t>,
    data: *mut c_void,
) {
    let manager = event_manager(em);
    // Waits for deliveries on other threads; re-entrant on the delivering one
    let _sending = manager.sending.lock();
    let callback = callback.map_or(0, |c| c as usize);
    let mut listeners = manager.listeners.lock();
    if let Some(index) = listeners.iter().position(|l| {
        l.event_type == event_type && l.data == data as usize && l.callback as usize == callback
    }) {
        listeners.remove(index);
    }
}

// =============================================================================
// Message Log
// =============================================================================

unsafe extern "C" fn get_log_verbosity(instance: *const libvlc_instance_t) -> c_uint {
    object(instance as *mut libvlc_instance_t).state.lock().verbosity
}

unsafe extern "C" fn set_log_verbosity(instance: *mut libvlc_instance_t, level: c_uint) {
    object(instance).state.lock().verbosity = level;
}

unsafe extern "C" fn log_open(instance: *mut libvlc_instance_t) -> *mut libvlc_log_t {
    let log: *mut libvlc_log_t = new_object("log", "");
    object(log).state.lock().media = Some(instance as usize);
    log
}

unsafe extern "C" fn log_close(log: *mut libvlc_log_t) {
    object(log).state.lock().released = true;
}

fn log_instance<'a>(log: *const libvlc_log_t) -> &'a FakeObject {
    let instance = object(log as *mut libvlc_log_t).state.lock().media.unwrap_or(0);
    object(instance as *mut libvlc_instance_t)
}

unsafe extern "C" fn log_count(log: *const libvlc_log_t) -> c_uint {
    log_instance(log).state.lock().messages.len() as c_uint
}

unsafe extern "C" fn log_clear(log: *mut libvlc_log_t) {
    log_instance(log).state.lock().messages.clear();
}

unsafe extern "C" fn log_get_iterator(log: *const libvlc_log_t) -> *mut libvlc_log_iterator_t {
    let iterator: *mut libvlc_log_iterator_t = new_object("log_iterator", "");
    object(iterator).state.lock().media = Some(log as usize);
    iterator
}

unsafe extern "C" fn log_iterator_free(iterator: *mut libvlc_log_iterator_t) {
    object(iterator).state.lock().released = true;
}

/// Whether a fake log or iterator was closed/freed
pub(crate) fn is_closed<T>(ptr: *mut T) -> bool {
    object(ptr).state.lock().released
}

fn iterator_log(iterator: *const libvlc_log_iterator_t) -> (*const libvlc_log_t, usize) {
    let state = object(iterator as *mut libvlc_log_iterator_t).state.lock();
    (state.media.unwrap_or(0) as *const libvlc_log_t, state.cursor)
}

unsafe extern "C" fn log_iterator_has_next(iterator: *const libvlc_log_iterator_t) -> c_int {
    let (log, cursor) = iterator_log(iterator);
    (cursor < log_instance(log).state.lock().messages.len()) as c_int
}

unsafe extern "C" fn log_iterator_next(
    iterator: *mut libvlc_log_iterator_t,
    buffer: *mut libvlc_log_message_t,
) -> *mut libvlc_log_message_t {
    let (log, cursor) = iterator_log(iterator);
    let state = log_instance(log).state.lock();
    let Some(message) = state.messages.get(cursor) else {
        set_error("fake: iterator exhausted");
        return ptr::null_mut();
    };

    let out = &mut *buffer;
    out.i_severity = message.severity;
    out.psz_type = message.module_type.as_ptr();
    out.psz_name = message.name.as_ptr();
    out.psz_header = message.header.as_ref().map_or(ptr::null(), |h| h.as_ptr());
    out.psz_message = message.text.as_ptr();
    drop(state);

    object(iterator).state.lock().cursor += 1;
    buffer
}

// =============================================================================
// Audio Outputs
// =============================================================================

unsafe extern "C" fn audio_output_list_get(_instance: *mut libvlc_instance_t) -> *mut libvlc_audio_output_t {
    let mut head: *mut libvlc_audio_output_t = ptr::null_mut();
    for (name, description) in [("pulse", "PulseAudio"), ("alsa", "ALSA audio output")] {
        head = Box::into_raw(Box::new(libvlc_audio_output_t {
            psz_name: leak_string(name),
            psz_description: leak_string(description),
            p_next: head,
        }));
    }
    head
}

unsafe extern "C" fn list_release<T>(head: *mut T) {
    if !RELEASED_LISTS.lock().insert(head as usize) {
        DOUBLE_FREES.lock().insert(head as usize);
    }
}

unsafe extern "C" fn audio_output_device_count(_instance: *mut libvlc_instance_t, output: *const c_char) -> c_int {
    if text(output) == "alsa" {
        2
    } else {
        0
    }
}

unsafe extern "C" fn audio_output_device_longname(
    _instance: *mut libvlc_instance_t,
    output: *const c_char,
    index: c_int,
) -> *mut c_char {
    leak_string(&format!("{} device {}", text(output), index))
}

unsafe extern "C" fn audio_output_device_id(
    _instance: *mut libvlc_instance_t,
    _output: *const c_char,
    index: c_int,
) -> *mut c_char {
    leak_string(&format!("hw:{}", index))
}

// =============================================================================
// Media
// =============================================================================

unsafe extern "C" fn media_new_location(_instance: *mut libvlc_instance_t, mrl: *const c_char) -> *mut libvlc_media_t {
    let mrl = text(mrl);
    if !mrl.contains("://") {
        set_error("fake: not a location");
        return ptr::null_mut();
    }
    new_object("media", mrl)
}

unsafe extern "C" fn media_new_path(_instance: *mut libvlc_instance_t, path: *const c_char) -> *mut libvlc_media_t {
    new_object("media", &format!("file://{}", text(path)))
}

unsafe extern "C" fn media_new_fd(_instance: *mut libvlc_instance_t, fd: c_int) -> *mut libvlc_media_t {
    new_object("media", &format!("fd://{}", fd))
}

unsafe extern "C" fn media_new_as_node(_instance: *mut libvlc_instance_t, name: *const c_char) -> *mut libvlc_media_t {
    new_object("media", text(name))
}

unsafe extern "C" fn media_add_option(media: *mut libvlc_media_t, option: *const c_char) {
    object(media).state.lock().options.push((text(option).to_string(), 0));
}

unsafe extern "C" fn media_add_option_flag(media: *mut libvlc_media_t, option: *const c_char, flags: c_uint) {
    object(media).state.lock().options.push((text(option).to_string(), flags));
}

unsafe extern "C" fn media_get_mrl(media: *mut libvlc_media_t) -> *mut c_char {
    leak_string(&object(media).state.lock().mrl)
}

unsafe extern "C" fn media_duplicate(media: *mut libvlc_media_t) -> *mut libvlc_media_t {
    let mrl = object(media).state.lock().mrl.clone();
    new_object("media", &mrl)
}

unsafe extern "C" fn media_get_meta(media: *mut libvlc_media_t, meta: c_int) -> *mut c_char {
    match object(media).state.lock().meta.get(&meta) {
        Some(value) => leak_string(value),
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn media_set_meta(media: *mut libvlc_media_t, meta: c_int, value: *const c_char) {
    object(media).state.lock().meta.insert(meta, text(value).to_string());
}

unsafe extern "C" fn media_save_meta(media: *mut libvlc_media_t) -> c_int {
    if object(media).state.lock().mrl.starts_with("file://") {
        1
    } else {
        set_error("fake: meta is read-only");
        0
    }
}

unsafe extern "C" fn media_get_state(media: *mut libvlc_media_t) -> c_int {
    if object(media).state.lock().parsed {
        5
    } else {
        0
    }
}

unsafe extern "C" fn media_get_stats(media: *mut libvlc_media_t, stats: *mut libvlc_media_stats_t) -> c_int {
    if !object(media).state.lock().parsed {
        set_error("fake: no statistics");
        return 0;
    }
    *stats = libvlc_media_stats_t {
        i_read_bytes: 4096,
        f_input_bitrate: 1.5,
        i_decoded_video: 24,
        i_displayed_pictures: 23,
        i_lost_pictures: 1,
        ..Default::default()
    };
    1
}

unsafe extern "C" fn media_subitems(media: *mut libvlc_media_t) -> *mut libvlc_media_list_t {
    let list: *mut libvlc_media_list_t = new_object("media_list", "");
    {
        let mut state = object(list).state.lock();
        state.readonly = true;
        state.media = Some(media as usize);
    }
    list
}

unsafe extern "C" fn media_get_duration(media: *mut libvlc_media_t) -> libvlc_time_t {
    if object(media).state.lock().parsed {
        90_000
    } else {
        -1
    }
}

unsafe extern "C" fn media_parse(media: *mut libvlc_media_t) {
    object(media).state.lock().parsed = true;
}

unsafe extern "C" fn media_is_parsed(media: *mut libvlc_media_t) -> c_int {
    object(media).state.lock().parsed as c_int
}

unsafe extern "C" fn media_get_tracks_info(
    media: *mut libvlc_media_t,
    out: *mut *mut libvlc_media_track_info_t,
) -> c_int {
    if !object(media).state.lock().parsed {
        *out = ptr::null_mut();
        return 0;
    }
    let tracks = vec![
        libvlc_media_track_info_t {
            i_codec: u32::from_le_bytes(*b"h264"),
            i_id: 0,
            i_type: 1,
            i_profile: 100,
            i_level: 41,
            // height, then width
            u: track_info_dims { first: 720, second: 1280 },
        },
        libvlc_media_track_info_t {
            i_codec: u32::from_le_bytes(*b"mp4a"),
            i_id: 1,
            i_type: 0,
            i_profile: 2,
            i_level: 0,
            u: track_info_dims { first: 2, second: 48_000 },
        },
    ];
    let count = tracks.len() as c_int;
    *out = Box::into_raw(tracks.into_boxed_slice()).cast();
    count
}

// =============================================================================
// Media List
// =============================================================================

unsafe extern "C" fn media_list_new(_instance: *mut libvlc_instance_t) -> *mut libvlc_media_list_t {
    new_object("media_list", "")
}

unsafe extern "C" fn media_list_set_media(list: *mut libvlc_media_list_t, media: *mut libvlc_media_t) {
    retain(media);
    let previous = object(list).state.lock().media.replace(media as usize);
    if let Some(previous) = previous {
        release(previous as *mut libvlc_media_t);
    }
}

unsafe extern "C" fn media_list_media(list: *mut libvlc_media_list_t) -> *mut libvlc_media_t {
    match object(list).state.lock().media {
        Some(media) => {
            retain(media as *mut libvlc_media_t);
            media as *mut libvlc_media_t
        }
        None => ptr::null_mut(),
    }
}

fn ensure_writable(list: &FakeState) -> bool {
    if !list.locked {
        set_error("fake: list not locked");
        return false;
    }
    if list.readonly {
        set_error("fake: list is read-only");
        return false;
    }
    true
}

unsafe extern "C" fn media_list_add_media(list: *mut libvlc_media_list_t, media: *mut libvlc_media_t) -> c_int {
    let index = {
        let mut state = object(list).state.lock();
        if !ensure_writable(&state) {
            return -1;
        }
        retain(media);
        state.items.push(media as usize);
        state.items.len() - 1
    };
    let mut payload = pointer_payload(media);
    payload[8..12].copy_from_slice(&(index as i32).to_le_bytes());
    emit(list, EventType::MediaListItemAdded, payload);
    0
}

unsafe extern "C" fn media_list_insert_media(
    list: *mut libvlc_media_list_t,
    media: *mut libvlc_media_t,
    index: c_int,
) -> c_int {
    let mut state = object(list).state.lock();
    if !ensure_writable(&state) {
        return -1;
    }
    if index < 0 || index as usize > state.items.len() {
        set_error("fake: index out of range");
        return -1;
    }
    retain(media);
    state.items.insert(index as usize, media as usize);
    0
}

unsafe extern "C" fn media_list_remove_index(list: *mut libvlc_media_list_t, index: c_int) -> c_int {
    let mut state = object(list).state.lock();
    if !ensure_writable(&state) {
        return -1;
    }
    if index < 0 || index as usize >= state.items.len() {
        set_error("fake: index out of range");
        return -1;
    }
    let media = state.items.remove(index as usize);
    drop(state);
    release(media as *mut libvlc_media_t);
    0
}

unsafe extern "C" fn media_list_count(list: *mut libvlc_media_list_t) -> c_int {
    object(list).state.lock().items.len() as c_int
}

unsafe extern "C" fn media_list_item_at_index(list: *mut libvlc_media_list_t, index: c_int) -> *mut libvlc_media_t {
    let state = object(list).state.lock();
    match usize::try_from(index).ok().and_then(|i| state.items.get(i)) {
        Some(&media) => {
            retain(media as *mut libvlc_media_t);
            media as *mut libvlc_media_t
        }
        None => {
            set_error("fake: index out of range");
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn media_list_index_of_item(list: *mut libvlc_media_list_t, media: *mut libvlc_media_t) -> c_int {
    let state = object(list).state.lock();
    match state.items.iter().position(|&m| m == media as usize) {
        Some(index) => index as c_int,
        None => {
            set_error("fake: item not in list");
            -1
        }
    }
}

unsafe extern "C" fn media_list_is_readonly(list: *mut libvlc_media_list_t) -> c_int {
    object(list).state.lock().readonly as c_int
}

unsafe extern "C" fn media_list_lock(list: *mut libvlc_media_list_t) {
    object(list).state.lock().locked = true;
}

unsafe extern "C" fn media_list_unlock(list: *mut libvlc_media_list_t) {
    object(list).state.lock().locked = false;
}

/// Whether a fake media list is currently locked
pub(crate) fn is_locked<T>(list: *mut T) -> bool {
    object(list).state.lock().locked
}

// =============================================================================
// Media List Player
// =============================================================================

unsafe extern "C" fn list_player_new(_instance: *mut libvlc_instance_t) -> *mut libvlc_media_list_player_t {
    new_object("media_list_player", "")
}

unsafe extern "C" fn list_player_set_media_player(
    player: *mut libvlc_media_list_player_t,
    media_player: *mut libvlc_media_player_t,
) {
    object(player).state.lock().player = Some(media_player as usize);
}

unsafe extern "C" fn list_player_set_media_list(player: *mut libvlc_media_list_player_t, list: *mut libvlc_media_list_t) {
    retain(list);
    let mut state = object(player).state.lock();
    state.list = Some(list as usize);
    state.cursor = 0;
}

fn list_player_items(player: *mut libvlc_media_list_player_t) -> Vec<usize> {
    match object(player).state.lock().list {
        Some(list) => object(list as *mut libvlc_media_list_t).state.lock().items.clone(),
        None => Vec::new(),
    }
}

unsafe extern "C" fn list_player_play(player: *mut libvlc_media_list_player_t) {
    if list_player_items(player).is_empty() {
        set_error("fake: nothing to play");
        return;
    }
    object(player).state.lock().playing = true;
    emit(player, EventType::MediaListPlayerPlayed, [0; EVENT_PAYLOAD_LEN]);
}

unsafe extern "C" fn list_player_pause(player: *mut libvlc_media_list_player_t) {
    let mut state = object(player).state.lock();
    state.paused = !state.paused;
}

unsafe extern "C" fn list_player_is_playing(player: *mut libvlc_media_list_player_t) -> c_int {
    object(player).state.lock().playing as c_int
}

unsafe extern "C" fn list_player_get_state(player: *mut libvlc_media_list_player_t) -> c_int {
    let state = object(player).state.lock();
    match (state.playing, state.paused) {
        (true, false) => 3,
        (true, true) => 4,
        _ => 0,
    }
}

fn list_player_jump(player: *mut libvlc_media_list_player_t, index: usize) -> c_int {
    let items = list_player_items(player);
    let Some(&media) = items.get(index) else {
        set_error("fake: no such item");
        return -1;
    };
    {
        let mut state = object(player).state.lock();
        state.cursor = index;
        state.playing = true;
    }
    emit(player, EventType::MediaListPlayerNextItemSet, pointer_payload(media as *const c_void));
    0
}

unsafe extern "C" fn list_player_play_item_at_index(player: *mut libvlc_media_list_player_t, index: c_int) -> c_int {
    match usize::try_from(index) {
        Ok(index) => list_player_jump(player, index),
        Err(_) => {
            set_error("fake: no such item");
            -1
        }
    }
}

unsafe extern "C" fn list_player_play_item(player: *mut libvlc_media_list_player_t, media: *mut libvlc_media_t) -> c_int {
    match list_player_items(player).iter().position(|&m| m == media as usize) {
        Some(index) => list_player_jump(player, index),
        None => {
            set_error("fake: item not in list");
            -1
        }
    }
}

unsafe extern "C" fn list_player_stop(player: *mut libvlc_media_list_player_t) {
    object(player).state.lock().playing = false;
    emit(player, EventType::MediaListPlayerStopped, [0; EVENT_PAYLOAD_LEN]);
}

unsafe extern "C" fn list_player_next(player: *mut libvlc_media_list_player_t) -> c_int {
    let cursor = object(player).state.lock().cursor;
    list_player_jump(player, cursor + 1)
}

unsafe extern "C" fn list_player_previous(player: *mut libvlc_media_list_player_t) -> c_int {
    let cursor = object(player).state.lock().cursor;
    match cursor.checked_sub(1) {
        Some(index) => list_player_jump(player, index),
        None => {
            set_error("fake: at first item");
            -1
        }
    }
}

unsafe extern "C" fn list_player_set_playback_mode(player: *mut libvlc_media_list_player_t, mode: c_int) {
    object(player).state.lock().mode = mode;
}

/// Playback mode recorded on a fake list player
pub(crate) fn playback_mode<T>(player: *mut T) -> c_int {
    object(player).state.lock().mode
}

/// Media player attached to a fake list player
pub(crate) fn attached_player<T>(player: *mut T) -> Option<usize> {
    object(player).state.lock().player
}

// =============================================================================
// Media Library / Discoverer
// =============================================================================

unsafe extern "C" fn library_new(_instance: *mut libvlc_instance_t) -> *mut libvlc_media_library_t {
    new_object("media_library", "")
}

unsafe extern "C" fn library_load(library: *mut libvlc_media_library_t) -> c_int {
    object(library).state.lock().parsed = true;
    0
}

unsafe extern "C" fn library_media_list(library: *mut libvlc_media_library_t) -> *mut libvlc_media_list_t {
    let mut state = object(library).state.lock();
    if !state.parsed {
        set_error("fake: library not loaded");
        return ptr::null_mut();
    }
    let list = *state
        .list
        .get_or_insert_with(|| new_object::<libvlc_media_list_t>("media_list", "") as usize);
    retain(list as *mut libvlc_media_list_t);
    list as *mut libvlc_media_list_t
}

unsafe extern "C" fn discoverer_new_from_name(
    _instance: *mut libvlc_instance_t,
    name: *const c_char,
) -> *mut libvlc_media_discoverer_t {
    let name = text(name);
    if name == "missing" {
        set_error("fake: no such service discovery module");
        return ptr::null_mut();
    }
    new_object("media_discoverer", name)
}

unsafe extern "C" fn discoverer_release(discoverer: *mut libvlc_media_discoverer_t) {
    object(discoverer).state.lock().released = true;
    release(discoverer);
}

unsafe extern "C" fn discoverer_localized_name(discoverer: *mut libvlc_media_discoverer_t) -> *mut c_char {
    leak_string(&format!("Fake {}", object(discoverer).state.lock().mrl))
}

unsafe extern "C" fn discoverer_media_list(discoverer: *mut libvlc_media_discoverer_t) -> *mut libvlc_media_list_t {
    let list: *mut libvlc_media_list_t = new_object("media_list", "");
    object(list).state.lock().readonly = true;
    let _ = discoverer;
    list
}

unsafe extern "C" fn discoverer_is_running(_discoverer: *mut libvlc_media_discoverer_t) -> c_int {
    1
}

// =============================================================================
// Media Player
// =============================================================================

unsafe extern "C" fn player_new(_instance: *mut libvlc_instance_t) -> *mut libvlc_media_player_t {
    new_object("media_player", "")
}

unsafe extern "C" fn player_new_from_media(media: *mut libvlc_media_t) -> *mut libvlc_media_player_t {
    let player: *mut libvlc_media_player_t = new_object("media_player", "");
    player_set_media(player, media);
    player
}

unsafe extern "C" fn player_set_media(player: *mut libvlc_media_player_t, media: *mut libvlc_media_t) {
    if !media.is_null() {
        retain(media);
    }
    let previous = std::mem::replace(
        &mut object(player).state.lock().media,
        (!media.is_null()).then_some(media as usize),
    );
    if let Some(previous) = previous {
        release(previous as *mut libvlc_media_t);
    }
    emit(player, EventType::MediaPlayerMediaChanged, pointer_payload(media));
}

unsafe extern "C" fn player_get_media(player: *mut libvlc_media_player_t) -> *mut libvlc_media_t {
    match object(player).state.lock().media {
        Some(media) => {
            retain(media as *mut libvlc_media_t);
            media as *mut libvlc_media_t
        }
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn player_is_playing(player: *mut libvlc_media_player_t) -> c_int {
    let state = object(player).state.lock();
    (state.playing && !state.paused) as c_int
}

unsafe extern "C" fn player_play(player: *mut libvlc_media_player_t) -> c_int {
    let mut state = object(player).state.lock();
    if state.media.is_none() {
        set_error("fake: no media");
        return -1;
    }
    state.playing = true;
    state.paused = false;
    0
}

unsafe extern "C" fn player_set_pause(player: *mut libvlc_media_player_t, pause: c_int) {
    object(player).state.lock().paused = pause != 0;
}

unsafe extern "C" fn player_pause(player: *mut libvlc_media_player_t) {
    let mut state = object(player).state.lock();
    state.paused = !state.paused;
}

unsafe extern "C" fn player_stop(player: *mut libvlc_media_player_t) {
    {
        let mut state = object(player).state.lock();
        state.playing = false;
        state.paused = false;
    }
    emit(player, EventType::MediaPlayerStopped, [0; EVENT_PAYLOAD_LEN]);
}

unsafe extern "C" fn player_get_state(player: *mut libvlc_media_player_t) -> c_int {
    let state = object(player).state.lock();
    match (state.playing, state.paused) {
        (true, false) => 3,
        (true, true) => 4,
        (false, _) if state.media.is_some() => 5,
        _ => 0,
    }
}

unsafe extern "C" fn player_set_xwindow(player: *mut libvlc_media_player_t, drawable: u32) {
    object(player).state.lock().xwindow = drawable;
}

unsafe extern "C" fn player_get_xwindow(player: *mut libvlc_media_player_t) -> u32 {
    object(player).state.lock().xwindow
}

unsafe extern "C" fn player_set_hwnd(player: *mut libvlc_media_player_t, hwnd: *mut c_void) {
    object(player).state.lock().hwnd = hwnd as usize;
}

unsafe extern "C" fn player_get_hwnd(player: *mut libvlc_media_player_t) -> *mut c_void {
    object(player).state.lock().hwnd as *mut c_void
}

unsafe extern "C" fn player_get_length(player: *mut libvlc_media_player_t) -> libvlc_time_t {
    if object(player).state.lock().media.is_some() {
        90_000
    } else {
        -1
    }
}

unsafe extern "C" fn player_get_time(player: *mut libvlc_media_player_t) -> libvlc_time_t {
    let state = object(player).state.lock();
    if state.media.is_none() {
        return -1;
    }
    state.time
}

unsafe extern "C" fn player_set_time(player: *mut libvlc_media_player_t, time: libvlc_time_t) {
    object(player).state.lock().time = time;
}

unsafe extern "C" fn player_get_position(player: *mut libvlc_media_player_t) -> c_float {
    let state = object(player).state.lock();
    if state.media.is_none() {
        return -1.0;
    }
    state.position
}

unsafe extern "C" fn player_set_position(player: *mut libvlc_media_player_t, position: c_float) {
    object(player).state.lock().position = position;
}

unsafe extern "C" fn player_get_rate(player: *mut libvlc_media_player_t) -> c_float {
    object(player).state.lock().rate
}

unsafe extern "C" fn player_set_rate(player: *mut libvlc_media_player_t, rate: c_float) -> c_int {
    if rate <= 0.0 {
        set_error("fake: rate must be positive");
        return -1;
    }
    object(player).state.lock().rate = rate;
    0
}

unsafe extern "C" fn player_is_seekable(player: *mut libvlc_media_player_t) -> c_int {
    object(player).state.lock().media.is_some() as c_int
}

unsafe extern "C" fn player_has_vout(player: *mut libvlc_media_player_t) -> c_uint {
    object(player).state.lock().render.is_some() as c_uint
}

// =============================================================================
// Video
// =============================================================================

unsafe extern "C" fn video_set_callbacks(
    player: *mut libvlc_media_player_t,
    lock: Option<libvlc_video_lock_cb>,
    unlock: Option<libvlc_video_unlock_cb>,
    display: Option<libvlc_video_display_cb>,
    opaque: *mut c_void,
) {
    object(player).state.lock().render = Some(FakeRender {
        lock,
        unlock,
        display,
        opaque: opaque as usize,
    });
}

unsafe extern "C" fn video_set_format(
    player: *mut libvlc_media_player_t,
    chroma: *const c_char,
    width: c_uint,
    height: c_uint,
    pitch: c_uint,
) {
    object(player).state.lock().format = Some((text(chroma).to_string(), width, height, pitch));
}

unsafe extern "C" fn video_get_size(
    player: *mut libvlc_media_player_t,
    num: c_uint,
    width: *mut c_uint,
    height: *mut c_uint,
) -> c_int {
    let state = object(player).state.lock();
    match (&state.format, num) {
        (Some((_, w, h, _)), 0) => {
            *width = *w;
            *height = *h;
            0
        }
        _ => -1,
    }
}

unsafe extern "C" fn video_take_snapshot(
    player: *mut libvlc_media_player_t,
    num: c_uint,
    path: *const c_char,
    _width: c_uint,
    _height: c_uint,
) -> c_int {
    if num != 0 || object(player).state.lock().render.is_none() {
        set_error("fake: no video output");
        return -1;
    }
    let file = leak_string(text(path));
    emit(player, EventType::MediaPlayerSnapshotTaken, pointer_payload(file));
    0
}

unsafe extern "C" fn video_get_track_description(_player: *mut libvlc_media_player_t) -> *mut libvlc_track_description_t {
    track_list(&[(-1, "Disable"), (0, "Track 1")])
}

unsafe extern "C" fn audio_get_track_description(_player: *mut libvlc_media_player_t) -> *mut libvlc_track_description_t {
    track_list(&[(-1, "Disable"), (1, "Track 1 - [English]"), (2, "Track 2 - [French]")])
}

fn track_list(entries: &[(c_int, &str)]) -> *mut libvlc_track_description_t {
    let mut head: *mut libvlc_track_description_t = ptr::null_mut();
    for &(id, name) in entries.iter().rev() {
        head = Box::into_raw(Box::new(libvlc_track_description_t {
            i_id: id,
            psz_name: leak_string(name),
            p_next: head,
        }));
    }
    head
}

unsafe extern "C" fn video_get_aspect_ratio(player: *mut libvlc_media_player_t) -> *mut c_char {
    let state = object(player).state.lock();
    match state.meta.get(&-1) {
        Some(ratio) => leak_string(ratio),
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn video_set_aspect_ratio(player: *mut libvlc_media_player_t, ratio: *const c_char) {
    let mut state = object(player).state.lock();
    if ratio.is_null() {
        state.meta.remove(&-1);
    } else {
        state.meta.insert(-1, text(ratio).to_string());
    }
}

unsafe extern "C" fn video_get_marquee_int(player: *mut libvlc_media_player_t, option: c_uint) -> c_int {
    object(player)
        .state
        .lock()
        .options
        .iter()
        .rev()
        .find(|(name, flag)| name == "marquee" && *flag == option)
        .map_or(0, |_| 1)
}

unsafe extern "C" fn video_set_marquee_int(player: *mut libvlc_media_player_t, option: c_uint, value: c_int) {
    if value != 0 {
        object(player).state.lock().options.push(("marquee".to_string(), option));
    }
}

unsafe extern "C" fn video_set_marquee_string(player: *mut libvlc_media_player_t, option: c_uint, value: *const c_char) {
    object(player).state.lock().options.push((text(value).to_string(), option));
}

// =============================================================================
// Audio
// =============================================================================

unsafe extern "C" fn audio_output_set(player: *mut libvlc_media_player_t, name: *const c_char) -> c_int {
    if text(name) == "missing" {
        set_error("fake: no such audio output");
        return -1;
    }
    let _ = player;
    0
}

unsafe extern "C" fn audio_get_volume(player: *mut libvlc_media_player_t) -> c_int {
    object(player).state.lock().volume
}

unsafe extern "C" fn audio_set_volume(player: *mut libvlc_media_player_t, volume: c_int) -> c_int {
    if !(0..=200).contains(&volume) {
        set_error("fake: volume out of range");
        return -1;
    }
    object(player).state.lock().volume = volume;
    0
}

unsafe extern "C" fn audio_get_mute(player: *mut libvlc_media_player_t) -> c_int {
    object(player).state.lock().muted as c_int
}

unsafe extern "C" fn audio_set_mute(player: *mut libvlc_media_player_t, mute: c_int) {
    object(player).state.lock().muted = mute != 0;
}

unsafe extern "C" fn audio_toggle_mute(player: *mut libvlc_media_player_t) {
    let mut state = object(player).state.lock();
    state.muted = !state.muted;
}

// =============================================================================
// VLM
// =============================================================================

fn broadcast_exists(instance: *mut libvlc_instance_t, name: *const c_char) -> bool {
    object(instance).state.lock().broadcasts.contains_key(text(name))
}

fn vlm_status(instance: *mut libvlc_instance_t, name: *const c_char) -> c_int {
    if broadcast_exists(instance, name) {
        0
    } else {
        set_error("fake: media unknown");
        -1
    }
}

unsafe extern "C" fn vlm_release(instance: *mut libvlc_instance_t) {
    object(instance).state.lock().broadcasts.clear();
}

unsafe extern "C" fn vlm_add_broadcast(
    instance: *mut libvlc_instance_t,
    name: *const c_char,
    input: *const c_char,
    _output: *const c_char,
    option_count: c_int,
    options: *const *const c_char,
    _enabled: c_int,
    _looped: c_int,
) -> c_int {
    if broadcast_exists(instance, name) {
        set_error("fake: media exists");
        return -1;
    }
    let mut description = text(input).to_string();
    for i in 0..option_count.max(0) as usize {
        description.push(' ');
        description.push_str(text(*options.add(i)));
    }
    object(instance)
        .state
        .lock()
        .broadcasts
        .insert(text(name).to_string(), description);
    // Media name only; the instance name slot stays null
    emit(instance, EventType::VlmMediaAdded, pointer_payload(leak_string(text(name))));
    0
}

unsafe extern "C" fn vlm_del_media(instance: *mut libvlc_instance_t, name: *const c_char) -> c_int {
    match object(instance).state.lock().broadcasts.remove(text(name)) {
        Some(_) => 0,
        None => {
            set_error("fake: media unknown");
            -1
        }
    }
}

unsafe extern "C" fn vlm_play_media(instance: *mut libvlc_instance_t, name: *const c_char) -> c_int {
    vlm_status(instance, name)
}

unsafe extern "C" fn vlm_show_media(instance: *mut libvlc_instance_t, name: *const c_char) -> *mut c_char {
    match object(instance).state.lock().broadcasts.get(text(name)) {
        Some(description) => leak_string(&format!("{{\"{}\": \"{}\"}}", text(name), description)),
        None => {
            set_error("fake: media unknown");
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn vlm_get_media_instance_position(
    instance: *mut libvlc_instance_t,
    name: *const c_char,
    _id: c_int,
) -> c_float {
    if vlm_status(instance, name) == 0 {
        0.25
    } else {
        -1.0
    }
}

// =============================================================================
// Table
// =============================================================================

/// Entry point table backed by this module
pub(crate) fn symbols() -> Symbols {
    Symbols {
        libvlc_new: Some(new_instance),
        libvlc_release: Some(release::<libvlc_instance_t>),
        libvlc_retain: Some(retain::<libvlc_instance_t>),
        libvlc_add_intf: Some(add_intf),
        libvlc_wait: Some(wait),
        libvlc_set_user_agent: Some(set_user_agent),
        libvlc_get_version: Some(get_version),
        libvlc_get_compiler: Some(get_compiler),
        libvlc_get_changeset: Some(get_changeset),
        libvlc_free: Some(free),
        libvlc_errmsg: Some(errmsg),
        libvlc_clearerr: Some(clearerr),

        libvlc_event_attach: Some(event_attach),
        libvlc_event_detach: Some(event_detach),
        libvlc_event_type_name: Some(event_type_name),

        libvlc_get_log_verbosity: Some(get_log_verbosity),
        libvlc_set_log_verbosity: Some(set_log_verbosity),
        libvlc_log_open: Some(log_open),
        libvlc_log_close: Some(log_close),
        libvlc_log_count: Some(log_count),
        libvlc_log_clear: Some(log_clear),
        libvlc_log_get_iterator: Some(log_get_iterator),
        libvlc_log_iterator_free: Some(log_iterator_free),
        libvlc_log_iterator_has_next: Some(log_iterator_has_next),
        libvlc_log_iterator_next: Some(log_iterator_next),

        libvlc_audio_output_list_get: Some(audio_output_list_get),
        libvlc_audio_output_list_release: Some(list_release::<libvlc_audio_output_t>),
        libvlc_audio_output_device_count: Some(audio_output_device_count),
        libvlc_audio_output_device_longname: Some(audio_output_device_longname),
        libvlc_audio_output_device_id: Some(audio_output_device_id),

        libvlc_media_new_location: Some(media_new_location),
        libvlc_media_new_path: Some(media_new_path),
        libvlc_media_new_fd: Some(media_new_fd),
        libvlc_media_new_as_node: Some(media_new_as_node),
        libvlc_media_add_option: Some(media_add_option),
        libvlc_media_add_option_flag: Some(media_add_option_flag),
        libvlc_media_retain: Some(retain::<libvlc_media_t>),
        libvlc_media_release: Some(release::<libvlc_media_t>),
        libvlc_media_get_mrl: Some(media_get_mrl),
        libvlc_media_duplicate: Some(media_duplicate),
        libvlc_media_get_meta: Some(media_get_meta),
        libvlc_media_set_meta: Some(media_set_meta),
        libvlc_media_save_meta: Some(media_save_meta),
        libvlc_media_get_state: Some(media_get_state),
        libvlc_media_get_stats: Some(media_get_stats),
        libvlc_media_subitems: Some(media_subitems),
        libvlc_media_event_manager: Some(event_manager_of::<libvlc_media_t>),
        libvlc_media_get_duration: Some(media_get_duration),
        libvlc_media_parse: Some(media_parse),
        libvlc_media_parse_async: Some(media_parse),
        libvlc_media_is_parsed: Some(media_is_parsed),
        libvlc_media_get_tracks_info: Some(media_get_tracks_info),

        libvlc_media_list_new: Some(media_list_new),
        libvlc_media_list_release: Some(release::<libvlc_media_list_t>),
        libvlc_media_list_retain: Some(retain::<libvlc_media_list_t>),
        libvlc_media_list_set_media: Some(media_list_set_media),
        libvlc_media_list_media: Some(media_list_media),
        libvlc_media_list_add_media: Some(media_list_add_media),
        libvlc_media_list_insert_media: Some(media_list_insert_media),
        libvlc_media_list_remove_index: Some(media_list_remove_index),
        libvlc_media_list_count: Some(media_list_count),
        libvlc_media_list_item_at_index: Some(media_list_item_at_index),
        libvlc_media_list_index_of_item: Some(media_list_index_of_item),
        libvlc_media_list_is_readonly: Some(media_list_is_readonly),
        libvlc_media_list_lock: Some(media_list_lock),
        libvlc_media_list_unlock: Some(media_list_unlock),
        libvlc_media_list_event_manager: Some(event_manager_of::<libvlc_media_list_t>),

        libvlc_media_list_player_new: Some(list_player_new),
        libvlc_media_list_player_release: Some(release::<libvlc_media_list_player_t>),
        libvlc_media_list_player_retain: Some(retain::<libvlc_media_list_player_t>),
        libvlc_media_list_player_event_manager: Some(event_manager_of::<libvlc_media_list_player_t>),
        libvlc_media_list_player_set_media_player: Some(list_player_set_media_player),
        libvlc_media_list_player_set_media_list: Some(list_player_set_media_list),
        libvlc_media_list_player_play: Some(list_player_play),
        libvlc_media_list_player_pause: Some(list_player_pause),
        libvlc_media_list_player_is_playing: Some(list_player_is_playing),
        libvlc_media_list_player_get_state: Some(list_player_get_state),
        libvlc_media_list_player_play_item_at_index: Some(list_player_play_item_at_index),
        libvlc_media_list_player_play_item: Some(list_player_play_item),
        libvlc_media_list_player_stop: Some(list_player_stop),
        libvlc_media_list_player_next: Some(list_player_next),
        libvlc_media_list_player_previous: Some(list_player_previous),
        libvlc_media_list_player_set_playback_mode: Some(list_player_set_playback_mode),

        libvlc_media_library_new: Some(library_new),
        libvlc_media_library_release: Some(release::<libvlc_media_library_t>),
        libvlc_media_library_retain: Some(retain::<libvlc_media_library_t>),
        libvlc_media_library_load: Some(library_load),
        libvlc_media_library_media_list: Some(library_media_list),

        libvlc_media_discoverer_new_from_name: Some(discoverer_new_from_name),
        libvlc_media_discoverer_release: Some(discoverer_release),
        libvlc_media_discoverer_localized_name: Some(discoverer_localized_name),
        libvlc_media_discoverer_media_list: Some(discoverer_media_list),
        libvlc_media_discoverer_event_manager: Some(event_manager_of::<libvlc_media_discoverer_t>),
        libvlc_media_discoverer_is_running: Some(discoverer_is_running),

        libvlc_media_player_new: Some(player_new),
        libvlc_media_player_new_from_media: Some(player_new_from_media),
        libvlc_media_player_release: Some(release::<libvlc_media_player_t>),
        libvlc_media_player_retain: Some(retain::<libvlc_media_player_t>),
        libvlc_media_player_set_media: Some(player_set_media),
        libvlc_media_player_get_media: Some(player_get_media),
        libvlc_media_player_event_manager: Some(event_manager_of::<libvlc_media_player_t>),
        libvlc_media_player_is_playing: Some(player_is_playing),
        libvlc_media_player_play: Some(player_play),
        libvlc_media_player_set_pause: Some(player_set_pause),
        libvlc_media_player_pause: Some(player_pause),
        libvlc_media_player_stop: Some(player_stop),
        libvlc_media_player_get_state: Some(player_get_state),
        libvlc_media_player_set_xwindow: Some(player_set_xwindow),
        libvlc_media_player_get_xwindow: Some(player_get_xwindow),
        libvlc_media_player_set_hwnd: Some(player_set_hwnd),
        libvlc_media_player_get_hwnd: Some(player_get_hwnd),
        libvlc_media_player_get_length: Some(player_get_length),
        libvlc_media_player_get_time: Some(player_get_time),
        libvlc_media_player_set_time: Some(player_set_time),
        libvlc_media_player_get_position: Some(player_get_position),
        libvlc_media_player_set_position: Some(player_set_position),
        libvlc_media_player_get_rate: Some(player_get_rate),
        libvlc_media_player_set_rate: Some(player_set_rate),
        libvlc_media_player_is_seekable: Some(player_is_seekable),
        libvlc_media_player_has_vout: Some(player_has_vout),

        libvlc_video_set_callbacks: Some(video_set_callbacks),
        libvlc_video_set_format: Some(video_set_format),
        libvlc_video_get_size: Some(video_get_size),
        libvlc_video_take_snapshot: Some(video_take_snapshot),
        libvlc_video_get_track_description: Some(video_get_track_description),
        libvlc_video_get_aspect_ratio: Some(video_get_aspect_ratio),
        libvlc_video_set_aspect_ratio: Some(video_set_aspect_ratio),
        libvlc_video_get_marquee_int: Some(video_get_marquee_int),
        libvlc_video_set_marquee_int: Some(video_set_marquee_int),
        libvlc_video_set_marquee_string: Some(video_set_marquee_string),
        libvlc_track_description_release: Some(list_release::<libvlc_track_description_t>),

        libvlc_audio_output_set: Some(audio_output_set),
        libvlc_audio_get_volume: Some(audio_get_volume),
        libvlc_audio_set_volume: Some(audio_set_volume),
        libvlc_audio_get_mute: Some(audio_get_mute),
        libvlc_audio_set_mute: Some(audio_set_mute),
        libvlc_audio_toggle_mute: Some(audio_toggle_mute),
        libvlc_audio_get_track_description: Some(audio_get_track_description),

        libvlc_vlm_release: Some(vlm_release),
        libvlc_vlm_add_broadcast: Some(vlm_add_broadcast),
        libvlc_vlm_del_media: Some(vlm_del_media),
        libvlc_vlm_play_media: Some(vlm_play_media),
        libvlc_vlm_stop_media: Some(vlm_play_media),
        libvlc_vlm_pause_media: Some(vlm_play_media),
        libvlc_vlm_show_media: Some(vlm_show_media),
        libvlc_vlm_get_media_instance_position: Some(vlm_get_media_instance_position),
        libvlc_vlm_get_event_manager: Some(event_manager_of::<libvlc_instance_t>),

        ..Symbols::default()
    }
}

/// Shared handle to the fake libVLC
pub(crate) fn api() -> Arc<LibVlc> {
    Arc::new(LibVlc::from_symbols(symbols(), "fake"))
}
