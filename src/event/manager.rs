//! Subscription registry for one libVLC event manager

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{c_int, c_void};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::TrySendError;
use parking_lot::Mutex;

use super::{decode, Event, EventData, EventQueue, EventType, PayloadShape};
use crate::error::{Error, Result};
use crate::ffi::{libvlc_callback_t, libvlc_event_manager_t, libvlc_event_t, LibVlc, EVENT_PAYLOAD_LEN};
use crate::handle::ObjectKind;

/// Identifies one subscription within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub(crate) usize);

impl SubscriptionId {
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Handler = Box<dyn Fn(&Event) + Send + Sync>;

/// Heap record whose address libVLC holds as user data
struct Subscription {
    id: SubscriptionId,
    event_type: EventType,
    handler: Handler,
    api: Arc<LibVlc>,
    strings: Arc<Mutex<SharedStrings>>,
    /// Set once a detach has claimed this record
    detaching: AtomicBool,
}

/// Text copied out of one native event for the rest of its delivery round.
///
/// libVLC hands the same record to every listener of a type, and decoding
/// frees the native strings, so only the first subscription decodes.
#[derive(Default)]
struct SharedStrings {
    live: BTreeMap<c_int, BTreeSet<SubscriptionId>>,
    pending: Option<PendingText>,
}

struct PendingText {
    event_type: EventType,
    payload: [u8; EVENT_PAYLOAD_LEN],
    data: EventData,
    waiting: BTreeSet<SubscriptionId>,
}

impl SharedStrings {
    fn forget(&mut self, record: &Subscription) {
        if let Some(ids) = self.live.get_mut(&record.event_type.as_raw()) {
            ids.remove(&record.id);
            if ids.is_empty() {
                self.live.remove(&record.event_type.as_raw());
            }
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.waiting.remove(&record.id);
            if pending.waiting.is_empty() {
                self.pending = None;
            }
        }
    }
}

/// Event subscriptions attached to one libVLC object.
///
/// Dropping the manager detaches everything still attached.
pub struct EventManager {
    ptr: *mut libvlc_event_manager_t,
    owner: ObjectKind,
    api: Arc<LibVlc>,
    subscriptions: Mutex<BTreeMap<SubscriptionId, Arc<Subscription>>>,
    strings: Arc<Mutex<SharedStrings>>,
}

// The native manager is internally synchronized; the map is behind a mutex
unsafe impl Send for EventManager {}
unsafe impl Sync for EventManager {}

impl EventManager {
    pub(crate) fn new(api: Arc<LibVlc>, owner: ObjectKind, ptr: *mut libvlc_event_manager_t) -> Self {
        Self {
            ptr,
            owner,
            api,
            subscriptions: Mutex::new(BTreeMap::new()),
            strings: Arc::new(Mutex::new(SharedStrings::default())),
        }
    }

    /// Kind of the object emitting these events
    pub fn owner(&self) -> ObjectKind {
        self.owner
    }

    /// Register `handler` for one event type.
    ///
    /// The handler runs synchronously on whichever thread libVLC delivers
    /// from. It may detach subscriptions, including its own.
    pub fn attach<F>(&self, event_type: EventType, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        if self.ptr.is_null() {
            return Err(Error::InvalidHandle(self.owner));
        }

        let record = {
            let mut subscriptions = self.subscriptions.lock();
            let id = lowest_free_id(&subscriptions);
            let record = Arc::new(Subscription {
                id,
                event_type,
                handler: Box::new(handler),
                api: self.api.clone(),
                strings: self.strings.clone(),
                detaching: AtomicBool::new(false),
            });
            subscriptions.insert(id, record.clone());
            record
        };
        self.strings
            .lock()
            .live
            .entry(event_type.as_raw())
            .or_default()
            .insert(record.id);

        if let Err(e) = self.register(&record) {
            self.strings.lock().forget(&record);
            self.subscriptions.lock().remove(&record.id);
            return Err(e);
        }

        log::debug!("Attached {} to {} on {}", record.id, event_type, self.owner);
        Ok(record.id)
    }

    /// Register `handler` with a context value it receives on every call
    pub fn attach_with<F, C>(&self, event_type: EventType, handler: F, context: C) -> Result<SubscriptionId>
    where
        F: Fn(&Event, &C) + Send + Sync + 'static,
        C: Send + Sync + 'static,
    {
        self.attach(event_type, move |event| handler(event, &context))
    }

    /// Forward owned copies of one event type into a bounded queue.
    ///
    /// Events arriving while the queue is full are dropped with a warning.
    pub fn subscribe(&self, event_type: EventType, capacity: usize) -> Result<EventQueue> {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);

        let id = self.attach(event_type, move |event| {
            let copy = match event.retained() {
                Ok(copy) => copy,
                Err(e) => {
                    log::warn!("Dropping {}: {}", event.kind(), e);
                    return;
                }
            };

            match sender.try_send(copy) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::warn!("Event queue full, dropping {}", event.kind());
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("Event queue closed, dropping {}", event.kind());
                }
            }
        })?;

        Ok(EventQueue::new(id, receiver))
    }

    /// Detach the subscription feeding `queue`
    pub fn unsubscribe(&self, queue: EventQueue) -> Result<()> {
        self.detach(queue.id())
    }

    /// Unregister a subscription.
    ///
    /// Blocks until libVLC guarantees no further deliveries for it, then
    /// frees its record. Safe to call from inside a handler.
    pub fn detach(&self, id: SubscriptionId) -> Result<()> {
        let record = {
            let subscriptions = self.subscriptions.lock();
            match subscriptions.get(&id) {
                Some(record) if !record.detaching.swap(true, Ordering::AcqRel) => record.clone(),
                _ => return Err(Error::NotFound(format!("subscription {}", id))),
            }
        };

        // The registry lock is not held here: native detach waits for
        // in-flight deliveries, whose handlers may call back into us
        if let Err(e) = self.unregister(&record) {
            record.detaching.store(false, Ordering::Release);
            return Err(e);
        }

        self.strings.lock().forget(&record);
        self.subscriptions.lock().remove(&id);
        log::debug!("Detached {} from {} on {}", id, record.event_type, self.owner);
        Ok(())
    }

    /// Detach every subscription, logging failures
    pub fn detach_all(&self) {
        let ids: Vec<SubscriptionId> = self.subscriptions.lock().keys().copied().collect();

        for id in ids {
            match self.detach(id) {
                Ok(()) | Err(Error::NotFound(_)) => {}
                Err(e) => log::warn!("Failed to detach {} on {}: {}", id, self.owner, e),
            }
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.lock().is_empty()
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscriptions.lock().contains_key(&id)
    }

    /// Event type a subscription listens for
    pub fn event_type(&self, id: SubscriptionId) -> Option<EventType> {
        self.subscriptions.lock().get(&id).map(|record| record.event_type)
    }

    fn register(&self, record: &Arc<Subscription>) -> Result<()> {
        let status = native!(
            self.api,
            libvlc_event_attach(
                self.ptr,
                record.event_type.as_raw(),
                Some(event_trampoline as libvlc_callback_t),
                Arc::as_ptr(record) as *mut c_void,
            )
        );

        if status != 0 {
            return Err(Error::native(&self.api));
        }
        Ok(())
    }

    fn unregister(&self, record: &Arc<Subscription>) -> Result<()> {
        native!(
            self.api,
            libvlc_event_detach(
                self.ptr,
                record.event_type.as_raw(),
                Some(event_trampoline as libvlc_callback_t),
                Arc::as_ptr(record) as *mut c_void,
            )
        );
        Ok(())
    }
}

impl Drop for EventManager {
    fn drop(&mut self) {
        self.detach_all();

        // Records that failed to detach must outlive any native reference
        let leftover = std::mem::take(&mut *self.subscriptions.lock());
        if !leftover.is_empty() {
            log::error!(
                "Leaking {} subscription(s) on {} that could not be detached",
                leftover.len(),
                self.owner
            );
            for (_, record) in leftover {
                std::mem::forget(record);
            }
        }
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("owner", &self.owner)
            .field("subscriptions", &self.len())
            .finish()
    }
}

fn lowest_free_id(subscriptions: &BTreeMap<SubscriptionId, Arc<Subscription>>) -> SubscriptionId {
    let mut candidate = 0;
    for id in subscriptions.keys() {
        if id.0 != candidate {
            break;
        }
        candidate += 1;
    }
    SubscriptionId(candidate)
}

/// Decode a string-carrying payload once per delivery round
fn decode_shared(record: &Subscription, kind: EventType, payload: &[u8; EVENT_PAYLOAD_LEN]) -> EventData {
    let mut strings = record.strings.lock();

    let reused = match strings.pending.as_mut() {
        Some(pending)
            if pending.event_type == kind && pending.payload == *payload && pending.waiting.contains(&record.id) =>
        {
            pending.waiting.remove(&record.id);
            Some((copy_text(&pending.data), pending.waiting.is_empty()))
        }
        _ => None,
    };
    if let Some((data, last)) = reused {
        if last {
            strings.pending = None;
        }
        return data;
    }

    let data = decode(&record.api, kind, payload);
    let waiting: BTreeSet<SubscriptionId> = strings
        .live
        .get(&kind.as_raw())
        .map(|ids| ids.iter().copied().filter(|id| *id != record.id).collect())
        .unwrap_or_default();

    strings.pending = if waiting.is_empty() {
        None
    } else {
        Some(PendingText {
            event_type: kind,
            payload: *payload,
            data: copy_text(&data),
            waiting,
        })
    };
    data
}

fn copy_text(data: &EventData) -> EventData {
    match data {
        EventData::Text(text) => EventData::Text(text.clone()),
        EventData::Vlm { media, instance } => EventData::Vlm {
            media: media.clone(),
            instance: instance.clone(),
        },
        _ => EventData::None,
    }
}

/// The one callback libVLC ever receives for events
unsafe extern "C" fn event_trampoline(event: *const libvlc_event_t, data: *mut c_void) {
    if event.is_null() || data.is_null() {
        return;
    }

    // Our own strong reference: a handler detaching itself must not free
    // the record it is running from
    let record = data as *const Subscription;
    Arc::increment_strong_count(record);
    let record = Arc::from_raw(record);

    let raw = &*event;
    let Some(kind) = EventType::from_raw(raw.type_) else {
        log::warn!("Ignoring unknown event type {:#x}", raw.type_);
        return;
    };

    let result = catch_unwind(AssertUnwindSafe(|| {
        let data = match kind.shape() {
            PayloadShape::Text | PayloadShape::TextPair => decode_shared(&record, kind, raw.u.as_bytes()),
            _ => decode(&record.api, kind, raw.u.as_bytes()),
        };
        let event = Event::new(kind, data);
        (record.handler)(&event);
    }));

    if result.is_err() {
        log::error!("Handler for {} ({}) panicked; panic absorbed at the native boundary", kind, record.id);
    }
}
