//! Bounded input-event queue.
//!
//! Input polling and control logic run at different points of the host
//! loop (or in an interrupt on some platforms), so raw input observations
//! travel through a fixed-size FIFO guarded by critical sections. Backed
//! by a `heapless::Deque`; nothing allocates.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Control-plane occurrences produced by input polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Mode button released after a short hold
    ModeShortPress,
    /// Mode button held past the long-press timeout
    ModeLongPress,
    /// Actuator button went down
    ActuatorPressed,
    /// Actuator button went up
    ActuatorReleased,
    /// Tolerance-gated proximity reading changed
    ProximityChanged(u16),
}

/// Error returned when sending to a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub InputEvent);

/// Error returned when receiving from an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmpty;

/// Fixed-capacity FIFO of [`InputEvent`] values.
///
/// Synchronized with critical sections, so events may be pushed from an
/// interrupt context and drained from the main loop. Create one statically
/// and hand out [`sender`](Self::sender)/[`receiver`](Self::receiver)
/// handles.
pub struct InputQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<InputEvent, SIZE>>>,
}

impl<const SIZE: usize> InputQueue<SIZE> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    pub const fn sender(&self) -> EventSender<'_, SIZE> {
        EventSender { queue: self }
    }

    /// Get a receiver handle for this queue.
    pub const fn receiver(&self) -> EventReceiver<'_, SIZE> {
        EventReceiver { queue: self }
    }

    /// Enqueue an event, reporting it back if the queue is full.
    pub fn try_send(&self, event: InputEvent) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(event).map_err(QueueFull)
        })
    }

    /// Dequeue the oldest event.
    pub fn try_receive(&self) -> Result<InputEvent, QueueEmpty> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(QueueEmpty)
        })
    }
}

impl<const SIZE: usize> Default for InputQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender handle for an [`InputQueue`].
#[derive(Clone, Copy)]
pub struct EventSender<'a, const SIZE: usize> {
    queue: &'a InputQueue<SIZE>,
}

impl<const SIZE: usize> EventSender<'_, SIZE> {
    /// Enqueue an event, reporting it back if the queue is full.
    pub fn try_send(&self, event: InputEvent) -> Result<(), QueueFull> {
        self.queue.try_send(event)
    }
}

/// Receiver handle for an [`InputQueue`].
#[derive(Clone, Copy)]
pub struct EventReceiver<'a, const SIZE: usize> {
    queue: &'a InputQueue<SIZE>,
}

impl<const SIZE: usize> EventReceiver<'_, SIZE> {
    /// Dequeue the oldest event.
    pub fn try_receive(&self) -> Result<InputEvent, QueueEmpty> {
        self.queue.try_receive()
    }
}
