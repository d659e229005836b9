use log::debug;

/// Timing handed to every frame listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Zero-based frame number.
    pub frame: u64,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the scheduler started ticking.
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&FrameTick)>;

/// Drives per-frame callbacks.
///
/// Listeners run synchronously, in registration order, exactly once per
/// `tick`. Removing a listener is how a torn-down component stops receiving
/// updates.
#[derive(Default)]
pub struct FrameScheduler {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    frame: u64,
    elapsed: f32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_frame_listener<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&FrameTick) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        debug!("Registered frame listener {:?}", id);
        id
    }

    /// Returns false if the listener was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tick(&mut self, delta: f32) -> FrameTick {
        self.elapsed += delta;
        let tick = FrameTick {
            frame: self.frame,
            delta,
            elapsed: self.elapsed,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&tick);
        }
        self.frame += 1;
        tick
    }
}
