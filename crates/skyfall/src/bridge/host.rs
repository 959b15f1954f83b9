//! Frame scheduling capability provided by the host.

/// Handle for one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// What the frame driver needs from its environment.
///
/// The host delivers each granted request by calling
/// [`FrameDriver::on_frame`](crate::core::driver::FrameDriver::on_frame)
/// with a monotonic timestamp in milliseconds, and forwards viewport
/// changes to `on_resize` while listeners are attached.
pub trait FrameHost {
    /// Ask for one frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Withdraw a pending request.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Start forwarding resize (and, where supported, visibility) events.
    fn attach_listeners(&mut self);

    /// Stop forwarding events. Synchronous: no event arrives afterwards.
    fn detach_listeners(&mut self);
}

/// Headless host: records requests and listener state so a test or a
/// server-side driver can step frames by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualHost {
    next_id: i32,
    pending: Option<FrameRequest>,
    requested: u64,
    cancelled: Vec<FrameRequest>,
    listening: bool,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request the driver is waiting on, if any.
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Total frames requested so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> &[FrameRequest] {
        &self.cancelled
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        self.requested += 1;
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
        self.cancelled.push(request);
    }

    fn attach_listeners(&mut self) {
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        self.listening = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_unique_and_cancellable() {
        let mut host = ManualHost::new();
        let a = host.request_frame().unwrap();
        let b = host.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(host.pending(), Some(b));
        host.cancel_frame(b);
        assert_eq!(host.pending(), None);
        assert_eq!(host.cancelled(), &[b]);
        assert_eq!(host.requested(), 2);
    }
}
