use crate::foundation::core::Millis;

/// Identifies one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Host capability to request the next display-refresh tick.
///
/// A request fires at most once. The host delivers it by calling
/// [`crate::PlaybackController::on_frame`] with the handle and a monotonically increasing
/// timestamp; continued ticking requires a fresh request from inside that call.
pub trait FrameScheduler {
    /// Ask for a callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending request. Unknown, fired or already-cancelled handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Current host time.
    fn now(&self) -> Millis;
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Box<S> {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }

    fn now(&self) -> Millis {
        (**self).now()
    }
}
