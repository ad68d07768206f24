use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

/// Host hook for pointer tracking outside the plot area during a drag.
///
/// Implementations attach global move/up listeners in `acquire` and detach
/// them in `release`.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

pub type SharedPointerCapture = Rc<RefCell<dyn PointerCapture>>;

/// Scoped pointer capture: acquired on construction, released on drop.
///
/// Stored inside the dragging state, so any transition out of dragging
/// releases the capture.
pub struct PointerCaptureGuard {
    target: Option<SharedPointerCapture>,
}

impl PointerCaptureGuard {
    #[must_use]
    pub fn acquire(target: Option<SharedPointerCapture>) -> Self {
        if let Some(target) = &target {
            target.borrow_mut().acquire();
        }
        Self { target }
    }

    /// Guard with no host hook (headless use).
    #[must_use]
    pub fn detached() -> Self {
        Self { target: None }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }
}

impl fmt::Debug for PointerCaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCaptureGuard")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl Drop for PointerCaptureGuard {
    fn drop(&mut self) {
        let Some(target) = self.target.take() else {
            return;
        };
        match target.try_borrow_mut() {
            Ok(mut target) => target.release(),
            Err(_) => warn!("pointer capture target busy during release; listeners may leak"),
        }
    }
}
