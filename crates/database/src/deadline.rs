use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Why a `DeadlineSignal` fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The signal's deadline passed.
    DeadlineExceeded,
    /// Someone called `DeadlineSignal::cancel`.
    Cancelled,
}

/// A caller-supplied signal that bounds how long an operation is waited on.
///
/// A signal fires once, either when its deadline passes or when `cancel` is
/// called, whichever happens first. Clones share the same state, so one clone
/// can be handed to a query while another is kept to cancel it.
#[derive(Debug, Clone)]
pub struct DeadlineSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    deadline: Option<Instant>,
    /// The first reason observed. Once set it never changes.
    fired: watch::Sender<Option<CancelReason>>,
}

impl DeadlineSignal {
    /// A signal with no deadline. It only fires through `cancel`.
    pub fn never() -> Self {
        Self::build(None)
    }

    pub fn after(timeout: Duration) -> Self {
        Self::build(Some(Instant::now() + timeout))
    }

    pub fn at(deadline: Instant) -> Self {
        Self::build(Some(deadline))
    }

    fn build(deadline: Option<Instant>) -> Self {
        let (fired, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner { deadline, fired }),
        }
    }

    /// Fires the signal with `CancelReason::Cancelled`. Has no effect once the
    /// signal has fired, including when its deadline has already passed.
    pub fn cancel(&self) {
        let reason = if self.deadline_passed() {
            CancelReason::DeadlineExceeded
        } else {
            CancelReason::Cancelled
        };
        self.latch(reason);
    }

    /// Non-blocking check: the reason the signal fired, or `None` if it has not.
    pub fn reason(&self) -> Option<CancelReason> {
        if let Some(reason) = *self.inner.fired.borrow() {
            return Some(reason);
        }
        if self.deadline_passed() {
            return Some(self.latch(CancelReason::DeadlineExceeded));
        }
        None
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left until the deadline; zero once it has passed, `None` without one.
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Resolves when the signal fires.
    pub async fn fired(&self) -> CancelReason {
        let mut rx = self.inner.fired.subscribe();
        let latched = async move {
            // The sender lives as long as `self`, so this only ends once a reason is set.
            match rx.wait_for(Option::is_some).await {
                Ok(reason) => (*reason).unwrap_or(CancelReason::Cancelled),
                Err(_) => CancelReason::Cancelled,
            }
        };
        match self.inner.deadline {
            Some(at) => tokio::select! {
                biased;
                reason = latched => reason,
                _ = tokio::time::sleep_until(at) => self.latch(CancelReason::DeadlineExceeded),
            },
            None => latched.await,
        }
    }

    /// Stores `reason` unless a reason is already stored, and returns the stored one.
    fn latch(&self, reason: CancelReason) -> CancelReason {
        self.inner.fired.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(reason);
            true
        });
        (*self.inner.fired.borrow()).unwrap_or(reason)
    }

    fn deadline_passed(&self) -> bool {
        self.inner
            .deadline
            .is_some_and(|at| Instant::now() >= at)
    }
}

impl Default for DeadlineSignal {
    fn default() -> Self {
        Self::never()
    }
}
