use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    task::{Poll, Waker},
};

use serde::{Deserialize, Serialize};

/// The lifecycle of a fetch that happens after the initial render.
///
/// A fresh activation starts out `Unstarted`, moves to `Pending` when
/// the fetch is issued, and finally lands in either `Succeeded` or
/// `Failed`.  The two latter states are terminal for that activation;
/// only [`reset`](FetchState::reset) (i.e. a new activation) leaves
/// them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchState<T, E> {
    #[default]
    Unstarted,
    Pending,
    Succeeded(T),
    Failed(E),
}

impl<T, E> FetchState<T, E> {
    /// Unstarted -> Pending.  Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        match self {
            Self::Unstarted => {
                *self = Self::Pending;
                true
            }
            _ => false,
        }
    }

    /// Pending -> Succeeded or Failed, depending on the result.
    ///
    /// A result arriving in any state other than `Pending` is dropped
    /// and `false` is returned, such that a terminal state can never be
    /// overwritten by a late result.
    pub fn resolve(&mut self, result: Result<T, E>) -> bool {
        match self {
            Self::Pending => {
                *self = match result {
                    Ok(value) => Self::Succeeded(value),
                    Err(error) => Self::Failed(error),
                };
                true
            }
            _ => false,
        }
    }

    /// Back to `Unstarted`, as for a new activation.
    pub fn reset(&mut self) {
        *self = Self::Unstarted;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unstarted | Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for FetchState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Marks whether the owner of a fetch is still around.
///
/// Clones share the same flag.  Once [`cancel`](Activation::cancel) is
/// called (typically when the component is torn down) any result that
/// arrives afterwards must be discarded, and anything awaiting
/// [`cancelled`](Activation::cancelled) is woken.
#[derive(Clone, Debug, Default)]
pub struct Activation {
    inner: Arc<ActivationInner>,
}

#[derive(Debug, Default)]
struct ActivationInner {
    cancelled: AtomicBool,
    wakers: Mutex<Vec<Waker>>,
}

impl Activation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let wakers = match self.inner.wakers.lock() {
            Ok(mut wakers) => std::mem::take(&mut *wakers),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        wakers.into_iter().for_each(Waker::wake);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Completes once this activation is cancelled.
    pub fn cancelled(&self) -> impl Future<Output = ()> + Send + 'static {
        let inner = self.inner.clone();
        futures::future::poll_fn(move |cx| {
            let mut wakers = match inner.wakers.lock() {
                Ok(wakers) => wakers,
                Err(poisoned) => poisoned.into_inner(),
            };
            // checked under the lock, so a concurrent cancel either sees
            // the waker or is seen here
            if inner.cancelled.load(Ordering::Acquire) {
                return Poll::Ready(());
            }
            if !wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
                wakers.push(cx.waker().clone());
            }
            Poll::Pending
        })
    }

    /// Apply the result to the state unless this activation has been
    /// cancelled.  Returns whether the state was updated.
    pub fn resolve<T, E>(&self, state: &mut FetchState<T, E>, result: Result<T, E>) -> bool {
        !self.is_cancelled() && state.resolve(result)
    }
}
