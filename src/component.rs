use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;

use crate::{
    course::Course,
    error::FetchError,
    fetcher::CourseSource,
    lifecycle::CourseState,
    state::Activation,
    view::render_state,
};

#[cfg(not(target_arch = "wasm32"))]
fn send_future<F: Future + Send>(future: F) -> F {
    future
}

// Browser futures aren't `Send`, but there is only the one thread.
#[cfg(target_arch = "wasm32")]
fn send_future<F: Future>(future: F) -> send_wrapper::SendWrapper<F> {
    send_wrapper::SendWrapper::new(future)
}

/// Provides the [`CourseSource`] to the course components below it.
#[derive(Clone)]
pub struct CourseSourceCtx(Arc<dyn CourseSource>);

impl CourseSourceCtx {
    pub fn new(source: impl CourseSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    /// Provide the source as a context for the current owner.
    pub fn provide(source: impl CourseSource + 'static) {
        provide_context(Self::new(source));
    }

    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    pub fn source(&self) -> Arc<dyn CourseSource> {
        self.0.clone()
    }
}

/// Lists the courses, fetching them before anything is rendered.
///
/// The fetch is done through a blocking resource, so under SSR the
/// markup for this component is only produced once the fetch resolves,
/// and the cards are rendered with the complete listing on the first
/// pass.  A failed fetch renders the error view instead.  There is no
/// fallback, so an empty listing is never shown.
#[component]
pub fn PreRenderCourses() -> impl IntoView {
    let source = CourseSourceCtx::expect().source();
    let courses = Resource::new_blocking(
        || (),
        move |_| {
            let source = source.clone();
            send_future(async move { source.fetch_courses().await })
        },
    );

    view! {
        <section class="pre-render-courses">
            <Suspense>
                {move || Suspend::new(async move {
                    render_state(courses.await.into())
                })}
            </Suspense>
        </section>
    }
}

/// Fetch the courses once the calling component becomes active.
///
/// The returned signal starts out `Unstarted` (and stays that way under
/// SSR, as effects don't run on the server).  A one-shot effect moves it
/// to `Pending` without notifying, issues the fetch and then notifies
/// exactly once with the result.  If the owner is cleaned up before the
/// fetch completes, the request is aborted and its result, should it
/// still arrive, is ignored.
pub fn use_post_render_courses() -> ReadSignal<CourseState> {
    let source = CourseSourceCtx::expect().source();
    let state = RwSignal::new(CourseState::Unstarted);
    let activation = Activation::new();
    let abort = Arc::new(Mutex::new(None::<AbortHandle>));

    on_cleanup({
        let activation = activation.clone();
        let abort = abort.clone();
        move || {
            activation.cancel();
            if let Some(handle) = abort.lock().ok().and_then(|mut slot| slot.take()) {
                leptos::logging::log!("aborting in-flight course fetch");
                handle.abort();
            }
        }
    });

    // Nothing is tracked in here, so this runs once at activation and
    // never again on re-render.
    Effect::new(move |_| {
        let started = state
            .try_update_untracked(|state| state.start())
            .unwrap_or(false);
        if !started {
            return;
        }
        let (handle, registration) = AbortHandle::new_pair();
        if let Ok(mut slot) = abort.lock() {
            *slot = Some(handle);
        }
        let source = source.clone();
        let activation = activation.clone();
        leptos::task::spawn_local(async move {
            match Abortable::new(source.fetch_courses(), registration).await {
                Ok(result) => {
                    if let Err(e) = &result {
                        leptos::logging::error!("course fetch failed: {e}");
                    }
                    resolve_and_notify(state, &activation, result);
                }
                Err(_) => leptos::logging::log!("course fetch aborted"),
            }
        });
    });

    state.read_only()
}

/// Apply the result and notify subscribers, but only if the activation
/// is still live and the state was actually resolved.
pub(crate) fn resolve_and_notify(
    state: RwSignal<CourseState>,
    activation: &Activation,
    result: Result<Vec<Course>, FetchError>,
) -> bool {
    let resolved = state
        .try_update_untracked(|state| activation.resolve(state, result))
        .unwrap_or(false);
    if resolved {
        state.notify();
    }
    resolved
}

/// Lists the courses, fetching them only after the initial render.
///
/// The loading view is what gets rendered first, and the listing (or
/// the error) replaces it in a single update once the fetch started by
/// [`use_post_render_courses`] completes.
#[component]
pub fn PostRenderCourses() -> impl IntoView {
    let state = use_post_render_courses();

    view! {
        <section class="post-render-courses">
            {move || render_state(state.get())}
        </section>
    }
}
