//! Headless drivers for the two fetching workflows.
//!
//! These walk through the same sequence of states as the components in
//! [`component`](crate::component), but hand each state to a plain
//! render callback instead of a reactive view, such that the observable
//! render sequence may be checked without a rendering host.

use futures::{
    future::{select, Either},
    pin_mut,
};

use crate::{
    course::Course,
    error::FetchError,
    fetcher::CourseSource,
    state::{Activation, FetchState},
};

/// The fetch state as seen by the course views.
pub type CourseState = FetchState<Vec<Course>, FetchError>;

/// Fetch first, then render once with the complete result.
///
/// `render` is only ever called after the fetch has resolved, and it is
/// called exactly once, with either `Succeeded` or `Failed`.
pub async fn pre_render<S, R, V>(source: &S, render: R) -> V
where
    S: CourseSource + ?Sized,
    R: FnOnce(&CourseState) -> V,
{
    let state = CourseState::from(source.fetch_courses().await);
    render(&state)
}

/// Render first, then fetch and render again with the result.
pub struct PostRender<S> {
    source: S,
    state: CourseState,
}

impl<S: CourseSource> PostRender<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: CourseState::Unstarted,
        }
    }

    pub fn state(&self) -> &CourseState {
        &self.state
    }

    /// Run one activation.
    ///
    /// The initial (empty) render happens before anything is fetched.
    /// Moving to `Pending` does not render again as it looks identical
    /// to `Unstarted`, hence exactly one loading render precedes the
    /// final one.  If `activation` is cancelled while the fetch is in
    /// flight the result is discarded, nothing further is rendered and
    /// the state is returned to `Unstarted` without waiting on the fetch.
    pub async fn activate<R>(&mut self, activation: &Activation, mut render: R)
    where
        R: FnMut(&CourseState),
    {
        self.state.reset();
        render(&self.state);
        self.state.start();

        let fetch = self.source.fetch_courses();
        let cancelled = activation.cancelled();
        pin_mut!(fetch, cancelled);
        let resolved = match select(fetch, cancelled).await {
            Either::Left((result, _)) => activation.resolve(&mut self.state, result),
            Either::Right(_) => false,
        };
        if resolved {
            render(&self.state);
        } else {
            leptos::logging::log!("activation cancelled, discarding fetch");
            self.state.reset();
        }
    }
}
