//! This crate provides the pieces for listing course records fetched
//! from a remote admin API within the Leptos framework, in the two ways
//! such data may be obtained: before the page is rendered, or after the
//! page has been rendered.
//!
//! ## Pre-render versus post-render fetching
//!
//! When fetching before rendering, the request is issued on the server
//! while handling the incoming request, and no markup is produced for the
//! listing until the data has arrived.  The first (and only) render then
//! has the complete data, and the client hydrates from the very same data
//! without issuing the request again.  The catch is that this happens
//! outside of the browser, so any credential stored on the client isn't
//! available; the session cookie of the incoming request has to be
//! forwarded instead.
//!
//! When fetching after rendering, a loading view is rendered straight
//! away, and the request is issued from the browser once the component
//! becomes active.  The listing is rendered again when the request
//! completes, or fails.  This has access to client side credentials, but
//! the user will always see the loading view first, and any further
//! request that depends on this one can only start after it finishes,
//! forming a request waterfall (see [`waterfall`]).
//!
//! Both ways are provided as components, [`PreRenderCourses`](
//! component::PreRenderCourses) and [`PostRenderCourses`](
//! component::PostRenderCourses), and as headless drivers in
//! [`lifecycle`] that go through the same sequence of states without a
//! rendering host.  Either way, failures are rendered as an error that is
//! distinct from the loading view, and the lifecycle never gets stuck in
//! a pending state.
//!
//! # Example
//!
//! ```
//! use leptos::prelude::*;
//! use leptos_fetch_lifecycle::{
//!     component::{CourseSourceCtx, PostRenderCourses, PreRenderCourses},
//!     config::FetchConfig,
//!     credential::{ForwardedCookie, RequiredBearerToken},
//!     fetcher::CourseFetcher,
//! };
//!
//! // Rendered with the data already in place; the session cookie of the
//! // incoming request would be forwarded here.
//! #[component]
//! fn CatalogPage(cookie: Option<String>) -> impl IntoView {
//!     match CourseFetcher::new(FetchConfig::from_env(), ForwardedCookie(cookie)) {
//!         Ok(fetcher) => {
//!             CourseSourceCtx::provide(fetcher);
//!             view! { <PreRenderCourses/> }.into_any()
//!         }
//!         Err(e) => view! { <p>{e.to_string()}</p> }.into_any(),
//!     }
//! }
//!
//! // Rendered as loading first, with the token held by the client.
//! #[component]
//! fn AdminPage() -> impl IntoView {
//!     let token = || None::<String>; // e.g. read from local storage
//!     match CourseFetcher::new(FetchConfig::from_env(), RequiredBearerToken::new(token)) {
//!         Ok(fetcher) => {
//!             CourseSourceCtx::provide(fetcher);
//!             view! { <PostRenderCourses/> }.into_any()
//!         }
//!         Err(e) => view! { <p>{e.to_string()}</p> }.into_any(),
//!     }
//! }
//! ```
//!
//! # Feature Flags
#![cfg_attr(
    feature = "document-features",
    cfg_attr(doc, doc = ::document_features::document_features!())
)]

pub mod component;
pub mod config;
pub mod course;
pub mod credential;
pub mod error;
pub mod fetcher;
pub mod lifecycle;
pub mod state;
pub mod view;
pub mod waterfall;


pub use course::Course;
pub use error::{FetchError, FetchErrorKind};
pub use lifecycle::CourseState;
pub use state::{Activation, FetchState};
