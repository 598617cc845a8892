//! # newsdesk
//!
//! Live top headlines with an anonymous backend session and a newsletter
//! sign-up form.
//!
//! ## Architecture
//!
//! ```text
//! NewsSource → FeedSynchronizer → HeadlineBoard → render layer
//! IdentityProvider → SessionBootstrapper → SessionSlot
//! input events → SubscriptionController
//! ```
//!
//! Everything shared lives in one [`AppContext`](app::AppContext); nothing is
//! kept in globals.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the headlines once
//! NEWS_API_KEY=... newsdesk headlines
//!
//! # Keep them fresh every 30s until Ctrl-C
//! NEWS_API_KEY=... newsdesk run
//!
//! # Sign up for the newsletter
//! newsdesk subscribe user@example.com
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface and the terminal render layer.
pub mod cli;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): one headline
/// - [`HeadlineBoard`](domain::HeadlineBoard): the published article list
/// - [`Session`](domain::Session): anonymous session handle
pub mod domain;

/// Headline fetching.
///
/// - [`NewsSource`](fetcher::NewsSource): async trait for the remote endpoint
/// - [`HttpNewsSource`](fetcher::HttpNewsSource): reqwest-based implementation
pub mod fetcher;

/// Anonymous login against the identity service.
pub mod identity;

/// Where swallowed session and fetch failures go.
pub mod report;

/// One-shot session bootstrap.
pub mod session;

/// Newsletter form state and email validation.
pub mod subscription;

/// Periodic refresh, stop handling and the teardown flush.
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
