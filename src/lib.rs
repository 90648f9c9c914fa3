//! # Farm Market
//!
//! > **A farm-to-customer marketplace client, built from resource-oriented actors.**
//!
//! Farmers pick products from a live catalog, build a categorized bill and
//! submit it to a realtime document store. Customers fill a cart and check it
//! out into an order. A dashboard shows weather, currency conversion and
//! rotating news/video feeds, all behind swappable collaborators.
//!
//! ## 🏗️ Design
//!
//! ### Bills are actors
//! Every farmer bill and customer cart lives inside a [`ResourceActor`](framework::ResourceActor).
//! Requests are processed one at a time, so a submit that is waiting on the
//! store can never interleave with an edit to the same bill.
//!
//! ### Collaborators are traits
//! The document store ([`store::DocumentStore`]), the dashboard APIs
//! ([`services`]) and speech recognition ([`voice::SpeechRecognizer`]) are all
//! injected. Tests swap them for in-memory fakes.
//!
//! ### Errors are classified
//! Each component has its own `thiserror` enum. `kind()` maps it to an
//! [`ErrorKind`](error::ErrorKind), and [`view::Notices`] turns that into a
//! toast level.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor loop, typed client and [`MockClient`](framework::mock::MockClient).
//!
//! ### 2. The Data ([`model`], [`catalog`])
//! Products, bill lines and orders; catalog normalization, search and sort.
//!
//! ### 3. The Actors ([`bill_actor`], [`order_actor`]) and their [`clients`]
//! Bill/cart state machine and the order book.
//!
//! ### 4. The Collaborators ([`store`], [`services`], [`voice`])
//! Realtime store (REST or in-memory), dashboard APIs, speech input.
//!
//! ### 5. The Surface ([`view`], [`lifecycle`], [`config`])
//! Routes, view toggles, notices, system wiring and environment config.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # In-memory store seeded with a demo catalog
//! RUST_LOG=info cargo run
//!
//! # Against a realtime database REST endpoint
//! MARKET_STORE_URL=https://example.firebaseio.com RUST_LOG=info cargo run
//! ```

pub mod bill_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod services;
pub mod store;
pub mod view;
pub mod voice;
