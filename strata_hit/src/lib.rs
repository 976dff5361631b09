// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Hit: find which on-screen widgets contain a point, and which one is on top.
//!
//! This is the lookup behind pointer and touch dispatch in an immediate-mode UI.
//!
//! - Register each visible widget's rectangle and z-order once per frame.
//! - Ask for every widget under a point, or for the topmost one.
//!
//! ## How it works
//!
//! An axis-aligned rectangle contains `(x, y)` exactly when its x-range contains `x` and its
//! y-range contains `y`. [`DualAxisIndex`] therefore keeps one balanced interval tree per axis
//! (see [`strata_interval`]) and answers a point query by stabbing both trees and intersecting
//! the two result sets by widget id. Both sets are bounded by how many widgets overlap the point,
//! not by how many widgets exist, so queries stay cheap as the widget count grows.
//!
//! [`HitTestSystem`] adds the widget bookkeeping on top: current bounds, z-order and a
//! registration sequence number per id. It keeps both trees and its own map in lockstep.
//!
//! ## Stacking order
//!
//! [`HitTestSystem::widget_at`] picks the highest z-order. Among equal z-orders, the widget
//! registered later wins, the same way a later child paints above earlier siblings.
//! Moving a widget with [`HitTestSystem::update_widget`] keeps its place in that order; only
//! removing it and registering it again moves it to the top of its z-order.
//!
//! ## Not a layout engine
//!
//! Upstream code computes rectangles and z-orders with whatever layout system it likes and feeds
//! them here. Nothing in this crate measures or arranges widgets, and nothing is persisted.
//!
//! ## Example
//!
//! ```rust
//! use strata_hit::{Bounds, HitTestSystem};
//!
//! let mut hits: HitTestSystem<&str> = HitTestSystem::new();
//! hits.insert_widget("panel", Bounds::new(0.0, 0.0, 100.0, 100.0), 0).unwrap();
//! hits.insert_widget("popup", Bounds::new(50.0, 50.0, 150.0, 150.0), 1).unwrap();
//!
//! assert_eq!(hits.widget_at(60.0, 60.0), Some("popup"));
//! assert_eq!(hits.widget_at(10.0, 10.0), Some("panel"));
//! assert_eq!(hits.widget_at(200.0, 200.0), None);
//!
//! // Unmount races are expected; a stale id is reported, not fatal.
//! hits.remove_widget("popup").unwrap();
//! assert!(hits.remove_widget("popup").unwrap_err().is_not_found());
//! ```
//!
//! Whole frames can be pushed at once. Widgets missing from the frame are unmounted:
//!
//! ```rust
//! use strata_hit::{Bounds, ChurnPolicy, HitTestConfig, HitTestSystem};
//!
//! let churn = ChurnPolicy::Rebuild { min_changed_percent: 50 };
//! let config = HitTestConfig::default().with_churn(churn);
//! let mut hits: HitTestSystem<u32> = HitTestSystem::with_config(config);
//!
//! let layout = [
//!     (1, Bounds::from_xywh(0.0, 0.0, 40.0, 20.0), 0),
//!     (2, Bounds::from_xywh(0.0, 20.0, 40.0, 20.0), 0),
//! ];
//! let report = hits.sync_frame(layout).unwrap();
//! assert_eq!(report.inserted, 2);
//!
//! let report = hits.sync_frame([(2, Bounds::from_xywh(0.0, 20.0, 40.0, 20.0), 0)]).unwrap();
//! assert_eq!((report.removed, report.unchanged), (1, 1));
//! assert_eq!(hits.find_widgets_at(10.0, 10.0), Vec::<u32>::new());
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to Kurbo's `std` feature when `kurbo` is enabled.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` targets.
//! - `kurbo`: conversions between [`Bounds`] and `kurbo::Rect`, and point queries taking
//!   `kurbo::Point`.
//!
//! ## Logging
//!
//! Mutations emit `tracing` events at `trace` level; stale ids and full rebuilds are reported at
//! `debug` level. The crate never installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "kurbo")]
mod adapter;
mod config;
mod error;
mod index;
mod system;
mod types;

pub use config::{ChurnPolicy, HitTestConfig};
pub use error::HitTestError;
pub use index::{AxisKeys, DualAxisIndex};
pub use system::{FrameReport, HitTestSystem, Registration};
pub use types::{Axis, Bounds};

pub use strata_interval;
