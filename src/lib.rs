//! Projected – value containers that pair a mutable value with a derived,
//! read-only *projection* of the constraints applied to it.
//!
//! Every container has the same shape: a current value plus configuration
//! fixed at construction, read through `value()`, written through
//! `set_value()`, and described by `projection()`, which is recomputed on each
//! call and never goes stale.
//!
//! ## Containers
//! * [`clamp::RangeClamp`] – a value held within `[min, max]`. Its
//!   [`clamp::ClampedState`] reports the bounds, whether the value sits on
//!   either of them, and where it lies in the range.
//! * [`validated::RuleValidator`] – a string checked against an ordered list of
//!   [`rule::ValidationRule`]s. Its [`validated::ValidationState`] lists every
//!   failing rule with its message, in rule order, plus a dirty flag.
//! * [`persisted::PersistedDefault`] – a value kept in an injected
//!   [`store::Store`] under a fixed key, falling back to a default. Its
//!   [`persisted::PersistedState`] tells whether the key is set and can reset
//!   it.
//!
//! The containers are independent of one another; none of them notifies
//! anybody on write. Layers that need change notification keep an
//! [`observe::Watchers`] beside the container.
//!
//! ## Persistence
//! [`store::MemoryStore`] keeps values in a hash map, [`persist::Persistor`]
//! keeps them in SQLite, either in memory or in a file. Values are turned into
//! bytes by a [`codec::Codec`], JSON unless told otherwise. What happens when a
//! write fails is decided by [`persisted::WritePolicy`]: silently dropped by
//! default, or returned as an error.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use projected::{clamp::RangeClamp, persisted::PersistedDefault, rule::ValidationRule,
//!     store::MemoryStore, validated::RuleValidator};
//!
//! let mut volume = RangeClamp::new(50, 0, 100).unwrap();
//! volume.set_value(-5);
//! assert!(volume.projection().is_at_min());
//!
//! let mut email = RuleValidator::empty(vec![ValidationRule::NotEmpty, ValidationRule::Email]);
//! email.set_value("someone@example.com");
//! assert!(email.projection().is_valid);
//!
//! let store = Arc::new(MemoryStore::new());
//! let dark_mode = PersistedDefault::new("app.darkMode", false, Arc::clone(&store));
//! dark_mode.set_value(true).unwrap();
//! assert!(dark_mode.value());
//! dark_mode.projection().reset().unwrap();
//! assert!(!dark_mode.value());
//! ```
//!
//! ## Threads
//! Containers are meant to be driven from one thread, typically the UI thread.
//! Writes to [`clamp::RangeClamp`] and [`validated::RuleValidator`] take
//! `&mut self`; share them across threads behind a `Mutex`. The shipped stores
//! guard their state with a mutex and can be shared through an `Arc`.
//!
//! ## Settings
//! [`settings::Settings`] reads the store backend, write policy, log filter and
//! per-field rule lists from a config file and the environment.

pub mod clamp;
pub mod codec;
pub mod error;
pub mod observe;
pub mod persist;
pub mod persisted;
pub mod rule;
pub mod settings;
pub mod store;
pub mod validated;

pub use error::{ProjectedError, Result};
