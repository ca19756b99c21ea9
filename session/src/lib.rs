//! Token workbench: the JW3T sign/verify workflow as an explicit state
//! machine.
//!
//! [`ViewState`] holds everything a front end would render: the editable
//! header and payload text, discovered accounts, the current selection, the
//! encoded token and per-stage errors. [`Event`]s move it between stages
//! through pure, synchronous transitions, so the whole machine unit-tests
//! without a rendering environment or a runtime.
//!
//! [`Workbench`] adds the asynchronous side on tokio: account loading,
//! signing and verification run as spawned tasks whose completions come
//! back as events. Every recompute is tagged with a generation counter;
//! completions carrying a stale generation are discarded, so the displayed
//! state always reflects the latest (identity, header, payload) input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event;
mod pipeline;
mod state;

pub use event::{Command, Event};
pub use pipeline::Workbench;
pub use state::{Stage, ViewState, PLACEHOLDER_ADDRESS};
