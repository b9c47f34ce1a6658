//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Caller layer for [`declex`]: everything that is presentation or session
//! state rather than analysis.
//!
//! - [`buffer`]: token accumulation across input fragments, with an explicit
//!   de-duplication policy,
//! - [`render`]: grouped token listings and token/symbol file output,
//! - [`repl`]: the interactive session driving the core stages.
pub mod buffer;
pub mod render;
pub mod repl;

pub use buffer::{DedupPolicy, TokenBuffer};
pub use repl::{Reply, Session, SessionConfig};
