#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! # Deskshell: desktop-shell modules for wayland compositors
//!
//! This crate provides the logic of small desktop-shell extensions (such as a popup
//! launcher menu) that a compositor exposes to one privileged shell client. It does not
//! render anything and does not speak the wire protocol: it decides who owns the input
//! of a seat and where shell surfaces are placed, and leaves the rest to the compositor.
//!
//! ## Structure of the crate
//!
//! - [`utils`] contains geometry types, event serials and the identifiers used to refer
//!   to compositor objects.
//! - [`input`] describes how the shell modules access keyboards, pointers and touch devices.
//! - [`shell`] contains the [`ShellHost`](shell::ShellHost) contract the compositor
//!   implements, and the shell modules themselves.
//!
//! ## General principles
//!
//! All the modules run on the compositor dispatch thread, and every entry point runs to
//! completion. The compositor stays the sole owner of surfaces, views, seats and outputs:
//! modules only keep identifiers and check them for liveness before use. Destruction of
//! those objects must be forwarded to the modules so they can drop their references.
//!
//! ### Logging
//!
//! Deskshell makes extensive use of [`tracing`] for its internal logging. It never installs
//! a subscriber on its own.

pub mod input;
pub mod shell;
pub mod utils;
