//! # Flattex Core
//!
//! A recursive resolver for LaTeX `\input` and `\include` directives.
//!
//! Given a root document, the resolver produces a single flattened document
//! in which every inclusion directive has been replaced, in place, by the
//! recursively expanded contents of the referenced file. Everything that is
//! not an inclusion directive is opaque text and is copied through byte for
//! byte, original line endings included.
//!
//! ## Quick Start
//!
//! ```rust
//! use flattex_core::{Config, Resolver};
//!
//! let input = "no directives in here\n";
//! let mut output = Vec::new();
//! let mut resolver = Resolver::new(Config::default());
//! resolver.resolve(input.as_bytes(), &mut output).unwrap();
//!
//! assert_eq!(output, input.as_bytes());
//! ```
//!
//! ## Comment escaping
//!
//! A directive behind an unescaped `%` is commented out and left alone,
//! while `\%` is a literal percent sign and does not start a comment:
//!
//! ```rust
//! use flattex_core::find_directive;
//!
//! assert!(find_directive("see the notes % \\input{notes}\n").is_none());
//! assert!(find_directive("\\%\\input{notes}\n").is_some());
//! ```
//!
//! ## Markers
//!
//! With [`Config::markers`] enabled (the default), every inserted file is
//! bracketed by a pair of `% ========= begin/end insertion of <file>`
//! comment lines for traceability when reading the flattened output.

pub mod config;
pub mod directive;
pub mod error;
pub mod resolver;

pub use config::Config;
pub use directive::{find_directive, normalize_filename, Directive};
pub use error::ResolveError;
pub use resolver::Resolver;
