#![deny(
  macro_use_extern_crate,
  meta_variable_misuse,
  missing_debug_implementations,
  non_ascii_idents,
  single_use_lifetimes,
  trivial_casts,
  trivial_numeric_casts,
  unstable_features,
  variant_size_differences,
  rust_2018_idioms,
  future_incompatible,
  clippy::nursery,
  clippy::pedantic
)]
#![warn(clippy::cargo, unused)]
// Engine and CLI are only consumed by the bundled binary
#![allow(
  clippy::cargo_common_metadata,
  clippy::module_inception,
  clippy::module_name_repetitions,
  unreachable_pub,
  missing_docs,
  clippy::missing_panics_doc,
  clippy::missing_errors_doc
)]
pub mod cli;
pub mod engine;
