// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera rig and numeric core for an interactive 3D pond scene.
//!
//! The rig decides where the camera should look as the user moves between
//! routed focus objects, docks a UI panel or switches between desktop and
//! mobile input. Supporting it are an allocation-bounded vector pool and a
//! small force/drag/speed-clamp integrator used to float decorations.
//!
//! # Key entry points
//!
//! - [`rig::CameraRig`] - focus-driven camera retargeting state machine
//! - [`camera::SmoothCamera`] - smoothed orbit controller implementing
//!   [`camera::CameraControls`]
//! - [`util::VectorPool`] - bounded free list of reusable vectors
//! - [`physics`] - stateless motion integration and drifting decorations
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`session::Session`] - headless replay of a scripted session
//!
//! # Architecture
//!
//! Everything runs on one thread, once per frame. External UI/route state
//! and the [`device::DeviceProfile`] feed the rig, which issues discrete
//! animated look-at commands whenever an input changes. The camera
//! controller owns all interpolation between those commands.

pub mod camera;
pub mod device;
pub mod error;
pub mod options;
pub mod physics;
pub mod rig;
pub mod session;
pub mod util;
