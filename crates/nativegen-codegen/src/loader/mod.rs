//! Loader script generation.
//!
//! Produces the JavaScript shipped next to a native addon:
//!
//! - `index.js`: detects the host platform (and the C library on Linux),
//!   tries each matching prebuilt binary, falls back to WebAssembly, and
//!   throws an aggregate error listing every failed attempt;
//! - `<binary>.wasi.cjs` and `wasi-browser.js`: instantiate the wasm build
//!   in Node.js and in browsers;
//! - `wasi-worker.mjs` and `wasi-worker-browser.mjs`: thread workers.
//!
//! The order of native attempts is a pure function of the platform table,
//! exposed as [`candidates_for`] and [`load_plan`].

mod dispatch;
mod generator;
mod params;
mod platform;

pub use dispatch::{render_initializer_stub, render_require_native};
pub use generator::LoaderGenerator;
pub use params::{LoaderTarget, LoaderTemplateParams};
pub use platform::{
    Abi, Arch, CandidateSource, LoadCandidate, Os, Platform, candidates_for, load_plan,
    platform_candidates, wasi_candidates,
};
