//! Office form rendering engine
//!
//! Draws fixed-layout office forms with Typst:
//! - Fuel card management form (A4 landscape)
//! - Staff gate pass (A4 portrait)
//!
//! Form geometry is computed in Rust ([`layout`]) and handed to the embedded
//! templates together with the validated form data ([`forms`]) and the images
//! it references ([`assets`]).
//!
//! # Feature Flags
//!
//! - `server` (default): Enables async rendering with a timeout (requires tokio)
//! - `wasm`: For browser/WASM environments (sync rendering only)

pub mod assets;
pub mod compiler;
pub mod config;
pub mod forms;
pub mod layout;
pub mod renderer;
pub mod templates;
pub mod verifier;
pub mod world;

pub use assets::{AssetSource, DirectoryAssets, MemoryAssets};
pub use compiler::{CompileError, EngineError, OutputFormat};
pub use config::EngineConfig;
pub use forms::{FormData, FormKind};
pub use renderer::{FormRenderer, RenderOptions, RenderedForm};
pub use verifier::{FormVerifier, VerifierError};
