// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=ideagraph_engine --heading-base-level=0

//! Ideagraph Engine: generation, viewport and facade for a spatial idea-graph canvas.
//!
//! A user explores a topic as a branching graph of generated notes ("ideas") on an infinite
//! canvas. This crate ties the pieces together:
//!
//! - [`ContentProvider`]: the async seam to whatever generates text, suggestions and art.
//! - The generation orchestrator: one task per idea running main content, then suggestions,
//!   then art, with per-idea error capture and liveness checks before every update.
//! - [`Viewport`]: pan, clamped zoom about a screen point, and centering on new ideas.
//! - [`Engine`]: the facade a presentation layer drives.
//! - [`EngineConfig`]: every tunable, loadable from TOML.
//!
//! ## Threading
//!
//! Everything is single-threaded. Creating an idea returns its [`Generation`], a `'static`
//! local future; await it, join several, or spawn them on a local executor. State is never
//! borrowed across an await, so any interleaving of tasks and facade calls is allowed.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and wraps each generation in a `generation` span
//! carrying the idea id. Install a subscriber to see them.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use ideagraph_engine::{
//!     AxisLabels, ContentProvider, Engine, EngineConfig, ExplorationContext, GenerationOutcome,
//!     MainContent, MainContentRequest, ProviderError,
//! };
//! use ideagraph_geometry::SemanticPoint;
//! use kurbo::Rect;
//!
//! struct Echo;
//!
//! #[async_trait(?Send)]
//! impl ContentProvider for Echo {
//!     async fn main_content(
//!         &self,
//!         req: MainContentRequest,
//!     ) -> Result<MainContent, ProviderError> {
//!         Ok(MainContent { text: format!("on {}", req.topic), ..Default::default() })
//!     }
//!     async fn suggestions(&self, _: &str, _: &str) -> Result<Vec<String>, ProviderError> {
//!         Ok(vec!["tides".into()])
//!     }
//!     async fn art(&self, _: &str, _: &str) -> Result<String, ProviderError> {
//!         Ok("~~~".into())
//!     }
//!     async fn point_for_concept(&self, _: &str) -> Result<SemanticPoint, ProviderError> {
//!         Ok(SemanticPoint::default())
//!     }
//! }
//!
//! let context = ExplorationContext::new("rivers", AxisLabels::default());
//! let engine = Engine::new(Echo, context, EngineConfig::default())?;
//!
//! let (id, generation) = engine.create_from_rectangle(Rect::new(0.0, 0.0, 300.0, 200.0));
//! assert!(engine.idea(id).unwrap().is_loading());
//! assert_eq!(futures::executor::block_on(generation), GenerationOutcome::Completed);
//!
//! let idea = engine.idea(id).unwrap();
//! assert_eq!(idea.text, "on rivers");
//! assert_eq!(engine.suggestions()[0].text, "tides");
//! # Ok::<(), ideagraph_engine::ConfigError>(())
//! ```

mod config;
mod engine;
mod error;
mod orchestrator;
mod provider;
mod viewport;

pub use config::{EngineConfig, LayoutConfig, PlacementConfig, SuggestionConfig, ViewportConfig};
pub use engine::{Connector, Engine, Generation};
pub use error::{ConfigError, EngineError, ProviderError};
pub use orchestrator::{GenerationOutcome, GenerationStage};
pub use provider::{
    AxisLabels, ContentProvider, ExplorationContext, MainContent, MainContentRequest,
};
pub use viewport::{AutoPan, Viewport};
