// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The content provider seam.
//!
//! The engine never talks to a model directly. Everything it generates goes through a
//! [`ContentProvider`], which is expected to enforce its own timeouts.

use async_trait::async_trait;
use ideagraph_geometry::SemanticPoint;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Names of the four ends of the semantic plane.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    /// Meaning of `x = -1`.
    pub left: String,
    /// Meaning of `x = 1`.
    pub right: String,
    /// Meaning of `y = 1`.
    pub top: String,
    /// Meaning of `y = -1`.
    pub bottom: String,
}

/// What is being explored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationContext {
    /// Topic or context string shared by every request.
    pub topic: String,
    /// Semantic axis labels.
    pub labels: AxisLabels,
}

impl ExplorationContext {
    /// Context for `topic` with the given axis labels.
    pub fn new(topic: impl Into<String>, labels: AxisLabels) -> Self {
        Self {
            topic: topic.into(),
            labels,
        }
    }
}

/// Input for [`ContentProvider::main_content`].
#[derive(Clone, Debug, PartialEq)]
pub struct MainContentRequest {
    /// Semantic axis labels.
    pub labels: AxisLabels,
    /// Where the idea sits in the semantic plane.
    pub point: SemanticPoint,
    /// Topic or context string.
    pub topic: String,
    /// Text of earlier ideas, oldest first. Never contains the idea being generated.
    pub history: Vec<String>,
    /// Concept the idea was branched from, if any.
    pub concept: Option<String>,
}

/// Output of [`ContentProvider::main_content`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MainContent {
    /// Main text.
    pub text: String,
    /// Transition phrase from the idea that led here.
    pub bridge: Option<String>,
    /// Substrings of `text` eligible for branching. Entries that are not substrings are
    /// kept but never match.
    pub terms: Vec<String>,
}

/// External generator of idea content.
///
/// Calls are awaited one at a time per idea, but calls for different ideas may interleave.
#[async_trait(?Send)]
pub trait ContentProvider {
    /// Generate the main text of an idea.
    async fn main_content(&self, request: MainContentRequest)
    -> Result<MainContent, ProviderError>;

    /// Propose up to three branch concepts for `text`. Extra entries are ignored.
    async fn suggestions(&self, topic: &str, text: &str) -> Result<Vec<String>, ProviderError>;

    /// Produce an illustration for `text`. The result is an opaque display string.
    async fn art(&self, topic: &str, text: &str) -> Result<String, ProviderError>;

    /// Locate a named concept in the semantic plane.
    async fn point_for_concept(&self, name: &str) -> Result<SemanticPoint, ProviderError>;
}
