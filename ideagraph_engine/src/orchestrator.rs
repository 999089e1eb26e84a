// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-stage generation of an idea.
//!
//! One task per idea, keyed by [`IdeaId`]:
//!
//! ```text
//! MainLoading ──main_content──▶ MainReady ──suggestions──▶ Suggesting ──art──▶ ArtReady
//!      │                            │                          │
//!      └──────────── provider failure: error set, both loading flags cleared ──┘
//! ```
//!
//! Entering main loading happens synchronously when the task is created, so callers see the
//! loading flags before the first poll. Every later mutation re-validates the id; if the idea
//! was removed in the meantime the task ends as [`GenerationOutcome::Discarded`] without
//! touching anything.

use core::fmt;
use std::rc::Rc;

use ideagraph_geometry::{SemanticPoint, semantic_point};
use ideagraph_store::{IdeaId, IdeaVersion};
use tracing::{debug, info, warn};

use crate::engine::Shared;
use crate::error::ProviderError;
use crate::provider::{ContentProvider, MainContentRequest};

/// Stage of the generation chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    /// Resolving a concept name to a semantic point.
    ConceptPoint,
    /// Generating the main text.
    MainContent,
    /// Requesting branch suggestions.
    Suggestions,
    /// Generating the illustration.
    Art,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConceptPoint => "concept point",
            Self::MainContent => "main content",
            Self::Suggestions => "suggestions",
            Self::Art => "art",
        })
    }
}

/// How a generation task ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Every stage succeeded.
    Completed,
    /// A provider call failed; the message was recorded on the idea.
    Failed {
        /// Stage whose call failed.
        stage: GenerationStage,
        /// Message recorded as the idea's error.
        message: String,
    },
    /// The idea was removed while the task was in flight; nothing was applied.
    Discarded,
}

/// Releases the in-flight mark of an idea when its task finishes or is dropped.
pub(crate) struct InFlight<P> {
    shared: Rc<Shared<P>>,
    id: IdeaId,
}

impl<P> InFlight<P> {
    pub(crate) fn new(shared: Rc<Shared<P>>, id: IdeaId) -> Self {
        Self { shared, id }
    }
}

impl<P> Drop for InFlight<P> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.try_borrow_mut() {
            state.in_flight.remove(&self.id);
        }
    }
}

/// Run stages 1 (point resolution) through 4 for `id`.
pub(crate) async fn run<P: ContentProvider>(
    shared: Rc<Shared<P>>,
    id: IdeaId,
) -> GenerationOutcome {
    let Some((seed, rect)) = shared
        .state
        .borrow()
        .store
        .get(id)
        .map(|n| (n.seed.clone(), n.rect))
    else {
        return discarded(id, GenerationStage::ConceptPoint);
    };

    let point = match seed.concept_name() {
        Some(name) => match shared.provider.point_for_concept(name).await {
            // Provider points are untrusted; clamp them into the plane.
            Ok(p) => SemanticPoint::new(p.x, p.y),
            Err(e) => return fail(&shared, id, GenerationStage::ConceptPoint, &e),
        },
        None => semantic_point(rect, shared.config.layout.semantic_scale),
    };

    let Some(history) = ({
        let state = shared.state.borrow();
        state
            .store
            .contains(id)
            .then(|| state.store.history(Some(id)))
    }) else {
        return discarded(id, GenerationStage::MainContent);
    };
    let request = MainContentRequest {
        labels: shared.context.labels.clone(),
        point,
        topic: shared.context.topic.clone(),
        history,
        concept: seed.concept_name().map(str::to_owned),
    };
    let content = match shared.provider.main_content(request).await {
        Ok(content) => content,
        Err(e) => return fail(&shared, id, GenerationStage::MainContent, &e),
    };
    let text = content.text.clone();
    let version = IdeaVersion {
        text: content.text,
        terms: content.terms,
        bridge_text: content.bridge,
        ascii_art: None,
    };
    let Some(version_index) = shared.state.borrow_mut().store.finish_main(id, version) else {
        return discarded(id, GenerationStage::MainContent);
    };
    debug!(%id, version_index, "main content ready");

    let topic = shared.context.topic.as_str();
    let mut suggestions = match shared.provider.suggestions(topic, &text).await {
        Ok(s) => s,
        Err(e) => return fail(&shared, id, GenerationStage::Suggestions, &e),
    };
    suggestions.truncate(shared.config.suggestions.max);
    {
        let mut state = shared.state.borrow_mut();
        if !state.store.contains(id) {
            drop(state);
            return discarded(id, GenerationStage::Suggestions);
        }
        state.store.replace_suggestions(id, suggestions);
    }

    let art = match shared.provider.art(topic, &text).await {
        Ok(art) => art,
        Err(e) => return fail(&shared, id, GenerationStage::Art, &e),
    };
    if !shared
        .state
        .borrow_mut()
        .store
        .finish_art(id, version_index, art)
    {
        return discarded(id, GenerationStage::Art);
    }

    info!(%id, version_index, "generation completed");
    GenerationOutcome::Completed
}

fn fail<P>(
    shared: &Shared<P>,
    id: IdeaId,
    stage: GenerationStage,
    error: &ProviderError,
) -> GenerationOutcome {
    let message = error.to_string();
    if !shared.state.borrow_mut().store.fail(id, message.clone()) {
        return discarded(id, stage);
    }
    warn!(%id, %stage, %message, "generation failed");
    GenerationOutcome::Failed { stage, message }
}

fn discarded(id: IdeaId, stage: GenerationStage) -> GenerationOutcome {
    debug!(%id, %stage, "idea removed mid-generation, update dropped");
    GenerationOutcome::Discarded
}
