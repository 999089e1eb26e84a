// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Engine`] facade.

use core::fmt;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use ideagraph_geometry::{route_connector, route_suggestion};
use ideagraph_store::{
    IdeaId, IdeaNode, IdeaStore, Removal, Seed, SessionCounters, Suggestion, SuggestionId,
};
use kurbo::{CubicBez, Point, Rect, Size, Vec2};
use tracing::{Instrument, debug, info_span};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::orchestrator::{self, GenerationOutcome, InFlight};
use crate::provider::{ContentProvider, ExplorationContext};
use crate::viewport::Viewport;

/// A pending generation task.
///
/// Holds no borrow of the engine; await it directly or hand it to a local executor.
/// Dropping it abandons the remaining stages and releases the in-flight mark.
pub type Generation = LocalBoxFuture<'static, GenerationOutcome>;

/// Connector from a parent idea to an idea branched from it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connector {
    /// Idea the branch came from.
    pub from: IdeaId,
    /// Branched idea.
    pub to: IdeaId,
    /// World-space path.
    pub path: CubicBez,
}

pub(crate) struct State {
    pub(crate) store: IdeaStore,
    pub(crate) viewport: Viewport,
    pub(crate) in_flight: HashSet<IdeaId>,
}

pub(crate) struct Shared<P> {
    pub(crate) provider: P,
    pub(crate) context: ExplorationContext,
    pub(crate) config: EngineConfig,
    pub(crate) state: RefCell<State>,
}

/// Spatial idea-graph engine.
///
/// Owns the idea store and the viewport, and starts generation tasks against a
/// [`ContentProvider`]. Cloning is cheap and yields a handle to the same engine.
///
/// All state is single-threaded. Read accessors return owned snapshots, so no borrow
/// outlives a call.
pub struct Engine<P> {
    shared: Rc<Shared<P>>,
}

impl<P> Clone for Engine<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<P> fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.try_borrow();
        let mut s = f.debug_struct("Engine");
        s.field("topic", &self.shared.context.topic);
        if let Ok(state) = state {
            s.field("ideas", &state.store.len())
                .field("in_flight", &state.in_flight.len())
                .field("zoom", &state.viewport.zoom());
        }
        s.finish_non_exhaustive()
    }
}

impl<P: ContentProvider + 'static> Engine<P> {
    /// Create an engine exploring `context` with `provider`.
    ///
    /// The configuration is validated first, so hand-built configs get the same checks as
    /// ones loaded with [`EngineConfig::from_toml_str`].
    pub fn new(
        provider: P,
        context: ExplorationContext,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = State {
            store: IdeaStore::with_params(config.store_params()),
            viewport: Viewport::new(&config.viewport),
            in_flight: HashSet::new(),
        };
        Ok(Self {
            shared: Rc::new(Shared {
                provider,
                context,
                config,
                state: RefCell::new(state),
            }),
        })
    }

    /// The content provider.
    pub fn provider(&self) -> &P {
        &self.shared.provider
    }

    /// The exploration context passed to every request.
    pub fn context(&self) -> &ExplorationContext {
        &self.shared.context
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    // --- snapshots ---

    /// Every live idea, ascending id.
    pub fn ideas(&self) -> Vec<IdeaNode> {
        self.shared.state.borrow().store.ideas().to_vec()
    }

    /// One idea by id.
    pub fn idea(&self, id: IdeaId) -> Option<IdeaNode> {
        self.shared.state.borrow().store.get(id).cloned()
    }

    /// The active suggestion set.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.shared.state.borrow().store.suggestions().to_vec()
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.shared.state.borrow().viewport.clone()
    }

    /// Session counters.
    pub fn counters(&self) -> SessionCounters {
        self.shared.state.borrow().store.counters().clone()
    }

    /// The active (most recently fronted) idea.
    pub fn active(&self) -> Option<IdeaId> {
        self.shared.state.borrow().store.active()
    }

    /// True while a generation task for `id` has not finished.
    pub fn is_generating(&self, id: IdeaId) -> bool {
        self.shared.state.borrow().in_flight.contains(&id)
    }

    /// Prompt history as a new generation would see it.
    pub fn history(&self, excluding: Option<IdeaId>) -> Vec<String> {
        self.shared.state.borrow().store.history(excluding)
    }

    /// Topmost idea under a screen-space point.
    pub fn idea_at_screen(&self, pt: Point) -> Option<IdeaId> {
        let state = self.shared.state.borrow();
        state.store.idea_at(state.viewport.screen_to_world(pt))
    }

    /// World-space connectors from each concept idea to its live parent.
    pub fn connectors(&self) -> Vec<Connector> {
        let state = self.shared.state.borrow();
        let store = &state.store;
        store
            .ideas()
            .iter()
            .filter_map(|node| {
                let from = node.seed.parent()?;
                let parent = store.get(from)?;
                Some(Connector {
                    from,
                    to: node.id,
                    path: route_connector(parent.rect, node.rect),
                })
            })
            .collect()
    }

    /// World-space paths from the suggestion source to each active suggestion.
    pub fn suggestion_routes(&self) -> Vec<(SuggestionId, CubicBez)> {
        let state = self.shared.state.borrow();
        let store = &state.store;
        store
            .suggestions()
            .iter()
            .filter_map(|s| {
                let source = store.get(s.source)?;
                Some((s.id, route_suggestion(source.rect, s.rect)))
            })
            .collect()
    }

    // --- creation ---

    /// Create an idea near the world-space `rect` and start generating it.
    ///
    /// The rectangle is shifted clear of existing ideas, the idea enters main loading and the
    /// viewport centers on it before this returns.
    pub fn create_from_rectangle(&self, rect: Rect) -> (IdeaId, Generation) {
        self.create(rect, Seed::Placement)
    }

    /// Like [`create_from_rectangle`](Self::create_from_rectangle) for a rectangle dragged in
    /// screen space.
    pub fn create_from_screen_rect(&self, rect: Rect) -> (IdeaId, Generation) {
        let world = self.shared.state.borrow().viewport.transform().rect_to_world(rect);
        self.create(world, Seed::Placement)
    }

    /// Create an idea exploring the concept `name`, branched from `source`.
    ///
    /// The idea gets the default size and is placed to the right of the source. Without a
    /// live source it lands at the center of the viewport. Term clicks go through here.
    pub fn create_from_concept(
        &self,
        name: impl Into<String>,
        source: Option<IdeaId>,
    ) -> (IdeaId, Generation) {
        let size = self.shared.config.idea_size();
        let (desired, parent) = {
            let state = self.shared.state.borrow();
            match source.and_then(|id| state.store.get(id)) {
                Some(node) => {
                    let origin = Point::new(
                        node.rect.x1 + self.shared.config.layout.branch_gap,
                        node.rect.y0,
                    );
                    (Rect::from_origin_size(origin, size), Some(node.id))
                }
                None => (
                    Rect::from_center_size(state.viewport.world_center(), size),
                    None,
                ),
            }
        };
        self.create(desired, Seed::concept(name, parent))
    }

    /// Turn an active suggestion into an idea at the suggestion's position.
    ///
    /// The whole suggestion set is cleared.
    pub fn consume_suggestion(
        &self,
        id: SuggestionId,
    ) -> Result<(IdeaId, Generation), EngineError> {
        let size = self.shared.config.idea_size();
        let (desired, seed) = {
            let mut state = self.shared.state.borrow_mut();
            let suggestion = state
                .store
                .take_suggestion(id)
                .ok_or(EngineError::UnknownSuggestion(id))?;
            let parent = Some(suggestion.source).filter(|s| state.store.contains(*s));
            (
                Rect::from_origin_size(suggestion.rect.origin(), size),
                Seed::concept(suggestion.text, parent),
            )
        };
        Ok(self.create(desired, seed))
    }

    // --- generation ---

    /// Generate a new version of `id` from its original seed.
    ///
    /// Earlier versions are kept; the new one becomes current once main content arrives.
    pub fn regenerate(&self, id: IdeaId) -> Result<Generation, EngineError> {
        {
            let mut state = self.shared.state.borrow_mut();
            if !state.store.contains(id) {
                return Err(EngineError::UnknownIdea(id));
            }
            if state.in_flight.contains(&id) {
                return Err(EngineError::GenerationInFlight(id));
            }
            state.store.begin_generation(id);
            state.in_flight.insert(id);
        }
        Ok(self.launch(id))
    }

    // --- editing ---

    /// Make version `index` of `id` current.
    ///
    /// Returns `Ok(false)` if the index is out of range.
    pub fn switch_version(&self, id: IdeaId, index: usize) -> Result<bool, EngineError> {
        let mut state = self.shared.state.borrow_mut();
        if !state.store.contains(id) {
            return Err(EngineError::UnknownIdea(id));
        }
        Ok(state.store.switch_version(id, index))
    }

    /// Delete an idea. Unknown ids are a no-op.
    ///
    /// A generation still running for it finishes as [`GenerationOutcome::Discarded`].
    pub fn remove(&self, id: IdeaId) -> Option<Removal> {
        self.shared.state.borrow_mut().store.remove(id)
    }

    /// Raise `id` above every other idea and nudge neighbors off its toolbar band.
    ///
    /// Returns the nudged ideas.
    pub fn bring_to_front(&self, id: IdeaId) -> Vec<IdeaId> {
        self.shared.state.borrow_mut().store.bring_to_front(id)
    }

    // --- viewport ---

    /// Pan by a screen-space delta.
    pub fn pan(&self, delta: Vec2) {
        self.shared.state.borrow_mut().viewport.pan_by(delta);
    }

    /// Zoom by an additive `delta` about the screen point `center`.
    ///
    /// Returns true if the zoom changed.
    pub fn zoom(&self, delta: f64, center: Point) -> bool {
        self.shared.state.borrow_mut().viewport.zoom_by(delta, center)
    }

    /// Center the viewport on an idea. Returns false for unknown ids.
    pub fn center_on(&self, id: IdeaId) -> bool {
        let mut state = self.shared.state.borrow_mut();
        let Some(rect) = state.store.get(id).map(|n| n.rect) else {
            return false;
        };
        state.viewport.center_on(rect);
        true
    }

    /// Update the screen size after a resize.
    pub fn set_screen_size(&self, size: Size) {
        self.shared.state.borrow_mut().viewport.set_screen_size(size);
    }

    // --- internals ---

    fn create(&self, desired: Rect, seed: Seed) -> (IdeaId, Generation) {
        let id = {
            let mut state = self.shared.state.borrow_mut();
            let id = state.store.create(desired, seed);
            state.store.begin_generation(id);
            if let Some(rect) = state.store.get(id).map(|n| n.rect) {
                state.viewport.center_on(rect);
            }
            state.in_flight.insert(id);
            id
        };
        (id, self.launch(id))
    }

    /// Wrap the orchestrator for `id`, which must already be marked in flight.
    fn launch(&self, id: IdeaId) -> Generation {
        let shared = Rc::clone(&self.shared);
        let guard = InFlight::new(Rc::clone(&shared), id);
        debug!(%id, "generation scheduled");
        async move {
            let _guard = guard;
            orchestrator::run(shared, id).await
        }
        .instrument(info_span!("generation", %id))
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use async_trait::async_trait;
    use ideagraph_geometry::{DEFAULT_GAP, SemanticPoint, overlaps};
    use kurbo::{Point, Rect, Vec2};
    use tokio::sync::Notify;

    use super::*;
    use crate::error::ProviderError;
    use crate::orchestrator::GenerationStage;
    use crate::provider::{AxisLabels, MainContent, MainContentRequest};

    /// Provider that answers from queues and records what it was asked.
    ///
    /// Empty queues fall back to canned answers. A gate, when set, is awaited before the
    /// matching call answers.
    #[derive(Default)]
    struct Scripted {
        main: RefCell<VecDeque<Result<MainContent, ProviderError>>>,
        suggestions: RefCell<VecDeque<Result<Vec<String>, ProviderError>>>,
        art: RefCell<VecDeque<Result<String, ProviderError>>>,
        points: RefCell<VecDeque<Result<SemanticPoint, ProviderError>>>,
        main_gates: RefCell<VecDeque<Rc<Notify>>>,
        suggestion_gates: RefCell<VecDeque<Rc<Notify>>>,
        requests: RefCell<Vec<MainContentRequest>>,
        concepts: RefCell<Vec<String>>,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn main_text(&self, text: &str) -> &Self {
            self.main.borrow_mut().push_back(Ok(MainContent {
                text: text.to_owned(),
                bridge: None,
                terms: vec![],
            }));
            self
        }

        fn suggest(&self, texts: &[&str]) -> &Self {
            self.suggestions
                .borrow_mut()
                .push_back(Ok(texts.iter().map(|s| (*s).to_owned()).collect()));
            self
        }
    }

    #[async_trait(?Send)]
    impl ContentProvider for Scripted {
        async fn main_content(
            &self,
            request: MainContentRequest,
        ) -> Result<MainContent, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            self.requests.borrow_mut().push(request);
            let gate = self.main_gates.borrow_mut().pop_front();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let next = self.main.borrow_mut().pop_front();
            next.unwrap_or_else(|| {
                Ok(MainContent {
                    text: "an idea".into(),
                    bridge: None,
                    terms: vec![],
                })
            })
        }

        async fn suggestions(
            &self,
            _topic: &str,
            _text: &str,
        ) -> Result<Vec<String>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.suggestion_gates.borrow_mut().pop_front();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let next = self.suggestions.borrow_mut().pop_front();
            next.unwrap_or_else(|| Ok(vec![]))
        }

        async fn art(&self, _topic: &str, _text: &str) -> Result<String, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            let next = self.art.borrow_mut().pop_front();
            next.unwrap_or_else(|| Ok("(art)".into()))
        }

        async fn point_for_concept(&self, name: &str) -> Result<SemanticPoint, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            self.concepts.borrow_mut().push(name.to_owned());
            let next = self.points.borrow_mut().pop_front();
            next.unwrap_or_else(|| Ok(SemanticPoint::new(0.0, 0.0)))
        }
    }

    fn engine(provider: Scripted) -> Engine<Scripted> {
        let context = ExplorationContext::new(
            "rivers",
            AxisLabels {
                left: "local".into(),
                right: "global".into(),
                top: "abstract".into(),
                bottom: "concrete".into(),
            },
        );
        Engine::new(provider, context, EngineConfig::default()).unwrap()
    }

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 200.0)
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = EngineConfig::default();
        config.viewport.max_zoom = f64::NAN;
        let context = ExplorationContext::default();
        let err = Engine::new(Scripted::default(), context.clone(), config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "viewport.max_zoom", .. }));

        let mut config = EngineConfig::default();
        config.viewport.min_zoom = 1.5;
        config.viewport.max_zoom = 1.0;
        assert!(Engine::new(Scripted::default(), context, config).is_err());
    }

    #[tokio::test]
    async fn creation_runs_every_stage() {
        let provider = Scripted::default();
        provider.main_text("deltas").suggest(&["silt", "tides"]);
        let engine = engine(provider);

        let (id, generation) = engine.create_from_rectangle(rect());
        let node = engine.idea(id).unwrap();
        assert!(node.is_loading() && node.is_art_loading());
        assert!(engine.is_generating(id));

        assert_eq!(generation.await, GenerationOutcome::Completed);
        let node = engine.idea(id).unwrap();
        assert_eq!(node.text, "deltas");
        assert_eq!(node.ascii_art.as_deref(), Some("(art)"));
        assert_eq!(node.versions[0].ascii_art.as_deref(), Some("(art)"));
        assert!(!node.is_loading() && !node.is_art_loading());
        assert!(!engine.is_generating(id));

        let suggestions = engine.suggestions();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.source == id));
        assert_eq!(engine.suggestion_routes().len(), 2);
    }

    #[tokio::test]
    async fn creation_centers_viewport() {
        let engine = engine(Scripted::default());
        let (id, _generation) =
            engine.create_from_rectangle(Rect::new(1000.0, 500.0, 1300.0, 700.0));
        let rect = engine.idea(id).unwrap().rect;
        let viewport = engine.viewport();
        let on_screen = viewport.world_to_screen(rect.center());
        assert_eq!(on_screen, Point::new(640.0, 400.0));
        assert!(viewport.auto_pan().is_some());
    }

    #[tokio::test]
    async fn regenerate_appends_a_version() {
        let provider = Scripted::default();
        provider.main_text("v0").main_text("v1");
        let engine = engine(provider);

        let (id, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let outcome = engine.regenerate(id).unwrap().await;
        assert_eq!(outcome, GenerationOutcome::Completed);

        let node = engine.idea(id).unwrap();
        let texts: Vec<_> = node.versions.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, ["v0", "v1"]);
        assert_eq!(node.current_version, Some(1));
        assert_eq!(engine.counters().generations_started(), 2);

        assert_eq!(engine.switch_version(id, 0), Ok(true));
        assert_eq!(engine.idea(id).unwrap().text, "v0");
        assert_eq!(engine.switch_version(id, 7), Ok(false));
    }

    #[tokio::test]
    async fn empty_suggestions_leave_the_set_empty() {
        let provider = Scripted::default();
        provider.suggest(&["a", "b", "c"]).suggest(&[]);
        let engine = engine(provider);

        let (first, generation) = engine.create_from_rectangle(rect());
        generation.await;
        assert_eq!(engine.suggestions().len(), 3);

        engine.regenerate(first).unwrap().await;
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test]
    async fn extra_suggestions_are_truncated() {
        let provider = Scripted::default();
        provider.suggest(&["a", "b", "c", "d", "e"]);
        let engine = engine(provider);
        let (_, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let texts: Vec<_> = engine.suggestions().into_iter().map(|s| s.text).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn art_failure_keeps_text() {
        let provider = Scripted::default();
        provider.main_text("kept");
        provider
            .art
            .borrow_mut()
            .push_back(Err(ProviderError::Request("quota".into())));
        let engine = engine(provider);

        let (id, generation) = engine.create_from_rectangle(rect());
        let outcome = generation.await;
        assert_eq!(
            outcome,
            GenerationOutcome::Failed {
                stage: GenerationStage::Art,
                message: "request failed: quota".into(),
            }
        );
        let node = engine.idea(id).unwrap();
        assert_eq!(node.text, "kept");
        assert_eq!(node.error.as_deref(), Some("request failed: quota"));
        assert!(!node.is_loading() && !node.is_art_loading());
        assert!(node.ascii_art.is_none());
    }

    #[tokio::test]
    async fn main_failure_is_terminal() {
        let provider = Scripted::default();
        provider
            .main
            .borrow_mut()
            .push_back(Err(ProviderError::Malformed("no text".into())));
        let engine = engine(provider);

        let (id, generation) = engine.create_from_rectangle(rect());
        let outcome = generation.await;
        assert!(matches!(
            outcome,
            GenerationOutcome::Failed {
                stage: GenerationStage::MainContent,
                ..
            }
        ));
        let node = engine.idea(id).unwrap();
        assert!(node.versions.is_empty());
        assert_eq!(node.current_version, None);
        assert!(node.error.is_some());
        assert!(!node.is_loading() && !node.is_art_loading());
        // main_content only; suggestions and art were never requested.
        assert_eq!(engine.provider().calls.get(), 1);
    }

    #[tokio::test]
    async fn regenerate_clears_previous_error() {
        let provider = Scripted::default();
        provider
            .main
            .borrow_mut()
            .push_back(Err(ProviderError::Request("offline".into())));
        let engine = engine(provider);
        let (id, generation) = engine.create_from_rectangle(rect());
        generation.await;
        assert!(engine.idea(id).unwrap().error.is_some());

        let generation = engine.regenerate(id).unwrap();
        assert!(engine.idea(id).unwrap().error.is_none());
        assert_eq!(generation.await, GenerationOutcome::Completed);
    }

    #[tokio::test]
    async fn history_excludes_the_idea_being_generated() {
        let provider = Scripted::default();
        provider.main_text("first").main_text("second").main_text("third");
        let engine = engine(provider);

        let (a, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let (_, generation) = engine.create_from_rectangle(rect());
        generation.await;
        engine.regenerate(a).unwrap().await;

        let requests = engine.provider().requests.borrow();
        assert!(requests[0].history.is_empty());
        assert_eq!(requests[1].history, ["first"]);
        assert_eq!(requests[2].history, ["second"]);
        assert_eq!(requests[2].topic, "rivers");
        assert_eq!(requests[2].labels.right, "global");
    }

    #[tokio::test]
    async fn second_generation_is_rejected_while_in_flight() {
        let engine = engine(Scripted::default());
        let (id, generation) = engine.create_from_rectangle(rect());
        assert_eq!(
            engine.regenerate(id).err(),
            Some(EngineError::GenerationInFlight(id))
        );
        generation.await;
        assert!(engine.regenerate(id).is_ok());
    }

    #[tokio::test]
    async fn dropping_a_generation_releases_the_idea() {
        let engine = engine(Scripted::default());
        let (id, generation) = engine.create_from_rectangle(rect());
        drop(generation);
        assert!(!engine.is_generating(id));
        assert!(engine.regenerate(id).is_ok());
    }

    #[tokio::test]
    async fn regenerate_unknown_idea() {
        let engine = engine(Scripted::default());
        let (id, generation) = engine.create_from_rectangle(rect());
        generation.await;
        engine.remove(id);
        assert_eq!(engine.regenerate(id).err(), Some(EngineError::UnknownIdea(id)));
        assert_eq!(engine.switch_version(id, 0), Err(EngineError::UnknownIdea(id)));
    }

    #[tokio::test]
    async fn removal_mid_flight_is_discarded() {
        let provider = Scripted::default();
        let gate = Rc::new(Notify::new());
        provider.main_gates.borrow_mut().push_back(Rc::clone(&gate));
        let engine = engine(provider);

        let (id, generation) = engine.create_from_rectangle(rect());
        let handle = engine.clone();
        let (outcome, ()) = tokio::join!(generation, async move {
            let removal = handle.remove(id).unwrap();
            assert!(removal.became_empty);
            gate.notify_one();
        });
        assert_eq!(outcome, GenerationOutcome::Discarded);
        assert!(engine.idea(id).is_none());
        assert!(engine.ideas().is_empty());
        assert!(engine.suggestions().is_empty());
        assert_eq!(engine.counters().next_seq(), 0);
    }

    #[tokio::test]
    async fn interleaved_generations_last_suggestions_win() {
        let provider = Scripted::default();
        let slow = Rc::new(Notify::new());
        // The first suggestions call waits on the gate, so `b` takes the first answer and
        // `a` the second.
        provider.suggestion_gates.borrow_mut().push_back(Rc::clone(&slow));
        provider.suggest(&["early"]).suggest(&["late"]);
        let engine = engine(provider);

        let (a, gen_a) = engine.create_from_rectangle(rect());
        let (b, gen_b) = engine.create_from_rectangle(rect());
        let (ra, rb) = (engine.idea(a).unwrap().rect, engine.idea(b).unwrap().rect);
        assert!(!overlaps(ra, rb, DEFAULT_GAP));

        let (outcome_a, outcome_b) = tokio::join!(gen_a, async {
            let outcome = gen_b.await;
            slow.notify_one();
            outcome
        });
        assert_eq!(outcome_a, GenerationOutcome::Completed);
        assert_eq!(outcome_b, GenerationOutcome::Completed);

        let suggestions = engine.suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].source, a);
        assert_eq!(suggestions[0].text, "late");
    }

    #[tokio::test]
    async fn concept_ideas_use_the_concept_point() {
        let provider = Scripted::default();
        provider
            .points
            .borrow_mut()
            .push_back(Ok(SemanticPoint { x: 4.0, y: -0.5 }));
        let engine = engine(provider);

        let (source, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let (id, generation) = engine.create_from_concept("estuary", Some(source));
        generation.await;

        let provider = engine.provider();
        assert_eq!(*provider.concepts.borrow(), ["estuary"]);
        let request = &provider.requests.borrow()[1];
        assert_eq!(request.point, SemanticPoint::new(1.0, -0.5));
        assert_eq!(request.concept.as_deref(), Some("estuary"));

        let node = engine.idea(id).unwrap();
        let parent = engine.idea(source).unwrap();
        assert!(node.rect.x0 >= parent.rect.x1);
        assert_eq!(node.seed.parent(), Some(source));
        let connectors = engine.connectors();
        assert_eq!(connectors.len(), 1);
        assert_eq!((connectors[0].from, connectors[0].to), (source, id));
    }

    #[tokio::test]
    async fn concept_point_failure_stops_before_main_content() {
        let provider = Scripted::default();
        provider
            .points
            .borrow_mut()
            .push_back(Err(ProviderError::Request("lookup".into())));
        let engine = engine(provider);
        let (id, generation) = engine.create_from_concept("fjord", None);
        let outcome = generation.await;
        assert!(matches!(
            outcome,
            GenerationOutcome::Failed {
                stage: GenerationStage::ConceptPoint,
                ..
            }
        ));
        assert!(engine.provider().requests.borrow().is_empty());
        assert!(engine.idea(id).unwrap().error.is_some());
    }

    #[tokio::test]
    async fn placement_ideas_use_their_position() {
        let engine = engine(Scripted::default());
        let (_, generation) =
            engine.create_from_rectangle(Rect::new(500.0, -250.0, 800.0, -50.0));
        generation.await;
        let request = &engine.provider().requests.borrow()[0];
        assert_eq!(request.point, SemanticPoint::new(0.5, 0.25));
        assert_eq!(request.concept, None);
    }

    #[tokio::test]
    async fn consuming_a_suggestion_branches_from_it() {
        let provider = Scripted::default();
        provider.suggest(&["silt", "tides"]);
        let engine = engine(provider);

        let (source, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let picked = engine.suggestions()[1].clone();

        let (id, generation) = engine.consume_suggestion(picked.id).unwrap();
        assert!(engine.suggestions().is_empty());
        generation.await;

        let node = engine.idea(id).unwrap();
        assert_eq!(node.seed.concept_name(), Some("tides"));
        assert_eq!(node.seed.parent(), Some(source));
        assert_eq!(
            engine.consume_suggestion(picked.id).err(),
            Some(EngineError::UnknownSuggestion(picked.id))
        );
    }

    #[tokio::test]
    async fn screen_rects_are_converted_to_world() {
        let engine = engine(Scripted::default());
        engine.zoom(1.0, Point::ORIGIN);
        engine.pan(Vec2::new(100.0, 0.0));
        let (id, _generation) =
            engine.create_from_screen_rect(Rect::new(100.0, 0.0, 700.0, 400.0));
        assert_eq!(engine.idea(id).unwrap().rect, Rect::new(0.0, 0.0, 300.0, 200.0));
    }

    #[tokio::test]
    async fn hit_test_in_screen_space() {
        let engine = engine(Scripted::default());
        let (id, generation) = engine.create_from_rectangle(rect());
        generation.await;
        let screen = engine.viewport().world_to_screen(Point::new(150.0, 100.0));
        assert_eq!(engine.idea_at_screen(screen), Some(id));
        assert!(engine.center_on(id));
    }
}
