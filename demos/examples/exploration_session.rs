// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted exploration session.
//!
//! Drives the engine with a canned provider that answers after a short delay: create two
//! ideas concurrently, branch from a suggestion, regenerate, and remove an idea while it is
//! still loading.
//!
//! Run:
//! - `cargo run -p ideagraph_demos --example exploration_session`
//! - `RUST_LOG=ideagraph_engine=debug,ideagraph_store=debug` for per-stage events

use std::cell::Cell;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use ideagraph_engine::{
    AxisLabels, ContentProvider, Engine, EngineConfig, ExplorationContext, MainContent,
    MainContentRequest, ProviderError,
};
use ideagraph_geometry::SemanticPoint;
use ideagraph_store::term_spans;
use kurbo::{Point, Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[viewport]
screen_width = 1600.0
screen_height = 900.0

[suggestions]
max = 2
"#;

/// Provider that makes up text from its inputs.
#[derive(Debug, Default)]
struct Canned {
    calls: Cell<u32>,
}

impl Canned {
    async fn latency(&self) {
        self.calls.set(self.calls.get() + 1);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[async_trait(?Send)]
impl ContentProvider for Canned {
    async fn main_content(&self, req: MainContentRequest) -> Result<MainContent, ProviderError> {
        self.latency().await;
        let lean = if req.point.x < 0.0 { &req.labels.left } else { &req.labels.right };
        let subject = req.concept.as_deref().unwrap_or(&req.topic);
        Ok(MainContent {
            text: format!(
                "{subject}, seen from the {lean} side, after {} notes",
                req.history.len()
            ),
            bridge: req.concept.as_ref().map(|c| format!("which brings us to {c}")),
            terms: vec![subject.to_owned(), lean.clone()],
        })
    }

    async fn suggestions(&self, _topic: &str, text: &str) -> Result<Vec<String>, ProviderError> {
        self.latency().await;
        let words = text.split_whitespace().filter(|w| w.len() > 4);
        Ok(words.take(3).map(str::to_owned).collect())
    }

    async fn art(&self, _topic: &str, text: &str) -> Result<String, ProviderError> {
        self.latency().await;
        if text.contains("delta") {
            return Err(ProviderError::Request("illustrator unavailable".into()));
        }
        Ok("~~~ /\\/\\ ~~~".into())
    }

    async fn point_for_concept(&self, name: &str) -> Result<SemanticPoint, ProviderError> {
        self.latency().await;
        let h = name.bytes().fold(0_u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        Ok(SemanticPoint::new(
            f64::from(h % 200) / 100.0 - 1.0,
            f64::from(h / 200 % 200) / 100.0 - 1.0,
        ))
    }
}

fn print_ideas(engine: &Engine<Canned>) {
    for idea in engine.ideas() {
        let spans: Vec<_> = term_spans(&idea.text, &idea.terms)
            .into_iter()
            .map(|s| s.term)
            .collect();
        println!(
            "{} at {:?} v{:?}/{}: {:?} terms={spans:?} art={} error={:?}",
            idea.id,
            idea.rect.origin(),
            idea.current_version,
            idea.versions.len(),
            idea.text,
            idea.ascii_art.is_some(),
            idea.error,
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_toml_str(CONFIG)?;
    let labels = AxisLabels {
        left: "ecological".into(),
        right: "economic".into(),
        top: "historical".into(),
        bottom: "speculative".into(),
    };
    let context = ExplorationContext::new("rivers", labels);
    let engine = Engine::new(Canned::default(), context, config)?;

    // Two drags in quick succession; both generations run interleaved.
    let (a, gen_a) = engine.create_from_rectangle(Rect::new(-400.0, -100.0, -100.0, 100.0));
    let (b, gen_b) = engine.create_from_rectangle(Rect::new(-380.0, -80.0, -80.0, 120.0));
    let outcomes = join_all([gen_a, gen_b]).await;
    info!(?outcomes, "first two ideas done");
    print_ideas(&engine);

    // The suggestion set belongs to whichever idea published last.
    let suggestions = engine.suggestions();
    println!("suggestions: {:?}", suggestions.iter().map(|s| &s.text).collect::<Vec<_>>());
    if let Some(first) = suggestions.first() {
        let (branch, generation) = engine.consume_suggestion(first.id)?;
        println!("branch {branch}: {:?}", generation.await);
    }

    // A term click branches from `a`.
    let (delta, generation) = engine.create_from_concept("delta", Some(a));
    println!("term branch {delta}: {:?}", generation.await);
    println!("connectors: {}", engine.connectors().len());

    // Regenerate keeps the earlier version around.
    let outcome = engine.regenerate(b)?.await;
    println!("regenerate {b}: {outcome:?}");
    engine.switch_version(b, 0)?;

    // Removing an idea mid-generation discards the late results.
    let (doomed, generation) = engine.create_from_rectangle(Rect::new(600.0, 0.0, 900.0, 200.0));
    engine.remove(doomed);
    println!("removed while loading: {:?}", generation.await);

    engine.bring_to_front(a);
    engine.zoom(-0.25, Point::new(800.0, 450.0));
    print_ideas(&engine);
    println!(
        "{} provider calls, zoom {:.2}, {:?}",
        engine.provider().calls.get(),
        engine.viewport().zoom(),
        engine.counters(),
    );
    Ok(())
}
