//! Landing Page Simulation
//!
//! Stages a typical marketing page and drives it through a scripted
//! session: scrolling the document, hovering a service card, clicking the
//! call-to-action, and running the content sequences. Logs what the engine
//! decides each node should look like along the way.
//!
//! Run with: cargo run -p limelight_motion --example landing_demo

use std::time::{Duration, Instant};

use anyhow::Result;
use limelight_core::{parse_markers, Marker, NodeId, Rect, Stage, StageEvent, StageNode, Viewport};
use limelight_motion::{Controller, Tuning};
use tracing::info;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Hosts usually tweak a couple of knobs and leave the rest stock
    let tuning = Tuning::from_toml_str(
        r#"
        [reveal]
        fade_duration_ms = 700.0

        [scroll]
        default_parallax_speed = 0.4
        "#,
    )?;

    let (stage, page) = build_page()?;
    let mut engine = Controller::with_tuning(stage, tuning);
    engine.register_all();
    if cfg!(debug_assertions) {
        engine.start_performance_monitoring();
    }

    let mut now = Instant::now();

    // ── content sequences kick off with the page ─────────────────────────
    engine.start_typewriter(page.tagline, "Ship pages that move.", now);
    engine.start_count_up(page.stat_users, 12000);
    engine.start_count_up(page.stat_teams, 340);

    // ── scroll down through the sections ─────────────────────────────────
    for target in [200.0, 600.0, 1200.0, 1900.0] {
        engine.handle_event(StageEvent::Scrolled { to: target }, now);
        for _ in 0..8 {
            now += FRAME;
            engine.frame(now);
        }
        info!(
            scroll = target,
            hero_opacity = ?engine.stage().style(page.hero).opacity,
            card_opacity = ?engine.stage().style(page.service_cards[0]).opacity,
            progress_pct = ?engine.stage().style(page.progress).width_pct,
            "scrolled"
        );
    }

    // ── hover the first service card long enough for the cascade ─────────
    engine.handle_event(
        StageEvent::PointerEntered {
            node: page.service_cards[0],
        },
        now,
    );
    for _ in 0..12 {
        now += FRAME;
        engine.frame(now);
    }
    info!(
        card = ?engine.stage().style(page.service_cards[0]).transform,
        title_color = ?engine.stage().style(page.service_title).color,
        last_feature = ?engine.stage().style(page.service_features[2]).transform,
        "service card hovered"
    );
    engine.handle_event(
        StageEvent::PointerLeft {
            node: page.service_cards[0],
        },
        now,
    );

    // ── click the call-to-action ─────────────────────────────────────────
    engine.handle_event(
        StageEvent::Clicked {
            node: page.cta,
            x: 160.0,
            y: 1955.0,
        },
        now,
    );
    now += FRAME;
    engine.frame(now);
    for (_, overlay) in engine.overlays().iter() {
        let sample = overlay.sample(now, engine.overlay_visual_duration_ms());
        info!(kind = ?overlay.kind, ?sample, "overlay live");
    }

    // ── let the counters and overlays run out ────────────────────────────
    for _ in 0..130 {
        now += FRAME;
        engine.frame(now);
    }
    info!(
        tagline = ?engine.stage().get(page.tagline).and_then(|n| n.text.as_deref()),
        users = ?engine.stage().get(page.stat_users).and_then(|n| n.text.as_deref()),
        teams = ?engine.stage().get(page.stat_teams).and_then(|n| n.text.as_deref()),
        overlays = engine.overlays().len(),
        "sequences settled"
    );

    // ── morph the logo mark and tear down ────────────────────────────────
    engine.morph_path(page.logo, "M12 2 L22 22 L2 22 Z");
    now += FRAME;
    engine.frame(now);
    info!(
        path = ?engine.stage().get(page.logo).and_then(|n| n.path_data.as_deref()),
        reduced_motion = engine.reduced_motion(),
        "logo morphed"
    );

    engine.destroy();
    now += FRAME;
    engine.frame(now);
    info!("session ended");
    Ok(())
}

/// Handles for the nodes the script pokes at
struct Page {
    hero: NodeId,
    tagline: NodeId,
    progress: NodeId,
    service_cards: Vec<NodeId>,
    service_title: NodeId,
    service_features: Vec<NodeId>,
    cta: NodeId,
    stat_users: NodeId,
    stat_teams: NodeId,
    logo: NodeId,
}

fn build_page() -> Result<(Stage, Page)> {
    let mut stage = Stage::new(Viewport::new(1280.0, 800.0));
    stage.set_content_height(3200.0);

    let progress = stage.insert(
        StageNode::new(Rect::new(0.0, 0.0, 1280.0, 4.0)).with_marker(Marker::ScrollProgress),
    );

    // Hero: parallax backdrop, fading headline, typed tagline
    stage.insert(StageNode::new(Rect::new(0.0, 0.0, 1280.0, 900.0)).with_parallax(0.3));
    let hero = stage.insert(
        StageNode::new(Rect::new(240.0, 980.0, 800.0, 120.0)).with_marker(Marker::FadeUp),
    );
    let tagline = stage.insert(StageNode::new(Rect::new(240.0, 1120.0, 800.0, 40.0)).with_text(""));
    let logo = stage.insert(
        StageNode::new(Rect::new(80.0, 40.0, 48.0, 48.0)).with_path_data("M2 12 A10 10 0 1 0 22 12"),
    );

    // Services: three cards sliding in from alternating sides, tagged with
    // the same token lists a markup-driven host would lift from metadata
    let mut service_cards = Vec::new();
    let mut service_title = None;
    let mut service_features = Vec::new();
    for (i, tokens) in [
        "service-card slide-left",
        "service-card slide-up",
        "service-card slide-right",
    ]
    .into_iter()
    .enumerate()
    {
        let x = 100.0 + i as f32 * 380.0;
        let card = stage.insert(
            StageNode::new(Rect::new(x, 1400.0, 340.0, 360.0))
                .with_markers(parse_markers(tokens)?),
        );
        stage.insert_child(
            card,
            StageNode::new(Rect::new(x + 140.0, 1420.0, 60.0, 60.0)).with_marker(Marker::ServiceIcon),
        );
        let title = stage.insert_child(
            card,
            StageNode::new(Rect::new(x + 20.0, 1500.0, 300.0, 30.0))
                .with_marker(Marker::ServiceTitle),
        );
        for f in 0..3 {
            let feature = stage.insert_child(
                card,
                StageNode::new(Rect::new(x + 20.0, 1560.0 + f as f32 * 40.0, 300.0, 30.0))
                    .with_marker(Marker::ServiceFeature),
            );
            if i == 0 {
                service_features.push(feature);
            }
        }
        if i == 0 {
            service_title = Some(title);
        }
        service_cards.push(card);
    }

    // Stats strip
    let stat_users = stage.insert(
        StageNode::new(Rect::new(300.0, 1900.0, 160.0, 60.0))
            .with_markers([Marker::FadeIn])
            .with_text("0"),
    );
    let stat_teams = stage.insert(
        StageNode::new(Rect::new(700.0, 1900.0, 160.0, 60.0))
            .with_markers([Marker::FadeIn])
            .with_text("0"),
    );

    // Call to action
    let cta = stage.insert(
        StageNode::new(Rect::new(140.0, 1940.0, 200.0, 56.0)).with_marker(Marker::Button),
    );

    let page = Page {
        hero,
        tagline,
        progress,
        service_cards,
        service_title: service_title.unwrap_or(hero),
        service_features,
        cta,
        stat_users,
        stat_teams,
        logo,
    };
    Ok((stage, page))
}
