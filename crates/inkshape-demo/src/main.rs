//! Replays a canned drawing session and logs what the renderer would receive.
//!
//! Usage: `inkshape-demo [config.json]`. Set `RUST_LOG=debug` for scheduler
//! detail.

use inkshape_core::{
    AnalysisOutcome, DrawingKind, InkDrawing, InkSession, RecognizedElement, SceneEvent,
    ScriptedAnalyzer, SessionConfig, Stroke,
};
use kurbo::{Point, Rect};
use std::time::{Duration, Instant};

fn load_config() -> SessionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SessionConfig {
            seed: Some(7),
            ..SessionConfig::default()
        };
    };
    let config = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| SessionConfig::from_json(&json).map_err(|e| e.to_string()));
    match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn rectangle_outcome() -> AnalysisOutcome {
    let corners = vec![
        Point::new(100.0, 100.0),
        Point::new(300.0, 100.0),
        Point::new(300.0, 200.0),
        Point::new(100.0, 200.0),
    ];
    AnalysisOutcome::updated(vec![RecognizedElement::Drawing(InkDrawing {
        kind: DrawingKind::Rectangle,
        points: corners,
        bounding_rect: Rect::new(100.0, 100.0, 300.0, 200.0),
        center: Point::new(200.0, 150.0),
    })])
}

fn ellipse_outcome() -> AnalysisOutcome {
    AnalysisOutcome::updated(vec![RecognizedElement::Drawing(InkDrawing {
        kind: DrawingKind::Ellipse,
        points: vec![
            Point::new(400.0, 300.0),
            Point::new(470.0, 260.0),
            Point::new(540.0, 370.0),
            Point::new(470.0, 410.0),
        ],
        bounding_rect: Rect::new(400.0, 260.0, 540.0, 410.0),
        center: Point::new(470.0, 335.0),
    })])
}

fn handwriting_outcome() -> AnalysisOutcome {
    AnalysisOutcome::updated(vec![RecognizedElement::Other {
        kind: "InkWord".to_string(),
    }])
}

fn line(id: u64, from: Point, to: Point) -> Stroke {
    Stroke::new(id, vec![from, from.midpoint(to), to])
}

fn log_events(session: &mut InkSession<ScriptedAnalyzer>) {
    for event in session.drain_events() {
        match &event {
            SceneEvent::ShapeRotationUpdated { .. } => log::debug!("{:?}", event),
            _ => match serde_json::to_string(&event) {
                Ok(json) => log::info!("{}", json),
                Err(e) => log::error!("Failed to serialize event: {}", e),
            },
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting InkShape demo");

    let config = load_config();
    let debounce = config.debounce();

    let mut analyzer = ScriptedAnalyzer::new();
    analyzer.push_outcome(rectangle_outcome());
    analyzer.push_outcome(ellipse_outcome());
    analyzer.push_outcome(handwriting_outcome());
    let mut session = InkSession::new(analyzer, config);

    let mut now = Instant::now();
    let step = Duration::from_millis(200);

    // A rectangle drawn as four separate strokes, one analysis.
    let corners = [
        Point::new(100.0, 100.0),
        Point::new(300.0, 100.0),
        Point::new(300.0, 200.0),
        Point::new(100.0, 200.0),
    ];
    for (i, from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        session.on_stroke_started();
        now += step;
        session.on_strokes_collected(vec![line(i as u64, *from, to)], now);
        pollster::block_on(session.tick(now));
    }
    now += debounce;
    pollster::block_on(session.tick(now));

    // Analyzer busy when the timer fires: retried, not dropped.
    session.on_stroke_started();
    session.on_strokes_collected(vec![line(10, Point::new(400.0, 300.0), Point::new(540.0, 370.0))], now);
    session.analyzer_mut().set_busy(true);
    now += debounce;
    pollster::block_on(session.tick(now));
    session.analyzer_mut().set_busy(false);
    now += debounce;
    pollster::block_on(session.tick(now));

    // Handwriting produces no shape.
    session.on_strokes_collected(vec![line(20, Point::new(50.0, 500.0), Point::new(90.0, 510.0))], now);
    now += debounce;
    pollster::block_on(session.tick(now));
    log_events(&mut session);

    session.toggle_animation(true);
    for _ in 0..30 {
        session.advance_animation(Duration::from_millis(16));
    }
    session.toggle_animation(false);

    session.toggle_drag_mode(true);
    if let Some(id) = session.pointer_down(1, Point::new(200.0, 150.0)) {
        log::info!("Dragging shape {}", id);
        session.pointer_move(1, Point::new(260.0, 190.0));
        session.pointer_up(1);
    }
    session.toggle_drag_mode(false);
    log_events(&mut session);

    log::info!("{} shapes on canvas", session.scene().len());
    session.clear_canvas();
    log_events(&mut session);
}
