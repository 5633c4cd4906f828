#![allow(clippy::float_cmp)]

use super::*;
use crate::analysis::{ChannelSink, RecordingSink};

const SCRIPT: &str = r#"{
    "image": { "scan_height": 16, "scan_width": 16, "image_height": 256, "image_width": 256 },
    "analysis_id": "6f1c2a8e-3b7d-4c1e-9a55-0d2f4e6b8c10",
    "events": [
        { "type": "drag_start", "handle": "disk_center" },
        { "type": "drag_move", "x": 100, "y": 110 },
        { "type": "drag_end" },
        { "type": "wait", "ms": 300 },
        { "type": "drag_start", "handle": "disk_radius" },
        { "type": "drag_move", "x": 70, "y": 0 },
        { "type": "drag_move", "x": 60, "y": 0 },
        { "type": "drag_end" },
        { "type": "wait", "ms": 300 },
        { "type": "apply" }
    ]
}"#;

fn config() -> SessionConfig {
    SessionConfig::new(100, 8).unwrap()
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn parses_events() {
    let script = Script::from_json(SCRIPT).unwrap();
    assert_eq!(script.events.len(), 10);
    assert_eq!(script.events[0], Event::DragStart { handle: HandleKind::DiskCenter });
    assert_eq!(script.events[1], Event::DragMove { x: 100.0, y: 110.0 });
    assert_eq!(script.events[3], Event::Wait { ms: 300 });
    assert_eq!(script.events[9], Event::Apply);
    assert!(script.analysis_id.is_some());
}

#[test]
fn analysis_id_optional() {
    let raw = r#"{"image":{"scan_height":1,"scan_width":1,"image_height":8,"image_width":8},"events":[]}"#;
    let script = Script::from_json(raw).unwrap();
    assert_eq!(script.analysis_id, None);
}

#[test]
fn rejects_zero_dimension_image() {
    let raw = r#"{"image":{"scan_height":1,"scan_width":1,"image_height":0,"image_width":8},"events":[]}"#;
    assert!(matches!(Script::from_json(raw), Err(ReplayError::Image(_))));
}

#[test]
fn rejects_unknown_event() {
    let raw = r#"{"image":{"scan_height":1,"scan_width":1,"image_height":8,"image_width":8},"events":[{"type":"rotate"}]}"#;
    assert!(matches!(Script::from_json(raw), Err(ReplayError::Json(_))));
}

#[test]
fn from_reader_reads_all() {
    let script = Script::from_reader(SCRIPT.as_bytes()).unwrap();
    assert_eq!(script.image.image_width, 256);
}

// =============================================================================
// replay
// =============================================================================

#[tokio::test(start_paused = true)]
async fn replay_applies_committed_parameters() {
    let script = Script::from_json(SCRIPT).unwrap();
    let sink = RecordingSink::new();

    let outcome = replay(&script, &config(), Arc::new(sink.clone())).await.unwrap();

    assert_eq!(outcome.applied.len(), 1);
    let params = outcome.applied[0];
    assert_eq!(params.real_centerx, 100.0);
    assert_eq!(params.real_centery, 110.0);
    assert_eq!(params.real_rad, 40.0);
    assert_eq!(params.rad_in, 64.0);
    assert_eq!(params.rad_out, 128.0);

    let runs = sink.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].job_slot, 2);
    assert_eq!(Some(runs[0].analysis_id), script.analysis_id);
    // Center commit + one collapsed radius commit.
    assert_eq!(outcome.redraws, 2);
}

#[tokio::test(start_paused = true)]
async fn replay_settles_trailing_updates() {
    let raw = r#"{
        "image": { "scan_height": 4, "scan_width": 4, "image_height": 256, "image_width": 256 },
        "events": [
            { "type": "drag_start", "handle": "ring_inner" },
            { "type": "drag_move", "x": -12, "y": 128 },
            { "type": "drag_end" }
        ]
    }"#;
    let script = Script::from_json(raw).unwrap();

    let outcome = replay(&script, &config(), Arc::new(RecordingSink::new())).await.unwrap();

    assert_eq!(outcome.shapes.ring.rad_in, 128.0);
    assert!(outcome.applied.is_empty());
}

#[tokio::test(start_paused = true)]
async fn replay_teardown_discards_pending() {
    let raw = r#"{
        "image": { "scan_height": 4, "scan_width": 4, "image_height": 256, "image_width": 256 },
        "events": [
            { "type": "drag_start", "handle": "disk_radius" },
            { "type": "drag_move", "x": 98, "y": 128 },
            { "type": "teardown" },
            { "type": "wait", "ms": 500 },
            { "type": "apply" }
        ]
    }"#;
    let script = Script::from_json(raw).unwrap();
    let sink = RecordingSink::new();

    let outcome = replay(&script, &config(), Arc::new(sink.clone())).await.unwrap();

    assert_eq!(outcome.shapes.disk.radius, 64.0);
    assert_eq!(outcome.redraws, 0);
    assert!(outcome.applied.is_empty());
    assert!(sink.runs().is_empty());
}

#[tokio::test]
async fn back_to_back_applies_reach_a_small_queue() {
    let raw = r#"{
        "image": { "scan_height": 4, "scan_width": 4, "image_height": 64, "image_width": 64 },
        "events": [ { "type": "apply" }, { "type": "apply" }, { "type": "apply" } ]
    }"#;
    let script = Script::from_json(raw).unwrap();
    let (sink, mut rx) = ChannelSink::new(1);
    let drain = tokio::spawn(async move {
        let mut delivered = 0_usize;
        while rx.recv().await.is_some() {
            delivered += 1;
        }
        delivered
    });

    let outcome = replay(&script, &SessionConfig::new(100, 1).unwrap(), Arc::new(sink)).await.unwrap();

    assert_eq!(outcome.applied.len(), 3);
    assert_eq!(drain.await.unwrap(), 3);
}
