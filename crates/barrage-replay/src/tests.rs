//! Tests for the recorder, the log codec, and the replay engine.

use std::path::{Path, PathBuf};

use hecs::World;
use tempfile::TempDir;

use barrage_core::components::{Active, StableId};
use barrage_core::kind::{EntityKind, RenderType};
use barrage_core::types::Position;

use crate::codec;
use crate::error::ReplayError;
use crate::keyframe::{EntityRecord, Keyframe, DEFAULT_COLOR};
use crate::recorder::{Recorder, RecorderConfig};
use crate::replay::{ReplayEngine, ReplayState};
use crate::storage;

// ---- Helpers ----

fn record(uid: Option<&str>, x: f32, y: f32) -> EntityRecord {
    EntityRecord {
        id: "Enemy".to_owned(),
        uid: uid.map(str::to_owned),
        x,
        y,
        rt: RenderType::Rectangle,
        w: 10.0,
        h: 10.0,
        color: DEFAULT_COLOR,
    }
}

fn keyframe(t: f32, entities: Vec<EntityRecord>) -> Keyframe {
    Keyframe { t, entities }
}

/// Write a complete log (header + keyframes) into a fresh temp dir. The
/// directory handle keeps the file alive for the test's duration.
fn write_log(keyframes: &[Keyframe]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session_test.jsonl");
    let mut contents = codec::encode_header(800.0, 600.0);
    contents.push('\n');
    for kf in keyframes {
        contents.push_str(&codec::encode_keyframe(kf));
        contents.push('\n');
    }
    std::fs::write(&path, contents).expect("write log");
    (dir, path)
}

fn entity_x(engine: &ReplayEngine, key: &str) -> f32 {
    engine
        .current_entities()
        .into_iter()
        .find(|(k, _, _)| k == key)
        .map(|(_, pos, _)| pos.x)
        .unwrap_or_else(|| panic!("no visual with key {key}"))
}

// ---- Recorder ----

#[test]
fn test_recorder_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rec.jsonl");

    let mut world = World::new();
    world.spawn((
        EntityKind::Player,
        Position::new(400.0, 300.0),
        Active::default(),
        StableId(0),
    ));
    world.spawn((
        EntityKind::Enemy,
        Position::new(100.0, 100.0),
        Active::default(),
        StableId(1),
    ));

    let mut config = RecorderConfig::new(&path);
    config.sample_interval = 0.2;
    let mut recorder = Recorder::new(config);
    recorder.start(800.0, 600.0).expect("start");
    assert!(recorder.is_recording());

    // First sample is due immediately; the next lands one interval later.
    recorder.sample(&world, 0.0).expect("sample");
    for _ in 0..4 {
        recorder.sample(&world, 0.05).expect("sample");
    }
    recorder.stop();
    assert!(!recorder.is_recording());

    let frames = codec::read_keyframes(&path).expect("read");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].t, 0.0);
    assert!((frames[1].t - 0.2).abs() < 1e-6);
    assert!(frames[1].t >= frames[0].t);

    // Entities come back sorted by uid, with per-kind default shapes.
    assert_eq!(frames[0].entities.len(), 2);
    assert!(frames[0].all_uids());
    let player = &frames[0].entities[0];
    assert_eq!(player.uid.as_deref(), Some("e000000"));
    assert_eq!(player.id, "Player");
    assert_eq!(player.rt, RenderType::Custom);
    assert_eq!(player.w, 16.0);
    assert_eq!(frames[0].entities[1].id, "Enemy");
}

#[test]
fn test_recorder_skips_inactive_entities() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rec.jsonl");

    let mut world = World::new();
    world.spawn((
        EntityKind::Enemy,
        Position::new(10.0, 10.0),
        Active::default(),
        StableId(0),
    ));
    let dead = Active::default();
    dead.destroy();
    world.spawn((EntityKind::Enemy, Position::new(20.0, 20.0), dead, StableId(1)));

    let mut recorder = Recorder::new(RecorderConfig::new(&path));
    recorder.start(800.0, 600.0).expect("start");
    recorder.sample(&world, 0.0).expect("sample");
    recorder.stop();

    let frames = codec::read_keyframes(&path).expect("read");
    assert_eq!(frames[0].entities.len(), 1);
    assert_eq!(frames[0].entities[0].uid.as_deref(), Some("e000000"));
}

#[test]
fn test_recorder_stopped_is_noop() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rec.jsonl");
    let world = World::new();

    let mut recorder = Recorder::new(RecorderConfig::new(&path));
    recorder.sample(&world, 1.0).expect("sample while stopped");
    assert!(!path.exists());
    recorder.stop();
}

#[test]
fn test_recorder_start_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rec.jsonl");

    let mut recorder = Recorder::new(RecorderConfig::new(&path));
    recorder.start(800.0, 600.0).expect("start");
    recorder.start(800.0, 600.0).expect("second start");
    recorder.stop();

    let contents = std::fs::read_to_string(&path).expect("read");
    assert_eq!(contents.lines().count(), 1, "exactly one header line");
}

// ---- Codec ----

#[test]
fn test_reader_skips_foreign_and_malformed_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mixed.jsonl");
    let contents = [
        codec::encode_header(800.0, 600.0),
        "this is not json".to_owned(),
        r#"{"type":"note","text":"ignored"}"#.to_owned(),
        r#"{"type":"keyframe","entities":[]}"#.to_owned(),
        codec::encode_keyframe(&keyframe(1.0, vec![record(None, 5.0, 5.0)])),
    ]
    .join("\n");
    std::fs::write(&path, contents).expect("write");

    let frames = codec::read_keyframes(&path).expect("read");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].t, 1.0);
}

#[test]
fn test_malformed_entity_is_skipped() {
    let line = r#"{"type":"keyframe","t":0.5,"entities":[
        {"id":"Enemy","x":1.0,"y":2.0},
        {"id":"Broken","x":"oops","y":2.0},
        {"id":"NoY","x":3.0}
    ]}"#
    .replace('\n', "");
    let frame = codec::decode_keyframe_line(&line).expect("keyframe");
    assert_eq!(frame.entities.len(), 1);
    assert_eq!(frame.entities[0].x, 1.0);
}

#[test]
fn test_entity_decode_defaults() {
    let line = r#"{"type":"keyframe","t":0.0,"entities":[{"x":1.0,"y":2.0,"color":[0.1,0.2,0.3]}]}"#;
    let frame = codec::decode_keyframe_line(line).expect("keyframe");
    let entity = &frame.entities[0];
    assert_eq!(entity.id, "Entity");
    assert_eq!(entity.uid, None);
    assert_eq!(entity.rt, RenderType::Rectangle);
    assert_eq!(entity.w, 10.0);
    assert_eq!(entity.color, [0.1, 0.2, 0.3, 1.0]);

    let line = r#"{"type":"keyframe","t":0.0,"entities":[{"x":1.0,"y":2.0,"color":[0.5]}]}"#;
    let frame = codec::decode_keyframe_line(line).expect("keyframe");
    assert_eq!(frame.entities[0].color, DEFAULT_COLOR);
}

#[test]
fn test_stable_key_fallback() {
    let with_uid = record(Some("e000007"), 0.0, 0.0);
    assert_eq!(with_uid.stable_key(3), "e000007");
    let without = record(None, 0.0, 0.0);
    assert_eq!(without.stable_key(3), "Enemy@idx3");
}

#[test]
fn test_normalize_sorts_by_uid() {
    let mut frame = keyframe(
        0.0,
        vec![
            record(Some("e000002"), 0.0, 0.0),
            record(Some("e000000"), 1.0, 0.0),
            record(Some("e000001"), 2.0, 0.0),
        ],
    );
    frame.normalize();
    let uids: Vec<_> = frame.entities.iter().filter_map(|e| e.uid.as_deref()).collect();
    assert_eq!(uids, vec!["e000000", "e000001", "e000002"]);
}

// ---- Replay engine ----

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = ReplayEngine::new();
    let err = engine
        .load(&dir.path().join("absent.jsonl"))
        .expect_err("missing file");
    assert!(matches!(err, ReplayError::Io(_)));
    assert_eq!(engine.state(), ReplayState::FileBrowsing);
}

#[test]
fn test_load_empty_log_stays_browsing() {
    let (_dir, path) = write_log(&[]);
    let mut engine = ReplayEngine::new();
    assert_eq!(engine.load(&path).expect("load"), 0);
    assert_eq!(engine.state(), ReplayState::FileBrowsing);
    assert!(engine.current_entities().is_empty());
    engine.tick(1.0);
    assert_eq!(engine.clock(), 0.0);
}

#[test]
fn test_keyframes_sorted_on_load() {
    let (_dir, path) = write_log(&[
        keyframe(1.0, vec![record(Some("e000000"), 10.0, 0.0)]),
        keyframe(0.0, vec![record(Some("e000000"), 0.0, 0.0)]),
    ]);
    let mut engine = ReplayEngine::new();
    engine.load(&path).expect("load");
    assert_eq!(engine.keyframes()[0].t, 0.0);
    assert_eq!(engine.keyframes()[1].t, 1.0);
    // The visual set reflects the earliest keyframe.
    assert_eq!(entity_x(&engine, "e000000"), 0.0);
}

#[test]
fn test_interpolation_midpoint_and_endpoints() {
    let (_dir, path) = write_log(&[
        keyframe(0.0, vec![record(Some("e000000"), 0.0, 0.0)]),
        keyframe(1.0, vec![record(Some("e000000"), 10.0, 0.0)]),
    ]);
    let mut engine = ReplayEngine::new();
    assert_eq!(engine.load(&path).expect("load"), 2);
    assert_eq!(engine.state(), ReplayState::Loaded);

    // u = 0 reproduces frame A exactly.
    engine.tick(0.0);
    assert_eq!(entity_x(&engine, "e000000"), 0.0);
    assert_eq!(engine.state(), ReplayState::Playing);

    engine.tick(0.5);
    assert_eq!(entity_x(&engine, "e000000"), 5.0);
    assert!((engine.progress() - 0.5).abs() < 1e-6);

    // The clock clamps at the last keyframe; u = 1 reproduces frame B.
    engine.tick(10.0);
    assert_eq!(engine.state(), ReplayState::Finished);
    assert_eq!(engine.clock(), 1.0);
    assert_eq!(entity_x(&engine, "e000000"), 10.0);

    // Ticking past the end is idempotent.
    engine.tick(1.0);
    assert_eq!(engine.state(), ReplayState::Finished);
    assert_eq!(entity_x(&engine, "e000000"), 10.0);
    assert_eq!(engine.progress(), 1.0);
}

#[test]
fn test_uid_spawn_and_despawn() {
    let (_dir, path) = write_log(&[
        keyframe(0.0, vec![record(Some("e000000"), 0.0, 0.0)]),
        keyframe(
            1.0,
            vec![
                record(Some("e000000"), 10.0, 0.0),
                record(Some("e000001"), 20.0, 20.0),
            ],
        ),
        keyframe(2.0, vec![record(Some("e000001"), 20.0, 20.0)]),
    ]);
    let mut engine = ReplayEngine::new();
    engine.load(&path).expect("load");
    assert_eq!(engine.current_entities().len(), 1);

    // Mid-span: the newcomer appears in place at its frame-B position.
    engine.tick(0.5);
    assert_eq!(engine.current_entities().len(), 2);
    assert_eq!(entity_x(&engine, "e000001"), 20.0);
    assert_eq!(entity_x(&engine, "e000000"), 5.0);

    // Past the second span: the departed entity is hidden, not popped in.
    engine.tick(1.0);
    let keys: Vec<String> = engine
        .current_entities()
        .into_iter()
        .map(|(k, _, _)| k)
        .collect();
    assert_eq!(keys, vec!["e000001".to_owned()]);
}

#[test]
fn test_index_fallback_grows_and_shrinks() {
    let frame_a: Vec<EntityRecord> = (0..3).map(|i| record(None, i as f32, 0.0)).collect();
    let frame_b: Vec<EntityRecord> = (0..5).map(|i| record(None, 10.0 + i as f32, 0.0)).collect();
    let frame_c: Vec<EntityRecord> = (0..2).map(|i| record(None, 20.0 + i as f32, 0.0)).collect();
    let (_dir, path) = write_log(&[
        keyframe(0.0, frame_a),
        keyframe(1.0, frame_b),
        keyframe(2.0, frame_c),
    ]);

    let mut engine = ReplayEngine::new();
    engine.load(&path).expect("load");
    assert_eq!(engine.current_entities().len(), 3);

    // Mid-span toward the larger frame: matched indices interpolate,
    // extras appear at their frame-B positions.
    engine.tick(0.5);
    assert_eq!(engine.current_entities().len(), 5);
    assert_eq!(entity_x(&engine, "Enemy@idx0"), 5.0);
    assert_eq!(entity_x(&engine, "ReplayObj#3"), 13.0);
    assert_eq!(entity_x(&engine, "ReplayObj#4"), 14.0);

    // Toward the smaller frame the tail is hidden.
    engine.tick(1.0);
    assert_eq!(engine.current_entities().len(), 2);
}

#[test]
fn test_single_keyframe_replay() {
    let (_dir, path) = write_log(&[keyframe(0.0, vec![record(Some("e000000"), 7.0, 8.0)])]);
    let mut engine = ReplayEngine::new();
    engine.load(&path).expect("load");
    engine.tick(0.5);
    assert_eq!(engine.state(), ReplayState::Finished);
    assert_eq!(engine.clock(), 0.0);
    assert_eq!(entity_x(&engine, "e000000"), 7.0);
}

// ---- Storage ----

#[test]
fn test_list_recordings_missing_dir_is_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(storage::list_recordings(&dir.path().join("nope")).is_empty());
}

#[test]
fn test_list_recordings_filters_and_sorts() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["b.jsonl", "a.jsonl", "notes.txt"] {
        std::fs::write(dir.path().join(name), "").expect("write");
    }
    let logs = storage::list_recordings(dir.path());
    let names: Vec<_> = logs
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["a.jsonl", "b.jsonl"]);
}

#[test]
fn test_session_path_shape() {
    let path = storage::session_path(Path::new("recordings"));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("file name");
    assert!(name.starts_with("session_"));
    assert!(name.ends_with(".jsonl"));
}
