//! Line-oriented JSON codec for the snapshot log.
//!
//! One self-describing record per line, tagged by `type`. Readers ignore
//! lines that are not keyframes, so other record kinds (the header, or
//! future additions) are forward-compatible. Inside a valid keyframe line
//! a malformed entity object is skipped and loading continues; a keyframe
//! line with a malformed timestamp is dropped whole.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use barrage_core::kind::RenderType;

use crate::keyframe::{EntityRecord, Keyframe, DEFAULT_COLOR};

pub const HEADER_TYPE: &str = "header";
pub const KEYFRAME_TYPE: &str = "keyframe";

#[derive(Serialize)]
struct HeaderLine<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    width: f32,
    height: f32,
}

#[derive(Serialize)]
struct KeyframeLine<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    t: f32,
    entities: &'a [EntityRecord],
}

/// Encode the header/metadata line written once at recording start.
pub fn encode_header(width: f32, height: f32) -> String {
    serde_json::to_string(&HeaderLine {
        record_type: HEADER_TYPE,
        width,
        height,
    })
    .expect("header line serialization cannot fail")
}

/// Encode one keyframe as a single log line.
pub fn encode_keyframe(keyframe: &Keyframe) -> String {
    serde_json::to_string(&KeyframeLine {
        record_type: KEYFRAME_TYPE,
        t: keyframe.t,
        entities: &keyframe.entities,
    })
    .expect("keyframe line serialization cannot fail")
}

/// Read every keyframe in a log, in file order. Non-keyframe and
/// unparseable lines are skipped; only opening the file can fail.
pub fn read_keyframes(path: &Path) -> io::Result<Vec<Keyframe>> {
    let file = File::open(path)?;
    let mut keyframes = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line?;
        if let Some(keyframe) = decode_keyframe_line(&line) {
            keyframes.push(keyframe);
        }
    }
    Ok(keyframes)
}

/// Decode one log line; `None` for anything that is not a well-timed
/// keyframe record.
pub fn decode_keyframe_line(line: &str) -> Option<Keyframe> {
    let value: Value = serde_json::from_str(line).ok()?;
    if value.get("type").and_then(Value::as_str) != Some(KEYFRAME_TYPE) {
        return None;
    }

    let Some(t) = value.get("t").and_then(Value::as_f64) else {
        tracing::warn!("keyframe line with malformed timestamp skipped");
        return None;
    };

    let mut keyframe = Keyframe {
        t: t as f32,
        entities: Vec::new(),
    };

    if let Some(entries) = value.get("entities").and_then(Value::as_array) {
        for entry in entries {
            match decode_entity(entry) {
                Some(record) => keyframe.entities.push(record),
                None => tracing::warn!("malformed entity record skipped"),
            }
        }
    }

    keyframe.normalize();
    Some(keyframe)
}

/// Decode one entity object. Position is required; everything else has a
/// lenient default.
fn decode_entity(value: &Value) -> Option<EntityRecord> {
    let x = value.get("x").and_then(Value::as_f64)? as f32;
    let y = value.get("y").and_then(Value::as_f64)? as f32;

    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("Entity")
        .to_owned();
    let uid = value
        .get("uid")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let rt = value
        .get("rt")
        .and_then(Value::as_str)
        .map(RenderType::from_tag)
        .unwrap_or_default();
    let w = value.get("w").and_then(Value::as_f64).unwrap_or(10.0) as f32;
    let h = value.get("h").and_then(Value::as_f64).unwrap_or(10.0) as f32;

    Some(EntityRecord {
        id,
        uid,
        x,
        y,
        rt,
        w,
        h,
        color: decode_color(value.get("color")),
    })
}

/// RGBA array with at least three components; alpha defaults to opaque,
/// anything else falls back to the default color.
fn decode_color(value: Option<&Value>) -> [f32; 4] {
    let Some(parts) = value.and_then(Value::as_array) else {
        return DEFAULT_COLOR;
    };
    let mut channels = parts.iter().filter_map(Value::as_f64).map(|c| c as f32);
    match (channels.next(), channels.next(), channels.next()) {
        (Some(r), Some(g), Some(b)) => [r, g, b, channels.next().unwrap_or(1.0)],
        _ => DEFAULT_COLOR,
    }
}
