//! Project persistence.
//!
//! The on-disk format is JSON: the project tree serialized directly, wrapped
//! in a versioned envelope. Files with no envelope are prototype-era
//! documents (camelCase keys, float seconds, string ids) and are converted
//! on load.

use lumina_core::{LuminaError, Result};
use serde::{Deserialize, Serialize};

use crate::project::Project;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned project file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version for migration.
    pub version: u32,
    /// The project data.
    pub project: Project,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl ProjectFile {
    /// Wrap a project for saving.
    pub fn new(project: Project) -> Self {
        Self {
            version: CURRENT_VERSION,
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| LuminaError::Serialization(format!("failed to serialize project: {e}")))
    }

    /// Deserialize from JSON bytes, converting prototype-era documents.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| LuminaError::Serialization(format!("invalid JSON: {e}")))?;

        let enveloped = match raw.get("version").and_then(|v| v.as_u64()) {
            Some(version) if version as u32 > CURRENT_VERSION => {
                return Err(LuminaError::Serialization(format!(
                    "project file version {version} is newer than supported version {CURRENT_VERSION}"
                )));
            }
            Some(_) => raw,
            // No envelope: the prototype wrote the project tree bare.
            None => legacy::convert(&raw)?,
        };

        serde_json::from_value(enveloped)
            .map_err(|e| LuminaError::Serialization(format!("failed to parse project: {e}")))
    }

    /// Save to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Conversion of prototype-era documents into the current schema.
///
/// The web prototype serialized its state tree directly: camelCase keys,
/// times as float seconds, fps as a bare number, ids as arbitrary strings,
/// media as a `src` URL string, and `isHidden`-style track flags. Conversion
/// renames and retypes every field, mints real ids, and keeps clip-to-track
/// references intact.
mod legacy {
    use std::collections::HashMap;

    use lumina_core::{LuminaError, RationalTime, Result};
    use serde_json::{json, Map, Value};
    use uuid::Uuid;

    use super::CURRENT_VERSION;

    pub(super) fn convert(doc: &Value) -> Result<Value> {
        let root = object(doc, "project")?;

        // Mint track ids up front so clips can be re-parented by legacy id.
        let mut track_ids: HashMap<String, Uuid> = HashMap::new();
        for track in array(root, "tracks")? {
            let legacy_id = string(object(track, "track")?, "id")?;
            track_ids.insert(legacy_id.to_string(), Uuid::new_v4());
        }

        let tracks = array(root, "tracks")?
            .iter()
            .map(|t| convert_track(object(t, "track")?, &track_ids))
            .collect::<Result<Vec<Value>>>()?;

        let project = json!({
            "id": Uuid::new_v4(),
            "name": string(root, "name")?,
            "width": integer(root, "width")?,
            "height": integer(root, "height")?,
            "fps": frame_rate(float(root, "fps")?),
            "duration": seconds(float(root, "duration")?)?,
            "tracks": tracks,
            "current_time": seconds(float_or(root, "currentTime", 0.0))?,
            "last_modified": float_or(root, "lastModified", 0.0) as u64,
        });

        Ok(json!({
            "version": CURRENT_VERSION,
            "project": project,
            "app_version": env!("CARGO_PKG_VERSION"),
        }))
    }

    fn convert_track(track: &Map<String, Value>, track_ids: &HashMap<String, Uuid>) -> Result<Value> {
        let legacy_id = string(track, "id")?;
        let id = track_ids[legacy_id];
        let clips = array(track, "clips")?
            .iter()
            .map(|c| convert_clip(object(c, "clip")?, track_ids))
            .collect::<Result<Vec<Value>>>()?;

        Ok(json!({
            "id": id,
            "name": string(track, "name")?,
            "kind": string(track, "type")?,
            "clips": clips,
            "hidden": flag(track, "isHidden"),
            "muted": flag(track, "isMuted"),
            "locked": flag(track, "isLocked"),
        }))
    }

    fn convert_clip(clip: &Map<String, Value>, track_ids: &HashMap<String, Uuid>) -> Result<Value> {
        let legacy_track = string(clip, "trackId")?;
        let track_id = track_ids.get(legacy_track).ok_or_else(|| {
            LuminaError::Serialization(format!(
                "clip references unknown track {legacy_track:?}"
            ))
        })?;

        // `src` was a bare URL; the prototype never recorded media length.
        let source = match clip.get("src").and_then(Value::as_str) {
            Some(url) => json!({ "url": url, "duration": null }),
            None => Value::Null,
        };

        let effects = match clip.get("effects").and_then(Value::as_array) {
            Some(list) => list
                .iter()
                .map(|e| convert_effect(object(e, "effect")?))
                .collect::<Result<Vec<Value>>>()?,
            None => Vec::new(),
        };

        Ok(json!({
            "id": Uuid::new_v4(),
            "track_id": track_id,
            "name": string(clip, "name")?,
            "kind": string(clip, "type")?,
            "start_time": seconds(float(clip, "startTime")?)?,
            "duration": seconds(float(clip, "duration")?)?,
            "source": source,
            "color": string(clip, "color")?,
            "trim_start": seconds(float_or(clip, "trimStart", 0.0))?,
            "trim_end": seconds(float_or(clip, "trimEnd", 0.0))?,
            "properties": convert_properties(clip.get("properties"))?,
            "effects": effects,
            "transition_in": convert_transition(clip.get("transitionIn"))?,
            "transition_out": convert_transition(clip.get("transitionOut"))?,
        }))
    }

    fn convert_properties(props: Option<&Value>) -> Result<Value> {
        let Some(props) = props.filter(|p| !p.is_null()) else {
            return Ok(json!({}));
        };
        let props = object(props, "properties")?;
        let mut out = Map::new();
        for (legacy, current) in [
            ("volume", "volume"),
            ("opacity", "opacity"),
            ("rotation", "rotation"),
            ("scale", "scale"),
            ("x", "x"),
            ("y", "y"),
            ("text", "text"),
            ("fontSize", "font_size"),
            ("fontFamily", "font_family"),
        ] {
            if let Some(value) = props.get(legacy) {
                out.insert(current.into(), value.clone());
            }
        }
        Ok(Value::Object(out))
    }

    fn convert_effect(effect: &Map<String, Value>) -> Result<Value> {
        Ok(json!({
            "kind": string(effect, "type")?,
            "amount": float(effect, "value")?,
        }))
    }

    fn convert_transition(transition: Option<&Value>) -> Result<Value> {
        let Some(transition) = transition.filter(|t| !t.is_null()) else {
            return Ok(Value::Null);
        };
        let transition = object(transition, "transition")?;
        Ok(json!({
            "kind": string(transition, "type")?,
            "duration": seconds(float(transition, "duration")?)?,
        }))
    }

    /// A float-seconds value rendered in the current time encoding.
    fn seconds(secs: f64) -> Result<Value> {
        serde_json::to_value(RationalTime::from_seconds_f64(secs))
            .map_err(|e| LuminaError::Serialization(e.to_string()))
    }

    /// A bare fps number as a rational rate. Fractional rates are taken to
    /// be NTSC (29.97 becomes 30000/1001).
    fn frame_rate(fps: f64) -> Value {
        if fps.fract() == 0.0 {
            json!({ "numerator": fps as u32, "denominator": 1 })
        } else {
            json!({ "numerator": (fps * 1001.0).round() as u32, "denominator": 1001 })
        }
    }

    // ── Field access ────────────────────────────────────────────

    fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
        value
            .as_object()
            .ok_or_else(|| LuminaError::Serialization(format!("{what} is not an object")))
    }

    fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>> {
        obj.get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| LuminaError::Serialization(format!("missing array field {key:?}")))
    }

    fn string<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
        obj.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| LuminaError::Serialization(format!("missing string field {key:?}")))
    }

    fn float(obj: &Map<String, Value>, key: &str) -> Result<f64> {
        obj.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| LuminaError::Serialization(format!("missing numeric field {key:?}")))
    }

    fn float_or(obj: &Map<String, Value>, key: &str, default: f64) -> f64 {
        obj.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    fn integer(obj: &Map<String, Value>, key: &str) -> Result<u64> {
        obj.get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| LuminaError::Serialization(format!("missing integer field {key:?}")))
    }

    fn flag(obj: &Map<String, Value>, key: &str) -> bool {
        obj.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}
