//! Paper records and author trajectories.
//!
//! Records are deserialized once from the dataset and immutable afterwards.
//! The trajectory field has drifted across dataset revisions: older exports
//! carry a flat ordered sample sequence, newer ones a map from author name
//! to a sample sequence. Both are accepted on the wire, but normalization
//! happens here, at the boundary — everything downstream sees one shape,
//! an ordered map of named tracks.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::Deserialize;

/// One `(x, y, z)` sample in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample {
    /// The sample position as a vector, still in unit space.
    pub fn position(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Wire-side trajectory shapes. Flat sequences are a legacy input.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTrajectory {
    ByAuthor(BTreeMap<String, Vec<Sample>>),
    Flat(Vec<Sample>),
}

/// A per-author trajectory: ordered sample tracks keyed by author name.
///
/// A legacy flat sequence is stored as a single track under the empty
/// author name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawTrajectory")]
pub struct Trajectory {
    tracks: BTreeMap<String, Vec<Sample>>,
}

impl From<RawTrajectory> for Trajectory {
    fn from(raw: RawTrajectory) -> Self {
        let tracks = match raw {
            RawTrajectory::ByAuthor(tracks) => tracks,
            RawTrajectory::Flat(samples) if samples.is_empty() => BTreeMap::new(),
            RawTrajectory::Flat(samples) => {
                let mut tracks = BTreeMap::new();
                tracks.insert(String::new(), samples);
                tracks
            }
        };
        Self { tracks }
    }
}

impl Trajectory {
    /// Build a trajectory from named tracks. Mainly useful for tests.
    pub fn from_tracks<I, S>(tracks: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Sample>)>,
        S: Into<String>,
    {
        Self {
            tracks: tracks
                .into_iter()
                .map(|(name, samples)| (name.into(), samples))
                .collect(),
        }
    }

    /// All tracks, including those too short to draw.
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &[Sample])> {
        self.tracks
            .iter()
            .map(|(name, samples)| (name.as_str(), samples.as_slice()))
    }

    /// Tracks that can form a line: at least two samples.
    ///
    /// Single-sample tracks are skipped silently; a lone point cannot
    /// form a polyline and is not an error.
    pub fn polylines(&self) -> impl Iterator<Item = (&str, &[Sample])> {
        self.tracks().filter(|(_, samples)| samples.len() >= 2)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// One paper in the galaxy.
///
/// `x`, `y`, `z` are the embedding position in unit space; the shared
/// [`crate::WORLD_SCALE`] factor converts to world units everywhere.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperRecord {
    /// Stable identifier used for the remote citation lookup.
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Indices of related papers in the same catalog.
    #[serde(default)]
    pub neighbors: Vec<usize>,
    #[serde(default)]
    pub author_trajectory: Option<Trajectory>,
}

impl PaperRecord {
    /// The record position in unit space.
    pub fn unit_position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// The first `max_chars` characters of the abstract, with an ellipsis
    /// when text was actually dropped. Char-boundary safe; an absent
    /// abstract yields an empty string.
    pub fn abstract_preview(&self, max_chars: usize) -> String {
        if self.abstract_text.chars().count() <= max_chars {
            return self.abstract_text.clone();
        }
        let mut preview: String = self.abstract_text.chars().take(max_chars).collect();
        preview.push('\u{2026}');
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32, y: f32, z: f32) -> Sample {
        Sample { x, y, z }
    }

    #[test]
    fn test_flat_trajectory_normalizes_to_single_track() {
        let json = r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0}]"#;
        let trajectory: Trajectory = serde_json::from_str(json).unwrap();

        let tracks: Vec<_> = trajectory.tracks().collect();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].0, "");
        assert_eq!(tracks[0].1.len(), 2);
    }

    #[test]
    fn test_keyed_trajectory_keeps_author_names() {
        let json = r#"{"Alice":[{"x":0,"y":0,"z":0},{"x":1,"y":1,"z":1}],"Bob":[{"x":2,"y":2,"z":2}]}"#;
        let trajectory: Trajectory = serde_json::from_str(json).unwrap();

        let names: Vec<_> = trajectory.tracks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_polylines_skip_single_sample_tracks() {
        let trajectory = Trajectory::from_tracks([
            (
                "Alice",
                vec![
                    sample(0.0, 0.0, 0.0),
                    sample(0.1, 0.0, 0.0),
                    sample(0.2, 0.0, 0.0),
                ],
            ),
            ("Bob", vec![sample(0.5, 0.5, 0.5)]),
        ]);

        let polylines: Vec<_> = trajectory.polylines().collect();
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].0, "Alice");
        assert_eq!(polylines[0].1.len(), 3);
    }

    #[test]
    fn test_empty_flat_trajectory_is_empty() {
        let trajectory: Trajectory = serde_json::from_str("[]").unwrap();
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.polylines().count(), 0);
    }

    #[test]
    fn test_record_defaults() {
        let json = r#"{"id":"W1","title":"Attention Is All You Need","x":0.1,"y":0.2,"z":0.3}"#;
        let record: PaperRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.abstract_text, "");
        assert!(record.neighbors.is_empty());
        assert!(record.author_trajectory.is_none());
        assert_eq!(record.unit_position(), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_abstract_preview_truncates_with_ellipsis() {
        let record = PaperRecord {
            id: "W1".into(),
            title: "t".into(),
            abstract_text: "a".repeat(250),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            neighbors: Vec::new(),
            author_trajectory: None,
        };

        let preview = record.abstract_preview(200);
        assert_eq!(preview.chars().count(), 201);
        assert!(preview.ends_with('\u{2026}'));
    }

    #[test]
    fn test_abstract_preview_short_text_untouched() {
        let record = PaperRecord {
            id: "W1".into(),
            title: "t".into(),
            abstract_text: "short abstract".into(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            neighbors: Vec::new(),
            author_trajectory: None,
        };

        assert_eq!(record.abstract_preview(200), "short abstract");
    }

    #[test]
    fn test_abstract_preview_multibyte_boundary() {
        let record = PaperRecord {
            id: "W1".into(),
            title: "t".into(),
            abstract_text: "é".repeat(10),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            neighbors: Vec::new(),
            author_trajectory: None,
        };

        let preview = record.abstract_preview(5);
        assert_eq!(preview.chars().count(), 6);
    }
}
