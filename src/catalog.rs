use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Option lists offered by the form's dropdowns.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Catalog {
    pub exercises: Vec<String>,
    pub sets: Vec<String>,
    pub rest_minutes: Vec<String>,
    /// Preset name -> video link.
    pub videos: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Catalog {
            exercises: strings(&[
                "Bench Press",
                "Squat",
                "Deadlift",
                "Overhead Press",
                "Barbell Row",
                "Pull Up",
                "Bicep Curl",
                "Crunch",
            ]),
            sets: strings(&["3x8", "3x10", "3x12", "4x6", "4x10", "5x5"]),
            rest_minutes: strings(&["1", "1.5", "2", "3", "4"]),
            videos: [
                ("Bench Press", "http://example.com/bench-press"),
                ("Squat", "http://example.com/squat"),
                ("Crunch", "http://example.com/crunch"),
                ("Bicep Curl", "http://example.com/bicep-curl"),
            ]
            .into_iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect(),
        }
    }
}

impl Catalog {
    /// Parses catalog JSON, falling back to the built-in presets on error.
    pub fn from_json(json: &str) -> Catalog {
        match serde_json::from_str(json) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("catalog parsing error: {}", e);
                Catalog::default()
            }
        }
    }

    pub fn load(path: &Path) -> Catalog {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => {
                warn!(path = %path.display(), "failed to read catalog: {}", e);
                Catalog::default()
            }
        }
    }

    /// Video presets whose name matches `exercise_name`, ignoring case.
    ///
    /// A preset matches when either name contains the other, so "squ" and
    /// "Back Squat" both find "Squat". An empty name matches everything.
    pub fn video_options(&self, exercise_name: &str) -> Vec<(&str, &str)> {
        let needle = exercise_name.trim().to_lowercase();
        self.videos
            .iter()
            .filter(|(name, _)| {
                let name = name.to_lowercase();
                needle.is_empty() || name.contains(&needle) || needle.contains(&name)
            })
            .map(|(name, url)| (name.as_str(), url.as_str()))
            .collect()
    }

    /// Preset name for a stored link, used as the dropdown's label.
    pub fn video_label(&self, url: &str) -> Option<&str> {
        self.videos
            .iter()
            .find(|(_, u)| u.as_str() == url)
            .map(|(name, _)| name.as_str())
    }
}
