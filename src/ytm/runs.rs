//! Text runs
//!
//! YouTube Music renders every text cell as a list of `runs`, each a
//! fragment of text with an optional navigation endpoint:
//!
//! "Daft Punk", " • ", "Discovery", " • ", "5:20"
//!
//! Secondary lines pack several fields into one run list joined by a
//! bullet separator, so most field extraction starts by splitting here.

use crate::ytm::models::{ArtistRef, NavigationEndpoint};
use serde_json::Value;

/// Separator glyph between fields of a secondary line.
pub const SEPARATOR: &str = "•";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Run {
    fn from_json(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        // A run without text still holds its position in the line.
        let text = obj
            .get("text")
            .and_then(|x| x.as_str())
            .unwrap_or_default()
            .to_string();
        let navigation_endpoint = obj
            .get("navigationEndpoint")
            .and_then(NavigationEndpoint::from_json);
        Some(Self {
            text,
            navigation_endpoint,
        })
    }

    pub fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint.as_ref()?.browse_id()
    }

    /// The run read as an artist reference: its text plus the browse id, if linked.
    pub fn to_artist(&self) -> ArtistRef {
        ArtistRef {
            name: self.text.clone(),
            id: self.browse_id().map(str::to_string),
        }
    }
}

/// Reads `text.runs` of a node. Missing or malformed runs give an empty list.
pub fn runs(node: &Value) -> Vec<Run> {
    node.pointer("/text/runs")
        .and_then(|x| x.as_array())
        .map(|runs| runs.iter().filter_map(Run::from_json).collect())
        .unwrap_or_default()
}

/// Splits runs into groups at every separator run, dropping the separators.
///
/// `n` separators always give `n + 1` groups; groups may be empty.
pub fn split_by_separator(runs: &[Run], separator: &str) -> Vec<Vec<Run>> {
    let separator = separator.trim();
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for run in runs {
        if run.text.trim() == separator {
            groups.push(std::mem::take(&mut current));
        } else {
            current.push(run.clone());
        }
    }
    groups.push(current);
    groups
}

/// Elements at indices 1, 3, 5, ... of the input.
pub fn odd_elements(runs: &[Run]) -> Vec<Run> {
    runs.iter().skip(1).step_by(2).cloned().collect()
}
