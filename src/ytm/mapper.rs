use crate::config::ParserConfig;
use crate::ytm::builders;
use crate::ytm::classify::{self, ItemKind};
use crate::ytm::extract;
use crate::ytm::models::{Page, YtItem};
use serde_json::Value;

pub const RENDERER_KEY: &str = "musicResponsiveListItemRenderer";

/// Shelves whose `contents` list renderer nodes.
const SHELF_KEYS: [&str; 3] = [
    "musicShelfRenderer",
    "musicPlaylistShelfRenderer",
    "musicShelfContinuation",
];

/// Maps renderer nodes to items. Holds no state beyond its parser settings,
/// so one mapper can be shared across pages and threads.
#[derive(Debug, Clone)]
pub struct Mapper {
    separator: String,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl Mapper {
    pub fn new(cfg: &ParserConfig) -> Self {
        Self {
            separator: cfg.separator.clone(),
        }
    }

    /// Maps one renderer node, bare or still wrapped in its renderer key.
    pub fn map_node(&self, node: &Value) -> Option<YtItem> {
        let node = node.get(RENDERER_KEY).unwrap_or(node);

        let kind = classify::classify(node);
        if kind == ItemKind::Unknown {
            tracing::debug!("dropping unclassified renderer");
            return None;
        }

        // Artists need no secondary line; the other builders fail on the group they read.
        let groups = extract::secondary_line_groups(node, &self.separator).unwrap_or_default();

        let item = match kind {
            ItemKind::Song => builders::build_song(node, &groups).map(YtItem::Song),
            ItemKind::Artist => builders::build_artist(node, &groups).map(YtItem::Artist),
            ItemKind::Album => builders::build_album(node, &groups).map(YtItem::Album),
            ItemKind::Playlist => builders::build_playlist(node, &groups).map(YtItem::Playlist),
            ItemKind::Unknown => None,
        };
        if item.is_none() {
            tracing::debug!(?kind, "dropping renderer with missing required field");
        }
        item
    }

    /// Maps every node in order. Nodes that fail to map are skipped; the
    /// continuation token is passed through untouched.
    pub fn map_page<'a, I>(&self, nodes: I, continuation: Option<String>) -> Page
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut seen = 0usize;
        let items: Vec<YtItem> = nodes
            .into_iter()
            .inspect(|_| seen += 1)
            .filter_map(|n| self.map_node(n))
            .collect();
        tracing::debug!(
            nodes = seen,
            items = items.len(),
            continuation = continuation.is_some(),
            "mapped page"
        );
        Page {
            items,
            continuation,
        }
    }

    /// Maps a whole search, browse, playlist or continuation response.
    pub fn map_response(&self, response: &Value) -> Page {
        let nodes = shelf_renderers(response);
        self.map_page(nodes, continuation_token(response))
    }
}

/// Renderer nodes listed by every shelf in the response, in document order.
pub fn shelf_renderers(v: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    scan_shelves(v, &mut out);
    out
}

fn scan_shelves<'a>(v: &'a Value, out: &mut Vec<&'a Value>) {
    match v {
        Value::Array(a) => {
            for x in a {
                scan_shelves(x, out);
            }
        }
        Value::Object(o) => {
            for (key, x) in o {
                if SHELF_KEYS.contains(&key.as_str()) {
                    let contents = x.get("contents").and_then(|c| c.as_array());
                    out.extend(
                        contents
                            .into_iter()
                            .flatten()
                            .filter_map(|c| c.get(RENDERER_KEY)),
                    );
                }
                scan_shelves(x, out);
            }
        }
        _ => {}
    }
}

/// First continuation token in the response.
pub fn continuation_token(v: &Value) -> Option<String> {
    // Continuation token can be found in various places:
    // - ...sectionListRenderer.continuations[0].nextContinuationData.continuation
    // - continuationContents.musicShelfContinuation.continuations[0].nextContinuationData.continuation
    // - ...continuationItemRenderer.continuationEndpoint.continuationCommand.token
    if let Some(token) = v
        .pointer("/nextContinuationData/continuation")
        .or_else(|| v.pointer("/continuationEndpoint/continuationCommand/token"))
        .and_then(|c| c.as_str())
    {
        return Some(token.to_string());
    }
    match v {
        Value::Array(a) => a.iter().find_map(continuation_token),
        Value::Object(o) => o.values().find_map(continuation_token),
        _ => None,
    }
}
