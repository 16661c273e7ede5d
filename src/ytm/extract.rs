//! Field extractors over a `musicResponsiveListItemRenderer` node.
//!
//! Every extractor reads one value and gives `None` as soon as a hop in the
//! tree is missing.

use crate::ytm::models::WatchEndpoint;
use crate::ytm::runs::{self, Run};
use serde_json::Value;

pub const EXPLICIT_BADGE: &str = "MUSIC_EXPLICIT_BADGE";
pub const ICON_SHUFFLE: &str = "MUSIC_SHUFFLE";
pub const ICON_RADIO: &str = "MIX";
/// Prefix that turns a playlist id into its browse id.
pub const PLAYLIST_BROWSE_PREFIX: &str = "VL";

pub const PAGE_TYPE_ARTIST: &str = "MUSIC_PAGE_TYPE_ARTIST";
pub const PAGE_TYPE_ALBUM: &str = "MUSIC_PAGE_TYPE_ALBUM";
pub const PAGE_TYPE_AUDIOBOOK: &str = "MUSIC_PAGE_TYPE_AUDIOBOOK";
pub const PAGE_TYPE_PLAYLIST: &str = "MUSIC_PAGE_TYPE_PLAYLIST";

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Runs of the `index`-th flex column.
pub fn flex_column_runs(node: &Value, index: usize) -> Vec<Run> {
    node.get("flexColumns")
        .and_then(|c| c.get(index))
        .and_then(|c| c.get("musicResponsiveListItemFlexColumnRenderer"))
        .map(runs::runs)
        .unwrap_or_default()
}

pub fn primary_text(node: &Value) -> Option<String> {
    flex_column_runs(node, 0)
        .first()
        .and_then(|r| non_empty(&r.text))
}

/// Second flex column split at the separator. Fails when the column has no runs.
pub fn secondary_line_groups(node: &Value, separator: &str) -> Option<Vec<Vec<Run>>> {
    let runs = flex_column_runs(node, 1);
    if runs.is_empty() {
        return None;
    }
    Some(runs::split_by_separator(&runs, separator))
}

/// Last run of the second flex column, e.g. "42 songs".
pub fn song_count_text(node: &Value) -> Option<String> {
    flex_column_runs(node, 1)
        .last()
        .and_then(|r| non_empty(&r.text))
}

/// URL of the largest thumbnail. Ties and unsized entries go to the later one.
pub fn thumbnail_url(node: &Value) -> Option<String> {
    let thumbnails = node
        .pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails")?
        .as_array()?;
    let area = |t: &Value| {
        let dim = |k: &str| t.get(k).and_then(|x| x.as_u64()).unwrap_or(0);
        dim("width").saturating_mul(dim("height"))
    };
    thumbnails
        .iter()
        .filter(|t| t.get("url").and_then(|u| u.as_str()).is_some_and(|u| !u.is_empty()))
        .max_by_key(|t| area(*t))
        .and_then(|t| t.get("url"))
        .and_then(|u| u.as_str())
        .map(str::to_string)
}

/// Parse duration text like "3:45" or "1:23:45" into seconds
pub fn duration_seconds(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let num = |s: &str| -> Option<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };
    match parts.len() {
        2 => {
            // MM:SS
            let mins = num(parts[0])?;
            let secs = num(parts[1])?;
            mins.checked_mul(60)?.checked_add(secs)
        }
        3 => {
            // HH:MM:SS
            let hours = num(parts[0])?;
            let mins = num(parts[1])?;
            let secs = num(parts[2])?;
            hours
                .checked_mul(3600)?
                .checked_add(mins.checked_mul(60)?)?
                .checked_add(secs)
        }
        _ => None,
    }
}

pub fn year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Never fails: a missing badge list just means not explicit.
pub fn explicit_flag(node: &Value) -> bool {
    node.get("badges")
        .and_then(|b| b.as_array())
        .is_some_and(|badges| {
            badges.iter().any(|b| {
                b.pointer("/musicInlineBadgeRenderer/icon/iconType")
                    .and_then(|x| x.as_str())
                    == Some(EXPLICIT_BADGE)
            })
        })
}

fn menu_items(node: &Value) -> impl Iterator<Item = &Value> {
    node.pointer("/menu/menuRenderer/items")
        .and_then(|x| x.as_array())
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("menuNavigationItemRenderer"))
}

pub fn has_menu_entry(node: &Value, icon_type: &str) -> bool {
    menu_items(node).any(|item| {
        item.pointer("/icon/iconType").and_then(|x| x.as_str()) == Some(icon_type)
    })
}

/// Watch endpoint of the first context-menu entry with the given icon.
pub fn menu_endpoint(node: &Value, icon_type: &str) -> Option<WatchEndpoint> {
    let item = menu_items(node).find(|item| {
        item.pointer("/icon/iconType").and_then(|x| x.as_str()) == Some(icon_type)
    })?;
    let endpoint = item.get("navigationEndpoint")?;
    endpoint
        .get("watchPlaylistEndpoint")
        .or_else(|| endpoint.get("watchEndpoint"))
        .and_then(WatchEndpoint::from_json)
}

pub fn browse_id(node: &Value) -> Option<String> {
    node.pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(|x| x.as_str())
        .and_then(non_empty)
}

/// Playlist id behind a browse id: "VLPL123" and "PL123" both give "PL123".
pub fn strip_playlist_prefix(browse_id: &str) -> &str {
    browse_id
        .strip_prefix(PLAYLIST_BROWSE_PREFIX)
        .unwrap_or(browse_id)
}

pub fn page_type(node: &Value) -> Option<&str> {
    node.pointer(
        "/navigationEndpoint/browseEndpoint/browseEndpointContextSupportedConfigs/browseEndpointContextMusicConfig/pageType",
    )
    .and_then(|x| x.as_str())
}

fn overlay_play_target(node: &Value) -> Option<&Value> {
    node.pointer(
        "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint",
    )
}

/// Overlay play button's watch-playlist endpoint, as on albums and playlists.
pub fn play_endpoint(node: &Value) -> Option<WatchEndpoint> {
    overlay_play_target(node)?
        .get("watchPlaylistEndpoint")
        .and_then(WatchEndpoint::from_json)
}

pub fn playlist_id_from_overlay(node: &Value) -> Option<String> {
    play_endpoint(node)?.playlist_id
}

/// Video id of a playable item.
pub fn video_id(node: &Value) -> Option<String> {
    // Seen variants:
    // - playlistItemData.videoId
    // - navigationEndpoint.watchEndpoint.videoId
    // - flexColumns[0]...runs[0].navigationEndpoint.watchEndpoint.videoId
    [
        "/playlistItemData/videoId",
        "/navigationEndpoint/watchEndpoint/videoId",
        "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/navigationEndpoint/watchEndpoint/videoId",
    ]
    .iter()
    .find_map(|p| node.pointer(p).and_then(|x| x.as_str()).and_then(non_empty))
}
