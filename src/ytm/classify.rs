use crate::ytm::extract::{self, PLAYLIST_BROWSE_PREFIX};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Song,
    Artist,
    Album,
    Playlist,
    Unknown,
}

/// Order in which kinds are tried. Real nodes can satisfy more than one
/// predicate; the first match wins.
pub const CLASSIFY_ORDER: [ItemKind; 4] = [
    ItemKind::Song,
    ItemKind::Artist,
    ItemKind::Album,
    ItemKind::Playlist,
];

/// Kind of a renderer node, decided from its shape alone.
pub fn classify(node: &Value) -> ItemKind {
    let kind = CLASSIFY_ORDER
        .into_iter()
        .find(|kind| matches(*kind, node))
        .unwrap_or(ItemKind::Unknown);
    tracing::trace!(?kind, "classified renderer");
    kind
}

/// Whether `node` has the shape of `kind`.
pub fn matches(kind: ItemKind, node: &Value) -> bool {
    if !page_type_allows(kind, node) {
        return false;
    }
    match kind {
        ItemKind::Song => is_song(node),
        ItemKind::Artist => is_artist(node),
        ItemKind::Album => is_album(node),
        ItemKind::Playlist => is_playlist(node),
        ItemKind::Unknown => false,
    }
}

/// A page type, when the node carries one, rules out every kind it does not name.
fn page_type_allows(kind: ItemKind, node: &Value) -> bool {
    let Some(page_type) = extract::page_type(node) else {
        return true;
    };
    match kind {
        ItemKind::Song => false,
        ItemKind::Artist => page_type == extract::PAGE_TYPE_ARTIST,
        ItemKind::Album => {
            page_type == extract::PAGE_TYPE_ALBUM || page_type == extract::PAGE_TYPE_AUDIOBOOK
        }
        ItemKind::Playlist => page_type == extract::PAGE_TYPE_PLAYLIST,
        ItemKind::Unknown => false,
    }
}

fn is_song(node: &Value) -> bool {
    extract::video_id(node).is_some() && extract::play_endpoint(node).is_none()
}

fn is_artist(node: &Value) -> bool {
    extract::browse_id(node).is_some()
        && extract::has_menu_entry(node, extract::ICON_RADIO)
        && extract::play_endpoint(node).is_none()
}

fn is_album(node: &Value) -> bool {
    extract::playlist_id_from_overlay(node).is_some()
        && extract::browse_id(node).is_some_and(|id| !id.starts_with(PLAYLIST_BROWSE_PREFIX))
}

fn is_playlist(node: &Value) -> bool {
    extract::browse_id(node)
        .is_some_and(|id| !extract::strip_playlist_prefix(&id).is_empty())
        && extract::play_endpoint(node).is_some()
        && extract::song_count_text(node).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn browse(id: &str, page_type: Option<&str>) -> Value {
        let mut b = json!({ "browseId": id });
        if let Some(pt) = page_type {
            b["browseEndpointContextSupportedConfigs"] =
                json!({ "browseEndpointContextMusicConfig": { "pageType": pt } });
        }
        json!({ "browseEndpoint": b })
    }

    fn overlay(playlist_id: &str) -> Value {
        json!({ "musicItemThumbnailOverlayRenderer": { "content": { "musicPlayButtonRenderer": {
            "playNavigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": playlist_id } }
        }}}})
    }

    fn radio_menu() -> Value {
        json!({ "menuRenderer": { "items": [
            { "menuNavigationItemRenderer": {
                "icon": { "iconType": "MIX" },
                "navigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": "RDradio" } }
            }}
        ]}})
    }

    fn second_column(text: &str) -> Value {
        json!([
            { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [{ "text": "Title" }] } } },
            { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [{ "text": text }] } } }
        ])
    }

    #[test]
    fn test_order_is_song_artist_album_playlist() {
        assert_eq!(
            CLASSIFY_ORDER,
            [ItemKind::Song, ItemKind::Artist, ItemKind::Album, ItemKind::Playlist]
        );
    }

    #[test]
    fn test_song() {
        let node = json!({ "playlistItemData": { "videoId": "v1" } });
        assert_eq!(classify(&node), ItemKind::Song);
    }

    #[test]
    fn test_song_wins_over_artist() {
        // Satisfies both the song and the artist predicate.
        let node = json!({
            "playlistItemData": { "videoId": "v1" },
            "navigationEndpoint": browse("UC1", None),
            "menu": radio_menu()
        });
        assert_eq!(classify(&node), ItemKind::Song);
    }

    #[test]
    fn test_artist() {
        let node = json!({ "navigationEndpoint": browse("UC1", None), "menu": radio_menu() });
        assert_eq!(classify(&node), ItemKind::Artist);
    }

    #[test]
    fn test_browse_without_radio_is_unknown() {
        let node = json!({ "navigationEndpoint": browse("UC1", None) });
        assert_eq!(classify(&node), ItemKind::Unknown);
    }

    #[test]
    fn test_album() {
        let node = json!({
            "navigationEndpoint": browse("MPREb_1", None),
            "overlay": overlay("OLAK5uy_1"),
            "menu": radio_menu()
        });
        assert_eq!(classify(&node), ItemKind::Album);
    }

    #[test]
    fn test_vl_browse_id_is_playlist() {
        let node = json!({
            "navigationEndpoint": browse("VLPL1", None),
            "overlay": overlay("PL1"),
            "flexColumns": second_column("12 songs")
        });
        assert_eq!(classify(&node), ItemKind::Playlist);
    }

    #[test]
    fn test_page_type_vetoes_album() {
        let node = json!({
            "navigationEndpoint": browse("PL1", Some("MUSIC_PAGE_TYPE_PLAYLIST")),
            "overlay": overlay("PL1"),
            "flexColumns": second_column("12 songs")
        });
        assert_eq!(classify(&node), ItemKind::Playlist);
    }

    #[test]
    fn test_playlist_needs_song_count() {
        let node = json!({
            "navigationEndpoint": browse("VLPL1", None),
            "overlay": overlay("PL1")
        });
        assert_eq!(classify(&node), ItemKind::Unknown);
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(classify(&json!({})), ItemKind::Unknown);
    }
}
