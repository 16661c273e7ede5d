//! Renderer nodes shaped like `musicResponsiveListItemRenderer` search results.

use serde_json::{Value, json};

pub fn run(text: &str) -> Value {
    json!({ "text": text })
}

pub fn browse_run(text: &str, browse_id: &str) -> Value {
    json!({ "text": text, "navigationEndpoint": { "browseEndpoint": { "browseId": browse_id } } })
}

pub fn column(runs: &[Value]) -> Value {
    json!({ "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": runs } } })
}

fn browse_endpoint(browse_id: &str, page_type: &str) -> Value {
    json!({ "browseEndpoint": {
        "browseId": browse_id,
        "browseEndpointContextSupportedConfigs": {
            "browseEndpointContextMusicConfig": { "pageType": page_type }
        }
    }})
}

fn thumbnail() -> Value {
    json!({ "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [
        { "url": "https://lh3.example/w60-h60", "width": 60, "height": 60 },
        { "url": "https://lh3.example/w544-h544", "width": 544, "height": 544 }
    ]}}})
}

fn overlay(playlist_id: &str) -> Value {
    json!({ "musicItemThumbnailOverlayRenderer": { "content": { "musicPlayButtonRenderer": {
        "playNavigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": playlist_id, "params": "wAEB" } }
    }}}})
}

/// Shuffle entry first, radio second.
fn menu() -> Value {
    json!({ "menuRenderer": { "items": [
        { "menuNavigationItemRenderer": {
            "text": { "runs": [{ "text": "Shuffle play" }] },
            "icon": { "iconType": "MUSIC_SHUFFLE" },
            "navigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": "RDAOshuffle", "params": "wAEB8gECKAE%3D" } }
        }},
        { "menuNavigationItemRenderer": {
            "text": { "runs": [{ "text": "Start radio" }] },
            "icon": { "iconType": "MIX" },
            "navigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": "RDEMradio", "params": "wAEB" } }
        }},
        { "menuServiceItemRenderer": {
            "icon": { "iconType": "ADD_TO_REMOTE_QUEUE" }
        }}
    ]}})
}

pub fn song() -> Value {
    json!({
        "thumbnail": thumbnail(),
        "flexColumns": [
            column(&[run("One More Time")]),
            column(&[
                run("Song"),
                browse_run("Daft Punk", "UC_daftpunk"),
                run(" & "),
                run("Romanthony"),
                run(" • "),
                browse_run("Discovery", "MPREb_discovery"),
                run(" • "),
                run("5:21"),
            ]),
        ],
        "menu": menu(),
        "playlistItemData": { "videoId": "FGBhQbmPwH8" },
        "badges": [
            { "musicInlineBadgeRenderer": { "icon": { "iconType": "MUSIC_EXPLICIT_BADGE" } } }
        ]
    })
}

pub fn artist() -> Value {
    json!({
        "thumbnail": thumbnail(),
        "flexColumns": [
            column(&[run("Daft Punk")]),
            column(&[run("Artist"), run(" • "), run("8.1M subscribers")]),
        ],
        "menu": menu(),
        "navigationEndpoint": browse_endpoint("UC_daftpunk", "MUSIC_PAGE_TYPE_ARTIST")
    })
}

pub fn album() -> Value {
    json!({
        "thumbnail": thumbnail(),
        "overlay": overlay("OLAK5uy_discovery"),
        "flexColumns": [
            column(&[run("Discovery")]),
            column(&[
                run("Album"),
                run(" • "),
                run("Various"),
                browse_run("Daft Punk", "UC_daftpunk"),
                run(", "),
                browse_run("Todd Edwards", "UC_todd"),
                run(" • "),
                run("2001"),
            ]),
        ],
        "menu": menu(),
        "navigationEndpoint": browse_endpoint("MPREb_discovery", "MUSIC_PAGE_TYPE_ALBUM")
    })
}

pub fn playlist(browse_id: &str) -> Value {
    let playlist_id = browse_id.strip_prefix("VL").unwrap_or(browse_id);
    json!({
        "thumbnail": thumbnail(),
        "overlay": overlay(playlist_id),
        "flexColumns": [
            column(&[run("Chill Mix")]),
            column(&[browse_run("Lofi Girl", "UC_lofi"), run(" • "), run("42 songs")]),
        ],
        "menu": menu(),
        "navigationEndpoint": browse_endpoint(browse_id, "MUSIC_PAGE_TYPE_PLAYLIST")
    })
}

/// Wraps a renderer the way shelves list it.
pub fn wrap(renderer: Value) -> Value {
    json!({ "musicResponsiveListItemRenderer": renderer })
}

/// Copy of `node` with the value at `pointer` removed.
pub fn without(node: &Value, pointer: &str) -> Value {
    let mut node = node.clone();
    let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
    match node.pointer_mut(parent) {
        Some(Value::Object(map)) => {
            map.remove(key);
        }
        Some(Value::Array(items)) => {
            let index: usize = key.parse().expect("array index");
            items.remove(index);
        }
        _ => panic!("no parent at {pointer}"),
    }
    node
}
