use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target of a `watchEndpoint` or `watchPlaylistEndpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEndpoint {
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
    pub params: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEndpoint {
    Browse {
        browse_id: String,
        page_type: Option<String>,
    },
    Watch(WatchEndpoint),
    /// Search, url and other endpoints we never attach to items.
    Other,
}

impl WatchEndpoint {
    /// Reads the fields of a `watchEndpoint`/`watchPlaylistEndpoint` object.
    /// An endpoint naming neither a video nor a playlist is not an endpoint.
    pub fn from_json(v: &Value) -> Option<Self> {
        let field = |key: &str| {
            v.get(key)
                .and_then(|x| x.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let video_id = field("videoId");
        let playlist_id = field("playlistId");
        if video_id.is_none() && playlist_id.is_none() {
            return None;
        }
        Some(Self {
            video_id,
            playlist_id,
            params: field("params"),
        })
    }
}

impl NavigationEndpoint {
    pub fn from_json(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        if let Some(b) = obj.get("browseEndpoint") {
            let browse_id = b.get("browseId")?.as_str()?.to_string();
            let page_type = b
                .pointer("/browseEndpointContextSupportedConfigs/browseEndpointContextMusicConfig/pageType")
                .and_then(|x| x.as_str())
                .map(str::to_string);
            return Some(Self::Browse {
                browse_id,
                page_type,
            });
        }
        if let Some(w) = obj.get("watchEndpoint").or_else(|| obj.get("watchPlaylistEndpoint")) {
            return WatchEndpoint::from_json(w).map(Self::Watch);
        }
        Some(Self::Other)
    }

    pub fn browse_id(&self) -> Option<&str> {
        match self {
            Self::Browse { browse_id, .. } => Some(browse_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongItem {
    pub id: String,
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub duration: Option<u32>,
    pub thumbnail_url: String,
    pub explicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistItem {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub shuffle_endpoint: Option<WatchEndpoint>,
    pub radio_endpoint: Option<WatchEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumItem {
    pub browse_id: String,
    pub playlist_id: String,
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub year: Option<i32>,
    pub thumbnail_url: String,
    pub explicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub title: String,
    pub author: ArtistRef,
    pub song_count_text: String,
    pub thumbnail_url: String,
    pub play_endpoint: WatchEndpoint,
    pub shuffle_endpoint: WatchEndpoint,
    pub radio_endpoint: WatchEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YtItem {
    Song(SongItem),
    Artist(ArtistItem),
    Album(AlbumItem),
    Playlist(PlaylistItem),
}

impl YtItem {
    /// Video id for songs, browse id for everything else.
    pub fn id(&self) -> &str {
        match self {
            YtItem::Song(s) => &s.id,
            YtItem::Artist(a) => &a.id,
            YtItem::Album(a) => &a.browse_id,
            YtItem::Playlist(p) => &p.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            YtItem::Song(s) => &s.title,
            YtItem::Artist(a) => &a.title,
            YtItem::Album(a) => &a.title,
            YtItem::Playlist(p) => &p.title,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            YtItem::Song(_) => "song",
            YtItem::Artist(_) => "artist",
            YtItem::Album(_) => "album",
            YtItem::Playlist(_) => "playlist",
        }
    }
}

/// One mapped page: items in input order plus the token for the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<YtItem>,
    pub continuation: Option<String>,
}
