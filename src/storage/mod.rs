use anyhow::Context;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::ytm::models::{AlbumItem, ArtistItem, Page, PlaylistItem, SongItem, YtItem};

/// Local library of mapped items, keyed by item id. Re-importing an item
/// replaces the stored copy.
pub struct Storage {
    conn: Connection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryCounts {
    pub songs: i64,
    pub artists: i64,
    pub albums: i64,
    pub playlists: i64,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    #[allow(dead_code)]
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS songs (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  artists_json TEXT NOT NULL,
  album_json TEXT,
  duration_seconds INTEGER,
  thumbnail_url TEXT NOT NULL,
  explicit INTEGER NOT NULL DEFAULT 0,
  updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS artists (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  thumbnail_url TEXT NOT NULL,
  shuffle_json TEXT,
  radio_json TEXT,
  updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS albums (
  browse_id TEXT PRIMARY KEY,
  playlist_id TEXT NOT NULL,
  title TEXT NOT NULL,
  artists_json TEXT NOT NULL,
  year INTEGER,
  thumbnail_url TEXT NOT NULL,
  explicit INTEGER NOT NULL DEFAULT 0,
  updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS playlists (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  author_json TEXT NOT NULL,
  song_count_text TEXT NOT NULL,
  thumbnail_url TEXT NOT NULL,
  play_json TEXT NOT NULL,
  shuffle_json TEXT NOT NULL,
  radio_json TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    /// Inserts or updates one item by id.
    #[allow(dead_code)]
    pub fn upsert_item(&self, item: &YtItem, now_unix: i64) -> anyhow::Result<()> {
        upsert(&self.conn, item, now_unix)
    }

    /// Upserts every item of a page in one transaction. Returns the number stored.
    pub fn upsert_page(&mut self, page: &Page, now_unix: i64) -> anyhow::Result<usize> {
        let tx = self.conn.transaction().context("begin upsert page")?;
        for item in &page.items {
            upsert(&tx, item, now_unix)?;
        }
        tx.commit().context("commit upsert page")?;
        tracing::debug!(items = page.items.len(), "stored page");
        Ok(page.items.len())
    }

    pub fn get_song(&self, id: &str) -> anyhow::Result<Option<SongItem>> {
        self.conn
            .query_row(
                r#"
SELECT id, title, artists_json, album_json, duration_seconds, thumbnail_url, explicit
FROM songs WHERE id=?1
"#,
                params![id],
                |row| {
                    Ok(SongItem {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        artists: json_col(row, 2)?,
                        album: opt_json_col(row, 3)?,
                        duration: row.get(4)?,
                        thumbnail_url: row.get(5)?,
                        explicit: row.get(6)?,
                    })
                },
            )
            .optional()
            .context("get song")
    }

    pub fn get_artist(&self, id: &str) -> anyhow::Result<Option<ArtistItem>> {
        self.conn
            .query_row(
                "SELECT id, title, thumbnail_url, shuffle_json, radio_json FROM artists WHERE id=?1",
                params![id],
                |row| {
                    Ok(ArtistItem {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        thumbnail_url: row.get(2)?,
                        shuffle_endpoint: opt_json_col(row, 3)?,
                        radio_endpoint: opt_json_col(row, 4)?,
                    })
                },
            )
            .optional()
            .context("get artist")
    }

    pub fn get_album(&self, browse_id: &str) -> anyhow::Result<Option<AlbumItem>> {
        self.conn
            .query_row(
                r#"
SELECT browse_id, playlist_id, title, artists_json, year, thumbnail_url, explicit
FROM albums WHERE browse_id=?1
"#,
                params![browse_id],
                |row| {
                    Ok(AlbumItem {
                        browse_id: row.get(0)?,
                        playlist_id: row.get(1)?,
                        title: row.get(2)?,
                        artists: json_col(row, 3)?,
                        year: row.get(4)?,
                        thumbnail_url: row.get(5)?,
                        explicit: row.get(6)?,
                    })
                },
            )
            .optional()
            .context("get album")
    }

    pub fn get_playlist(&self, id: &str) -> anyhow::Result<Option<PlaylistItem>> {
        self.conn
            .query_row(
                r#"
SELECT id, title, author_json, song_count_text, thumbnail_url, play_json, shuffle_json, radio_json
FROM playlists WHERE id=?1
"#,
                params![id],
                |row| {
                    Ok(PlaylistItem {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        author: json_col(row, 2)?,
                        song_count_text: row.get(3)?,
                        thumbnail_url: row.get(4)?,
                        play_endpoint: json_col(row, 5)?,
                        shuffle_endpoint: json_col(row, 6)?,
                        radio_endpoint: json_col(row, 7)?,
                    })
                },
            )
            .optional()
            .context("get playlist")
    }

    pub fn counts(&self) -> anyhow::Result<LibraryCounts> {
        let count = |table: &str| -> anyhow::Result<i64> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                .with_context(|| format!("count {table}"))
        };
        Ok(LibraryCounts {
            songs: count("songs")?,
            artists: count("artists")?,
            albums: count("albums")?,
            playlists: count("playlists")?,
        })
    }
}

fn to_json<T: Serialize>(v: &T) -> anyhow::Result<String> {
    serde_json::to_string(v).context("serialize column")
}

fn opt_to_json<T: Serialize>(v: Option<&T>) -> anyhow::Result<Option<String>> {
    v.map(to_json).transpose()
}

fn json_col<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn opt_json_col<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        serde_json::from_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn upsert(conn: &Connection, item: &YtItem, now_unix: i64) -> anyhow::Result<()> {
    match item {
        YtItem::Song(s) => {
            conn.execute(
                r#"
INSERT INTO songs(id, title, artists_json, album_json, duration_seconds, thumbnail_url, explicit, updated_at)
VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(id) DO UPDATE SET
  title=excluded.title,
  artists_json=excluded.artists_json,
  album_json=excluded.album_json,
  duration_seconds=excluded.duration_seconds,
  thumbnail_url=excluded.thumbnail_url,
  explicit=excluded.explicit,
  updated_at=excluded.updated_at
"#,
                params![
                    s.id,
                    s.title,
                    to_json(&s.artists)?,
                    opt_to_json(s.album.as_ref())?,
                    s.duration,
                    s.thumbnail_url,
                    s.explicit,
                    now_unix
                ],
            )
            .context("upsert song")?;
        }
        YtItem::Artist(a) => {
            conn.execute(
                r#"
INSERT INTO artists(id, title, thumbnail_url, shuffle_json, radio_json, updated_at)
VALUES(?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(id) DO UPDATE SET
  title=excluded.title,
  thumbnail_url=excluded.thumbnail_url,
  shuffle_json=excluded.shuffle_json,
  radio_json=excluded.radio_json,
  updated_at=excluded.updated_at
"#,
                params![
                    a.id,
                    a.title,
                    a.thumbnail_url,
                    opt_to_json(a.shuffle_endpoint.as_ref())?,
                    opt_to_json(a.radio_endpoint.as_ref())?,
                    now_unix
                ],
            )
            .context("upsert artist")?;
        }
        YtItem::Album(a) => {
            conn.execute(
                r#"
INSERT INTO albums(browse_id, playlist_id, title, artists_json, year, thumbnail_url, explicit, updated_at)
VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(browse_id) DO UPDATE SET
  playlist_id=excluded.playlist_id,
  title=excluded.title,
  artists_json=excluded.artists_json,
  year=excluded.year,
  thumbnail_url=excluded.thumbnail_url,
  explicit=excluded.explicit,
  updated_at=excluded.updated_at
"#,
                params![
                    a.browse_id,
                    a.playlist_id,
                    a.title,
                    to_json(&a.artists)?,
                    a.year,
                    a.thumbnail_url,
                    a.explicit,
                    now_unix
                ],
            )
            .context("upsert album")?;
        }
        YtItem::Playlist(p) => {
            conn.execute(
                r#"
INSERT INTO playlists(id, title, author_json, song_count_text, thumbnail_url, play_json, shuffle_json, radio_json, updated_at)
VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT(id) DO UPDATE SET
  title=excluded.title,
  author_json=excluded.author_json,
  song_count_text=excluded.song_count_text,
  thumbnail_url=excluded.thumbnail_url,
  play_json=excluded.play_json,
  shuffle_json=excluded.shuffle_json,
  radio_json=excluded.radio_json,
  updated_at=excluded.updated_at
"#,
                params![
                    p.id,
                    p.title,
                    to_json(&p.author)?,
                    p.song_count_text,
                    p.thumbnail_url,
                    to_json(&p.play_endpoint)?,
                    to_json(&p.shuffle_endpoint)?,
                    to_json(&p.radio_endpoint)?,
                    now_unix
                ],
            )
            .context("upsert playlist")?;
        }
    }
    Ok(())
}
