//! One builder per item kind.
//!
//! A builder either returns a complete item or `None`; any missing required
//! field drops the whole node. The secondary line is split once by the caller
//! and shared by every field that reads it.

use crate::ytm::extract;
use crate::ytm::models::{AlbumItem, AlbumRef, ArtistItem, PlaylistItem, SongItem};
use crate::ytm::runs::{self, Run};
use serde_json::Value;

pub fn build_song(node: &Value, groups: &[Vec<Run>]) -> Option<SongItem> {
    Some(SongItem {
        id: extract::video_id(node)?,
        title: extract::primary_text(node)?,
        artists: runs::odd_elements(groups.first()?)
            .iter()
            .map(Run::to_artist)
            .collect(),
        album: groups
            .get(1)
            .and_then(|g| g.first())
            .and_then(|r| {
                Some(AlbumRef {
                    name: r.text.clone(),
                    id: r.browse_id()?.to_string(),
                })
            }),
        duration: groups
            .last()
            .and_then(|g| g.first())
            .and_then(|r| extract::duration_seconds(&r.text)),
        thumbnail_url: extract::thumbnail_url(node)?,
        explicit: extract::explicit_flag(node),
    })
}

/// Artists without both a shuffle and a radio endpoint are not built.
pub fn build_artist(node: &Value, _groups: &[Vec<Run>]) -> Option<ArtistItem> {
    Some(ArtistItem {
        id: extract::browse_id(node)?,
        title: extract::primary_text(node)?,
        thumbnail_url: extract::thumbnail_url(node)?,
        shuffle_endpoint: Some(extract::menu_endpoint(node, extract::ICON_SHUFFLE)?),
        radio_endpoint: Some(extract::menu_endpoint(node, extract::ICON_RADIO)?),
    })
}

pub fn build_album(node: &Value, groups: &[Vec<Run>]) -> Option<AlbumItem> {
    Some(AlbumItem {
        browse_id: extract::browse_id(node)?,
        playlist_id: extract::playlist_id_from_overlay(node)?,
        title: extract::primary_text(node)?,
        artists: runs::odd_elements(groups.get(1)?)
            .iter()
            .map(Run::to_artist)
            .collect(),
        year: groups
            .get(2)
            .and_then(|g| g.first())
            .and_then(|r| extract::year(&r.text)),
        thumbnail_url: extract::thumbnail_url(node)?,
        explicit: extract::explicit_flag(node),
    })
}

pub fn build_playlist(node: &Value, groups: &[Vec<Run>]) -> Option<PlaylistItem> {
    let browse_id = extract::browse_id(node)?;
    let id = extract::strip_playlist_prefix(&browse_id);
    if id.is_empty() {
        return None;
    }
    Some(PlaylistItem {
        id: id.to_string(),
        title: extract::primary_text(node)?,
        author: groups.first()?.first()?.to_artist(),
        song_count_text: extract::song_count_text(node)?,
        thumbnail_url: extract::thumbnail_url(node)?,
        play_endpoint: extract::play_endpoint(node)?,
        shuffle_endpoint: extract::menu_endpoint(node, extract::ICON_SHUFFLE)?,
        radio_endpoint: extract::menu_endpoint(node, extract::ICON_RADIO)?,
    })
}
