//! YouTube Music renderer parsing
//!
//! Turns `musicResponsiveListItemRenderer` nodes from the internal web API
//! into songs, artists, albums and playlists:
//! - `runs`: text-run lists and their separator/odd-element views
//! - `classify`: which item kind a node has the shape of
//! - `extract`: single-field accessors over a node
//! - `builders`: all-or-nothing construction per kind
//! - `mapper`: node, page and full-response entry points

pub mod builders;
pub mod classify;
pub mod extract;
pub mod mapper;
pub mod models;
pub mod runs;

#[cfg(test)]
pub(crate) mod fixtures;

pub use mapper::Mapper;
