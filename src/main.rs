mod config;
mod storage;
mod ytm;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::ytm::models::{Page, YtItem};

#[derive(Debug, Parser)]
#[command(
    name = "ytm-mapper",
    version,
    about = "Map YouTube Music renderer JSON into songs, artists, albums and playlists"
)]
struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print items as JSON instead of a numbered listing.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map one renderer node, or a JSON array of nodes.
    Map {
        /// JSON file, `-` for stdin.
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Map a full search/browse/playlist/continuation response.
    Page {
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Map a full response and store its items in the library.
    Import {
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Inspect the local library.
    Library {
        #[command(subcommand)]
        cmd: Option<LibraryCommand>,
    },
    /// Show or change config values.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum LibraryCommand {
    /// Item counts per kind (default).
    Counts,
    /// Show one stored item by id (video id, browse id or playlist id).
    Show { id: String },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the config file path.
    Path,
    /// Set the secondary-line separator glyph.
    Separator { value: String },
    /// Set the data directory holding the library database.
    DataDir { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let mapper = ytm::Mapper::new(&cfg.parser);

    match cli.command {
        Command::Map { input } => {
            let v = read_json(&input)?;
            let page = match v.as_array() {
                Some(nodes) => mapper.map_page(nodes, None),
                None => Page {
                    items: mapper.map_node(&v).into_iter().collect(),
                    continuation: None,
                },
            };
            print_page(&page, cli.json)?;
        }
        Command::Page { input } => {
            let v = read_json(&input)?;
            let page = mapper.map_response(&v);
            print_page(&page, cli.json)?;
        }
        Command::Import { input } => {
            let v = read_json(&input)?;
            let page = mapper.map_response(&v);
            let mut storage = open_library(&cfg)?;
            let stored = storage
                .upsert_page(&page, now_unix())
                .context("store page")?;
            println!("Stored {stored} items.");
            if let Some(token) = &page.continuation {
                println!("continuation: {token}");
            }
        }
        Command::Library { cmd } => {
            let storage = open_library(&cfg)?;
            match cmd.unwrap_or(LibraryCommand::Counts) {
                LibraryCommand::Counts => {
                    let c = storage.counts()?;
                    println!("songs:     {}", c.songs);
                    println!("artists:   {}", c.artists);
                    println!("albums:    {}", c.albums);
                    println!("playlists: {}", c.playlists);
                }
                LibraryCommand::Show { id } => {
                    let item = find_item(&storage, &id)?
                        .with_context(|| format!("no library item with id {id}"))?;
                    print_page(
                        &Page {
                            items: vec![item],
                            continuation: None,
                        },
                        cli.json,
                    )?;
                }
            }
        }
        Command::Config { cmd } => {
            let mut cfg = cfg;
            match cmd {
                ConfigCommand::Path => {
                    let path = match cli.config.clone() {
                        Some(p) => p,
                        None => config::default_config_path().context("default config path")?,
                    };
                    println!("{}", path.display());
                    return Ok(());
                }
                ConfigCommand::Separator { value } => cfg.parser.separator = value,
                ConfigCommand::DataDir { path } => cfg.paths.data_dir = path,
            }
            config::save(&cfg, cli.config.as_deref()).context("save config")?;
            println!("Updated config.");
        }
    }

    Ok(())
}

fn read_json(input: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("parse json from {}", input.display()))
}

fn open_library(cfg: &config::Config) -> anyhow::Result<storage::Storage> {
    let path = cfg.paths.library_db();
    storage::Storage::open(&path).with_context(|| format!("open library {}", path.display()))
}

fn find_item(storage: &storage::Storage, id: &str) -> anyhow::Result<Option<YtItem>> {
    if let Some(s) = storage.get_song(id)? {
        return Ok(Some(YtItem::Song(s)));
    }
    if let Some(a) = storage.get_artist(id)? {
        return Ok(Some(YtItem::Artist(a)));
    }
    if let Some(a) = storage.get_album(id)? {
        return Ok(Some(YtItem::Album(a)));
    }
    Ok(storage.get_playlist(id)?.map(YtItem::Playlist))
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn print_page(page: &Page, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for (i, item) in page.items.iter().enumerate() {
        println!(
            "{:02}. [{}] {}{}  (id={})",
            i + 1,
            item.kind_label(),
            item.title(),
            detail(item),
            item.id()
        );
    }
    if let Some(token) = &page.continuation {
        println!("continuation: {token}");
    }
    Ok(())
}

fn detail(item: &YtItem) -> String {
    let names = |artists: &[ytm::models::ArtistRef]| {
        artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match item {
        YtItem::Song(s) => {
            let mut out = String::new();
            if !s.artists.is_empty() {
                out.push_str(&format!(" — {}", names(&s.artists)));
            }
            if let Some(d) = s.duration {
                out.push_str(&format!(" [{}:{:02}]", d / 60, d % 60));
            }
            if s.explicit {
                out.push_str(" (E)");
            }
            out
        }
        YtItem::Album(a) => {
            let mut out = String::new();
            if !a.artists.is_empty() {
                out.push_str(&format!(" — {}", names(&a.artists)));
            }
            if let Some(y) = a.year {
                out.push_str(&format!(" ({y})"));
            }
            out
        }
        YtItem::Playlist(p) => format!(" — {} · {}", p.author.name, p.song_count_text),
        YtItem::Artist(_) => String::new(),
    }
}
