//! CLI module for Tubeqa.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tubeqa - YouTube Playlist and Channel Q&A
///
/// Ask natural-language questions about YouTube playlists and channels,
/// answered by a local LLM over the videos' metadata and transcripts.
#[derive(Parser, Debug)]
#[command(name = "tubeqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a playlist or channel
    Ask {
        /// The question to ask
        question: String,

        /// Playlist or channel URL (falls back to youtube.default_url)
        #[arg(short, long)]
        url: Option<String>,

        /// Maximum number of videos to include in the context
        #[arg(short, long)]
        max_videos: Option<usize>,
    },

    /// Summarize a playlist or channel
    Summary {
        /// Playlist or channel URL (falls back to youtube.default_url)
        url: Option<String>,
    },

    /// Search for videos by title or description
    Search {
        /// Search query
        query: String,

        /// Playlist or channel URL (falls back to youtube.default_url)
        #[arg(short, long)]
        url: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
