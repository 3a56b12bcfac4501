//! Tubeqa - YouTube Playlist and Channel Q&A
//!
//! Ask natural-language questions about YouTube playlists and channels,
//! answered by a local LLM over the videos' metadata and transcripts.
//!
//! # Overview
//!
//! Tubeqa allows you to:
//! - Ask questions about the videos in a playlist or the uploads of a channel
//! - Summarize what a playlist or channel is about
//! - Search videos by title and description
//! - Serve the same operations over an HTTP API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `models` - Video, playlist, and channel data types
//! - `youtube` - YouTube Data API adapter and transcript fetching
//! - `llm` - Text generation backends (Ollama)
//! - `qa` - Question-answering engine and context assembly
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tubeqa::llm::OllamaClient;
//! use tubeqa::qa::QaEngine;
//! use tubeqa::youtube::YouTubeDataApi;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(YouTubeDataApi::new("api-key")?);
//!     let generator = Arc::new(OllamaClient::new("http://localhost:11434", "llama3.2")?);
//!     let engine = QaEngine::new(provider, generator);
//!
//!     let response = engine
//!         .answer_question(
//!             "What is this playlist about?",
//!             "https://www.youtube.com/playlist?list=PLabc123",
//!             None,
//!         )
//!         .await;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod qa;
pub mod youtube;

pub use error::{Result, TubeqaError};
