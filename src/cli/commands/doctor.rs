//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::{OllamaClient, TextGenerator};
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Tubeqa Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    // External tools. yt-dlp is only the subtitle fallback, so a
    // missing binary is a warning, not an error.
    println!("{}", style("External Tools").bold());
    let tool_check = check_ytdlp();
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("API Configuration").bold());
    let api_check = check_youtube_api_key(settings);
    api_check.print();
    checks.push(api_check);

    println!();

    println!("{}", style("Ollama").bold());
    let ollama_check = check_ollama(settings).await;
    ollama_check.print();
    checks.push(ollama_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Tubeqa.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Tubeqa is ready to use.");
    }

    Ok(())
}

/// Check if yt-dlp is available.
fn check_ytdlp() -> CheckResult {
    match Command::new("yt-dlp").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        Ok(_) => CheckResult::warning(
            "yt-dlp",
            "installed but not working",
            "Transcript subtitle fallback will be unavailable",
        ),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::warning(
            "yt-dlp",
            "not found",
            install_hint_ytdlp(),
        ),
        Err(e) => CheckResult::warning("yt-dlp", &format!("error: {}", e), install_hint_ytdlp()),
    }
}

/// Check if a YouTube Data API key is configured.
fn check_youtube_api_key(settings: &Settings) -> CheckResult {
    match settings.youtube_api_key() {
        Some(key) => CheckResult::ok("YouTube API key", &format!("configured ({})", mask_key(&key))),
        None => CheckResult::error(
            "YouTube API key",
            "not set",
            "Set youtube.api_key in the config file or export YOUTUBE_API_KEY",
        ),
    }
}

/// Mask an API key down to its first and last four characters.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count > 8 {
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(count - 4).collect();
        format!("{head}...{tail}")
    } else {
        "configured".to_string()
    }
}

/// Check if the Ollama server is reachable and the model is usable.
async fn check_ollama(settings: &Settings) -> CheckResult {
    let client = match OllamaClient::new(&settings.ollama.base_url, &settings.ollama.model) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::error(
                "Ollama",
                &format!("client error: {}", e),
                "Check ollama.base_url in the config file",
            )
        }
    };

    if client.health_check().await {
        CheckResult::ok(
            "Ollama",
            &format!("{} ({})", settings.ollama.base_url, settings.ollama.model),
        )
    } else {
        CheckResult::error(
            "Ollama",
            &format!("unreachable or model '{}' not available", settings.ollama.model),
            &format!(
                "Start the server and pull the model: ollama pull {}",
                settings.ollama.model
            ),
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubeqa config edit",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
