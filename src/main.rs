//! Shade: light/dark theme preview
//!
//! Usage:
//!   shade           - Open the preview window
//!   shade status    - Print the stored theme
//!   shade toggle    - Flip and store the theme
//!   shade reset     - Forget the stored theme
//!   shade palette   - Print the active palette as JSON
//!   shade help      - Show help

mod app;
mod commands;

use std::env;
use std::sync::Arc;

use app::Shade;
use commands::Command;
use iced::{window, Size};
use shade::config::StoreConfig;
use shade::storage::{FileStore, KeyValueStore};
use shade::store::ThemeProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // Use try_init so a second call is harmless
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = StoreConfig::load();
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::from_config(&config));

    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        if !handle_cli_command(&args[1], storage) {
            std::process::exit(1);
        }
        return Ok(());
    }

    start_preview(storage)
}

/// Run one CLI command, returning false when it failed
fn handle_cli_command(cmd: &str, storage: Arc<dyn KeyValueStore>) -> bool {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return false;
        }
    };

    match Command::parse(cmd) {
        Command::Status => rt.block_on(async {
            let provider = ThemeProvider::new(storage);
            provider.load().await;
            println!("Theme is {}", provider.state().mode().as_str());
            true
        }),
        Command::Toggle => rt.block_on(async {
            let provider = ThemeProvider::new(storage);
            provider.load().await;
            match provider.toggle_checked().await {
                Ok(()) => {
                    println!("Theme is now {}", provider.state().mode().as_str());
                    true
                }
                Err(e) => {
                    eprintln!("Error: theme not saved: {}", e);
                    false
                }
            }
        }),
        Command::Reset => rt.block_on(async {
            let provider = ThemeProvider::new(storage);
            match provider.reset().await {
                Ok(()) => {
                    println!("Theme preference cleared");
                    true
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            }
        }),
        Command::Palette => rt.block_on(async {
            let provider = ThemeProvider::new(storage);
            provider.load().await;
            match serde_json::to_string_pretty(&provider.state()) {
                Ok(json) => {
                    println!("{}", json);
                    true
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            }
        }),
        Command::Help => {
            println!("{}", Command::help_text());
            println!("\nSet {} to change where the preference is stored", shade::config::CONFIG_DIR_ENV);
            true
        }
        Command::Unknown(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'shade help' for usage");
            false
        }
    }
}

fn start_preview(storage: Arc<dyn KeyValueStore>) -> iced::Result {
    tracing::info!("Starting Shade preview...");

    iced::application(Shade::title, Shade::update, Shade::view)
        .subscription(Shade::subscription)
        .theme(Shade::theme)
        .window(window::Settings {
            size: Size::new(760.0, 420.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Shade::new(storage))
}
