//! Dashboard CLI
//!
//! Command-line interface for a running dashboard server:
//! - Inspect the cart counter and full state
//! - List and toggle favorites
//! - Dispatch raw intents
//! - Check status, generate config

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cart counter and favorite pokémon from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:3000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the fixed counter resource
    Counter {
        /// POST this JSON document instead of a GET
        #[arg(long)]
        post: Option<String>,
    },

    /// Show or change the live cart count
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show the full store state
    State,

    /// Dispatch a raw intent, e.g. '{"type":"addOne"}'
    Dispatch {
        intent: String,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Add one item
    Add,
    /// Remove one item (never below zero)
    Remove,
    /// Set the count
    Reset { count: i64 },
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites
    List,
    /// Show one favorite
    Show { id: String },
    /// Add a favorite, or remove it if already present
    Toggle {
        id: String,
        name: String,
        /// Extra fields in key=value format
        #[arg(short = 'F', long = "field")]
        fields: Vec<String>,
    },
    /// Remove all favorites (does not touch durable storage)
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = cli.api_url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Counter { post } => {
            let response = match post {
                Some(body) => {
                    let data: Value =
                        serde_json::from_str(&body).context("--post must be valid JSON")?;
                    client.post(format!("{}/api/counter", api)).json(&data).send().await?
                }
                None => client.get(format!("{}/api/counter", api)).send().await?,
            };
            let body = expect_json(response).await?;
            print_value(&cli.format, &body)?;
        }

        Commands::Cart { action } => {
            let intent = match action {
                None => None,
                Some(CartAction::Add) => Some(json!({"type": "addOne"})),
                Some(CartAction::Remove) => Some(json!({"type": "subtractOne"})),
                Some(CartAction::Reset { count }) => {
                    Some(json!({"type": "resetCount", "payload": count}))
                }
            };

            if let Some(intent) = intent {
                let response = client
                    .post(format!("{}/api/dispatch", api))
                    .json(&intent)
                    .send()
                    .await?;
                expect_json(response).await?;
            }

            let response = client.get(format!("{}/api/cart", api)).send().await?;
            let body = expect_json(response).await?;

            if cli.format == "json" {
                print_value(&cli.format, &body)?;
            } else {
                println!("Items in cart: {}", body["count"].as_u64().unwrap_or(0));
            }
        }

        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                let response = client.get(format!("{}/api/favorites", api)).send().await?;
                let body = expect_json(response).await?;

                if cli.format == "json" {
                    print_value(&cli.format, &body)?;
                } else {
                    print_favorites(&body);
                }
            }

            FavoritesAction::Show { id } => {
                let response = client
                    .get(format!("{}/api/favorites/{}", api, id))
                    .send()
                    .await?;
                let body = expect_json(response).await?;
                print_value("json", &body)?;
            }

            FavoritesAction::Toggle { id, name, fields } => {
                let mut item = json!({"id": id, "name": name});
                for field in fields {
                    match field.split_once('=') {
                        Some((k, v)) => {
                            item[k] = Value::String(v.to_string());
                        }
                        None => bail!("Invalid field '{}', expected key=value", field),
                    }
                }

                let response = client
                    .post(format!("{}/api/favorites/toggle", api))
                    .json(&item)
                    .send()
                    .await?;
                let body = expect_json(response).await?;

                if cli.format == "json" {
                    print_value(&cli.format, &body)?;
                } else {
                    let verb = if body["favorite"].as_bool().unwrap_or(false) {
                        "Added"
                    } else {
                        "Removed"
                    };
                    println!(
                        "{} {} ({} favorites)",
                        verb,
                        id,
                        body["count"].as_u64().unwrap_or(0)
                    );
                    if body["persisted"] == json!(false) {
                        eprintln!("Warning: the server could not persist favorites");
                    }
                }
            }

            FavoritesAction::Clear => {
                let response = client
                    .put(format!("{}/api/favorites", api))
                    .json(&json!({}))
                    .send()
                    .await?;
                expect_json(response).await?;
                println!("Favorites cleared");
            }
        },

        Commands::State => {
            let response = client.get(format!("{}/api/state", api)).send().await?;
            let body = expect_json(response).await?;
            print_value("json", &body)?;
        }

        Commands::Dispatch { intent } => {
            let intent: Value = serde_json::from_str(&intent).context("Intent must be valid JSON")?;
            let response = client
                .post(format!("{}/api/dispatch", api))
                .json(&intent)
                .send()
                .await?;
            let body = expect_json(response).await?;
            print_value("json", &body["outcome"])?;
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", api)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    println!("Dashboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!(
                        "Storage:    {} ({})",
                        health["storage"].as_str().unwrap_or("unknown"),
                        health["storage_backend"].as_str().unwrap_or("unknown")
                    );

                    let store = &health["store"];
                    println!();
                    println!("Store:");
                    println!("  Revision:        {}", store["revision"].as_u64().unwrap_or(0));
                    println!("  Dispatches:      {}", store["dispatches"].as_u64().unwrap_or(0));
                    println!(
                        "  Effect failures: {}",
                        store["effect_failures"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    bail!("API returned error: {}", resp.status());
                }
                Err(e) => {
                    eprintln!("Cannot connect to Dashboard API at {}", api);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin dashboard");
                    return Err(e.into());
                }
            }
        }

        Commands::Config { output } => {
            let content = dashboard::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Fail with the server's error message on non-2xx responses
async fn expect_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        bail!("Request failed ({}): {}", status, message);
    }

    Ok(body)
}

fn print_value(format: &str, value: &Value) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(value)?),
        _ => println!("{}", value),
    }
    Ok(())
}

fn print_favorites(body: &Value) {
    let favorites = body["favorites"].as_array().cloned().unwrap_or_default();

    if favorites.is_empty() {
        println!("No favorites yet.");
        println!();
        println!("Add one with:");
        println!("  dashboard-cli favorites toggle 25 Pikachu");
        return;
    }

    println!("{:<8} {}", "ID", "Name");
    println!("{}", "-".repeat(30));
    for item in favorites {
        println!(
            "{:<8} {}",
            item["id"].as_str().unwrap_or("-"),
            item["name"].as_str().unwrap_or("-")
        );
    }
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}
