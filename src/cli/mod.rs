pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Live top headlines with a newsletter sign-up", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/newsdesk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Region code for the headlines (e.g. "in", "us")
    #[arg(long, global = true)]
    pub country: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show headlines and keep them fresh until Ctrl-C
    Run {
        /// Refresh interval (e.g. "30s", "5m")
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Fetch and print the headlines once
    Headlines,
    /// Subscribe to the newsletter
    Subscribe {
        /// Address to subscribe; prompts on stdin when omitted
        email: Option<String>,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(key) = &self.api_key {
            config.news.api_key = key.clone();
        }
        if let Some(country) = &self.country {
            config.news.country = country.clone();
        }
        if let Commands::Run {
            interval: Some(interval),
        } = &self.command
        {
            config.news.refresh_interval = interval.clone();
        }
    }
}
