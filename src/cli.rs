use crate::github::{ClientConfig, API_BASE_URL};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "trending-repos")]
#[command(about = "Trending GitHub repositories - lists this week's most starred projects and aggregates repository detail")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub access token, sent as the access_token query parameter
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Timeout for a single upstream request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Timeout for a whole search or detail operation, in seconds
    #[arg(long, env = "OPERATION_TIMEOUT", default_value_t = 60)]
    pub operation_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List repositories created in the last seven days, most starred first
    List,

    /// Show aggregated detail for one repository
    Detail {
        /// Repository as owner/name
        repo: String,

        /// Print the full composite as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the list and detail operations over HTTP
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            token: self.github_token.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
            ..ClientConfig::default()
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout)
    }
}
