use anyhow::Context;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;
use trending_repos::cli::{Cli, Command};
use trending_repos::server::{start_server, AppState};
use trending_repos::{ProjectService, RepositoryDetail, RepositorySummary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let service = ProjectService::new(cli.client_config())?
        .with_operation_timeout(cli.operation_timeout());

    match cli.command {
        Command::List => {
            let items = service.search().await?;
            print_summaries(&items);
        }
        Command::Detail { repo, json } => {
            let detail = service.fetch_detail(&repo).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(&detail);
            }
        }
        Command::Serve { port } => {
            println!("{}", "Trending Repositories API".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());

            let state = AppState::new(service);
            let server = start_server(state, port);

            tokio::select! {
                result = server => {
                    result.map_err(|e| anyhow::anyhow!("{}", e)).context("API server stopped")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("\n🛑 Shutting down server...");
                }
            }
        }
    }

    Ok(())
}

fn print_summaries(items: &[RepositorySummary]) {
    println!("{}", "Trending this week".bold().green());
    println!("{}", "=".repeat(50).dimmed());

    for (rank, repo) in items.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            rank + 1,
            repo.full_name.bold(),
            format!("★ {}", repo.stargazers_count).yellow()
        );
        if let Some(description) = &repo.description {
            println!("     {}", description.dimmed());
        }
    }

    if items.is_empty() {
        println!("{}", "No repositories found".yellow());
    }
}

fn print_detail(item: &RepositoryDetail) {
    let repo = &item.detail;
    println!("{}", repo.full_name.bold().green());
    println!("{}", "=".repeat(50).dimmed());

    if let Some(description) = &repo.description {
        println!("{}\n", description);
    }

    println!("⭐ Stars: {}", repo.stargazers_count);
    println!("🍴 Forks: {}", repo.forks_count);
    if let Some(language) = &repo.language {
        println!("📝 Language: {}", language);
    }
    println!("🔗 {}\n", repo.html_url.underline());

    println!("📊 Events: {}", item.events.len());
    println!("👥 Contributors: {}", item.contributors.len());
    println!("🐛 Issues: {}", item.issues.len());
    println!("🏷️  Labels: {}", item.labels.len());
    println!("📦 Commits: {}", item.commits.len());

    let top: Vec<&str> = item
        .contributors
        .iter()
        .filter_map(|c| c.login.as_deref())
        .take(5)
        .collect();
    if !top.is_empty() {
        println!("\nTop contributors: {}", top.join(", ").cyan());
    }
}
