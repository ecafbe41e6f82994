//! Multimedias CLI: operator entry point for the media admin bulk actions.
//!
//! Set DATABASE_URL (or put it in `.env`). `validate-file` works offline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use multimedias_admin::{
    admin_for, clean_ended_entries, pick_embed, render_embed_cell, resend_generic_host,
    AdminAction,
};
use multimedias_cli::{init_tracing, parse_ids, report_failure};
use multimedias_core::models::{MediaConfigFilter, MediaKind};
use multimedias_core::{validate_upload_extension, Config};
use multimedias_db::{
    connect, run_migrations, MediaBoxRepository, MediaConfigRepository, MediaHostRepository,
    MediaRepository, MediaStore, PgMediaStore, PgPool,
};

#[derive(Parser)]
#[command(name = "multimedias", about = "Media admin bulk actions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the generic host record of media items and unpublish them
    ResendGeneric {
        /// Media UUIDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Reset the video-sharing host record of videos
    ResendVideo {
        /// Video UUIDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Check an upload file name against a kind's extension allow-list
    ValidateFile {
        /// video or audio
        #[arg(long)]
        kind: MediaKind,
        /// File name
        name: String,
    },
    /// Delete media box entries whose end date has passed
    CleanBoxes {
        /// Media box UUIDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Render the embed-insertion cell of a media item
    EmbedCell {
        /// Media UUID
        id: String,
    },
    /// List media configs
    ListConfigs {
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        key_group: Option<String>,
        #[arg(long)]
        channel: Option<String>,
        #[arg(long)]
        published: Option<bool>,
        /// Case-insensitive match on key, group or value
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "50")]
        limit: i64,
        #[arg(long, default_value = "0")]
        offset: i64,
    },
    /// Apply database migrations
    Migrate,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn pool() -> anyhow::Result<PgPool> {
    let config = Config::from_env().context("Failed to load configuration")?;
    connect(&config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let production = Config::from_env().is_ok_and(|c| c.is_production());
            report_failure(&err, production);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::ResendGeneric { ids } => {
            let ids = parse_ids(&ids)?;
            let store = PgMediaStore::new(pool().await?);
            let report = resend_generic_host(&store, ids).await?;
            print_json(&report)?;
            report.into_result()?;
        }
        Commands::ResendVideo { ids } => {
            let ids = parse_ids(&ids)?;
            let store: Arc<dyn MediaStore> = Arc::new(PgMediaStore::new(pool().await?));
            let report = admin_for(MediaKind::Video, store)
                .run_action(AdminAction::ResendVideoHost.name(), &ids)
                .await?;
            print_json(&report)?;
            report.into_result()?;
        }
        Commands::ValidateFile { kind, name } => {
            let file = validate_upload_extension(&name, kind)?;
            print_json(&serde_json::json!({ "kind": kind, "media_file": file }))?;
        }
        Commands::CleanBoxes { ids } => {
            let ids = parse_ids(&ids)?;
            let boxes = MediaBoxRepository::new(pool().await?);
            let report = clean_ended_entries(&boxes, ids, Utc::now()).await?;
            print_json(&report)?;
            report.into_result()?;
        }
        Commands::EmbedCell { id } => {
            let id = Uuid::parse_str(&id).with_context(|| format!("Invalid id '{}'", id))?;
            let pool = pool().await?;
            let item = MediaRepository::new(pool.clone())
                .get(id)
                .await?
                .with_context(|| format!("Media {} not found", id))?;
            let records = MediaHostRepository::new(pool).list_for_media(id).await?;
            let embed = pick_embed(&records)
                .with_context(|| format!("Media {} has no uploaded embed", id))?;
            println!("{}", render_embed_cell(&item, embed));
        }
        Commands::ListConfigs {
            key,
            key_group,
            channel,
            published,
            search,
            limit,
            offset,
        } => {
            let channel_id = channel
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()
                .context("Invalid channel id")?;
            let filter = MediaConfigFilter {
                key,
                key_group,
                channel_id,
                published,
                search,
            };
            let configs = MediaConfigRepository::new(pool().await?)
                .list(&filter, limit, offset)
                .await?;
            print_json(&configs)?;
        }
        Commands::Migrate => {
            run_migrations(&pool().await?).await?;
            print_json(&serde_json::json!({ "success": true }))?;
        }
    }

    Ok(())
}
