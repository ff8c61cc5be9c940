// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod interactive;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

use crate::api::download::attachment_filename;
use crate::studio::{HttpStudioApi, StudioApi};

/// Image Studio terminal client
#[derive(Parser, Debug)]
#[command(name = "studio-cli")]
#[command(version = "0.1.0")]
#[command(about = "Generate, vary and download images through an Image Studio server", long_about = None)]
pub struct Cli {
    /// Base URL of the Image Studio server
    #[arg(long, env = "STUDIO_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate four images from a prompt
    Generate {
        /// Prompt words, joined with spaces
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Generate four variations of an image
    Vary {
        /// URL of the source image
        image_url: String,
    },

    /// Download an image through the server's proxy
    Download {
        /// URL of the image
        image_url: String,

        /// Directory the file is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Drive the studio view from the terminal
    Interactive,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let api = HttpStudioApi::new(&cli.server)?;

    match cli.command {
        Commands::Generate { prompt } => {
            let images = api.generate(&prompt.join(" ")).await?;
            print_images(&images);
            Ok(())
        }
        Commands::Vary { image_url } => {
            let images = api.variations(&image_url).await?;
            print_images(&images);
            Ok(())
        }
        Commands::Download {
            image_url,
            output_dir,
        } => {
            let link = api.download_url(&image_url)?;
            let path = save_download(&api, link, &output_dir).await?;
            println!("Saved {}", path.display());
            Ok(())
        }
        Commands::Interactive => interactive::run(api).await,
    }
}

fn print_images(images: &[String]) {
    for (i, image) in images.iter().enumerate() {
        if image.is_empty() {
            println!("  [{}] <no image>", i + 1);
        } else {
            println!("  [{}] {}", i + 1, image);
        }
    }
}

/// Follow a download link and write the body under `output_dir`,
/// named after the server's `Content-Disposition` header
pub async fn save_download(api: &HttpStudioApi, link: Url, output_dir: &Path) -> Result<PathBuf> {
    let response = api.follow_download(link).await?;

    let filename = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| attachment_filename(Utc::now()));

    let bytes = response.bytes().await?;
    let path = output_dir.join(&filename);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;

    info!("Downloaded {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Extract a bare file name from an `attachment; filename="..."` header.
/// Directory components are stripped.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let raw = header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');

    Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
