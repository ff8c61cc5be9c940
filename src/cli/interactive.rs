// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Line-oriented front end for [`StudioView`]

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::save_download;
use crate::studio::{HttpStudioApi, NoticeLevel, StudioView, ViewPhase, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Prompt(String),
    Generate,
    Select(usize),
    Vary,
    Download,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Selection numbers are 1-based as shown on screen.
pub fn parse_command(line: &str) -> Result<ViewCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "prompt" | "p" => {
            if rest.is_empty() {
                Err("usage: prompt <text>".to_string())
            } else {
                Ok(ViewCommand::Prompt(rest.to_string()))
            }
        }
        "generate" | "g" => Ok(ViewCommand::Generate),
        "select" | "s" => rest
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| ViewCommand::Select(n - 1))
            .ok_or_else(|| "usage: select <1-4>".to_string()),
        "vary" | "v" => Ok(ViewCommand::Vary),
        "download" | "d" => Ok(ViewCommand::Download),
        "show" | "" => Ok(ViewCommand::Show),
        "help" | "h" | "?" => Ok(ViewCommand::Help),
        "quit" | "q" | "exit" => Ok(ViewCommand::Quit),
        other => Err(format!("unknown command '{}'; type 'help'", other)),
    }
}

/// Text rendering of the view state
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    let heading = match state.phase() {
        ViewPhase::Idle => "No images yet",
        ViewPhase::Generating => "Creating your images...",
        ViewPhase::ImagesShown { selected: true } => "Selected Image",
        ViewPhase::ImagesShown { selected: false } => "Generated Images",
    };
    out.push_str(heading);
    out.push('\n');

    if !state.prompt.is_empty() {
        out.push_str(&format!("Prompt: {}\n", state.prompt));
    }

    let selected = state.selected_index();
    for (i, image) in state.images.iter().enumerate() {
        let marker = if selected == Some(i) { '*' } else { ' ' };
        let shown = if image.is_empty() { "<no image>" } else { image };
        out.push_str(&format!("{} [{}] {}\n", marker, i + 1, shown));
    }

    if let Some(notice) = &state.notice {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        out.push_str(&format!("({}) {}: {}\n", tag, notice.title, notice.description));
    }

    out
}

const HELP: &str = "\
commands:
  prompt <text>   set the prompt
  generate        generate four images from the prompt
  select <n>      select image n
  vary            generate variations of the selected image
  download        save the selected image to the current directory
  show            print the current state
  quit            leave";

pub async fn run(api: HttpStudioApi) -> Result<()> {
    let mut view = StudioView::new(api);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match command {
            ViewCommand::Prompt(text) => view.set_prompt(text),
            ViewCommand::Generate => {
                if !view.state().can_generate() {
                    println!("set a prompt first");
                    continue;
                }
                view.generate().await;
            }
            ViewCommand::Select(index) => {
                if view.select(index).is_none() {
                    println!("no image {}", index + 1);
                    continue;
                }
            }
            ViewCommand::Vary => {
                view.regenerate_variations().await;
            }
            ViewCommand::Download => {
                if let Some(link) = view.download() {
                    match save_download(view.api(), link, Path::new(".")).await {
                        Ok(path) => println!("Saved {}", path.display()),
                        Err(e) => println!("Download Error: {}", e),
                    }
                }
            }
            ViewCommand::Show => {}
            ViewCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ViewCommand::Quit => break,
        }

        print!("{}", render(view.state()));
    }

    Ok(())
}
