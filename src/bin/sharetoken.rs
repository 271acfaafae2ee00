// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Pack text into URL-safe tokens and share links, and back.

use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sharetoken::{
    Gzip, Level, ShareLink, StateCodec,
    compress::DEFAULT_DECOMPRESSED_LIMIT,
    link::{DEFAULT_BASE_URL, DEFAULT_PREVIEW_CHARS, preview},
    state::DEFAULT_TOKEN_LIMIT,
    summary::Summary,
};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CliArgs {
    #[command(flatten)]
    codec: CodecArgs,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Args)]
struct CodecArgs {
    /// Compression level for packing.
    #[arg(long, value_enum, default_value_t = CliLevel::Default, global = true)]
    level: CliLevel,

    /// Upper bound for the size of unpacked payloads in bytes.
    #[arg(long, default_value_t = DEFAULT_DECOMPRESSED_LIMIT, global = true)]
    limit: u64,

    /// Upper bound for the length of unpacked tokens in characters.
    #[arg(long, default_value_t = DEFAULT_TOKEN_LIMIT, global = true)]
    token_limit: usize,

    /// Base URL of share links.
    #[arg(
        long,
        env = "SHARETOKEN_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    base_url: ShareLink,
}

impl CodecArgs {
    fn codec(&self) -> StateCodec {
        StateCodec::new(Gzip::new(self.level.into()).with_limit(self.limit))
            .with_token_limit(self.token_limit)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLevel {
    None,
    Fast,
    Default,
    Best,
}

impl From<CliLevel> for Level {
    fn from(from: CliLevel) -> Self {
        match from {
            CliLevel::None => Self::None,
            CliLevel::Fast => Self::Fast,
            CliLevel::Default => Self::Default,
            CliLevel::Best => Self::Best,
        }
    }
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Pack text into a token.
    Pack {
        /// Input file, reads from stdin if omitted.
        file: Option<PathBuf>,
    },

    /// Unpack the text of a token or share link.
    Unpack {
        /// Either a token or a share link below the base URL.
        token: String,
    },

    /// Create a share link.
    Share {
        /// Input file, reads from stdin if omitted.
        file: Option<PathBuf>,
    },
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read file {path}", path = path.display()));
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read from stdin")?;
    Ok(input)
}

fn print_summary(file: Option<&Path>, text: &str, token: &str) {
    eprintln!();
    if let Some(name) = file.and_then(Path::file_name) {
        eprintln!("  file     {name}", name = name.to_string_lossy());
    }
    for line in Summary::new(text, token).to_string().lines() {
        eprintln!("  {line}");
    }
    eprintln!("  preview  {}", preview(text.trim(), DEFAULT_PREVIEW_CHARS / 4));
    eprintln!();
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let CliArgs {
        codec: codec_args,
        command,
    } = CliArgs::parse();
    tracing::debug!(?codec_args, "Parsed arguments");
    let link = &codec_args.base_url;
    let codec = codec_args.codec();
    match command {
        CliCommand::Pack { file } => {
            let text = read_input(file.as_deref())?;
            let token = codec.pack(&text)?;
            println!("{token}");
        }
        CliCommand::Unpack { token } => {
            let token = token.trim();
            let text = if let Ok(url) = Url::parse(token) {
                link.resolve(&codec, &url)?
            } else {
                codec.unpack(token)?
            };
            print!("{text}");
        }
        CliCommand::Share { file } => {
            let text = read_input(file.as_deref())?;
            let url = link.share(&codec, &text)?;
            if let Some(token) = link.token_of(&url) {
                print_summary(file.as_deref(), &text, token);
            }
            println!("{url}");
        }
    }
    Ok(())
}
