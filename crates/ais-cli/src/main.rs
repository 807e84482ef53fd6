use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ais_codec::{Decoder, DecoderConfig, Encoder, EncoderConfig};
use ais_models::{csv_header, AisMessage};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ais")]
#[command(about = "Decode and encode AIS messages carried in NMEA 0183 sentences")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read `!AIVDM` / `!AIVDO` lines and write one report line per message
    Decode(DecodeArgs),
    /// Read canonical JSON records (one per line) and write sentences
    Encode(EncodeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Flat JSON object per line
    Json,
    /// Comma-separated values, a header line before the first record of each type
    Csv,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file (standard input when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    /// Accept sentences whose checksum is missing or wrong
    #[arg(long)]
    pub no_checksum: bool,

    /// Decode each fragment on its own instead of buffering multipart messages
    #[arg(long)]
    pub no_reassembly: bool,

    /// Seconds an incomplete multipart message is kept
    #[arg(long, value_name = "SECONDS")]
    pub max_age: Option<u64>,
}

impl DecodeArgs {
    /// Apply the command-line overrides on top of `config`.
    fn decoder_config(&self, mut config: DecoderConfig) -> DecoderConfig {
        if self.no_checksum {
            config.validate_checksum = false;
        }
        if self.no_reassembly {
            config.enable_reassembly = false;
        }
        if let Some(age) = self.max_age {
            config.max_reassembly_age_seconds = age;
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input file (standard input when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Radio channel written into each sentence (ex: A)
    #[arg(short, long)]
    pub channel: Option<char>,

    /// Two-letter talker id (ex: AI)
    #[arg(short, long)]
    pub talker: Option<String>,

    /// Fixed sequence id for multipart messages
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub sequence_id: Option<u8>,

    /// Armored characters per sentence before splitting
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_fragment_chars: Option<u16>,

    /// Never split a message across sentences
    #[arg(long)]
    pub no_fragmentation: bool,

    /// Write `VDO` (own vessel) sentences instead of `VDM`
    #[arg(long)]
    pub own_vessel: bool,
}

impl EncodeArgs {
    /// Apply the command-line overrides on top of `config`.
    fn encoder_config(&self, mut config: EncoderConfig) -> EncoderConfig {
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
        if let Some(talker) = &self.talker {
            config.talker = talker.to_ascii_uppercase();
        }
        if self.sequence_id.is_some() {
            config.sequence_id = self.sequence_id;
        }
        if let Some(chars) = self.max_fragment_chars {
            config.max_fragment_chars = usize::from(chars);
        }
        if self.no_fragmentation {
            config.enable_fragmentation = false;
        }
        if self.own_vessel {
            config.own_vessel = true;
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Decode every line of `input` and write report lines to `out`.
///
/// The report timestamp is the tag block receive time when the sentence
/// carries one, `now()` otherwise.
fn run_decode(
    decoder: &Decoder,
    format: ReportFormat,
    input: impl BufRead,
    mut out: impl Write,
    now: impl Fn() -> DateTime<Utc>,
) -> Result<()> {
    let mut headers_written = HashSet::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", index + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(decoded) = decoder.parse_sentence(line) else {
            continue;
        };
        let timestamp = decoded.received_at.unwrap_or_else(&now);
        let message = &decoded.message;
        match format {
            ReportFormat::Json => match message.to_json_line(timestamp) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(e) => warn!(line = index + 1, error = %e, "could not render report"),
            },
            ReportFormat::Csv => {
                let message_type = message.message_type();
                if headers_written.insert(message_type) {
                    writeln!(out, "{}", csv_header(message_type))?;
                }
                writeln!(out, "{}", message.to_csv_line(timestamp))?;
            }
        }
    }
    out.flush()?;

    let stats = decoder.stats();
    info!(
        sentences = stats.sentences,
        decoded = stats.decoded,
        pending = stats.pending,
        checksum_failures = stats.checksum_failures,
        malformed = stats.malformed,
        truncated = stats.truncated,
        "decode finished"
    );
    Ok(())
}

/// Encode every JSON record of `input` and write the sentences to `out`.
/// Records that do not parse or do not encode are logged and skipped.
fn run_encode(encoder: &Encoder, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut encoded = 0u64;
    let mut skipped = 0u64;
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let message: AisMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping record that is not a message");
                skipped += 1;
                continue;
            }
        };
        match encoder.encode(&message) {
            Ok(sentences) => {
                for sentence in sentences {
                    out.write_all(sentence.as_bytes())?;
                }
                encoded += 1;
            }
            Err(e) => {
                warn!(
                    line = index + 1,
                    message_type = message.message_type(),
                    mmsi = message.mmsi(),
                    error = %e,
                    "skipping record that does not encode"
                );
                skipped += 1;
            }
        }
    }
    out.flush()?;
    info!(encoded, skipped, "encode finished");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = BufWriter::new(io::stdout().lock());

    match cli.command {
        Commands::Decode(args) => {
            let decoder = Decoder::new(args.decoder_config(DecoderConfig::from_env()));
            let input = open_input(args.input.as_deref())?;
            run_decode(&decoder, args.format, input, stdout, Utc::now)
        }
        Commands::Encode(args) => {
            let config = args.encoder_config(EncoderConfig::from_env());
            config.validate().context("invalid encoder settings")?;
            let encoder = Encoder::new(config);
            let input = open_input(args.input.as_deref())?;
            run_encode(&encoder, input, stdout)
        }
    }
}
