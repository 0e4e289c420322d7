// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use scriptcast::app_config::{Config, LogLevel};
use scriptcast::audio_join;
use scriptcast::captions::CaptionTrack;
use scriptcast::script::Script;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a timed SRT caption file from a script
    Captions(CaptionsArgs),

    /// Join a directory of WAV clips into one continuous file
    Join(JoinArgs),

    /// Export a script as one text file per line
    Export(ExportArgs),

    /// Generate shell completions for scriptcast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Script source: a JSON document with a "lines" array, or flat text with --txt
    #[arg(short, long, value_name = "INPUT_PATH")]
    input: PathBuf,

    /// Output SRT file path
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    out: PathBuf,

    /// Treat the input as a flat text file, one script line per row
    #[arg(long)]
    txt: bool,

    /// Narration rate in words per second
    #[arg(long)]
    wps: Option<f64>,

    /// Gap between consecutive cues in seconds
    #[arg(long)]
    gap: Option<f64>,

    /// Lead-in before the first cue in seconds
    #[arg(long)]
    lead: Option<f64>,

    /// Maximum characters per displayed row
    #[arg(long)]
    maxlen: Option<usize>,
}

#[derive(Parser, Debug)]
struct JoinArgs {
    /// Directory containing the WAV clips to join
    #[arg(short, long, value_name = "INPUT_DIR")]
    indir: PathBuf,

    /// Output WAV file path
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    out: PathBuf,

    /// Silence inserted after each clip in milliseconds
    #[arg(long)]
    gap_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Script source: a JSON document with a "lines" array, or flat text with --txt
    #[arg(short, long, value_name = "INPUT_PATH")]
    input: PathBuf,

    /// Output directory for the per-line files
    #[arg(short = 'd', long, value_name = "OUTPUT_DIR")]
    outdir: PathBuf,

    /// Treat the input as a flat text file, one script line per row
    #[arg(long)]
    txt: bool,
}

/// scriptcast - script-to-narration batch tools
///
/// Turns short text scripts into the timed artifacts a narration pipeline
/// consumes: SRT caption files, joined narration audio, per-line TTS inputs.
#[derive(Parser, Debug)]
#[command(name = "scriptcast")]
#[command(version = "0.1.0")]
#[command(about = "Script captioning and narration audio tools")]
#[command(long_about = "scriptcast turns short text scripts into timed caption files and \
continuous narration audio.

EXAMPLES:
    scriptcast captions -i script.json -o out/captions.srt   # Script JSON to SRT
    scriptcast captions -i script.txt --txt -o out.srt       # Flat text to SRT
    scriptcast captions -i s.json -o out.srt --wps 2.5       # Slower narration rate
    scriptcast join -i voice/wavs -o out/narration.wav       # Join WAV clips
    scriptcast join -i wavs -o out.wav --gap-ms 300          # Longer silence gaps
    scriptcast export -i script.json -d voice/script         # One file per line
    scriptcast completions bash > scriptcast.bash            # Generate completions

CONFIGURATION:
    Defaults for the timing and audio parameters are stored in conf.json.
    You can specify a different config file with --config. If the config
    file doesn't exist, a default one will be created automatically.

ORDERING:
    The join command concatenates clips in lexicographic filename order.
    Name clips with zero-padded numeric prefixes (01.wav, 02.wav, ...) so
    that order matches playback order.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scriptcast", &mut std::io::stdout());
            Ok(())
        }
        command => {
            let config = load_config(&cli.config_path, cli.log_level.as_ref())?;

            // If log level was not set via command line, update it from config now
            if cli.log_level.is_none() {
                log::set_max_level(level_filter(&config.log_level));
            }

            match command {
                Commands::Captions(args) => run_captions(args, &config),
                Commands::Join(args) => run_join(args, &config),
                Commands::Export(args) => run_export(args),
                Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    }
}

/// Load the configuration file, creating a default one when absent
fn load_config(config_path: &str, cli_log_level: Option<&CliLogLevel>) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

/// Load a script from the CLI input arguments
fn load_script(input: &Path, flat_text: bool) -> Result<Script> {
    let script = if flat_text {
        Script::from_text_file(input)?
    } else {
        Script::from_json_file(input)?
    };

    Ok(script)
}

fn run_captions(args: CaptionsArgs, config: &Config) -> Result<()> {
    let mut timing = config.timing.clone();
    if let Some(wps) = args.wps {
        timing.words_per_second = wps;
    }
    if let Some(gap) = args.gap {
        timing.cue_gap_secs = gap;
    }
    if let Some(lead) = args.lead {
        timing.lead_in_secs = lead;
    }
    if let Some(maxlen) = args.maxlen {
        timing.max_line_chars = maxlen;
    }

    let mut validated = config.clone();
    validated.timing = timing.clone();
    validated
        .validate()
        .context("Invalid timing parameters")?;

    let script = load_script(&args.input, args.txt)?;
    if script.is_empty() {
        warn!("Script {:?} has no non-empty lines, writing an empty caption file", args.input);
    }

    let track = CaptionTrack::from_lines(&script.lines, &timing);
    let written = track.write_to_srt(&args.out)?;

    info!("Wrote {} cues to {:?}", track.cues.len(), written);

    Ok(())
}

fn run_join(args: JoinArgs, config: &Config) -> Result<()> {
    let gap_ms = args.gap_ms.unwrap_or(config.audio.silence_gap_ms);

    let summary = audio_join::join_wav_dir(&args.indir, &args.out, gap_ms)?;

    info!(
        "Joined {} clips into {:?} ({} Hz, {} ch, {} ms gaps)",
        summary.clip_count,
        summary.output,
        summary.spec.sample_rate,
        summary.spec.channels,
        gap_ms
    );

    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let script = load_script(&args.input, args.txt)?;

    let written = script.export_to_dir(&args.outdir)?;

    info!("Wrote {} files to {:?}", written.len(), args.outdir);

    Ok(())
}
