use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use irbridge_core::protocols::panasonic;
use irbridge_core::{
    DispatchConfig, DispatchReport, IntervalWidth, MessageFormat, TagRevision, TagTable,
    dispatch_to_report, load_message, parse_hex_message,
};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

mod logging;

use logging::{LogFormat, LogLevel, init_logging};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("IRBRIDGE_BUILD_COMMIT"),
    ", ",
    env!("IRBRIDGE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "irbridge")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode infrared command messages and dry-run them against a recording transmitter.",
    long_about = None,
    after_help = "Examples:\n  irbridge message dispatch command.hex --stdout\n  irbridge message dispatch --hex \"01 03 EF 0A 00\" --stdout --pretty\n  irbridge panasonic encode \"40 04 07 20 00\""
)]
struct Cli {
    /// Log verbosity for decode diagnostics (stderr)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on command messages.
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Panasonic raw byte-stream encoder.
    Panasonic {
        #[command(subcommand)]
        command: PanasonicCommands,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RevisionArg {
    Legacy,
    Current,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidthArg {
    U16,
    U32,
}

#[derive(Subcommand, Debug)]
enum MessageCommands {
    /// Decode a message, record every transmitter call and write a JSON report.
    #[command(
        after_help = "Examples:\n  irbridge message dispatch command.hex -o report.json\n  irbridge message dispatch command.bin --stdout --strict"
    )]
    Dispatch {
        /// Path to a .bin (raw bytes) or .hex (hex text) message
        #[arg(required_unless_present = "hex", conflicts_with = "hex")]
        input: Option<PathBuf>,

        /// Inline message as hex text
        #[arg(long)]
        hex: Option<String>,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any diagnostics were reported
        #[arg(long)]
        strict: bool,

        /// List diagnostics after dispatch
        #[arg(long)]
        list_diagnostics: bool,

        /// Dispatch config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Custom tag layout, overriding the config file
        #[arg(long, value_enum)]
        revision: Option<RevisionArg>,

        /// Raw interval width, overriding the config file
        #[arg(long, value_enum)]
        interval_width: Option<WidthArg>,

        /// Gap after the message in milliseconds, overriding the config file
        #[arg(long)]
        message_gap_ms: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
enum PanasonicCommands {
    /// Print the pulse train for a byte string as JSON.
    Encode {
        /// Packet bytes as hex text
        bytes: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

struct DispatchArgs {
    input: Option<PathBuf>,
    hex: Option<String>,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
    strict: bool,
    list_diagnostics: bool,
}

struct ConfigArgs {
    config: Option<PathBuf>,
    revision: Option<RevisionArg>,
    interval_width: Option<WidthArg>,
    message_gap_ms: Option<u16>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Message { command } => match command {
            MessageCommands::Dispatch {
                input,
                hex,
                report,
                stdout,
                pretty,
                compact: _,
                quiet,
                strict,
                list_diagnostics,
                config,
                revision,
                interval_width,
                message_gap_ms,
            } => cmd_message_dispatch(
                DispatchArgs {
                    input,
                    hex,
                    report,
                    stdout,
                    pretty,
                    quiet,
                    strict,
                    list_diagnostics,
                },
                ConfigArgs {
                    config,
                    revision,
                    interval_width,
                    message_gap_ms,
                },
            ),
        },
        Commands::Panasonic { command } => match command {
            PanasonicCommands::Encode { bytes, pretty } => cmd_panasonic_encode(&bytes, pretty),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    fn hinted(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err))
    }
}

const FILE_HINT: &str = "use a .bin (raw bytes) or .hex (hex text) message file";

/// Where the message bytes come from.
enum MessageSource {
    Inline(String),
    File(PathBuf),
}

impl MessageSource {
    fn from_args(input: Option<PathBuf>, hex: Option<String>) -> Result<Self, CliError> {
        match (input, hex) {
            (_, Some(hex)) => Ok(Self::Inline(hex)),
            (Some(path), None) => Ok(Self::File(resolve_message_file(&path)?)),
            (None, None) => Err(CliError::hinted(
                "missing input",
                "pass a message file or --hex",
            )),
        }
    }

    fn path(&self) -> Option<&Path> {
        match self {
            Self::Inline(_) => None,
            Self::File(path) => Some(path),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Inline(_) => "-".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> Result<Vec<u8>, CliError> {
        match self {
            Self::Inline(hex) => parse_hex_message(hex).map_err(|err| {
                CliError::hinted(
                    format!("invalid --hex message: {}", err),
                    "pass pairs of hex digits, e.g. \"01 03 EF 0A 00\"",
                )
            }),
            Self::File(path) => Ok(load_message(path)
                .with_context(|| format!("Failed to load message: {}", path.display()))?),
        }
    }
}

/// Where the JSON report goes.
enum ReportSink {
    Stdout,
    File(PathBuf),
}

impl ReportSink {
    fn from_args(stdout: bool, report: Option<PathBuf>) -> Result<Self, CliError> {
        match (stdout, report) {
            (true, _) => Ok(Self::Stdout),
            (false, Some(path)) => Ok(Self::File(path)),
            (false, None) => Err(CliError::hinted(
                "missing output path",
                "use -o/--report or --stdout",
            )),
        }
    }

    /// Refuses to overwrite the message file with its own report.
    fn check_not_input(&self, input: &Path) -> Result<(), CliError> {
        let Self::File(report) = self else {
            return Ok(());
        };
        let Some(name) = report.file_name() else {
            return Err(CliError::new(format!(
                "invalid report path: {}",
                report.display()
            )));
        };
        let dir = match report.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // A directory that does not exist yet cannot hold the input.
        let Ok(dir) = fs::canonicalize(dir) else {
            return Ok(());
        };
        let input = fs::canonicalize(input)
            .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
        if dir.join(name) == input {
            return Err(CliError::hinted(
                format!("report path must differ from input: {}", report.display()),
                "choose a different output path",
            ));
        }
        Ok(())
    }

    fn write(&self, json: &str, quiet: bool) -> Result<(), CliError> {
        let path = match self {
            Self::Stdout => {
                print!("{}", json);
                return Ok(());
            }
            Self::File(path) => path,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", path.display());
        }
        Ok(())
    }
}

fn cmd_message_dispatch(args: DispatchArgs, config_args: ConfigArgs) -> Result<(), CliError> {
    let config = build_config(config_args)?;
    let source = MessageSource::from_args(args.input, args.hex)?;
    let sink = ReportSink::from_args(args.stdout, args.report)?;
    if let Some(input) = source.path() {
        sink.check_not_input(input)?;
    }

    let message = source.load()?;
    let mut rep =
        dispatch_to_report(&source.label(), &message, config).context("invalid dispatch config")?;
    rep.generated_at = now_rfc3339();
    sink.write(&to_json(&rep, args.pretty)?, args.quiet)?;

    if args.list_diagnostics && !args.quiet {
        print_diagnostics(&rep);
    }
    if args.strict && !rep.diagnostics.is_empty() {
        return Err(CliError::hinted(
            format!("{} dispatch diagnostics detected", rep.diagnostics.len()),
            "use --list-diagnostics to inspect",
        ));
    }
    Ok(())
}

fn cmd_panasonic_encode(bytes: &str, pretty: bool) -> Result<(), CliError> {
    let data = parse_hex_message(bytes).map_err(|err| {
        CliError::hinted(
            format!("invalid packet bytes: {}", err),
            "pass pairs of hex digits, e.g. \"40 04 07 20 00\"",
        )
    })?;
    let value = serde_json::json!({
        "frequency": panasonic::layout::CARRIER_HZ,
        "pulses": panasonic::encode_panasonic_raw(&data),
    });
    println!("{}", to_json(&value, pretty)?);
    Ok(())
}

/// Start from `--config` (or the defaults), then apply flag overrides.
fn build_config(args: ConfigArgs) -> Result<DispatchConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            DispatchConfig::from_json_str(&text).map_err(|err| {
                CliError::hinted(
                    format!("invalid config {}: {}", path.display(), err),
                    TAG_HINT,
                )
            })?
        }
        None => DispatchConfig::default(),
    };

    if let Some(revision) = args.revision {
        let revision = match revision {
            RevisionArg::Legacy => TagRevision::Legacy,
            RevisionArg::Current => TagRevision::Current,
        };
        // Aliases describe the sender, not the revision; keep them.
        let raw_aliases = std::mem::take(&mut config.tags.raw_aliases);
        config.tags = TagTable {
            raw_aliases,
            ..TagTable::for_revision(revision)
        };
    }
    if let Some(width) = args.interval_width {
        config.interval_width = match width {
            WidthArg::U16 => IntervalWidth::U16,
            WidthArg::U32 => IntervalWidth::U32,
        };
    }
    if let Some(gap) = args.message_gap_ms {
        config.message_gap_ms = gap;
    }

    config
        .validate()
        .map_err(|err| CliError::hinted(format!("invalid dispatch config: {}", err), TAG_HINT))?;
    Ok(config)
}

const TAG_HINT: &str = "custom tags must be unique values in 239..=255; \
    legacy and current tables keep their fixed tags";

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| irbridge_core::DEFAULT_GENERATED_AT.to_string())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(json.context("JSON serialization failed")?)
}

fn print_diagnostics(rep: &DispatchReport) {
    eprintln!("Diagnostics:");
    for diagnostic in &rep.diagnostics {
        match diagnostic.frame {
            Some(frame) => eprintln!(
                "  {} frame {}: {}",
                diagnostic.id, frame, diagnostic.message
            ),
            None => eprintln!("  {}: {}", diagnostic.id, diagnostic.message),
        }
    }
}

/// Resolve a path or glob to exactly one existing `.bin`/`.hex` file.
fn resolve_message_file(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    let candidates = if pattern.contains(['*', '?', '[']) {
        glob_message_files(&pattern)?
    } else {
        vec![input.to_path_buf()]
    };

    let path = match <[PathBuf; 1]>::try_from(candidates) {
        Ok([path]) => path,
        Err(all) => {
            return Err(CliError::hinted(
                format!("pattern '{}' matches {} message files", pattern, all.len()),
                "pass a single message file, or run once per file",
            ));
        }
    };

    if !path.is_file() {
        return Err(CliError::hinted(
            format!("input file not found: {}", path.display()),
            FILE_HINT,
        ));
    }
    if MessageFormat::from_path(&path).is_none() {
        return Err(CliError::hinted(
            format!("unsupported input format '{}'", path.display()),
            FILE_HINT,
        ));
    }
    Ok(path)
}

/// Glob matches that are files in a supported message format.
fn glob_message_files(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let invalid = |detail: String| {
        CliError::hinted(format!("invalid input pattern '{}'", pattern), detail)
    };
    let mut files = Vec::new();
    for entry in glob(pattern).map_err(|err| invalid(err.msg.to_string()))? {
        let path = entry.map_err(|err| invalid(err.to_string()))?;
        if path.is_file() && MessageFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(CliError::hinted(
            format!("no message files match pattern '{}'", pattern),
            "check the path or quote the pattern; expected .bin or .hex",
        ));
    }
    Ok(files)
}
