use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tsip_core::{
    ByteSource, CommandSource, DecodedFrame, Framer, InputInfo, ReaderSource, SerialConfig,
    StreamSummary, SummaryBuilder, open_serial, spawn_pipeline, summarize_source,
};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TSIP_BUILD_COMMIT"),
    " ",
    env!("TSIP_BUILD_DATE"),
    ")"
);

const STDIN_INPUT: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "tsip")]
#[command(version = VERSION)]
#[command(
    about = "Decoder for the Trimble Standard Interface Protocol (Resolution-T timing receivers).",
    long_about = None,
    after_help = "Examples:\n  tsip capture decode capture.tsip -o summary.json\n  gpspipe -R | tsip capture decode - --stdout --packets\n  tsip monitor --port /dev/ttyUSB0"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on recorded raw TSIP byte streams.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Stream decoded packets from a live receiver as JSON lines.
    #[command(
        after_help = "Examples:\n  tsip monitor --port /dev/ttyUSB0\n  TSIP_PORT=/dev/ttyS1 tsip monitor --baud 9600\n  tsip monitor --gpspipe"
    )]
    Monitor {
        /// Serial device the receiver is attached to
        #[arg(long, env = "TSIP_PORT", required_unless_present = "gpspipe")]
        port: Option<String>,

        /// Serial line speed (default 9600)
        #[arg(long, env = "TSIP_BAUD")]
        baud: Option<u32>,

        /// Read raw receiver bytes from `gpspipe -R` instead of a serial device
        #[arg(long)]
        gpspipe: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a recorded stream and write a versioned JSON summary.
    #[command(
        after_help = "Examples:\n  tsip capture decode capture.tsip -o summary.json\n  tsip capture decode 'logs/*.tsip' --stdout --pretty\n  tsip capture decode - --stdout --packets < capture.tsip"
    )]
    Decode {
        /// Raw TSIP capture file, a glob matching one file, or - for stdin
        input: PathBuf,

        /// Output summary path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the JSON summary to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Also write every decoded packet to stdout as a JSON line
        #[arg(long)]
        packets: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(
        &cli.command,
        Commands::Capture {
            command: CaptureCommands::Decode { quiet: true, .. }
        }
    );
    init_logging(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode {
                input,
                output,
                stdout,
                pretty,
                compact,
                packets,
                quiet,
            } => cmd_capture_decode(input, output, stdout, pretty, compact, packets, quiet),
        },
        Commands::Monitor {
            port,
            baud,
            gpspipe,
        } => cmd_monitor(port, baud, gpspipe),
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

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info"),
        (false, 2) => Some("debug"),
        (false, _) => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_capture_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    packets: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let output = if stdout {
        None
    } else {
        Some(output.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };

    let summary = if input.as_os_str() == STDIN_INPUT {
        let source = ReaderSource::new(io::stdin().lock());
        decode_stream(source, STDIN_INPUT, packets)?
    } else {
        let resolved_input = resolve_input_path(&input)?;
        validate_input_file(&resolved_input)?;
        if let Some(output) = output.as_ref() {
            ensure_distinct_output(&resolved_input, output)?;
        }
        let source = ReaderSource::open(&resolved_input).with_context(|| {
            format!("Failed to open input file: {}", resolved_input.display())
        })?;
        decode_stream(source, &resolved_input.display().to_string(), packets)?
    };

    let json = serialize_summary(&summary, pretty, compact)?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write summary: {}", output.display()))?;

    if !quiet {
        eprintln!(
            "OK: {} frames decoded, summary written -> {}",
            summary.frames_total,
            output.display()
        );
    }
    Ok(())
}

fn decode_stream<S: ByteSource>(
    source: S,
    input_path: &str,
    packets: bool,
) -> Result<StreamSummary, CliError> {
    if !packets {
        return summarize_source(source, input_path)
            .context("TSIP decoding failed")
            .map_err(Into::into);
    }

    let mut source = source;
    let mut builder = SummaryBuilder::new();
    let mut out = io::stdout().lock();
    let mut write_error = None;
    let stats = tsip_core::run(&mut source, &mut Framer::new(), |decoded| {
        builder.observe(decoded.id, &decoded.result);
        if write_error.is_none() {
            write_error = write_record(&mut out, &decoded).err();
        }
    })
    .context("TSIP decoding failed")?;
    if let Some(err) = write_error {
        return Err(err.into());
    }

    Ok(builder.finish(InputInfo {
        path: input_path.to_string(),
        bytes: stats.bytes,
    }))
}

fn cmd_monitor(port: Option<String>, baud: Option<u32>, gpspipe: bool) -> Result<(), CliError> {
    let source: Box<dyn ByteSource + Send> = if gpspipe {
        Box::new(CommandSource::gpspipe().map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("install gpsd-clients or use --port".to_string()),
            )
        })?)
    } else {
        let port = port.ok_or_else(|| {
            CliError::new(
                "missing serial port",
                Some("use --port, TSIP_PORT or --gpspipe".to_string()),
            )
        })?;
        let mut config = SerialConfig::new(port);
        if let Some(baud) = baud {
            config = config.baud_rate(baud);
        }
        Box::new(open_serial(&config).map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("check the device path and permissions".to_string()),
            )
        })?)
    };

    let pipeline = spawn_pipeline(source, Framer::new()).context("failed to start pipeline")?;
    let mut out = io::stdout().lock();
    for decoded in pipeline.iter() {
        write_record(&mut out, &decoded)?;
    }
    let stats = pipeline.join().context("TSIP stream failed")?;
    info!(bytes = stats.bytes, frames = stats.frames, "stream ended");
    Ok(())
}

fn write_record(out: &mut impl Write, decoded: &DecodedFrame) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, &decoded.record()).context("JSON serialization failed")?;
    writeln!(out).context("Failed to write to stdout")?;
    out.flush().context("Failed to write to stdout")?;
    Ok(())
}

fn serialize_summary(
    summary: &StreamSummary,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A directory that does not exist yet cannot hold the input.
    let Ok(output_dir) = fs::canonicalize(output_dir) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| CliError::new(format!("invalid output path: {}", output.display()), None))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw TSIP capture file, or - to read stdin".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a raw TSIP capture file, or - to read stdin".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str("; matches: ");
        message.push_str(&listed);
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(
            message,
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
