//! `lined` entrypoint: render one line-editor frame from command line flags.
//!
//! Useful for eyeballing styles and wrap behavior in a real terminal without
//! an editor loop. Input reading and tokenizing are out of scope: the whole
//! input text becomes a single `plain` token.
use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use core_config::{Config, load_from};
use core_render::{Candidate, CompletionOverlay, Mode, RenderRequest, Renderer, Token};
use core_terminal::{CrosstermSize, FixedWidth, TerminalSize};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lined", version, about = "Line editor frame renderer")]
struct Args {
    #[arg(long, default_value = "> ")]
    prompt: String,
    #[arg(long, default_value = "")]
    rprompt: String,
    /// Input line contents.
    #[arg(long, default_value = "")]
    text: String,
    /// Cursor byte offset into `--text` (defaults to the end).
    #[arg(long)]
    dot: Option<usize>,
    #[arg(long, value_enum, default_value_t = ModeArg::Insert)]
    mode: ModeArg,
    #[arg(long, default_value = "")]
    tip: String,
    /// Comma separated completion candidates.
    #[arg(long, value_delimiter = ',')]
    candidates: Vec<String>,
    /// Index of the selected candidate.
    #[arg(long)]
    current: Option<usize>,
    /// Byte range of `--text` replaced by the selected candidate, `START..END`.
    #[arg(long, value_parser = parse_range)]
    replace: Option<(usize, usize)>,
    /// Render at a fixed width instead of querying the terminal.
    #[arg(long)]
    width: Option<u16>,
    /// Optional configuration file path (overrides discovery of `lined.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Insert,
    Command,
    Completing,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Insert => Mode::Insert,
            ModeArg::Command => Mode::Command,
            ModeArg::Completing => Mode::Completing,
        }
    }
}

fn parse_range(s: &str) -> std::result::Result<(usize, usize), String> {
    let (a, b) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {s:?}"))?;
    let start = a.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let end = b.trim().parse::<usize>().map_err(|e| e.to_string())?;
    if start > end {
        return Err(format!("range start {start} is after end {end}"));
    }
    Ok((start, end))
}

fn is_boundary(text: &str, offset: usize) -> bool {
    offset <= text.len() && text.is_char_boundary(offset)
}

/// Build the request, validating offsets the renderer trusts blindly.
fn build_request(args: &Args, config: &Config) -> Result<RenderRequest> {
    let dot = args.dot.unwrap_or(args.text.len());
    if !is_boundary(&args.text, dot) {
        bail!("--dot {dot} is not a character boundary of --text");
    }
    let completion = if args.candidates.is_empty() {
        None
    } else {
        let (start, end) = args.replace.unwrap_or((dot, dot));
        if !is_boundary(&args.text, start) || !is_boundary(&args.text, end) {
            bail!("--replace {start}..{end} does not fit --text");
        }
        if let Some(k) = args.current
            && k >= args.candidates.len()
        {
            bail!("--current {k} is out of range");
        }
        Some(CompletionOverlay {
            candidates: args.candidates.iter().map(Candidate::plain).collect(),
            current: args.current,
            start,
            end,
            style: config.styles().completion.clone(),
        })
    };
    Ok(RenderRequest {
        prompt: args.prompt.clone(),
        rprompt: args.rprompt.clone(),
        tokens: vec![Token::new(
            args.text.clone(),
            config.styles().token("plain"),
        )],
        dot,
        completion,
        mode: args.mode.into(),
        tip: args.tip.clone(),
    })
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, "lined.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let request = build_request(&args, &config)?;
    info!(
        target: "runtime.startup",
        config = config.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        fixed_width = args.width,
        candidates = args.candidates.len(),
        "startup"
    );

    let size: Box<dyn TerminalSize> = match args.width {
        Some(w) => Box::new(FixedWidth(w)),
        None => Box::new(CrosstermSize::new()),
    };
    let mut renderer = Renderer::new(stdout().lock(), size, config.styles().clone())
        .with_fallback_width(config.fallback_columns());
    renderer.refresh(&request)?;

    // Leave the frame on screen and hand the shell a fresh line.
    let mut out = renderer.into_output();
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
