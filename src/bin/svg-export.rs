use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory as _, Parser};
use tracing::Level;

use svg_export::{
    Annotations, DryRunRenderer, ExportError, ExportOptions, ExportSession, InkscapeOpts,
    InkscapeRenderer, Renderer, ResolveOptions, Scale, default_program,
};

const EXIT_FAILURE: u8 = 7;

#[derive(Parser, Debug)]
#[command(
    name = "svg-export",
    version,
    about = "Export titled SVG objects to PNG at multiple resolutions through Inkscape"
)]
struct Cli {
    /// SVG files to export.
    files: Vec<PathBuf>,

    /// Resolution multiplier (repeatable); defaults to 1 and 2.
    #[arg(long = "scale", value_name = "N")]
    scales: Vec<Scale>,

    /// Output directory.
    #[arg(long, visible_alias = "out", value_name = "DIR", default_value = ".")]
    outdir: PathBuf,

    /// Inkscape executable.
    #[arg(long, value_name = "PATH", default_value_os_t = default_program())]
    inkscape: PathBuf,

    /// Only export objects carrying an explicit filename attribute.
    #[arg(long)]
    no_titles: bool,

    /// Print the planned exports as JSON lines instead of running Inkscape.
    #[arg(long)]
    dry_run: bool,

    /// Keep the `.patched.svg` working copy next to the input.
    #[arg(long)]
    keep_patched: bool,

    /// More logging (-v shows renderer command lines, -vv traces everything).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.files.is_empty() {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExportError::Renderer {
            status,
            stdout,
            stderr,
        }) => {
            if !stdout.trim().is_empty() {
                eprintln!("{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                eprintln!("{}", stderr.trim_end());
            }
            eprintln!("Export failed: Inkscape exited with {status}");
            ExitCode::from(EXIT_FAILURE)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), ExportError> {
    let opts = ExportOptions {
        scales: if cli.scales.is_empty() {
            Scale::defaults()
        } else {
            cli.scales
        },
        outdir: cli.outdir,
        resolve: ResolveOptions {
            discover_titles: !cli.no_titles,
            annotations: Annotations::default(),
        },
        keep_working_copy: cli.keep_patched,
    };

    let mut renderer: Box<dyn Renderer> = if cli.dry_run {
        Box::new(DryRunRenderer::new(std::io::stdout().lock()))
    } else {
        Box::new(InkscapeRenderer::new(InkscapeOpts {
            program: cli.inkscape,
        }))
    };

    let reports = ExportSession::new(opts, renderer.as_mut()).export_files(&cli.files)?;
    let directives: usize = reports.iter().map(|r| r.directives).sum();
    tracing::info!(files = reports.len(), directives, "export complete");
    Ok(())
}

/// Rewrite legacy `--name:value` flags as `--name=value`.
///
/// Arguments after a bare `--` and anything that already contains `=` in the flag name are left
/// alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(|arg| {
            if positional_only {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                positional_only = true;
                return arg;
            }
            match legacy_flag(text) {
                Some(normalized) => normalized.into(),
                None => arg,
            }
        })
        .collect()
}

fn legacy_flag(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix("--")?;
    let colon = rest.find(':')?;
    let name = &rest[..colon];
    let is_flag_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-');
    is_flag_name.then(|| format!("--{name}={}", &rest[colon + 1..]))
}

#[cfg(test)]
#[path = "../../tests/unit/cli.rs"]
mod tests;
