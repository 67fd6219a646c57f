use inline_graphviz::{Pipeline, PreprocessOptions, make_extension};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "INLINE_GRAPHVIZ_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Preprocess(inline_graphviz::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Preprocess(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<inline_graphviz::Error> for CliError {
    fn from(value: inline_graphviz::Error) -> Self {
        Self::Preprocess(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    out: Option<String>,
    config: Option<PathBuf>,
    graphviz_bin_dir: Option<PathBuf>,
    strict: bool,
    verbose: bool,
}

fn usage() -> &'static str {
    "inline-graphviz\n\
\n\
USAGE:\n\
  inline-graphviz [--config <path>] [--graphviz-bin-dir <dir>] [--strict] [--verbose] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', Markdown is read from stdin.\n\
  - Output goes to stdout unless --out is given.\n\
  - Blocks look like `{% dot name.svg ... %}` or ```graphviz dot name.png ... ```.\n\
  - --config reads JSON options: graphvizBinDir, extraArgs, failOnRenderError.\n\
  - --strict exits with an error instead of emitting the <pre> diagnostic document.\n\
  - Set INLINE_GRAPHVIZ_LOG (e.g. `debug`) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--strict" => args.strict = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--graphviz-bin-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.graphviz_bin_dir = Some(PathBuf::from(dir));
            }
            "--out" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(a.clone());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_options(args: &Args) -> Result<PreprocessOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => PreprocessOptions::from_json_file(path)?,
        None => PreprocessOptions::default(),
    };
    if let Some(dir) = &args.graphviz_bin_dir {
        options = options.with_graphviz_bin_dir(dir.clone());
    }
    if args.strict {
        options = options.with_fail_on_render_error(true);
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let options = build_options(&args)?;
    tracing::debug!(?options, input = ?args.input, "preprocessing");

    let text = read_input(args.input.as_deref())?;
    let mut pipeline = Pipeline::new();
    pipeline.register_first(make_extension(options));
    let out = pipeline.run_text(&text)?;
    write_text(&out, args.out.as_deref())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
