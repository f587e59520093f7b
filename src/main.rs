use std::error::Error as _;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use draw_label_boxes::{RenderConfig, run};
use log::{LevelFilter, error};

/// Draw bounding boxes from label files onto copies of the according images.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Width of the normalized coordinate space (defaults to each image's width)
    #[arg(long = "width", value_name = "PIXELS")]
    image_width: Option<u32>,

    /// Height of the normalized coordinate space (defaults to each image's height)
    #[arg(long = "height", value_name = "PIXELS")]
    image_height: Option<u32>,

    /// File suffix of image files
    #[arg(short = 'f', long = "format", default_value = "jpg")]
    image_suffix: String,

    /// Text file with row indexed classes
    #[arg(
        short = 'c',
        long = "class_config",
        visible_alias = "class-config",
        default_value = "classes.txt"
    )]
    class_config_path: PathBuf,

    /// Directory with labels and images; outputs are written there too
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Print more diagnostics (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for RenderConfig {
    fn from(cli: Cli) -> Self {
        RenderConfig {
            dir: cli.dir,
            image_suffix: cli.image_suffix,
            class_config: cli.class_config_path,
            dimension_override: (cli.image_width, cli.image_height),
        }
    }
}

/// Accepts the single-dash `-width`/`-height` spelling by rewriting it to the
/// long form clap understands.
fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            for flag in ["-width", "-height"] {
                if arg == flag || arg.starts_with(&format!("{flag}=")) {
                    return format!("-{arg}");
                }
            }
            arg
        })
        .collect()
}

fn setup_logger(verbose: u8) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        builder.filter(None, LevelFilter::Off);
        builder.filter(Some("draw_label_boxes"), level);
    }

    builder.format(|buf, record| {
        let module = record.module_path().unwrap_or("unknown");
        writeln!(buf, "{:<5} {module}: {}", record.level(), record.args())
    });
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args()));
    setup_logger(cli.verbose);

    match run(&RenderConfig::from(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
