use std::env;
use std::io::{self, Write};

use docstream::transformers::Builtin;
use docstream::{PipelineBuilder, TransformConfig};
use tracing_subscriber::EnvFilter;

fn print_usage_and_exit() -> ! {
    eprintln!("Usage:");
    eprintln!("  docstream [-o yaml|json] [--annotate KEY=VALUE | --unannotate KEY] <location>...");
    eprintln!();
    eprintln!("A location is '-' for stdin, an HTTPS URL, a file or a directory.");
    std::process::exit(1);
}

struct Args {
    format: String,
    transform: TransformConfig,
    locations: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        format: "yaml".to_string(),
        transform: TransformConfig::Identity,
        locations: Vec::new(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                parsed.format = args.next().ok_or("--output requires a format")?;
            }
            "--annotate" => {
                let pair = args.next().ok_or("--annotate requires KEY=VALUE")?;
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("invalid annotation {pair:?}, expected KEY=VALUE"))?;
                parsed.transform = TransformConfig::Annotate {
                    key: key.to_string(),
                    value: value.to_string(),
                    remove: false,
                };
            }
            "--unannotate" => {
                let key = args.next().ok_or("--unannotate requires KEY")?;
                parsed.transform = TransformConfig::Annotate {
                    key,
                    value: String::new(),
                    remove: true,
                };
            }
            "-h" | "--help" => print_usage_and_exit(),
            _ => parsed.locations.push(arg),
        }
    }

    if parsed.locations.is_empty() {
        return Err("missing input location".into());
    }
    Ok(parsed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("docstream error: {e}");
            print_usage_and_exit();
        }
    };

    let pipeline = match PipelineBuilder::new()
        .inputs_from_args(&args.locations)
        .with_format(args.format)
        .build(Builtin::from(&args.transform))
    {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error reading inputs:\n{e}");
            std::process::exit(1);
        }
    };

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let status = pipeline.run(&mut out, &mut err);
    let _ = out.flush();
    std::process::exit(status);
}
