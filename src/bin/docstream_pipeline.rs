use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

use docstream::build_pipeline_from_config;
use docstream::config::PipelineConfig;
use tracing_subscriber::EnvFilter;

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: docstream-pipeline <pipeline-config.yaml>");
            std::process::exit(1);
        }
    };

    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let config: PipelineConfig = serde_yaml::from_reader(reader)?;

    let pipeline = build_pipeline_from_config(&config)?;

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let status = pipeline.run(&mut out, &mut err);
    out.flush()?;
    Ok(status)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("docstream-pipeline error: {e}");
            std::process::exit(1);
        }
    }
}
