mod opt;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::opt::Opt;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use scouting::config::Config;
use scouting::import::import;

fn main() -> Result<()> {
    let opt = Opt::parse();

    let env = Env::default().filter_or("SCOUTING_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    let pipeline = Config::load(&opt.config)?.into_pipeline()?;
    debug!("{} producers", pipeline.len());

    let mut events = Vec::new();
    for file in &opt.files {
        debug!("Importing events from {:?}", file);
        import(file, &mut events)?;
    }
    info!("Read {} events", events.len());

    let out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);
    for output in pipeline.run_all(&events) {
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    }
    out.flush()?;
    info!("done");
    Ok(())
}
