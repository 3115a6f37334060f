//! Run the comment ingestion handler on one event

use std::io::Read;

use anyhow::Context;
use pico_args::Arguments;
use sentiment_pipeline::ingestion::{self, Config, Event};

const HELP: &str = "\
Usage: ingest [EVENT_FILE]

Arguments:
  EVENT_FILE           A JSON event like {\"body\": \"{\\\"comment\\\": \\\"...\\\"}\"}
                       (read from stdin when omitted)

Options:
  -h, --help           Print help

Environment:
  TABLE_NAME              The comments table (required)
  SENTIMENT_SERVICE_URL   Base URL of the inference service (required)
  TABLE_DIR               Directory holding table files (defaults to 'data/tables')
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let event_file: Option<String> = pargs.opt_free_from_str()?;

    let config = Config::from_env()?;
    let handler = ingestion::from_config(&config)?;

    let raw = match event_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Unable to read event file {}", path))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Unable to read event from stdin")?;
            raw
        }
    };

    let event: Event = serde_json::from_str(&raw).context("Event is not valid JSON")?;
    let response = handler.handle(event).await;

    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
