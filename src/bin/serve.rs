//! The sentiment inference HTTP service

use std::{net::SocketAddr, sync::Arc};

use pico_args::Arguments;
use sentiment_pipeline::{
    pipelines::text_classification::artifacts::DEFAULT_ARTIFACT_DIR,
    service::{router, ServiceContext, DEFAULT_PORT},
};

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help           Print help
  --host               The address to bind (defaults to 0.0.0.0)
  -p, --port           The port to listen on (defaults to 8000)
  -m, --models-dir     The artifact directory (defaults to 'models')
  --fail-fast          Exit if the models cannot be loaded instead of serving errors
";

#[derive(Debug)]
struct Args {
    host: String,
    port: u16,
    models_dir: String,
    fail_fast: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            host: pargs
                .opt_value_from_str("--host")?
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: pargs
                .opt_value_from_str(["-p", "--port"])?
                .unwrap_or(DEFAULT_PORT),
            models_dir: pargs
                .opt_value_from_str(["-m", "--models-dir"])?
                .unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.to_string()),
            fail_fast: pargs.contains("--fail-fast"),
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let context = if args.fail_fast {
        ServiceContext::try_load(&args.models_dir)?
    } else {
        ServiceContext::load(&args.models_dir)
    };

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(Arc::new(context)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Unable to listen for shutdown signal: {}", err);
    }

    log::info!("Shutting down");
}
