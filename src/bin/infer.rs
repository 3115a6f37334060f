//! Command line tool for scoring texts against saved artifacts

use pico_args::Arguments;
use sentiment_pipeline::pipelines::text_classification::{
    artifacts::DEFAULT_ARTIFACT_DIR, SentimentPipeline,
};

const HELP: &str = "\
Usage: infer [OPTIONS] [TEXT...]

Arguments:
  TEXT                 Texts to score (defaults to a built-in sample)

Options:
  -h, --help           Print help
  -m, --models-dir     The artifact directory (defaults to 'models')
";

const SAMPLE: &str =
    "this was a pretty good movie the plot was great but the acting was amazing";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The artifact directory
    models_dir: Option<String>,

    /// The texts to score
    texts: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let models_dir = pargs.opt_value_from_str(["-m", "--models-dir"])?;

    let texts = pargs
        .finish()
        .into_iter()
        .map(|s| s.to_string_lossy().into_owned())
        .collect();

    Ok(Args {
        help,
        models_dir,
        texts,
    })
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let models_dir = args
        .models_dir
        .unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.to_string());
    let pipeline = SentimentPipeline::load(&models_dir)?;

    let texts = if args.texts.is_empty() {
        vec![SAMPLE.to_string()]
    } else {
        args.texts
    };

    for text in texts {
        let scores = pipeline.scores(&text)?;
        let prediction = pipeline.predict(&text)?;

        println!(
            "\n=== {text} ===\
             \n- Prediction: {}\
             \n- Probabilities: [{:.4}, {:.4}]\
             \n- Sentiment: {}, Score: {:.4}, Confidence: {}",
            scores.label,
            scores.probabilities[0],
            scores.probabilities[1],
            prediction.sentiment,
            prediction.score,
            prediction.confidence
        );
    }

    Ok(())
}
