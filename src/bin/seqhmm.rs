use clap::Parser;
use log::info;
use seqhmm::engine;
use seqhmm::error::HmmError;
use seqhmm::io::{format_output, parse_record, write_string};
use seqhmm::utils::timer;

///
/// Estimate a Markov chain per input sequence and evaluate the
/// record's hidden-given-observable case queries.
///
#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// input record file
    input: std::path::PathBuf,
    /// output file (stdout if omitted)
    #[clap(short, long)]
    output: Option<std::path::PathBuf>,
    /// dump structured JSON instead of the text layout
    #[clap(long)]
    json: bool,
}

fn run(opts: &Opts) -> Result<(), HmmError> {
    info!("# started_at={}", chrono::Local::now());
    info!("# opts={:?}", opts);

    let text = std::fs::read_to_string(&opts.input)?;
    let record = parse_record(&text)?;

    let (output, time) = timer(|| engine::run(&record));
    let output = output?;
    info!("# finished_in={}ms", time);

    let rendered = if opts.json {
        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        json
    } else {
        format_output(&output)
    };
    match &opts.output {
        Some(path) => write_string(path, &rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    if let Err(err) = run(&opts) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
