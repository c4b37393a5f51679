use clap::Parser;
use log::info;
use seqhmm::common::sequence_to_string;
use seqhmm::engine::HmmModel;
use seqhmm::error::HmmError;
use seqhmm::io::parse_record;
use seqhmm::sampler;
use seqhmm::trans::TransTable;

///
/// Estimate a chain from the record's first sequence and sample
/// hidden/observable paths from it.
///
#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// input record file
    input: std::path::PathBuf,
    /// length of each sampled path
    #[clap(short, long, default_value = "20")]
    length: usize,
    /// number of paths to sample
    #[clap(short, long, default_value = "1")]
    n_samples: usize,
    /// seed of the first sample; sample i uses seed + i
    #[clap(short, long, default_value = "0")]
    seed: u64,
}

fn run(opts: &Opts) -> Result<(), HmmError> {
    info!("# started_at={}", chrono::Local::now());
    info!("# opts={:?}", opts);

    let text = std::fs::read_to_string(&opts.input)?;
    let record = parse_record(&text)?;
    let model = HmmModel::new(record.states, record.observables, &record.emission_rows)?;
    let seq = record
        .sequences
        .first()
        .ok_or_else(|| HmmError::MalformedInput("record has no sequence".to_string()))?;
    let trans = TransTable::from_sequence(model.states(), seq);
    let init = model.initial_dist(seq)?;
    info!("# estimated_from={}", sequence_to_string(seq));

    for i in 0..opts.n_samples {
        let seed = opts.seed + i as u64;
        let path = sampler::sample(&model, &trans, &init, opts.length, seed);
        println!(">sample{} seed={}", i, seed);
        println!("{}", sequence_to_string(&path.hidden));
        println!("{}", sequence_to_string(&path.observed));
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
