//! metabolishmm single-marker-search --input-dir dir --output-dir dir --markers-dir dir [--threads n]
//!
//! --input-dir : directory containing genomes, files with extension .fasta. Sub directories are not explored.
//!
//! --output-dir : where all outputs go, created if needed.
//!
//! --markers-dir : directory containing hmm markers, files with extension .hmm.
//!
//! --threads : number of genomes processed simultaneously. Default is 1.
//!
//! --prodigal, --hmmsearch : executables to use if not the ones found in PATH.
//!
//! Logging is controlled by RUST_LOG.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgMatches, Command};

// for logging (debug mostly, switched at compile time in cargo.toml)
use env_logger::Builder;

use metabolishmm::{run_pipeline, PipelineParams, ToolParams};

// install a logger facility
pub fn init_log() -> u64 {
    Builder::from_default_env().init();
    println!("\n ************** initializing logger *****************\n");
    1
}

fn get_dir(matches: &ArgMatches, name: &str) -> PathBuf {
    // required args, clap guarantees presence
    matches.get_one::<PathBuf>(name).cloned().unwrap_or_default()
}

fn parse_single_marker_search(matches: &ArgMatches) -> Result<PipelineParams, anyhow::Error> {
    log::debug!("in parse_single_marker_search");
    //
    let input_dir = get_dir(matches, "input_dir");
    if !input_dir.is_dir() {
        anyhow::bail!("error not a directory : {:?}", input_dir);
    }
    let markers_dir = get_dir(matches, "markers_dir");
    if !markers_dir.is_dir() {
        anyhow::bail!("error not a directory : {:?}", markers_dir);
    }
    let output_dir = get_dir(matches, "output_dir");
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&1);
    //
    let defaults = ToolParams::default();
    let prodigal = matches
        .get_one::<String>("prodigal")
        .map(String::as_str)
        .unwrap_or(defaults.get_predictor());
    let hmmsearch = matches
        .get_one::<String>("hmmsearch")
        .map(String::as_str)
        .unwrap_or(defaults.get_searcher());
    //
    let params = PipelineParams::new(&input_dir, &output_dir, &markers_dir, threads).with_tools(ToolParams::new(prodigal, hmmsearch));
    Ok(params)
} // end of parse_single_marker_search

fn main() -> anyhow::Result<()> {
    let _ = init_log();
    //
    let search_cmd = Command::new("single-marker-search")
        .about("Search hmm markers against an input directory of genomes")
        .arg(
            Arg::new("input_dir")
                .long("input-dir")
                .value_name("DIR")
                .help("Directory containing input genomes")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output_dir")
                .long("output-dir")
                .value_name("DIR")
                .help("Directory to store output files")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("markers_dir")
                .long("markers-dir")
                .value_name("DIR")
                .help("Directory containing HMM marker files")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Number of genomes processed in parallel")
                .default_value("1")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("prodigal")
                .long("prodigal")
                .value_name("PATH")
                .help("Protein predictor executable, default prodigal from PATH")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("hmmsearch")
                .long("hmmsearch")
                .value_name("PATH")
                .help("Profile search executable, default hmmsearch from PATH")
                .value_parser(value_parser!(String)),
        );
    //
    let matches = Command::new("metabolishmm")
        .version("0.1.0")
        .about("Exploring genome annotations with HMM markers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(search_cmd)
        .get_matches();
    //
    let start_t = chrono::Local::now();
    log::info!("metabolishmm begins at time:{:#?}", start_t);
    //
    if let Some(sub_m) = matches.subcommand_matches("single-marker-search") {
        let params = parse_single_marker_search(sub_m)?;
        let report = run_pipeline(&params)?;
        //
        println!("Running metabolishmm with:");
        println!("Input directory: {}", params.get_input_dir().display());
        println!("Output directory: {}", params.get_output_dir().display());
        println!("Markers directory: {}", params.get_markers_dir().display());
        println!("Threads: {}", params.get_nb_workers());
        println!(
            "nb genomes : {}, nb markers : {}, nb hits : {}, elapsed (s) : {:.2}",
            report.nb_genomes,
            report.nb_markers,
            report.nb_hits(),
            report.elapsed.as_secs_f64()
        );
    }
    //
    let end_t = chrono::Local::now();
    log::info!("metabolishmm ends at time:{:#?}", end_t);
    Ok(())
} // end of main
