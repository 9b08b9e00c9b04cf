use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use icegraph::config::{CandidatePool, Config};
use icegraph::output::terminal::display_banner;
use icegraph::pipeline::{et, tt};

/// icegraph: build the entity-text (ET) and text-text (TT) networks used to
/// train item concept embeddings.
#[derive(Parser)]
#[command(name = "icegraph", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct EtArgs {
    /// Path to the entity info JSON file
    #[arg(long)]
    load_info: PathBuf,

    /// Number of representative words per entity for this graph
    #[arg(long)]
    repk: usize,

    /// Number of representative words per entity for the largest graph
    #[arg(long)]
    max_repk: usize,

    /// Path to save the ET network
    #[arg(long)]
    save_et: PathBuf,
}

#[derive(Args, Clone)]
struct TtArgs {
    /// Number of expansion words per representative word
    #[arg(long)]
    expk: usize,

    /// Path to save the TT network
    #[arg(long)]
    save_tt: PathBuf,

    /// Candidate pool for expansion words (default: ICEGRAPH_CANDIDATES or representative)
    #[arg(long, value_enum)]
    candidates: Option<CandidatePool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the entity-text (ET) network
    Et {
        #[command(flatten)]
        et: EtArgs,

        /// Path to the word embedding file
        #[arg(long)]
        load_embd: PathBuf,

        /// 0: unweighted, 1: TF-IDF weighted
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
        weighted: u8,
    },

    /// Generate the text-text (TT) network from an ET network
    Tt {
        #[command(flatten)]
        tt: TtArgs,

        /// Path to the word embedding file
        #[arg(long)]
        load_embd: PathBuf,

        /// Path to the ET network to take representative words from
        #[arg(long)]
        load_et: PathBuf,

        /// 0: unweighted, 1: similarity weighted
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
        weighted: u8,
    },

    /// Generate the ET network, then the TT network from it
    Build {
        #[command(flatten)]
        et: EtArgs,

        #[command(flatten)]
        tt: TtArgs,

        /// Path to the word embedding file
        #[arg(long)]
        load_embd: PathBuf,

        /// 0: unweighted, 1: weighted (both networks)
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
        weighted: u8,
    },
}

fn et_job(args: EtArgs, load_embd: PathBuf, weighted: bool) -> et::EtJob {
    et::EtJob {
        load_info: args.load_info,
        load_embd,
        repk: args.repk,
        max_repk: args.max_repk,
        save_et: args.save_et,
        weighted,
    }
}

fn tt_job(
    args: TtArgs,
    config: &Config,
    load_embd: PathBuf,
    load_et: PathBuf,
    weighted: bool,
) -> tt::TtJob {
    tt::TtJob {
        load_embd,
        load_et,
        expk: args.expk,
        save_tt: args.save_tt,
        weighted,
        candidates: args.candidates.unwrap_or(config.candidates),
        zero_vectors: config.zero_vectors,
    }
}

fn run_et(job: &et::EtJob) -> Result<()> {
    display_banner("Start generating entity-text relation edge list...");
    et::run(job)?;
    display_banner("Finished generating entity-text relation edge list!\n");
    Ok(())
}

fn run_tt(job: &tt::TtJob) -> Result<()> {
    display_banner("Start generating text-text relation edge list...");
    tt::run(job)?;
    display_banner("Finished generating text-text relation edge list!\n");
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the summaries
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("icegraph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    config.apply_threads();
    info!(?config, "Configuration loaded");

    match cli.command {
        Commands::Et {
            et: et_args,
            load_embd,
            weighted,
        } => {
            run_et(&et_job(et_args, load_embd, weighted == 1))?;
        }

        Commands::Tt {
            tt: tt_args,
            load_embd,
            load_et,
            weighted,
        } => {
            run_tt(&tt_job(tt_args, &config, load_embd, load_et, weighted == 1))?;
        }

        Commands::Build {
            et: et_args,
            tt: tt_args,
            load_embd,
            weighted,
        } => {
            let et = et_job(et_args, load_embd.clone(), weighted == 1);
            // Reject bad sizes before any file is read.
            et.validate()?;
            let tt = tt_job(tt_args, &config, load_embd, et.save_et.clone(), weighted == 1);

            run_et(&et)?;
            run_tt(&tt)?;
        }
    }

    Ok(())
}
