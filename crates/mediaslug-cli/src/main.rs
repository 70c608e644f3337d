use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mediaslug_core::{
    generate_match_info, generate_progressive_trim_candidates, ngram_similarity,
    score_prefix_candidate, score_token_match, score_token_set_ratio, slugify, slugify_with_tokens,
    MatchConfig, MemoryCatalog, SlugError, TitleResolver,
};
use mediaslug_parse::{
    detect_script, normalize_width, parse_movie_elements, parse_tv_show_elements,
    parse_with_media_type, MediaType,
};

#[derive(Parser, Debug)]
#[command(name = "mediaslug")]
#[command(about = "Canonical slugs and fuzzy matching for media titles")]
#[command(version)]
struct Cli {
    /// Log every resolution step
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Match config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical slug of a title
    Slug {
        #[arg(short, long, default_value = "game")]
        media_type: MediaType,
        title: String,
    },
    /// Print the normalized words of a title
    Words {
        #[arg(short, long, default_value = "game")]
        media_type: MediaType,
        title: String,
    },
    /// Show the structure a media parser extracts, as JSON
    Parse {
        #[arg(short, long, default_value = "game")]
        media_type: MediaType,
        title: String,
    },
    /// Main/secondary title slugs, as JSON
    Info { title: String },
    /// Progressive trim candidates, as JSON
    Trim { title: String },
    /// Every similarity score between a query and a candidate, as JSON
    Score { query: String, candidate: String },
    /// Detect the writing system of a title
    Script { title: String },
    /// Resolve a query against a newline-separated title list
    Resolve {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(short, long, default_value = "game")]
        media_type: MediaType,
        query: String,
    },
    /// Print the user config file path
    ConfigPath,
}

#[derive(Serialize)]
struct Scores {
    query_slug: String,
    candidate_slug: String,
    token_match: f64,
    token_set: f64,
    prefix: i64,
    ngram: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mediaslug=debug"
    } else {
        "mediaslug=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SlugError> {
    match cli.command {
        Command::Slug { media_type, title } => println!("{}", slugify(media_type, &title)),
        Command::Words { media_type, title } => {
            println!("{}", slugify_with_tokens(media_type, &title).tokens.join(" "))
        }
        Command::Parse { media_type, title } => match media_type {
            MediaType::TvShow => print_json(&parse_tv_show_elements(&title))?,
            MediaType::Movie => print_json(&parse_movie_elements(&title))?,
            MediaType::Game | MediaType::Music => {
                print_json(&parse_with_media_type(media_type, &title))?
            }
        },
        Command::Info { title } => print_json(&generate_match_info(&title))?,
        Command::Trim { title } => print_json(&generate_progressive_trim_candidates(&title))?,
        Command::Score { query, candidate } => {
            let query_slug = slugify(MediaType::Game, &query);
            let candidate_slug = slugify(MediaType::Game, &candidate);
            print_json(&Scores {
                token_match: score_token_match(&query, &candidate),
                token_set: score_token_set_ratio(&query, &candidate),
                prefix: score_prefix_candidate(&query_slug, &candidate_slug),
                ngram: ngram_similarity(&query_slug, &candidate_slug),
                query_slug,
                candidate_slug,
            })?
        }
        Command::Script { title } => println!("{}", detect_script(&normalize_width(&title))),
        Command::Resolve {
            catalog,
            media_type,
            query,
        } => {
            let config = match &cli.config {
                Some(path) => MatchConfig::load_from(path)?,
                None => MatchConfig::load()?,
            };
            let content = std::fs::read_to_string(&catalog)?;
            let titles = content.lines().filter(|line| !line.trim().is_empty());
            let catalog = MemoryCatalog::from_titles(media_type, titles);
            tracing::info!(entries = catalog.len(), "Catalog loaded");

            let resolution = TitleResolver::new(catalog, config).resolve(&query)?;
            print_json(&resolution)?;
        }
        Command::ConfigPath => println!("{}", MatchConfig::config_path().display()),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), SlugError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}
