// reelfind - tell it what you feel like watching, get movies back
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::{anyhow, Context};
use reelfind_lib::{
    catalog::CatalogEntry,
    config::{self, parse_limit, strip_trigger},
    core::{response_text, retriever, Engine},
    observability, Config, ReelfindError, Result,
};
use std::env;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Parsed command line: the subcommand, its words, and the global flags
struct Cli {
    command: String,
    args: Vec<String>,
    catalog: Option<String>,
    limit: Option<usize>,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_logging();

    let cli = parse_args(env::args().skip(1).collect())?;

    // help and version must work even with a broken environment
    if !needs_config(&cli.command) {
        if matches!(cli.command.as_str(), "version" | "-v" | "--version") {
            println!("reelfind v{}", env!("CARGO_PKG_VERSION"));
        } else {
            print_usage();
        }
        return Ok(());
    }

    let config = resolve_config(&cli)?;

    match cli.command.as_str() {
        "search" => handle_search(&cli, &config),
        "genres" => handle_genres(&cli, &config),
        "category" => handle_category(&cli, &config),
        "prompt" => handle_prompt(&cli, &config),
        "resolve" => handle_resolve(&cli, &config).await,
        "recommend" => handle_recommend(&cli, &config).await,
        "stats" => handle_stats(&config),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    }
}

/// Everything except help and version reads the catalog
fn needs_config(command: &str) -> bool {
    !matches!(
        command,
        "" | "help" | "-h" | "--help" | "version" | "-v" | "--version"
    )
}

/// Pull the global flags out wherever they appear; everything else is positional
fn parse_args(raw: Vec<String>) -> anyhow::Result<Cli> {
    let mut positional = Vec::new();
    let mut catalog = None;
    let mut limit = None;
    let mut json = false;

    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => {
                catalog = Some(iter.next().context("--catalog needs a path")?);
            }
            "--limit" => {
                let value = iter.next().context("--limit needs a number")?;
                limit = Some(parse_limit(&value).map_err(|e| anyhow!(e.user_message()))?);
            }
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let command = if positional.is_empty() {
        String::new()
    } else {
        positional.remove(0)
    };

    Ok(Cli {
        command,
        args: positional,
        catalog,
        limit,
        json,
    })
}

/// Environment first, then the command line flags on top
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env().map_err(|e| anyhow!(e.user_message()))?;
    if let Some(path) = &cli.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(limit) = cli.limit {
        config = config.with_max_results(limit);
    }
    Ok(config)
}

fn load_engine(config: &Config) -> anyhow::Result<Engine> {
    Ok(Engine::from_path(&config.catalog_path)?)
}

fn handle_search(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let raw = cli.args.join(" ");
    let query = strip_trigger(&raw).unwrap_or(&raw);
    if query.trim().is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let engine = load_engine(config)?;
    let outcome = engine.searcher().search_detailed(query, config.max_results);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.entries)?);
        return Ok(());
    }

    print_entries(
        &format!("Results for '{}' ({} match)", query, outcome.tier),
        &outcome.entries,
    );
    Ok(())
}

fn handle_genres(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let engine = load_engine(config)?;
    let retriever = engine.retriever();

    if cli.args.is_empty() {
        let genres = retriever.catalog_genres();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&genres)?);
        } else if genres.is_empty() {
            println!("No genres found.");
        } else {
            println!("\nGenres in catalog:");
            for genre in genres {
                println!("  {} {}", genre.icon, genre.name);
            }
        }
        return Ok(());
    }

    let raw = cli.args.join(" ");
    let query = strip_trigger(&raw).unwrap_or(&raw);
    let result = retriever.search_with_genres(
        query,
        retriever::DEFAULT_MAX_GENRES,
        config.limit_or(retriever::DEFAULT_MAX_MOVIES),
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.genres.is_empty() {
        let chips: Vec<String> = result
            .genres
            .iter()
            .map(|g| format!("{} {}", g.icon, g.name))
            .collect();
        println!("\nGenres: {}", chips.join("   "));
    }
    print_entries(&format!("Movies for '{}'", query), &result.movies);
    Ok(())
}

fn handle_category(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let raw = cli.args.join(" ");
    let category = strip_trigger(&raw).unwrap_or(&raw).trim();
    if category.is_empty() {
        eprintln!("Error: No category provided");
        return Ok(());
    }

    let engine = load_engine(config)?;
    let movies = engine
        .retriever()
        .suggestions_for_category(category, config.max_results);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    if movies.is_empty() {
        println!("No movies found for category '{}'", category);
    } else {
        print_entries(&format!("Top picks in '{}'", category), &movies);
    }
    Ok(())
}

fn handle_prompt(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let raw = cli.args.join(" ");
    let query = strip_trigger(&raw).unwrap_or(&raw);
    if query.trim().is_empty() {
        eprintln!("Error: No query provided");
        return Ok(());
    }

    let engine = load_engine(config)?;
    println!("{}", engine.recommender().build_prompt(query));
    Ok(())
}

async fn handle_resolve(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    // Model answer comes from --file or stdin
    let text = match cli.args.iter().position(|a| a == "--file") {
        Some(i) => {
            let path = cli.args.get(i + 1).context("--file needs a path")?;
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read model answer from stdin")?;
            buf
        }
    };

    let engine = load_engine(config)?;
    let extraction = engine.extractor().extract_titles(&response_text(&text));
    let movies = engine.extractor().resolve(&extraction.titles);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    println!(
        "\nExtracted {} title(s) via {}, {} in catalog",
        extraction.titles.len(),
        extraction.source,
        movies.len()
    );
    print_entries("Resolved movies", &movies);
    Ok(())
}

async fn handle_recommend(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let (query_words, generator) = match cli.args.iter().position(|a| a == "--generator") {
        Some(i) => (
            &cli.args[..i],
            Some(
                cli.args
                    .get(i + 1)
                    .context("--generator needs a command")?
                    .as_str(),
            ),
        ),
        None => (&cli.args[..], None),
    };

    let raw = query_words.join(" ");
    let query = strip_trigger(&raw).unwrap_or(&raw);
    if query.trim().is_empty() {
        eprintln!("Error: No query provided");
        return Ok(());
    }

    let engine = load_engine(config)?;
    let recommender = engine.recommender();

    let answer = match generator {
        Some(command) => {
            let prompt = recommender.build_prompt(query);
            match run_generator(command, &prompt, config.generator_timeout).await {
                Ok(answer) => Some(answer),
                Err(e) => {
                    // don't die on a flaky model, local search still works
                    tracing::warn!("{}", e.user_message());
                    None
                }
            }
        }
        None => None,
    };

    let recommendation = recommender.recommend(query, answer.as_deref(), config.max_results);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&recommendation.entries)?);
        return Ok(());
    }

    print_entries(
        &format!("Recommended for '{}' (from {})", query, recommendation.source),
        &recommendation.entries,
    );
    Ok(())
}

fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let engine = load_engine(config)?;
    let stats = engine.catalog().stats();

    println!("\nreelfind Catalog");
    println!("{}", "=".repeat(60));
    let source = engine
        .catalog()
        .source()
        .unwrap_or(config.catalog_path.as_path());
    println!("  Source:  {}", source.display());
    println!("  Movies:  {}", stats.total_entries);
    println!("  Unrated: {}", stats.unrated_entries);

    if !stats.genre_counts.is_empty() {
        println!("\nGenre distribution:");
        let mut counts: Vec<_> = stats.genre_counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        for (genre, count) in counts {
            println!("  {:<12} {}", genre, count);
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

/// Run an external text generator: prompt on stdin, answer on stdout
async fn run_generator(command: &str, prompt: &str, timeout: Duration) -> Result<String> {
    let mut child = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ReelfindError::Generator(format!("failed to start '{}': {}", command, e)))?;

    // Feed the prompt from its own task so a chatty child can't deadlock us
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ReelfindError::Generator("stdin unavailable".to_string()))?;
    let prompt = prompt.to_string();
    let writer = tokio::spawn(async move { stdin.write_all(prompt.as_bytes()).await });

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ReelfindError::Generator(format!("timed out after {}s", timeout.as_secs())))??;

    if let Ok(Err(e)) = writer.await {
        tracing::warn!("Could not send the whole prompt to the generator: {}", e);
    }

    if !output.status.success() {
        return Err(ReelfindError::Generator(format!("exited with {}", output.status)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn print_entries(heading: &str, entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("No movies found.");
        return;
    }

    println!("\n{}:", heading);
    println!("{}", "=".repeat(60));
    for (i, entry) in entries.iter().enumerate() {
        let rating = entry
            .rating()
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "n/a".to_string());
        let genres: Vec<&str> = entry.genres().iter().map(|g| g.as_str()).collect();
        println!(
            "{:3}. {} ({}) ★{}  [{}]",
            i + 1,
            entry.title(),
            entry.year(),
            rating,
            genres.join(", ")
        );
    }
    println!("{}", "=".repeat(60));
}

fn print_usage() {
    println!(
        r#"reelfind v{} - Find something to watch

USAGE:
    reelfind <COMMAND> [OPTIONS]

COMMANDS:
    search <query>                     Search the catalog
    genres [query]                     List catalog genres, or genre chips and up to 5
                                       movies for a query (--limit changes the 5)
    category <genre>                   Top rated movies in a genre or mood
    prompt <query>                     Print the prompt for an external model
    resolve [--file <path>]            Resolve a model answer (stdin by default)
    recommend <query> [--generator <cmd>]
                                       Ask an external model, fall back to local search
    stats                              Show catalog statistics
    version                            Show version
    help                               Show this help

OPTIONS:
    --catalog <path>    Catalog file (default: ${} or ~/.reelfind/movies.json)
    --limit <n>         Maximum results (default: 8, or ${})

Every query-taking command accepts an optional "AI:" prefix.
    --json              Print results as JSON

EXAMPLES:
    reelfind search scary movies
    reelfind search "AI: the conjuring"
    reelfind category comedy --limit 5
    reelfind prompt something funny | my-llm | reelfind resolve
    reelfind recommend feel-good family movie --generator "my-llm --quiet"
"#,
        env!("CARGO_PKG_VERSION"),
        config::CATALOG_ENV,
        config::MAX_RESULTS_ENV
    );
}
