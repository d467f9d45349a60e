//! Repomap CLI - Command-line interface for repomap
//!
//! Fetches a public GitHub repository, plays the analysis conversation, and
//! renders the structure dashboard or a laid-out graph export

use clap::{Parser, Subcommand};
use repomap_analysis::{analyze, ConversationTurn};
use repomap_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, performance,
    progress_channel, ErrorContext, LoggingConfig, ProgressEvent, RepomapConfig, RepomapError,
    RepomapResult,
};
use repomap_graph::{
    build_tree, compute_stats, project_to_graph, project_with_link_step, GraphData, RepoStats,
};
use repomap_layout::{layout_graph, render_dot, render_svg};
use repomap_repo::{parse_repo_url, RepoData, RepositoryFetcher};
use std::io::Write as _;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "repomap")]
#[command(about = "Visualize the structure of a public GitHub repository")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a repository and show the analysis dashboard
    Analyze {
        /// Repository URL or owner/name slug
        repo: String,

        /// GitHub API token (raises the rate limit)
        #[arg(short, long)]
        token: Option<String>,

        /// Traversal depth limit
        #[arg(long)]
        depth: Option<usize>,

        /// Print the conversation at once instead of animating it
        #[arg(long)]
        no_animation: bool,
    },

    /// Fetch a repository and export the laid-out graph
    Map {
        /// Repository URL or owner/name slug
        repo: String,

        /// GitHub API token (raises the rate limit)
        #[arg(short, long)]
        token: Option<String>,

        /// Output file (defaults to <name>-map.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (svg, dot, json)
        #[arg(short, long, default_value = "svg")]
        format: String,

        /// Arrange nodes on concentric depth rings
        #[arg(long)]
        radial: bool,

        /// Traversal depth limit
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Show metadata and raw content for one node of the tree
    Inspect {
        /// Repository URL or owner/name slug
        repo: String,

        /// Path of the file or directory to inspect
        path: String,

        /// GitHub API token (raises the rate limit)
        #[arg(short, long)]
        token: Option<String>,

        /// Traversal depth limit
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> RepomapResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| RepomapError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting repomap v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?.with_env_credentials();

    match cli.command {
        Commands::Analyze {
            repo,
            token,
            depth,
            no_animation,
        } => {
            handle_analyze(repo, token, depth, no_animation, &config).await?;
        }
        Commands::Map {
            repo,
            token,
            output,
            format,
            radial,
            depth,
        } => {
            handle_map(repo, token, output, format, radial, depth, &config).await?;
        }
        Commands::Inspect {
            repo,
            path,
            token,
            depth,
        } => {
            handle_inspect(repo, path, token, depth, &config).await?;
        }
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(show, init, validate)?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> RepomapResult<RepomapConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return RepomapConfig::from_file(path);
    }

    for path in RepomapConfig::default_paths() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return RepomapConfig::from_file(&path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(RepomapConfig::default())
}

/// Everything one fetch run produces, plus the fetcher for follow-up calls
struct FetchedRepo {
    info: repomap_core::RepoInfo,
    fetcher: RepositoryFetcher,
    data: RepoData,
    tree: repomap_graph::TreeNode,
    stats: RepoStats,
}

/// Parse the URL, run the fetch with a live progress line, and return the
/// fetched data together with a built tree and its statistics
async fn fetch_repository(
    repo: &str,
    token: Option<String>,
    depth: Option<usize>,
    config: &RepomapConfig,
) -> RepomapResult<FetchedRepo> {
    let info = parse_repo_url(repo).map_err(|e| {
        log_operation_error!("parse_repo_url", e, repo = %repo);
        e
    })?;
    println!("🔍 Repository: {}", info.slug());

    let mut fetch_config = config.fetch.clone();
    if let Some(depth) = depth {
        fetch_config.max_depth = depth;
    }

    let token = token.or_else(|| config.credentials.github_token.clone());
    if token.is_none() {
        println!("⚠️  No GitHub token configured; unauthenticated rate limits apply");
    }
    let fetcher = RepositoryFetcher::github(token, fetch_config)?;

    let (mut reporter, mut events) = progress_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            print_progress(&event);
        }
        println!();
    });

    let result = fetcher.fetch(&info, &mut reporter).await;
    drop(reporter);
    let _ = printer.await;

    let data = result.map_err(|e| {
        log_operation_error!("fetch_repository", e, repo = %repo);
        println!("❌ {}", e.user_message());
        e
    })?;

    let tree = build_tree(&data.contents, &data.info.name);
    let stats = compute_stats(&tree);
    Ok(FetchedRepo {
        info,
        fetcher,
        data,
        tree,
        stats,
    })
}

fn print_progress(event: &ProgressEvent) {
    print!(
        "\r📡 Fetching [{:>3.0}%] {}/{} {}          ",
        event.ratio() * 100.0,
        event.completed,
        event.total,
        event.phase.label(),
    );
    let _ = std::io::stdout().flush();
}

async fn handle_analyze(
    repo: String,
    token: Option<String>,
    depth: Option<usize>,
    no_animation: bool,
    config: &RepomapConfig,
) -> RepomapResult<()> {
    log_operation_start!("analyze", repo = %repo);

    let fetched = fetch_repository(&repo, token, depth, config).await?;

    println!("\n🤖 Analysis\n");
    let turns = analyze(
        &fetched.data,
        &fetched.stats,
        &config.analysis,
        &config.credentials,
    )
    .await;
    play_conversation(&turns, no_animation).await;

    print_dashboard(&fetched.data, &fetched.stats);

    log_operation_success!("analyze",
        repo = %repo,
        entries = fetched.data.entry_count(),
        files = fetched.stats.total_files
    );
    Ok(())
}

async fn handle_map(
    repo: String,
    token: Option<String>,
    output: Option<PathBuf>,
    format: String,
    radial: bool,
    depth: Option<usize>,
    config: &RepomapConfig,
) -> RepomapResult<()> {
    log_operation_start!("map", repo = %repo, format = %format);

    let fetched = fetch_repository(&repo, token, depth, config).await?;

    println!(
        "\n🗺️  Laying out {} nodes ({} directories, {} files)...",
        fetched.stats.total_nodes(),
        fetched.stats.total_directories,
        fetched.stats.total_files,
    );

    let mut layout_config = config.layout.clone();
    if radial {
        layout_config.radial = true;
    }
    let mut graph = project_with_link_step(&fetched.tree, layout_config.link_distance_step);
    performance::measure_async("force_layout", async {
        layout_graph(&mut graph, &layout_config);
    })
    .await;

    let name = &fetched.data.info.name;
    let rendered = render_graph(&graph, &format, name)?;
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}-map.{}", name, format)));
    std::fs::write(&path, rendered)?;
    println!("✅ Graph written to {:?}", path);

    log_operation_success!("map", repo = %repo, nodes = graph.nodes.len());
    Ok(())
}

const CONTENT_PREVIEW_LINES: usize = 40;

async fn handle_inspect(
    repo: String,
    path: String,
    token: Option<String>,
    depth: Option<usize>,
    config: &RepomapConfig,
) -> RepomapResult<()> {
    log_operation_start!("inspect", repo = %repo, path = %path);

    let fetched = fetch_repository(&repo, token, depth, config).await?;
    let graph = project_to_graph(&fetched.tree);

    let details = repomap_graph::inspect(&graph, &path).ok_or_else(|| RepomapError::NotFound {
        resource: path.clone(),
        context: ErrorContext::new("cli")
            .with_operation("inspect")
            .with_suggestion("The path may lie beyond the traversal depth limit"),
    })?;

    println!("\n🔎 {}", if details.id.is_empty() { "(root)" } else { &details.id });
    println!("  Name:        {}", details.name);
    println!("  Kind:        {:?}", details.kind);
    if !details.extension.is_empty() {
        println!("  Extension:   {}", details.extension);
    }
    println!("  Depth:       {}", details.depth);
    println!("  Connections: {}", details.connection_count);

    if details.kind == repomap_graph::NodeKind::File {
        match fetched.fetcher.file_content(&fetched.info, &path).await {
            Ok(content) => {
                println!("\n📄 Content");
                for line in content.lines().take(CONTENT_PREVIEW_LINES) {
                    println!("  {}", line);
                }
                if content.lines().count() > CONTENT_PREVIEW_LINES {
                    println!("  …");
                }
            }
            Err(e) => println!("\n❌ Could not fetch content: {}", e.user_message()),
        }
    }

    log_operation_success!("inspect", repo = %repo, path = %path);
    Ok(())
}

fn render_graph(graph: &GraphData, format: &str, name: &str) -> RepomapResult<String> {
    match format {
        "svg" => Ok(render_svg(graph, &repomap_graph::NodeFilter::default())),
        "dot" => Ok(render_dot(graph, name)),
        "json" => Ok(serde_json::to_string_pretty(graph)?),
        other => Err(RepomapError::Validation {
            message: format!("unknown export format: {}", other),
            field: Some("format".to_string()),
            context: ErrorContext::new("cli").with_suggestion("Use svg, dot, or json"),
        }),
    }
}

const TYPEWRITER_DELAY_MS: u64 = 12;

/// Print the conversation line by line with a typewriter effect
async fn play_conversation(turns: &[ConversationTurn], no_animation: bool) {
    for turn in turns {
        print!("  {}: ", turn.agent);
        if no_animation {
            println!("{}", turn.content);
            continue;
        }
        for ch in turn.content.chars() {
            print!("{}", ch);
            let _ = std::io::stdout().flush();
            tokio::time::sleep(std::time::Duration::from_millis(TYPEWRITER_DELAY_MS)).await;
        }
        println!();
    }
}

const README_PREVIEW_LINES: usize = 12;

fn print_dashboard(data: &RepoData, stats: &RepoStats) {
    println!("\n📋 Overview");
    println!("  Name:           {}", data.metadata.name);
    if let Some(description) = &data.metadata.description {
        println!("  Description:    {}", description);
    }
    if let Some(language) = &data.metadata.language {
        println!("  Language:       {}", language);
    }
    println!("  Default branch: {}", data.metadata.default_branch);
    println!("  Stars:          {}", data.metadata.stars);
    println!("  Forks:          {}", data.metadata.forks);
    println!("  Open issues:    {}", data.metadata.open_issues);
    if !data.branches.is_empty() {
        println!("  Branches:       {}", data.branches.len());
    }
    if !data.metadata.topics.is_empty() {
        println!("  Topics:         {}", data.metadata.topics.join(", "));
    }

    println!("\n📊 Statistics");
    println!("  Directories: {}", stats.total_directories);
    println!("  Files:       {}", stats.total_files);
    println!("  Max depth:   {}", stats.max_depth);
    println!("  File types:");
    for (ext, count) in stats.top_file_types(10) {
        let label = if ext.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{}", ext)
        };
        println!("    {:<10} {}", label, count);
    }

    if !data.contributors.is_empty() {
        println!("\n👥 Contributors");
        for contributor in &data.contributors {
            println!(
                "  {:<24} {} contributions",
                contributor.login, contributor.contributions
            );
        }
    }

    if let Some(readme) = &data.readme {
        println!("\n📖 README");
        for line in readme.lines().take(README_PREVIEW_LINES) {
            println!("  {}", line);
        }
        if readme.lines().count() > README_PREVIEW_LINES {
            println!("  …");
        }
    }
}

fn handle_config(show: bool, init: bool, validate: bool) -> RepomapResult<()> {
    if init {
        let config = RepomapConfig::default();
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
            .ok_or_else(|| RepomapError::Config {
                message: "Could not determine a configuration directory".to_string(),
                source: None,
                context: ErrorContext::new("cli").with_operation("config_init"),
            })?
            .join("repomap");

        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.toml");
        config.save_to_file(&config_path)?;
        println!("✅ Configuration initialized at: {:?}", config_path);
        println!("📝 Edit the file to add your API tokens and tune the layout.");
    }

    if show {
        let config = load_config(None)?;
        println!("📋 Current configuration:");
        match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => println!("❌ Failed to render configuration: {}", e),
        }
    }

    if validate {
        let config = load_config(None)?;
        match config.validate() {
            Ok(()) => println!("✅ Configuration is valid"),
            Err(e) => {
                println!("❌ Configuration validation failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
