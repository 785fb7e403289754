use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use skillgraph::SkillGraph;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillgraph")]
#[command(about = "Skill graph CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory, a default config and the bundled skill graph.
    Init {
        /// Config file path (default: SKILLGRAPH_CONFIG_PATH or ~/.skillgraph/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Load the skill graph and report node and link counts.
    Check(SourceArgs),

    /// List every node in load order.
    List(SourceArgs),

    /// Print one node as JSON.
    Node {
        /// Node id
        id: u32,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Config file path (default: SKILLGRAPH_CONFIG_PATH or ~/.skillgraph/config.json)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skill graph file (default: SKILLGRAPH_FILE, then skillGraph.file from config)
    #[arg(long, short, value_name = "PATH")]
    file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Version) => {
            println!("skillgraph {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Init { config }) => run_init(config),
        Some(Commands::Check(source)) => run_check(source),
        Some(Commands::List(source)) => run_list(source),
        Some(Commands::Node { id, source }) => run_node(id, source),
        None => {
            println!("Run with --help for usage");
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(skillgraph::config::default_config_path);
    let graph_file = skillgraph::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", path.display());
    println!("skill graph: {}", graph_file.display());
    Ok(())
}

fn load_graph(source: SourceArgs) -> anyhow::Result<SkillGraph> {
    let file = match source.file {
        Some(f) => f,
        None => {
            let (config, path) = skillgraph::config::load_config(source.config)?;
            skillgraph::config::resolve_skill_graph_file(&config, &path)
        }
    };
    skillgraph::init::require_initialized(&file)?;
    log::info!("loading skill graph from {}", file.display());
    SkillGraph::load(&file).with_context(|| format!("loading skill graph from {}", file.display()))
}

fn run_check(source: SourceArgs) -> anyhow::Result<()> {
    let graph = load_graph(source)?;
    println!(
        "ok: {} nodes, {} links",
        graph.len(),
        graph.total_link_count()
    );
    Ok(())
}

fn run_list(source: SourceArgs) -> anyhow::Result<()> {
    let graph = load_graph(source)?;
    for node in graph.nodes() {
        let (x, y) = node.position();
        let skill = node
            .learned_skill()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let links: Vec<String> = node.node_links().iter().map(|l| l.to_string()).collect();
        println!(
            "{:>5}  ({:>4}, {:>4})  xp {:>6}  skill {:>6}  -> [{}]",
            node.id(),
            x,
            y,
            node.experience_points_needed(),
            skill,
            links.join(", ")
        );
    }
    Ok(())
}

fn run_node(id: u32, source: SourceArgs) -> anyhow::Result<()> {
    let graph = load_graph(source)?;
    let node = graph
        .get_skill_node(id)
        .ok_or_else(|| anyhow::anyhow!("no skill node with id {}", id))?;
    println!("{}", serde_json::to_string_pretty(node)?);
    Ok(())
}
