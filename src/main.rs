use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use kgschema::config::{self, ExtractorConfig};
use kgschema::graph_source::{GraphSourceError, Neo4jHttpExecutor, SchemaExtractor, SchemaList};
use kgschema::instances::{canonicalize_node_instances, project_node_instances};
use kgschema::matching::{
    extract_relevant_nodes, HeuristicExtractor, MatchStrategy, DEFAULT_FUZZY_THRESHOLD,
};
use kgschema::schema_catalog::{load_schema, ParsedSchema, PropertyDataType};
use kgschema::subgraph::{build_subschema, NeighborhoodPolicy};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// kgschema - Subschema extraction for graph question answering
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read configuration from a YAML file instead of flags and environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Neo4j HTTP endpoint
    #[arg(long, env = "KGSCHEMA_NEO4J_URL", default_value = "http://localhost:7474")]
    neo4j_url: String,

    #[arg(long, env = "KGSCHEMA_NEO4J_USER", default_value = "neo4j")]
    neo4j_user: String,

    #[arg(long, env = "KGSCHEMA_NEO4J_PASSWORD", default_value = "", hide_env_values = true)]
    neo4j_password: String,

    #[arg(long, env = "KGSCHEMA_NEO4J_DATABASE", default_value = "neo4j")]
    neo4j_database: String,

    /// Largest edit distance at which an entity matches a label
    #[arg(long, env = "KGSCHEMA_MAX_EDIT_DISTANCE", default_value_t = 2)]
    max_edit_distance: usize,

    /// Similarity threshold (0-100) for the fuzzy strategy
    #[arg(long, env = "KGSCHEMA_FUZZY_THRESHOLD", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    fuzzy_threshold: u32,

    /// Instances sampled per label
    #[arg(long, env = "KGSCHEMA_INSTANCE_LIMIT", default_value_t = 10)]
    instance_limit: usize,

    #[arg(long, env = "KGSCHEMA_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// full_vocabulary or matched_only
    #[arg(long, env = "KGSCHEMA_NEIGHBORHOOD_POLICY", default_value = "full_vocabulary")]
    neighborhood_policy: NeighborhoodPolicy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the schema from Neo4j and save it as JSON
    Extract {
        #[arg(long, default_value = "schema.json")]
        output: PathBuf,
        /// Write property names only
        #[arg(long)]
        simplified: bool,
    },
    /// Save one schema list as JSON
    Export {
        #[arg(value_enum)]
        list: ExportList,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print every property value of every node with a label
    NodeData {
        #[arg(long)]
        label: String,
    },
    /// List node labels known to the database
    Labels,
    /// Print the subschema relevant to one or more entities
    Subschema {
        #[arg(long = "entity", required = true)]
        entities: Vec<String>,
        #[arg(long, default_value = "schema.json")]
        schema_file: PathBuf,
    },
    /// Match the node labels mentioned in a question
    Match {
        #[arg(long)]
        question: String,
        /// phrase_match or fuzzy
        #[arg(long, default_value = "phrase_match")]
        strategy: String,
        #[arg(long, default_value = "schema.json")]
        schema_file: PathBuf,
    },
    /// Sample instances and print their properties of one type
    Instances {
        #[arg(long = "label", required = true)]
        labels: Vec<String>,
        /// STRING, INTEGER, FLOAT, BOOLEAN, DATE, DATE_TIME...
        #[arg(long)]
        data_type: String,
        #[arg(long, default_value = "schema.json")]
        schema_file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportList {
    NodeNames,
    NodeProperties,
    Relationships,
    RelationshipProperties,
}

impl From<ExportList> for SchemaList {
    fn from(list: ExportList) -> Self {
        match list {
            ExportList::NodeNames => SchemaList::NodeNames,
            ExportList::NodeProperties => SchemaList::NodeProperties,
            ExportList::Relationships => SchemaList::Relationships,
            ExportList::RelationshipProperties => SchemaList::RelationshipProperties,
        }
    }
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            neo4j_url: cli.neo4j_url.clone(),
            neo4j_user: cli.neo4j_user.clone(),
            neo4j_password: cli.neo4j_password.clone(),
            neo4j_database: cli.neo4j_database.clone(),
            max_edit_distance: cli.max_edit_distance,
            fuzzy_threshold: cli.fuzzy_threshold,
            instance_limit: cli.instance_limit,
            request_timeout_secs: cli.request_timeout_secs,
            neighborhood_policy: cli.neighborhood_policy,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExtractorConfig::from_yaml_file(path),
        None => ExtractorConfig::from_cli(config::CliConfig::from(&cli)),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &ExtractorConfig) -> CliResult<()> {
    match command {
        Command::Extract { output, simplified } => {
            let extractor = connect(config).await?;
            let parsed = if simplified {
                extractor.save_schema_simplified(&output).await?
            } else {
                extractor.save_schema(&output).await?
            };
            report_filtered(&parsed);
        }
        Command::Export { list, output } => {
            let extractor = connect(config).await?;
            extractor.export_list(list.into(), &output).await?;
        }
        Command::NodeData { label } => {
            let extractor = connect(config).await?;
            let data = extractor.upload_graph_data(&label).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Labels => {
            let extractor = connect(config).await?;
            for label in extractor.node_labels().await? {
                println!("{}", label);
            }
        }
        Command::Subschema {
            entities,
            schema_file,
        } => {
            let parsed = load_schema(&schema_file)?;
            report_filtered(&parsed);
            print!(
                "{}",
                build_subschema(
                    &entities,
                    &parsed.snapshot,
                    config.max_edit_distance,
                    config.neighborhood_policy,
                )
            );
        }
        Command::Match {
            question,
            strategy,
            schema_file,
        } => {
            let parsed = load_schema(&schema_file)?;
            let strategy = MatchStrategy::from_name(&strategy, config.fuzzy_threshold)?;
            let labels = extract_relevant_nodes(
                &question,
                &parsed.snapshot.node_labels(),
                &strategy,
                &HeuristicExtractor,
            )?;
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        Command::Instances {
            labels,
            data_type,
            schema_file,
        } => {
            let parsed = load_schema(&schema_file)?;
            let data_type = PropertyDataType::from(data_type.as_str());

            let extractor = connect(config).await?;
            let sampled = extractor
                .extract_data_values(&labels, config.instance_limit)
                .await?;
            let instances = canonicalize_node_instances(sampled.into_iter().flatten().collect());

            let triples =
                project_node_instances(&labels, &parsed.snapshot.nodes, &data_type, &instances);
            println!("{}", serde_json::to_string_pretty(&triples)?);
        }
    }
    Ok(())
}

async fn connect(
    config: &ExtractorConfig,
) -> Result<SchemaExtractor<Neo4jHttpExecutor>, GraphSourceError> {
    let executor = Neo4jHttpExecutor::from_config(config)?;
    executor.verify_connectivity().await?;
    Ok(SchemaExtractor::new(executor))
}

fn report_filtered(parsed: &ParsedSchema) {
    if parsed.filtered.total() > 0 {
        log::warn!(
            "{} schema entries were dropped while parsing",
            parsed.filtered.total()
        );
    }
}
