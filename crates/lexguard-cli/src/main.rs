mod display;
mod prepare;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lexguard_core::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CHUNK_LENGTH, DEFAULT_OVERLAP, DEFAULT_SAFE_RATIO,
    DEFAULT_SEED,
};
use lexguard_core::{BalancePolicy, ChunkConfig, KeywordTable, LabelSpace, PipelineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lexguard", version, about = "Contract risk corpus builder and clause analyser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the balanced training corpus from annotated contracts.
    Prepare {
        #[arg(long, env = "LEXGUARD_INPUT", default_value = "CUAD_v1.json")]
        input: PathBuf,
        /// `.csv` or `.parquet`.
        #[arg(long, env = "LEXGUARD_OUTPUT", default_value = "train_data.csv")]
        output: PathBuf,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Print zone and label counts without balancing or writing.
    Stats {
        #[arg(long, env = "LEXGUARD_INPUT", default_value = "CUAD_v1.json")]
        input: PathBuf,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Remap a prepared corpus to the classifier's label indices.
    ExportTraining {
        #[arg(long, default_value = "train_data.csv")]
        input: PathBuf,
        #[arg(long, default_value = "model_data.csv")]
        output: PathBuf,
    },
    /// Classify and explain the paragraphs of an extracted document.
    #[cfg(feature = "analyze")]
    Analyze {
        /// Extracted text; form feeds separate pages.
        #[arg(long)]
        text: PathBuf,
        #[arg(long)]
        rule: Option<String>,
        #[arg(long, env = "LEXGUARD_MODEL_DIR", default_value = "models/lexguard-clauses")]
        model_dir: PathBuf,
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, env = "LEXGUARD_LLM_URL", default_value = lexguard_ai::DEFAULT_BASE_URL)]
        llm_url: String,
        #[arg(long, env = "LEXGUARD_LLM_MODEL", default_value = lexguard_ai::DEFAULT_MODEL)]
        llm_model: String,
    },
    /// Upsert a user record from a JSON payload.
    #[cfg(feature = "duckdb")]
    SyncUser {
        #[arg(long, default_value = "users.duckdb")]
        db: PathBuf,
        /// `{"clerk_id", "email", "name"?, "created_at"?}`
        #[arg(long)]
        json: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PipelineArgs {
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    #[arg(long, default_value_t = DEFAULT_OVERLAP)]
    overlap: usize,
    #[arg(long, default_value_t = DEFAULT_MIN_CHUNK_LENGTH)]
    min_chunk_length: usize,
    /// Safe rows kept per risky row.
    #[arg(long, default_value_t = DEFAULT_SAFE_RATIO)]
    ratio: usize,
    #[arg(long, env = "LEXGUARD_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,
}

impl PipelineArgs {
    fn to_config(&self) -> anyhow::Result<PipelineConfig> {
        Ok(PipelineConfig {
            chunking: ChunkConfig::new(self.chunk_size, self.overlap, self.min_chunk_length)?,
            keywords: KeywordTable::default(),
            balance: BalancePolicy {
                safe_ratio: self.ratio,
                seed: self.seed,
            },
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    tracing::debug!("lexguard v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Prepare {
            input,
            output,
            pipeline,
        } => {
            let config = pipeline.to_config()?;
            let stats = prepare::run_prepare(&input, &output, &config)?;
            print!(
                "{}",
                display::render_report(&stats.report, &config.keywords.categories())
            );
            println!(
                "\nwrote {} in {:.1}s",
                output.display(),
                stats.elapsed_secs
            );
        }
        Command::Stats { input, pipeline } => {
            let config = pipeline.to_config()?;
            let report = prepare::run_stats(&input, &config)?;
            print!(
                "{}",
                display::render_report(&report, &config.keywords.categories())
            );
        }
        Command::ExportTraining { input, output } => {
            let written = prepare::run_export(&input, &output, &LabelSpace::default())?;
            println!("wrote {written} rows to {}", output.display());
        }
        #[cfg(feature = "analyze")]
        Command::Analyze {
            text,
            rule,
            model_dir,
            api_key,
            llm_url,
            llm_model,
        } => {
            use anyhow::Context;
            use lexguard_ai::{Analyzer, ChatExplainer, OnnxClassifier};

            let raw = std::fs::read_to_string(&text)
                .with_context(|| format!("reading {}", text.display()))?;
            let pages: Vec<&str> = raw.split('\u{c}').collect();
            let filename = text
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let classifier = OnnxClassifier::load(&model_dir, LabelSpace::default())?;
            let explainer = ChatExplainer::new(llm_url, api_key, llm_model);
            let mut analyzer = Analyzer::new(classifier, explainer);
            let report = analyzer
                .analyze(&filename, &pages, rule.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        #[cfg(feature = "duckdb")]
        Command::SyncUser { db, json } => {
            use anyhow::Context;
            use lexguard_core::{SyncResponse, UserSync};
            use lexguard_store::{DuckUsers, UserDirectory};

            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("reading {}", json.display()))?;
            let user: UserSync = serde_json::from_str(&raw)?;
            let users = DuckUsers::open_persistent(&db)?;
            let updated = users.upsert(&user)?;
            println!("{}", serde_json::to_string(&SyncResponse::synced(updated))?);
        }
    }
    Ok(())
}
