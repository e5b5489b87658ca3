//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use tpcs_llm::config::{
    DEFAULT_AWS_REGION, DEFAULT_AZURE_DEPLOYMENT, DEFAULT_BEDROCK_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS,
};

pub const DEFAULT_STAGING_DATA: &str = "data/toronto_staging.json";

#[derive(Debug, Parser)]
#[command(
    name = "tpcs",
    version,
    about = "Toronto Pediatric Cancer Staging from free-text medical notes",
    long_about = "Identify the cancer in pediatric medical notes and stage it against the \
                  Toronto Pediatric Cancer Staging System using a text-generation model.\n\n\
                  Research prototype: the output is unvalidated and not for clinical use."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Reference table JSON.
    #[arg(
        long = "staging-data",
        value_name = "PATH",
        env = "TPCS_STAGING_DATA",
        default_value = DEFAULT_STAGING_DATA,
        global = true
    )]
    pub staging_data: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stage one or more medical notes.
    Stage(StageArgs),

    /// List the categories and stage names of the reference table.
    Categories,

    /// List the subtype to category synonym map.
    Synonyms,
}

#[derive(Debug, Args)]
pub struct StageArgs {
    /// Medical note text files.
    #[arg(value_name = "NOTE", required_unless_present = "notes_dir", conflicts_with = "notes_dir")]
    pub notes: Vec<PathBuf>,

    /// Process every `*.txt` file in this directory.
    #[arg(long = "notes-dir", value_name = "DIR")]
    pub notes_dir: Option<PathBuf>,

    /// CSV summary path.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = "results.csv")]
    pub output: PathBuf,

    /// Directory for Markdown reports (default: alongside the CSV).
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Skip the per-note Markdown reports.
    #[arg(long = "no-markdown")]
    pub no_markdown: bool,

    /// Run status file.
    #[arg(long = "status-file", value_name = "PATH", default_value = "project_status.md")]
    pub status_file: PathBuf,

    /// Print each step's raw model response.
    #[arg(long = "show-responses")]
    pub show_responses: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ProviderArgs {
    /// Text-generation provider.
    #[arg(long, value_enum, env = "TPCS_PROVIDER", default_value = "bedrock")]
    pub provider: ProviderKind,

    /// Sampling temperature.
    #[arg(long, env = "TPCS_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Per-call timeout in seconds.
    #[arg(long = "timeout-secs", env = "TPCS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// AWS region for Bedrock.
    #[arg(long = "aws-region", env = "AWS_REGION", default_value = DEFAULT_AWS_REGION)]
    pub aws_region: String,

    /// Named AWS profile for Bedrock credentials.
    #[arg(long = "aws-profile", env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,

    /// Bedrock model or inference profile id.
    #[arg(long, env = "BEDROCK_MODEL_ID", default_value = DEFAULT_BEDROCK_MODEL)]
    pub model: String,

    /// Azure OpenAI endpoint, e.g. https://name.openai.azure.com.
    #[arg(long = "azure-endpoint", env = "AZURE_ENDPOINT", hide_env_values = true)]
    pub azure_endpoint: Option<String>,

    /// Azure OpenAI API key.
    #[arg(long = "azure-api-key", env = "AZURE_API_KEY", hide_env_values = true)]
    pub azure_api_key: Option<String>,

    /// Azure OpenAI API version.
    #[arg(long = "azure-api-version", env = "AZURE_API_VERSION")]
    pub azure_api_version: Option<String>,

    /// Azure OpenAI deployment name.
    #[arg(
        long = "azure-deployment",
        env = "AZURE_GPT4O_DEPLOYMENT",
        default_value = DEFAULT_AZURE_DEPLOYMENT
    )]
    pub azure_deployment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Bedrock,
    Azure,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
