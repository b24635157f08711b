// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and their flags:
//
//   evaluate — score predictions, dump the official answer file
//   tokenize — encode entity-marked text with a family tokenizer
//   store    — inspect / edit one JSON side store
//   replay   — fold candidate memories into the replay memory
//   labels   — print the label → task partition
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::{
    evaluate_use_case::EvaluateConfig,
    replay_use_case::ReplayConfig,
};
use crate::infra::{json_store::StoreKind, tokenizer_factory::TokenizerConfig};
use crate::ml::{model_type::ModelType, seed::SeedConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score predicted relation labels against gold labels
    Evaluate(EvaluateArgs),

    /// Tokenize entity-marked text with a pretrained tokenizer
    Tokenize(TokenizeArgs),

    /// Inspect or edit an auxiliary JSON store
    Store(StoreArgs),

    /// Append per-task candidate memories to the replay memory
    Replay(ReplayArgs),

    /// Print the relation label space grouped by task
    Labels(LabelsArgs),
}

/// Arguments for the `evaluate` command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// File with gold label ids (whitespace separated)
    #[arg(long)]
    pub gold: String,

    /// File with predicted label ids (whitespace separated)
    #[arg(long)]
    pub pred: String,

    /// Name of the evaluated task, used in logs and the CSV
    #[arg(long, default_value = "eval")]
    pub task: String,

    /// JSON task layout overriding the built-in per-task sample counts
    #[arg(long)]
    pub task_layout: Option<String>,

    /// Where to write the official-format answer file
    /// (e.g. eval/proposed_answers.txt)
    #[arg(long)]
    pub output_file: Option<String>,

    /// Directory for eval_metrics.csv
    #[arg(long)]
    pub metrics_dir: Option<String>,
}

impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            gold_file:   a.gold,
            pred_file:   a.pred,
            task_name:   a.task,
            layout_file: a.task_layout,
            output_file: a.output_file,
            metrics_dir: a.metrics_dir,
        }
    }
}

/// Arguments for the `tokenize` command.
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Encoder family: bert, roberta or albert
    #[arg(long, default_value = "bert")]
    pub model_type: ModelType,

    /// tokenizer.json, a directory holding one, or a hub identifier.
    /// Defaults to the family's pretrained checkpoint.
    #[arg(long)]
    pub model_name_or_path: Option<String>,

    /// Also add the family's [CLS]/[SEP]-style special tokens
    #[arg(long)]
    pub add_special_tokens: bool,

    /// Text to encode, e.g. "<e1> Jobs </e1> founded <e2> Apple </e2>"
    pub text: String,
}

impl TokenizeArgs {
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        match &self.model_name_or_path {
            Some(path) => TokenizerConfig {
                model_type:         self.model_type,
                model_name_or_path: path.clone(),
            },
            None => TokenizerConfig::for_family(self.model_type),
        }
    }
}

/// Arguments for the `store` command.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// entity_features, edge_features, graph or entity2id
    #[arg(long)]
    pub kind: StoreKind,

    /// Path of the store file
    #[arg(long)]
    pub path: String,

    #[command(subcommand)]
    pub action: StoreAction,
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// Print the number of entries and the first keys
    Show {
        #[arg(long, default_value_t = 10)]
        max_keys: usize,
    },

    /// Print the value stored under a key
    Get {
        #[arg(long)]
        key: String,
    },

    /// Set a key to a JSON value
    Put {
        #[arg(long)]
        key: String,

        /// Value as JSON, e.g. '[0.1, 0.2]' or '7'
        #[arg(long)]
        value: String,
    },

    /// Remove a key
    Remove {
        #[arg(long)]
        key: String,
    },
}

/// Arguments for the `replay` command.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON array of per-task [{score, features}] arrays
    #[arg(long)]
    pub candidates: String,

    /// JSON replay memory file, created if missing
    #[arg(long, default_value = "memory.json")]
    pub memory: String,

    /// Replay batch size (must be positive)
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Shuffle the memory before cutting batches
    #[arg(long)]
    pub shuffle: bool,

    /// JSON task layout used for the per-task exemplar counts
    #[arg(long)]
    pub task_layout: Option<String>,

    /// Seed for the Burn backends and the shuffle RNG
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Leave the GPU backend unseeded
    #[arg(long)]
    pub no_cuda: bool,
}

impl From<ReplayArgs> for ReplayConfig {
    fn from(a: ReplayArgs) -> Self {
        ReplayConfig {
            candidates_file: a.candidates,
            memory_file:     a.memory,
            batch_size:      a.batch_size,
            shuffle:         a.shuffle,
            layout_file:     a.task_layout,
            seed:            SeedConfig { seed: a.seed, no_cuda: a.no_cuda },
        }
    }
}

/// Arguments for the `labels` command.
#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// JSON task layout overriding the built-in one
    #[arg(long)]
    pub task_layout: Option<String>,
}
