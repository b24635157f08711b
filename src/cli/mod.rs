// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and routes each subcommand
// to its use case in Layer 2. Results are printed here and
// nowhere else.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, EvaluateArgs, LabelsArgs, ReplayArgs, StoreAction, StoreArgs, TokenizeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "rbert-memkit",
    version,
    about = "Evaluation, tokenizer and memory utilities for continual relation extraction."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Tokenize(args) => run_tokenize(args),
            Commands::Store(args)    => run_store(args),
            Commands::Replay(args)   => run_replay(args),
            Commands::Labels(args)   => run_labels(args),
        }
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    tracing::info!("Evaluating '{}' against '{}'", args.pred, args.gold);
    let report = EvaluateUseCase::new(args.into()).execute()?;

    println!("task:        {}", report.task_name);
    println!("examples:    {}", report.num_examples);
    println!("whole_acc:   {:.4}", report.metrics.whole_acc);
    println!("average_acc: {:.4}", report.metrics.average_acc);
    for (task, acc) in report.per_task.iter().enumerate() {
        println!("  task {:>2}: {:.4}", task, acc);
    }
    Ok(())
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    use crate::application::tokenize_use_case::TokenizeUseCase;

    let use_case = TokenizeUseCase::new(&args.tokenizer_config())?;
    let out = use_case.tokenize(&args.text, args.add_special_tokens)?;

    println!("tokens:  {}", out.tokens.join(" "));
    println!("ids:     {:?}", out.ids);
    for (marker, pos) in &out.marker_positions {
        println!("  {marker} at {pos}");
    }
    Ok(())
}

fn run_store(args: StoreArgs) -> Result<()> {
    use crate::application::store_use_case::StoreUseCase;
    use crate::infra::json_store::JsonStore;

    let use_case = StoreUseCase::new(JsonStore::new(args.kind, &args.path));

    match args.action {
        StoreAction::Show { max_keys } => {
            let summary = use_case.summary(max_keys)?;
            println!("{}: {} entries", summary.name, summary.entries);
            for key in summary.sample_keys {
                println!("  {key}");
            }
        }
        StoreAction::Get { key } => match use_case.get(&key)? {
            Some(value) => println!("{value}"),
            None        => println!("'{key}' not found"),
        },
        StoreAction::Put { key, value } => {
            let value: serde_json::Value = serde_json::from_str(&value)
                .with_context(|| format!("'{value}' is not valid JSON"))?;
            use_case.put(&key, value)?;
        }
        StoreAction::Remove { key } => {
            if use_case.remove(&key)?.is_none() {
                println!("'{key}' not found");
            }
        }
    }
    Ok(())
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    use crate::application::replay_use_case::ReplayUseCase;

    let summary = ReplayUseCase::new(args.into()).execute()?;
    println!(
        "memory: {} + {} = {} exemplars, {} replay batches",
        summary.previous_size,
        summary.added,
        summary.memory_size,
        summary.batch_sizes.len()
    );
    for (task, count) in summary.per_task.iter().enumerate() {
        println!("  task {:>2}: {}", task, count);
    }
    Ok(())
}

fn run_labels(args: LabelsArgs) -> Result<()> {
    use crate::domain::label::{get_label, TaskLayout};

    let layout = TaskLayout::resolve(args.task_layout.as_deref())?;
    let labels = get_label(&args);

    for (task, &samples) in layout.samples_per_task.iter().enumerate() {
        let members: Vec<String> = labels
            .iter()
            .filter(|&&l| layout.task_of(l) == task)
            .map(|l| l.to_string())
            .collect();
        println!("task {:>2} ({:>5} samples): {}", task, samples, members.join(" "));
    }
    Ok(())
}
