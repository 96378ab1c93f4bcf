// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use persona_extractor::models::CollectionInput;
use persona_extractor::storage::StorageManager;
use persona_extractor::utils::{self, AppError};
use persona_extractor::{AnalyzerConfig, CollectionProcessor, FileReader, RankingWeights};

/// Command Line Interface for persona-driven section extraction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Collection description (documents, persona, job to be done)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding the documents (defaults to the input file's directory)
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Output directory for the ranked sections
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Number of ranked sections written to the output
    #[arg(short, long, default_value = "5")]
    top_sections: usize,

    /// Maximum sections kept per document (default: 50)
    #[arg(long)]
    max_sections: Option<usize>,

    /// Debug mode - save per-document analysis dumps
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // Command-line section limit wins over the environment
    if let Some(limit) = args.max_sections {
        std::env::set_var("MAX_SECTIONS", limit.to_string());
        tracing::debug!("Setting MAX_SECTIONS to {} from command-line argument", limit);
    }
    let config = AnalyzerConfig::from_env();
    if config.max_sections == 0 {
        return Err(AppError::Config("MAX_SECTIONS must be at least 1".to_string()));
    }

    // 3. Load the collection description
    let raw = tokio::fs::read_to_string(&args.input).await?;
    let input: CollectionInput = serde_json::from_str(&raw)?;
    if input.documents.is_empty() {
        return Err(AppError::Config(format!("{} lists no documents", args.input.display())));
    }

    let docs_dir = args.docs_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Run the collection
    tracing::info!(
        "Processing {} documents from {} for persona '{}'",
        input.documents.len(),
        docs_dir.display(),
        input.persona.role
    );
    let processor = CollectionProcessor::new(FileReader::new(), config, RankingWeights::default(), args.top_sections);
    let result = processor.process(&input, &docs_dir).await;

    // 6. Debug dumps
    if args.debug {
        for analysis in &result.analyses {
            match storage.save_analysis(analysis) {
                Ok(path) => tracing::info!("Saved analysis dump to: {}", path.display()),
                Err(e) => tracing::error!("Failed to save analysis dump: {}", e),
            }
        }
        if let Err(e) = storage.save_debug_record("persona_summary", &result.summary) {
            tracing::error!("Failed to save persona summary: {}", e);
        }
        if let Err(e) = storage.save_debug_record("ranked_sections", &result.ranked) {
            tracing::error!("Failed to save ranked sections: {}", e);
        }
    }

    // 7. Save the output
    let path = storage.save_output(&result.output)?;

    let failure_count = result.failed_documents();
    let success_count = result.analyses.len() - failure_count;
    tracing::info!(
        "Processing finished. Success: {}, Failures: {}, Output: {}",
        success_count,
        failure_count,
        path.display()
    );

    if success_count == 0 {
        return Err(AppError::Processing(format!("Failed to read any of the {} documents", failure_count)));
    }

    Ok(())
}
