//! DocMeta — document metadata generation server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use docmeta_core::DocMetaConfig;
use docmeta_ingest::{DocumentExtractor, OcrConfig};
use docmeta_server::{build_generator, build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("DOCMETA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Print the metadata record of a single file as JSON.
fn analyze_file(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("No such file: {}", path.display());
    }
    let config = DocMetaConfig::from_env(resolve_data_dir())?;
    let generator = build_generator(&config);
    let extractor = DocumentExtractor::new(OcrConfig {
        tesseract_cmd: config.tesseract_cmd.clone(),
    });

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = extractor.extract_text(path, &ext);
    let analysis = generator.analyze(&text, &filename);
    for degradation in &analysis.degraded {
        eprintln!("warning: {:?} degraded: {}", degradation.heuristic, degradation.reason);
    }
    println!("{}", serde_json::to_string_pretty(&analysis.record)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--analyze" | "analyze" => {
                if args.len() < 3 {
                    eprintln!("Usage: docmeta analyze <file>");
                    std::process::exit(1);
                }
                return analyze_file(Path::new(&args[2]));
            }
            "--help" | "-h" | "help" => {
                println!("DocMeta — document metadata generation server");
                println!();
                println!("Usage: docmeta [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  analyze <file>           Print the metadata of one file as JSON");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'docmeta help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    let config = DocMetaConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config));

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("DocMeta server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
