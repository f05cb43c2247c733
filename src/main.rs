//! Strata CLI - pipeline validation and auto-layout

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use strata::error::{FixSuggestion, StrataError};
use strata::layout::{self, LayoutConfig, Placement};
use strata::model::Pipeline;
use strata::report::ValidationReport;

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Strata - graph validation and auto-layout for pipeline canvases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pipeline file
    Check {
        /// Path to .strata.json file
        file: String,

        /// Output format (text, json, compact)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compute a layered layout for a pipeline file
    Layout {
        /// Path to .strata.json file
        file: String,

        /// Write computed positions back into the file
        #[arg(long)]
        write: bool,

        /// Horizontal pitch per node
        #[arg(long, default_value_t = layout::DEFAULT_NODE_WIDTH)]
        node_width: f64,

        /// Vertical pitch between layers
        #[arg(long, default_value_t = layout::DEFAULT_LAYER_HEIGHT)]
        layer_height: f64,

        /// Canvas width used to center each layer
        #[arg(long, default_value_t = layout::DEFAULT_CANVAS_WIDTH)]
        canvas_width: f64,

        /// X offset applied to every node
        #[arg(long, default_value_t = 0.0)]
        origin_x: f64,

        /// Y offset applied to every node
        #[arg(long, default_value_t = 0.0)]
        origin_y: f64,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, format } => check_pipeline(&file, &format),
        Commands::Layout {
            file,
            write,
            node_width,
            layer_height,
            canvas_width,
            origin_x,
            origin_y,
        } => {
            let config = LayoutConfig {
                node_width,
                layer_height,
                canvas_width,
                origin_x,
                origin_y,
            };
            layout_pipeline(&file, write, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_pipeline(file: &str) -> Result<Pipeline, StrataError> {
    if !Path::new(file).exists() {
        return Err(StrataError::DocumentNotFound {
            path: file.to_string(),
        });
    }
    let json = fs::read_to_string(file)?;
    let pipeline = Pipeline::load_str(&json)?;
    tracing::debug!(
        "loaded '{}': {} nodes, {} edges",
        file,
        pipeline.nodes().len(),
        pipeline.edges().len()
    );
    Ok(pipeline)
}

fn check_pipeline(file: &str, format: &str) -> Result<(), StrataError> {
    let pipeline = load_pipeline(file)?;
    let report = pipeline.validate();

    match format {
        "text" => print_text_report(file, &report),
        "json" => {
            let body = serde_json::json!({
                "valid": report.is_valid(),
                "node_count": report.node_count(),
                "edge_count": report.edge_count(),
                "errors": report.messages(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        "compact" => {
            let verdict = if report.is_valid() { "ok" } else { "FAIL" };
            println!(
                "{} {}n {}e",
                verdict,
                report.node_count(),
                report.edge_count()
            );
        }
        other => {
            return Err(StrataError::UnknownFormat {
                value: other.to_string(),
            });
        }
    }

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_text_report(file: &str, report: &ValidationReport) {
    if report.is_valid() {
        println!("{} Pipeline '{}' is valid", "✓".green(), file);
        println!("  Nodes: {}", report.node_count());
        println!("  Edges: {}", report.edge_count());
        return;
    }

    println!(
        "{} Pipeline '{}' has {} problem(s)",
        "✗".red(),
        file,
        report.errors().len()
    );
    for (i, issue) in report.errors().iter().enumerate() {
        println!("  {}. {}", i + 1, issue);
        println!("     {} {}", "Fix:".yellow(), issue.suggestion());
    }
}

fn layout_pipeline(file: &str, write: bool, config: &LayoutConfig) -> Result<(), StrataError> {
    let mut pipeline = load_pipeline(file)?;
    let layout = pipeline.compute_layout(config);

    if !layout.unresolved().is_empty() {
        eprintln!(
            "{} cycle detected, {} node(s) parked in a trailing layer",
            "Warning:".yellow().bold(),
            layout.unresolved().len()
        );
    }

    if write {
        pipeline.apply_layout(&layout);
        fs::write(file, pipeline.to_json()?)?;
        println!(
            "{} Wrote {} position(s) to '{}'",
            "✓".green(),
            layout.len(),
            file
        );
    } else {
        // BTreeMap keeps the printed placements in stable key order
        let placements: BTreeMap<&str, &Placement> = layout
            .placements()
            .iter()
            .map(|(id, placement)| (id.as_str(), placement))
            .collect();
        println!("{}", serde_json::to_string_pretty(&placements)?);
    }

    Ok(())
}
