//! Foldwise - book folding patterns in the terminal
//!
//! f o l d w i s e
//!
//! Talks to a pattern generator service: pick a word or a template, enter the
//! book's measurements, and get a page-by-page fold list.

use anyhow::{bail, Context, Result};
use clap::Parser;
use foldwise_adapters::{save_instructions, Config, HttpBackend};
use foldwise_core::model::format_mm;
use foldwise_core::{
    ExportCoordinator, FoldingSession, FormGeometry, PatternBackend, PatternRequestBuilder,
    PatternViewModel, SelectionMode,
};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "foldwise",
    about = "Terminal client for a book folding pattern generator",
    long_about = "f o l d w i s e\n\n\
                  Generates page-by-page folding instructions for a word or a\n\
                  template. Runs an interactive terminal UI unless --text,\n\
                  --template or --list-templates is given.",
    version
)]
struct Args {
    /// Pattern service base URL (overrides config and FOLDWISE_SERVER_URL)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Seconds to wait for the service before giving up
    #[arg(long, value_name = "N")]
    timeout_secs: Option<u64>,

    /// Print the template catalog and exit
    #[arg(long)]
    list_templates: bool,

    /// Generate a pattern for this text without the UI
    #[arg(long, conflicts_with = "template")]
    text: Option<String>,

    /// Generate a pattern for this template id without the UI
    #[arg(long, value_name = "ID")]
    template: Option<String>,

    /// Number of pages in the book
    #[arg(long)]
    pages: Option<u32>,

    /// Book height in millimetres
    #[arg(long, value_name = "MM")]
    height: Option<f64>,

    /// Page width in millimetres
    #[arg(long, value_name = "MM")]
    page_width: Option<f64>,

    /// Book width (spine thickness) in millimetres
    #[arg(long, value_name = "MM")]
    width: Option<f64>,

    /// Save the service's instruction file into DIR after generating
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

impl Args {
    fn is_headless(&self) -> bool {
        self.list_templates || self.text.is_some() || self.template.is_some()
    }

    /// Config defaults with any measurement flags applied on top.
    fn geometry(&self, defaults: &FormGeometry) -> FormGeometry {
        FormGeometry {
            pages: self.pages.unwrap_or(defaults.pages),
            height_mm: self.height.unwrap_or(defaults.height_mm),
            page_width_mm: self.page_width.unwrap_or(defaults.page_width_mm),
            width_mm: self.width.unwrap_or(defaults.width_mm),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.is_headless());

    let mut config = Config::load();
    if let Some(url) = &args.server {
        config.override_server_url(url);
    }
    if let Some(secs) = args.timeout_secs {
        config.override_timeout_secs(secs);
    }

    let backend = HttpBackend::from_config(&config)?;
    let server_label = backend.base_url().to_string();
    tracing::info!(server = %server_label, "starting");

    if args.list_templates {
        return list_templates(&backend).await;
    }
    if args.text.is_some() || args.template.is_some() {
        return generate_headless(&args, &config, &backend).await;
    }
    if args.export.is_some() {
        bail!("--export needs --text or --template");
    }

    let mut session = FoldingSession::new(
        config.default_geometry,
        config.preview_limit,
        config.reference_height_mm,
    );
    if let Some(geometry) = args_geometry_if_any(&args, &config) {
        session.geometry = geometry.into();
    }
    let backend: Arc<dyn PatternBackend> = Arc::new(backend);
    foldwise_ui::run_tui(session, backend, config.export_dir_or_cwd(), server_label).await
}

fn args_geometry_if_any(args: &Args, config: &Config) -> Option<FormGeometry> {
    let any = args.pages.is_some()
        || args.height.is_some()
        || args.page_width.is_some()
        || args.width.is_some();
    any.then(|| args.geometry(&config.default_geometry))
}

/// `RUST_LOG` wins; otherwise warnings only. The TUI owns the terminal, so its
/// logs go to a file.
fn init_tracing(headless: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let Some(dir) = dirs::cache_dir().map(|d| d.join("foldwise")) else {
        return;
    };
    let file = fs::create_dir_all(&dir).and_then(|_| File::create(dir.join("foldwise.log")));
    if let Ok(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

async fn list_templates(backend: &HttpBackend) -> Result<()> {
    let catalog = backend
        .templates()
        .await
        .context("Could not load templates")?;
    if catalog.is_empty() {
        println!("  No templates available");
        return Ok(());
    }
    for category in catalog.categories() {
        println!();
        println!("  {}", category.to_uppercase());
        for template in catalog.templates(category) {
            println!("    {:<14} {}", template.id, template.name);
        }
    }
    println!();
    Ok(())
}

async fn generate_headless(args: &Args, config: &Config, backend: &HttpBackend) -> Result<()> {
    let (mode, text, template) = match (&args.text, &args.template) {
        (Some(text), _) => (SelectionMode::Text, text.as_str(), None),
        (None, Some(id)) => (SelectionMode::Template, "", Some(id.as_str())),
        (None, None) => bail!("--text or --template is required"),
    };
    let geometry = args.geometry(&config.default_geometry);
    let planned = PatternRequestBuilder::build_with_geometry(mode, geometry, text, template)?;

    eprintln!("  Generating pattern...");
    let result = backend
        .generate(&planned)
        .await
        .context("Pattern generation failed")?;

    let mut view_model = PatternViewModel::with_reference_height(config.reference_height_mm);
    view_model.ingest(result);

    if let Some(summary) = view_model.summary(config.preview_limit) {
        println!();
        print!(
            "  {} folds, {} pages, about {:.0} min",
            summary.total_folds, summary.pages_used, summary.estimated_time_minutes
        );
        match summary.subject {
            Some(subject) => println!(" ({})", subject),
            None => println!(),
        }
        println!();
    }

    let steps = view_model.instruction_list();
    if steps.is_empty() {
        println!("  No folds in this pattern");
    }
    for step in steps.iter() {
        let f = step.fold;
        println!(
            "  Step {:<4} Page {:<5} from {} mm  to {} mm  depth {} mm",
            step.step_number,
            f.page,
            format_mm(f.start_mm),
            format_mm(f.end_mm),
            format_mm(f.depth_mm)
        );
    }

    if let Some(dir) = &args.export {
        let exported = ExportCoordinator::export_current(&view_model, backend).await?;
        let path = save_instructions(dir, &exported)?;
        println!();
        println!("  + Saved {}", path.display());
    }
    Ok(())
}
