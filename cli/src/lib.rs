use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slidegenius_client::HttpSlideService;
use slidegenius_common::TemplateFile;
use slidegenius_core::{Config, Controller, StatusReporter, WorkflowState};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub mod page;

pub use page::{FormFields, TerminalPage};

#[derive(Parser, Debug)]
#[command(name = "slidegenius")]
#[command(about = "Preview outlines and generate presentations with a SlideGenius service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file (.toml or .json); defaults to the first one found in the working directory
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Service root URL, e.g. http://localhost:8000
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request an outline preview
    Preview(PreviewArgs),
    /// Generate a presentation from a template and download it
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Source text to turn into slides
    #[arg(long, conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Read the source text from a file
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Extra guidance for tone or structure
    #[arg(long, default_value = "")]
    pub guidance: String,

    /// LLM provider id (defaults to the configured provider)
    #[arg(long)]
    pub provider: Option<String>,

    /// Provider API key (defaults to SLIDEGENIUS_API_KEY / OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the rendered preview as an HTML document
    #[arg(long, value_name = "PATH")]
    pub html_out: Option<PathBuf>,

    /// Browse the outline in the terminal viewer
    #[arg(long)]
    pub view: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Template presentation (.pptx or .potx)
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Directory the generated presentation is saved to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub async fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    execute(cli).await
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve configuration: file, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Config::load_with_fallback(&cwd)
        }
    };
    config.apply_env();
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

pub async fn execute(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;
    let service = HttpSlideService::new(config.base_url.clone());
    tracing::debug!(base_url = %service.base_url(), "using service");

    match cli.command {
        Commands::Preview(args) => preview(service, &config, args).await,
        Commands::Generate(args) => generate(service, &config, args).await,
    }
}

fn status_state() -> WorkflowState {
    WorkflowState::new(StatusReporter::with_sink(|text| {
        if !text.is_empty() {
            eprintln!("{text}");
        }
    }))
}

async fn preview(service: HttpSlideService, config: &Config, args: PreviewArgs) -> Result<ExitCode> {
    let fields = read_form_fields(&args.input, config).await?;
    let page = TerminalPage::new(fields, None, config.output_dir.clone());
    let mut controller = Controller::with_state(service, page, status_state());

    let Ok(outline) = controller.preview().await else {
        return Ok(ExitCode::FAILURE);
    };
    let page = controller.into_page();

    if let Some(path) = &args.html_out {
        tokio::fs::write(path, page.preview_document())
            .await
            .with_context(|| format!("Failed to write preview to {}", path.display()))?;
        println!("Preview written to {}", path.display());
    } else if !args.view {
        println!("{}", page.preview_container());
    }

    if args.view {
        slidegenius_tui::run_outline_view(&outline).await?;
    }

    Ok(ExitCode::SUCCESS)
}

async fn generate(service: HttpSlideService, config: &Config, args: GenerateArgs) -> Result<ExitCode> {
    let fields = read_form_fields(&args.input, config).await?;
    let template = match &args.template {
        Some(path) => Some(read_template(path).await?),
        None => None,
    };
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    let page = TerminalPage::new(fields, template, out_dir);
    let mut controller = Controller::with_state(service, page, status_state());

    if controller.generate().await.is_err() {
        return Ok(ExitCode::FAILURE);
    }
    for path in controller.page().saved() {
        println!("Saved {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Collect raw form values. Trimming and presence checks happen in the workflow.
pub async fn read_form_fields(input: &InputArgs, config: &Config) -> Result<FormFields> {
    let text = match (&input.text, &input.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read text file {}", path.display()))?,
        (None, None) => String::new(),
    };

    Ok(FormFields {
        text,
        guidance: input.guidance.clone(),
        provider: input
            .provider
            .clone()
            .unwrap_or_else(|| config.provider.clone()),
        api_key: input
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default(),
    })
}

pub async fn read_template(path: &Path) -> Result<TemplateFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("template.pptx")
        .to_string();
    Ok(TemplateFile::new(file_name, bytes))
}
