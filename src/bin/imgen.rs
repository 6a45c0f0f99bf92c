//! CLI for imgen - image generation and editing over OpenAI-compatible APIs.

use clap::{Args, Parser, Subcommand, ValueEnum};
use imgen::{EditRequest, EndpointChoice, GenerationRequest, ImageResult, ImagesClient, Quality};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imgen")]
#[command(about = "Generate and edit images via OpenAI-compatible APIs (OpenAI, ImageRouter)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate images from a text prompt
    Generate(GenerateArgs),

    /// Edit an image according to a text prompt
    Edit(EditArgs),

    /// List the model identifiers available for an endpoint
    Models(ModelsArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// The text prompt describing the image
    prompt: String,

    /// Model identifier (see the models subcommand)
    #[arg(short, long)]
    model: String,

    /// Output file path for inline results; URLs are printed instead
    #[arg(short, long, default_value = "image.png")]
    output: PathBuf,

    /// Rendering quality
    #[arg(short, long, value_enum, default_value = "auto")]
    quality: QualityArg,

    #[command(flatten)]
    endpoint: EndpointArgs,

    /// API key for the endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    /// The text prompt describing the edit
    prompt: String,

    /// Image to edit (path to an image file)
    #[arg(short, long)]
    input: PathBuf,

    /// Mask constraining the edit (path to an image file)
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Model identifier (see the models subcommand)
    #[arg(short, long)]
    model: Option<String>,

    /// Output file path for an inline result; a URL is printed instead
    #[arg(short, long, default_value = "edited.png")]
    output: PathBuf,

    /// Rendering quality
    #[arg(short, long, value_enum)]
    quality: Option<QualityArg>,

    #[command(flatten)]
    endpoint: EndpointArgs,

    /// API key for the endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Args)]
struct ModelsArgs {
    #[command(flatten)]
    endpoint: EndpointArgs,
}

#[derive(Args)]
struct EndpointArgs {
    /// Endpoint to send requests to
    #[arg(short, long, value_enum, default_value = "openai")]
    endpoint: EndpointArg,

    /// Base URL, required with --endpoint custom
    #[arg(long)]
    custom_url: Option<String>,
}

impl EndpointArgs {
    fn resolve(&self) -> anyhow::Result<String> {
        if matches!(self.endpoint, EndpointArg::Custom) && self.custom_url.is_none() {
            anyhow::bail!("--custom-url is required with --endpoint custom");
        }
        let choice = EndpointChoice::from(self.endpoint);
        Ok(choice.resolve(self.custom_url.as_deref().unwrap_or("")))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EndpointArg {
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "imagerouter")]
    ImageRouter,
    #[value(name = "custom")]
    Custom,
}

impl From<EndpointArg> for EndpointChoice {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::OpenAi => EndpointChoice::OpenAI,
            EndpointArg::ImageRouter => EndpointChoice::ImageRouter,
            EndpointArg::Custom => EndpointChoice::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QualityArg {
    Auto,
    Low,
    Medium,
    High,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Auto => Quality::Auto,
            QualityArg::Low => Quality::Low,
            QualityArg::Medium => Quality::Medium,
            QualityArg::High => Quality::High,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            generate(args, cli.json).await?;
        }
        Commands::Edit(args) => {
            edit(args, cli.json).await?;
        }
        Commands::Models(args) => {
            models(args, cli.json).await?;
        }
    }

    Ok(())
}

fn build_client(base_url: &str, api_key: Option<String>) -> anyhow::Result<ImagesClient> {
    let mut builder = ImagesClient::builder().base_url(base_url);
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    Ok(builder.build()?)
}

async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let base_url = args.endpoint.resolve()?;
    let client = build_client(&base_url, args.api_key)?;

    let request =
        GenerationRequest::new(&args.prompt, &args.model).with_quality(args.quality.into());

    let results = client.generate(&request).await?;

    let mut urls = Vec::new();
    let mut files = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            ImageResult::Url(url) => {
                urls.push(url);
            }
            ImageResult::Inline(bytes) => {
                let path = numbered_path(&args.output, index);
                std::fs::write(&path, &bytes)?;
                files.push((path, bytes.len()));
            }
        }
    }

    if json_output {
        let result = serde_json::json!({
            "type": "generation",
            "success": true,
            "model": args.model,
            "urls": urls,
            "files": files
                .iter()
                .map(|(path, _)| path.display().to_string())
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for url in &urls {
            println!("{}", url);
        }
        for (path, size) in &files {
            println!("Saved {} ({} bytes)", path.display(), size);
        }
    }

    Ok(())
}

async fn edit(args: EditArgs, json_output: bool) -> anyhow::Result<()> {
    let base_url = args.endpoint.resolve()?;
    let client = build_client(&base_url, args.api_key)?;

    let mut request = EditRequest::new(&args.prompt).with_image(std::fs::read(&args.input)?);
    if let Some(ref mask_path) = args.mask {
        request = request.with_mask(std::fs::read(mask_path)?);
    }
    if let Some(model) = args.model {
        request = request.with_model(model);
    }
    if let Some(quality) = args.quality {
        request = request.with_quality(quality.into());
    }

    match client.edit(&request).await? {
        ImageResult::Url(url) => {
            if json_output {
                let result = serde_json::json!({
                    "type": "edit",
                    "success": true,
                    "url": url,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", url);
            }
        }
        ImageResult::Inline(bytes) => {
            std::fs::write(&args.output, &bytes)?;
            if json_output {
                let result = serde_json::json!({
                    "type": "edit",
                    "success": true,
                    "output": args.output.display().to_string(),
                    "size_bytes": bytes.len(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Saved {} ({} bytes)", args.output.display(), bytes.len());
            }
        }
    }

    Ok(())
}

async fn models(args: ModelsArgs, json_output: bool) -> anyhow::Result<()> {
    let base_url = args.endpoint.resolve()?;
    let models = imgen::models::list_models(&base_url).await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else if models.is_empty() {
        println!("No models available");
    } else {
        for model in &models {
            println!("{}", model);
        }
    }

    Ok(())
}

/// Appends an index to the file name for second and later results.
fn numbered_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let ext = base.extension().and_then(|e| e.to_str()).unwrap_or("png");
    base.with_file_name(format!("{}-{}.{}", stem, index, ext))
}
