use std::fs;
use std::path::{Path, PathBuf};

use agents_lab::report::{digest_text, write_markdown_report, DEFAULT_DIGEST_FILE};
use agents_lab::{Credentials, DispatchResult, Lab, Settings};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agents-lab",
    version,
    about = "Multi-modal prompt agent and research digest summarizer"
)]
struct Cli {
    /// Optional YAML settings (endpoints, model, image keywords, chunk size)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    gemini_api_key: Option<String>,
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, global = true)]
    hf_token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route a prompt to the text or the image model
    Ask {
        prompt: String,
        #[arg(long, default_value = "generated.png")]
        image_out: PathBuf,
    },
    /// Search arXiv and summarize the newest papers on a topic
    Digest {
        #[arg(default_value = "large language models in healthcare")]
        query: String,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
        papers: u8,
        /// Summarize the scraped paper page instead of the abstract (slower)
        #[arg(long)]
        scrape: bool,
        #[arg(long, default_value = DEFAULT_DIGEST_FILE)]
        out: PathBuf,
        /// Also write a Markdown report
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let credentials = Credentials::new(cli.gemini_api_key, cli.hf_token);
    let lab = Lab::new(settings, credentials).context("build http client")?;

    match cli.command {
        Command::Ask { prompt, image_out } => run_ask(&lab, &prompt, &image_out),
        Command::Digest {
            query,
            papers,
            scrape,
            out,
            report,
        } => run_digest(&lab, &query, usize::from(papers), scrape, &out, report.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agents_lab=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let settings = serde_yaml::from_str(&raw).context("parse config yaml")?;
    Ok(settings)
}

fn run_ask(lab: &Lab, prompt: &str, image_out: &Path) -> Result<()> {
    let output = lab
        .ask(prompt)
        .context("set GEMINI_API_KEY or pass --gemini-api-key")?;
    if let Some(error) = output.error() {
        bail!("{}", error);
    }
    match output {
        DispatchResult::Text {
            content: Some(text),
            ..
        } => {
            println!("{text}");
        }
        DispatchResult::Image {
            image: Some(image), ..
        } => {
            image
                .save(image_out)
                .with_context(|| format!("write image {}", image_out.display()))?;
            println!(
                "Saved {}x{} image for \"{}\" to {}",
                image.width(),
                image.height(),
                prompt,
                image_out.display()
            );
        }
        _ => bail!("model returned no content"),
    }
    Ok(())
}

fn run_digest(
    lab: &Lab,
    query: &str,
    papers: usize,
    scrape: bool,
    out: &Path,
    report: Option<&Path>,
) -> Result<()> {
    let entries = lab
        .research(query, papers, scrape)
        .with_context(|| format!("research digest for '{query}'"))?;

    for entry in &entries {
        println!("### {}", entry.title);
        println!("{}", entry.summary);
        println!("Open Paper: {}", entry.url);
        println!();
    }

    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("create output directory")?;
    }
    fs::write(out, digest_text(&entries))
        .with_context(|| format!("write digest {}", out.display()))?;
    if let Some(path) = report {
        write_markdown_report(path, query, &entries)
            .with_context(|| format!("write report {}", path.display()))?;
    }

    println!(
        "Summarized {} papers successfully, saved to {}",
        entries.len(),
        out.display()
    );
    Ok(())
}
