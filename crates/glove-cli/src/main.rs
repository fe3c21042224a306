mod config;

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use glove_core::{cosine_similarity, Embeddings, EncodeOptions, ModelDescriptor};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "glove",
    version,
    about = "Encode text with pretrained GloVe word vectors"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which model to load and how to pool it.
#[derive(clap::Args)]
struct ModelArgs {
    /// Catalog model name (default from config)
    #[arg(short, long)]
    model: Option<String>,

    /// Extracted model file, or a directory holding only that file
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Pooling method: mean, max, sum or tf-idf-sum
    #[arg(short = 'P', long)]
    pooling: Option<String>,

    /// JSON file mapping tokens to TF-IDF weights
    #[arg(long)]
    tfidf: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the models in the catalog
    Models {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one catalog entry
    Show {
        /// Model name
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode text into a single vector
    Encode {
        #[command(flatten)]
        model: ModelArgs,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,

        /// Text to encode (reads stdin if omitted)
        text: Option<String>,
    },

    /// Cosine similarity between two encoded texts
    Similarity {
        #[command(flatten)]
        model: ModelArgs,

        /// First text
        a: String,

        /// Second text
        b: String,
    },

    /// Show how text is tokenized and which tokens are in vocabulary
    Tokens {
        #[command(flatten)]
        model: ModelArgs,

        /// Text to tokenize
        text: String,
    },

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Commands::Models { json } => cmd_models(json),
        Commands::Show { name, json } => cmd_show(&name, json),
        Commands::Encode { model, json, text } => cmd_encode(&cfg, &model, json, text),
        Commands::Similarity { model, a, b } => cmd_similarity(&cfg, &model, &a, &b),
        Commands::Tokens { model, text } => cmd_tokens(&cfg, &model, &text),
        Commands::Config => cmd_config(&cfg),
    }
}

fn cmd_models(json: bool) -> Result<()> {
    let models = glove_core::models();
    if json {
        println!("{}", serde_json::to_string_pretty(models)?);
        return Ok(());
    }

    println!("{:<16} {:>5} {:>7} {:>7}  Trained on", "Name", "Dims", "Corpus", "Vocab");
    println!("{}", "-".repeat(64));
    for m in models {
        println!(
            "{:<16} {:>5} {:>7} {:>7}  {}",
            m.name, m.dimensions, m.corpus_size, m.vocabulary_size, m.trained_data
        );
    }
    Ok(())
}

fn cmd_show(name: &str, json: bool) -> Result<()> {
    let m = glove_core::resolve(name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(m)?);
        return Ok(());
    }
    print_descriptor(m);
    Ok(())
}

fn print_descriptor(m: &ModelDescriptor) {
    println!("Name:         {}", m.name);
    println!("Dimensions:   {}", m.dimensions);
    println!("Corpus:       {}", m.corpus_size);
    println!("Vocabulary:   {}", m.vocabulary_size);
    println!("Trained on:   {}", m.trained_data);
    println!("Architecture: {}", m.architecture);
    println!("Language:     {}", m.language);
    println!("Format:       {}", m.format);
    println!("Download:     {}", m.download_url);
}

/// Resolved model selection: CLI flags first, then config.
struct Selection {
    model: String,
    path: PathBuf,
    pooling: String,
    options: EncodeOptions,
}

fn select(cfg: &Config, args: &ModelArgs) -> Result<Selection> {
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| cfg.models.default.clone());
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| cfg.models.model_path(&model));
    let pooling = args
        .pooling
        .clone()
        .unwrap_or_else(|| cfg.encode.pooling.clone());

    let tfidf_path = args
        .tfidf
        .clone()
        .or_else(|| cfg.encode.tfidf.as_ref().map(PathBuf::from));
    let options = match tfidf_path {
        Some(p) => EncodeOptions::with_tfidf(load_tfidf(&p)?),
        None => EncodeOptions::default(),
    };

    Ok(Selection {
        model,
        path,
        pooling,
        options,
    })
}

fn open_embeddings(sel: &Selection) -> Result<Embeddings> {
    let start = Instant::now();
    let mut emb = Embeddings::new();
    emb.load(&sel.model, &sel.path).with_context(|| {
        format!(
            "failed to load model {} from {}",
            sel.model,
            sel.path.display()
        )
    })?;
    tracing::info!(
        model = %sel.model,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "embeddings ready"
    );
    Ok(emb)
}

/// Read a `{token: weight}` JSON object.
fn load_tfidf(path: &Path) -> Result<HashMap<String, f32>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let weights: HashMap<String, f32> = serde_json::from_str(&content)
        .with_context(|| format!("parsing TF-IDF weights {}", path.display()))?;
    Ok(weights)
}

/// Text from the argument, or all of `input` when it is omitted.
fn read_text(text: Option<String>, mut input: impl Read) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            input
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn cmd_encode(cfg: &Config, args: &ModelArgs, json: bool, text: Option<String>) -> Result<()> {
    let text = read_text(text, std::io::stdin())?;
    let sel = select(cfg, args)?;
    let emb = open_embeddings(&sel)?;
    let vector = emb.encode(&text, &sel.pooling, &sel.options)?;

    if json {
        println!("{}", serde_json::to_string(&vector)?);
    } else {
        println!("{}", format_vector(&vector));
    }
    Ok(())
}

fn format_vector(v: &[f32]) -> String {
    v.iter()
        .map(|x| format!("{x:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn cmd_similarity(cfg: &Config, args: &ModelArgs, a: &str, b: &str) -> Result<()> {
    let sel = select(cfg, args)?;
    let emb = open_embeddings(&sel)?;
    let va = emb.encode(a, &sel.pooling, &sel.options)?;
    let vb = emb.encode(b, &sel.pooling, &sel.options)?;
    println!("{:.4}", cosine_similarity(&va, &vb));
    Ok(())
}

fn cmd_tokens(cfg: &Config, args: &ModelArgs, text: &str) -> Result<()> {
    let sel = select(cfg, args)?;
    let emb = open_embeddings(&sel)?;
    let tokens = emb.tokens(text)?;
    let table = emb.table().context("no model loaded")?;

    let mut known = 0;
    for token in &tokens {
        let mark = if table.contains(token) {
            known += 1;
            "+"
        } else {
            "-"
        };
        println!("{mark} {token}");
    }
    println!("{known}/{} tokens in vocabulary", tokens.len());
    Ok(())
}

fn cmd_config(cfg: &Config) -> Result<()> {
    println!("Config: {}", config::show_config_path());
    println!();
    println!("[models]");
    println!(
        "  dir = {}",
        cfg.models
            .dir
            .as_deref()
            .unwrap_or("(default platform path)")
    );
    println!("  default = {}", cfg.models.default);
    println!("  -> {}", cfg.models.model_path(&cfg.models.default).display());
    println!();
    println!("[encode]");
    println!("  pooling = {}", cfg.encode.pooling);
    println!("  tfidf = {}", cfg.encode.tfidf.as_deref().unwrap_or("(none)"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ModelArgs {
        ModelArgs {
            model: None,
            path: None,
            pooling: None,
            tfidf: None,
        }
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_falls_back_to_config() {
        let cfg = Config::default();
        let sel = select(&cfg, &args()).unwrap();
        assert_eq!(sel.model, "wiki_50");
        assert_eq!(sel.pooling, "mean");
        assert!(sel.path.ends_with("wiki_50"));
        assert!(sel.options.tfidf.is_none());
    }

    #[test]
    fn test_select_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("idf.json");
        std::fs::write(&weights, r#"{"the": 0.1, "glove": 3.5}"#).unwrap();

        let cfg = Config::default();
        let sel = select(
            &cfg,
            &ModelArgs {
                model: Some("twitter_25".into()),
                path: Some(dir.path().to_path_buf()),
                pooling: Some("tf-idf-sum".into()),
                tfidf: Some(weights),
            },
        )
        .unwrap();
        assert_eq!(sel.model, "twitter_25");
        assert_eq!(sel.path, dir.path());
        assert_eq!(sel.pooling, "tf-idf-sum");
        let tfidf = sel.options.tfidf.unwrap();
        assert_eq!(tfidf.get("glove"), Some(&3.5));
    }

    #[test]
    fn test_load_tfidf_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("idf.json");
        std::fs::write(&weights, r#"["not", "a", "map"]"#).unwrap();
        assert!(load_tfidf(&weights).is_err());
        assert!(load_tfidf(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_open_embeddings_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let sel = Selection {
            model: "wiki_50".into(),
            path: dir.path().to_path_buf(),
            pooling: "mean".into(),
            options: EncodeOptions::default(),
        };
        let err = open_embeddings(&sel).err().unwrap();
        assert!(format!("{err:#}").contains("no model file found"));
    }

    #[test]
    fn test_read_text_keeps_blank_input() {
        let text = read_text(None, std::io::Cursor::new("  \n")).unwrap();
        assert_eq!(text, "  \n");
        let text = read_text(Some(String::new()), std::io::empty()).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, -0.5]), "1.000000 -0.500000");
    }
}
