//! Scratch command line
//!
//! Scratches one element (and every element like it) out of an HTML file,
//! stdin or a live page, and prints or writes the JSON.

use anyhow::{Context, bail};
use clap::Parser;
use scratch::browser::{BrowserSession, LaunchOptions};
use scratch::export::{KeyOptions, parse_rename, to_pretty_json, write_export};
use scratch::tools::utils::{PageSource, resolve_source};
use scratch::{DomTree, Scratch, Scratcher};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scratch")]
#[command(version)]
#[command(about = "Scratch structured JSON out of any element of a web page", long_about = None)]
struct Cli {
    /// HTML file, `-` for stdin, or a URL to capture with headless Chrome
    source: String,

    /// CSS selector of the example element
    #[arg(long, short = 't', value_name = "CSS", required_unless_present = "selector")]
    target: Option<String>,

    /// Which match of --target is the example
    #[arg(long, short = 'n', default_value = "0")]
    nth: usize,

    /// Scratch every match of this selector instead of deriving one
    #[arg(long, short = 's', value_name = "CSS", conflicts_with = "target")]
    selector: Option<String>,

    /// Drop a key from the export (repeatable)
    #[arg(long, value_name = "KEY")]
    exclude: Vec<String>,

    /// Rename a key on export (repeatable)
    #[arg(long, value_name = "KEY=NEW", value_parser = parse_rename_arg)]
    rename: Vec<(String, String)>,

    /// Write Scratch_<millis>.json into this directory instead of printing
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// List the keys available for --exclude/--rename and exit
    #[arg(long)]
    show_keys: bool,

    /// Launch browser in headed mode (URL sources only)
    #[arg(long)]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,
}

fn parse_rename_arg(pair: &str) -> Result<(String, String), String> {
    parse_rename(pair).map_err(|e| e.to_string())
}

impl Cli {
    fn load_tree(&self) -> anyhow::Result<DomTree> {
        match resolve_source(&self.source) {
            PageSource::Stdin => {
                let mut html = String::new();
                std::io::stdin()
                    .read_to_string(&mut html)
                    .context("Failed to read HTML from stdin")?;
                Ok(DomTree::from_html(&html))
            }
            PageSource::File(path) => {
                let html = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(DomTree::from_html(&html))
            }
            PageSource::Url(url) => {
                let mut options = LaunchOptions::new().headless(!self.headed);
                if let Some(path) = &self.chrome_path {
                    options = options.chrome_path(path);
                }
                let session = BrowserSession::launch(options).context("Failed to launch browser")?;
                let captured = session.capture_url(&url);
                if let Err(e) = session.close() {
                    log::debug!("Failed to close browser tabs: {}", e);
                }
                Ok(captured?)
            }
        }
    }

    fn scratch(&self, tree: &DomTree) -> anyhow::Result<Scratch> {
        let mut scratcher = Scratcher::new();
        if let Some(selector) = &self.selector {
            return Ok(scratcher.scratch_selector(tree, selector)?);
        }

        let Some(target) = &self.target else {
            bail!("Either --target or --selector must be given");
        };
        let element = tree.find_target(target, self.nth)?;
        Ok(scratcher.scratch(tree, element))
    }

    /// Key options with --exclude and --rename applied
    fn key_options(&self, items: &[Value]) -> Option<KeyOptions> {
        let mut options = KeyOptions::from_payload(items)?;

        for key in &self.exclude {
            if !options.set_include(key, false) {
                log::warn!("Unknown key for --exclude: {}", key);
            }
        }
        for (key, rename) in &self.rename {
            if !options.rename(key, rename.clone()) {
                log::warn!("Unknown key for --rename: {}", key);
            }
        }
        Some(options)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let tree = cli.load_tree()?;
    let scratch = cli.scratch(&tree)?;
    let options = cli.key_options(&scratch.items);

    if cli.show_keys {
        match &options {
            Some(options) => {
                for option in options.options() {
                    println!("{}", option.key);
                }
            }
            None => eprintln!("Payload holds plain values; there are no keys to choose from"),
        }
        return Ok(());
    }

    let items = match &options {
        Some(options) => options.apply(&scratch.items),
        None => {
            if !cli.exclude.is_empty() || !cli.rename.is_empty() {
                log::warn!("Payload holds plain values; --exclude and --rename are ignored");
            }
            scratch.items
        }
    };
    let value = Value::Array(items);

    match &cli.out_dir {
        Some(dir) => {
            let path = write_export(dir, &value)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", to_pretty_json(&value)?),
    }

    Ok(())
}
