mod script;

use anyhow::{Context, Result, bail};
use carousel::{CarouselConfig, CarouselController, CarouselState};
use clap::Parser;
use html::build::{doc, elem, text};
use html::dom_utils::outline_from_dom;
use html::{Document, Id};
use mimalloc::MiMalloc;
use script::{Step, parse_script};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Build a gallery, attach a carousel to it and replay an interaction script.
#[derive(Parser, Debug)]
#[command(name = "streamrotate", version)]
struct Args {
    /// Number of slides in the generated gallery.
    #[arg(long, default_value_t = 3)]
    items: usize,

    /// TOML file with `selector`, `autoRotateSpeed` and `height` keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Item selector (overrides the config file).
    #[arg(long)]
    selector: Option<String>,

    /// Auto-rotate interval in ms, 0 disables (overrides the config file).
    #[arg(long)]
    auto_rotate_speed: Option<u64>,

    /// Track height in px (overrides the config file).
    #[arg(long)]
    height: Option<f32>,

    /// Comma separated steps: right, left, dot:N, item:N, tick:MS.
    #[arg(long, default_value = "")]
    script: String,

    /// Print the DOM outline after every step, not just at the end.
    #[arg(long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<CarouselConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<CarouselConfig>(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => CarouselConfig::new(".slide"),
    };
    if let Some(selector) = &args.selector {
        config.selector = Some(selector.clone());
    }
    if let Some(speed) = args.auto_rotate_speed {
        config.auto_rotate_speed = speed;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    Ok(config)
}

fn gallery(items: usize) -> (Document, Id) {
    let slides = (0..items)
        .map(|i| elem("figure", &[("class", "slide")], vec![text(&format!("Slide {}", i + 1))]))
        .collect();
    let dom = Document::from_node(&doc(vec![elem("div", &[("id", "gallery")], slides)]));
    let host = dom.children(dom.root())[0];
    (dom, host)
}

fn print_outline(dom: &Document) -> Result<()> {
    for line in outline_from_dom(&dom.materialize()?, 256) {
        println!("{line}");
    }
    Ok(())
}

fn apply(step: Step, ctl: &mut CarouselController, dom: &mut Document, host: Id) -> Result<()> {
    let parts = ctl
        .get(host)
        .map(CarouselState::parts)
        .cloned()
        .context("gallery lost its carousel")?;
    let nth = |ids: &[Id], n: usize, what: &str| -> Result<Id> {
        match ids.get(n) {
            Some(&id) => Ok(id),
            None => bail!("no {what} {n}; the gallery has {} items", ids.len()),
        }
    };
    match step {
        Step::Right => {
            ctl.click(dom, parts.nav_right)?;
        }
        Step::Left => {
            ctl.click(dom, parts.nav_left)?;
        }
        Step::Dot(n) => {
            ctl.click(dom, nth(&parts.dots, n, "dot")?)?;
        }
        Step::Item(n) => {
            let handled = ctl.click(dom, nth(&parts.items, n, "item")?)?;
            log::debug!("click on item {n} handled: {handled}");
        }
        Step::Tick(ms) => {
            let fired = ctl.advance(dom, ms)?;
            log::debug!("{fired} auto-rotate ticks in {ms}ms");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    let steps = parse_script(&args.script)?;

    let (mut dom, host) = gallery(args.items);
    let mut ctl = CarouselController::new();
    ctl.initialize(&mut dom, host, &config)?;
    log::info!(
        "carousel attached to #gallery with {} items",
        ctl.get(host).map(CarouselState::item_count).unwrap_or(0)
    );
    if args.verbose {
        print_outline(&dom)?;
    }

    for step in steps {
        apply(step, &mut ctl, &mut dom, host)?;
        let position = ctl.get(host).map(CarouselState::position).unwrap_or(0);
        let label = step.to_string();
        println!("[{:>6}ms] {label:<10} -> position {position}", ctl.now());
        if args.verbose {
            print_outline(&dom)?;
        }
    }

    if !args.verbose {
        print_outline(&dom)?;
    }
    Ok(())
}
