use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blockray", version, about = "Render block/item models to PNG")]
struct Cli {
    /// Model id to render (`namespace:path`); repeat for several models.
    #[arg(long = "model", required = true)]
    models: Vec<String>,

    /// Output PNG path, or a directory when several models are given.
    #[arg(long)]
    out: PathBuf,

    /// Resource pack directory or .zip, highest priority first; repeatable.
    #[arg(long = "pack")]
    packs: Vec<PathBuf>,

    /// Renderer settings JSON; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not fall back to the bundled default models.
    #[arg(long)]
    no_internal: bool,

    /// Trace resolution, e.g. 512x512.
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Output resolution, e.g. 256x256.
    #[arg(long, value_parser = parse_size)]
    export: Option<(u32, u32)>,

    /// Worker threads (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// Log debug output (overridden by RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => blockray::RendererConfig::from_json_file(path)?,
        None => blockray::RendererConfig::default(),
    };
    if !cli.packs.is_empty() {
        config.resource_packs = cli.packs.clone();
    }
    if cli.no_internal {
        config.use_internal_resources = false;
    }
    if let Some((w, h)) = cli.size {
        config.render_width = w;
        config.render_height = h;
    }
    if let Some((w, h)) = cli.export {
        config.export_width = w;
        config.export_height = h;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }

    let renderer = blockray::ModelRenderer::new(config)?;

    let several = cli.models.len() > 1;
    if several {
        std::fs::create_dir_all(&cli.out)
            .with_context(|| format!("create output directory '{}'", cli.out.display()))?;
    }
    for model in &cli.models {
        let id = blockray::ResourceId::parse(model)?;
        let out = if several {
            cli.out.join(file_name_for(&id))
        } else {
            cli.out.clone()
        };
        let img = renderer.render_id(&id)?;
        write_png(&out, &img)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "blockray=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn file_name_for(id: &blockray::ResourceId) -> String {
    format!("{}_{}.png", id.namespace(), id.path().replace('/', "_"))
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
