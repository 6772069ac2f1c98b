use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "apngen", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every APNG variant described by a request file.
    Generate(GenerateArgs),
    /// Render a scaled still preview of one template.
    Preview(PreviewArgs),
    /// Print the animation metadata of an APNG.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct AssetArgs {
    /// Directory holding the icon PNGs.
    #[arg(long, default_value = "icons")]
    icons: PathBuf,

    /// Extra directory searched for font files (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for the APNG files.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    assets: AssetArgs,

    /// Generate variants in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Template to preview: border, corner_icons or icon_list.
    #[arg(long)]
    template: apngen::TemplateKind,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Uniform downscale factor.
    #[arg(long, default_value_t = apngen::render::DEFAULT_PREVIEW_SCALE)]
    scale: f32,

    /// Text layer to draw (0-based index; default: first enabled).
    #[arg(long)]
    text: Option<usize>,

    /// Annotation to draw (0-based index; default: first enabled).
    #[arg(long)]
    annotation: Option<usize>,

    /// Image variation to draw (0-based index).
    #[arg(long, default_value_t = 0)]
    image: usize,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// APNG file to read.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn font_resolver(assets: &AssetArgs) -> apngen::FontResolver {
    assets
        .font_dirs
        .iter()
        .fold(apngen::FontResolver::new(), |r, dir| r.with_font_dir(dir))
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let req = apngen::GenerationRequest::from_path(&args.in_path)?;
    let fonts = font_resolver(&args.assets);
    let icons = apngen::DirIconSource::new(&args.assets.icons);
    let env = apngen::RenderEnv::new(&fonts, &icons);
    let opts = apngen::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    let variants = apngen::generate_batch(&req, &env, &opts)?;
    ensure_dir(&args.out_dir)?;
    for v in &variants {
        let name = format!("{:02}_{}.png", v.annotation_index + 1, v.name_fragment);
        let out = args.out_dir.join(&name);
        std::fs::write(&out, &v.bytes).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!(
            "wrote {} ({}, {}, {:.1} KiB)",
            out.display(),
            v.template.label(),
            v.variant,
            v.bytes.len() as f64 / 1024.0
        );
    }
    eprintln!("generated {} APNG(s)", variants.len());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let req = apngen::GenerationRequest::from_path(&args.in_path)?;
    req.validate()?;
    let text = args
        .text
        .or_else(|| req.text_layers.iter().position(|t| t.enabled))
        .context("no enabled text layer")?;
    let annotation = args
        .annotation
        .or_else(|| req.annotations.iter().position(|a| a.enabled))
        .context("no enabled annotation layer")?;
    let layers = req.variant_layers(annotation, text, args.image)?;

    let fonts = font_resolver(&args.assets);
    let icons = apngen::DirIconSource::new(&args.assets.icons);
    let env = apngen::RenderEnv::new(&fonts, &icons);

    let params = req
        .template(args.template)
        .variants()
        .into_iter()
        .next()
        .with_context(|| format!("template '{}' has no variants", args.template.label()))?;
    let frame = apngen::render_preview(&env, layers, &params, args.scale)?;

    if let Some(parent) = args.out.parent() {
        ensure_dir(parent)?;
    }
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.path).with_context(|| format!("read '{}'", args.path.display()))?;
    let info = apngen::probe_apng(&bytes)
        .with_context(|| format!("decode '{}'", args.path.display()))?;
    println!("size: {}x{}", info.width, info.height);
    println!("frames: {}", info.frame_count);
    if info.loop_count == 0 {
        println!("loops: infinite");
    } else {
        println!("loops: {}", info.loop_count);
    }
    println!("delays_ms: {:?}", info.delays_ms);
    Ok(())
}
