use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use huntmap::{
    AnnotateConfig, DEFAULT_NEAR_THRESHOLD, Layer, MarkCatalog, ParleyFont, ZoneSettings,
    blend_with_mask, find_near_duplicate_spawns, mask_stem_for_expansion, render_zone,
};

#[derive(Parser, Debug)]
#[command(name = "huntmap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate one zone map.
    Annotate(AnnotateArgs),
    /// Annotate every zone listed in the config.
    AnnotateAll(AnnotateAllArgs),
    /// Report spawn points that are suspiciously close to each other.
    CheckSpawns(CheckSpawnsArgs),
    /// Multiply a map by its parchment mask.
    Blend(BlendArgs),
    /// Rewrite the marks file in canonical order.
    SortMarks(SortMarksArgs),
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// Styling and zone config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Marks JSON.
    #[arg(long)]
    marks: PathBuf,

    /// Zone name as used in the marks and config files.
    #[arg(long)]
    zone: String,

    /// Input map PNG.
    #[arg(long)]
    map: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnnotateAllArgs {
    #[arg(long)]
    config: PathBuf,

    #[arg(long)]
    marks: PathBuf,

    /// Directory holding `<zone file>.png` maps.
    #[arg(long)]
    maps_dir: PathBuf,

    #[arg(long)]
    out_dir: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckSpawnsArgs {
    #[arg(long)]
    marks: PathBuf,

    /// Report pairs at most this far apart, in map units.
    #[arg(long, default_value_t = DEFAULT_NEAR_THRESHOLD)]
    threshold: f64,
}

#[derive(Parser, Debug)]
struct BlendArgs {
    #[arg(long)]
    map: PathBuf,

    /// Mask PNG. When absent it is picked from `--masks-dir` by the zone's expansion.
    #[arg(long)]
    mask: Option<PathBuf>,

    #[arg(long, requires_all = ["config", "zone"])]
    masks_dir: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    zone: Option<String>,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SortMarksArgs {
    #[arg(long)]
    marks: PathBuf,

    /// Output path; defaults to `new_<name>` next to the input, which is left untouched.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Annotate(args) => cmd_annotate(args),
        Command::AnnotateAll(args) => cmd_annotate_all(args),
        Command::CheckSpawns(args) => cmd_check_spawns(args),
        Command::Blend(args) => cmd_blend(args),
        Command::SortMarks(args) => cmd_sort_marks(args),
    }
}

fn cmd_annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let catalog = load_marks(&args.marks)?;
    let settings = config.zone(&args.zone)?;
    let font_bytes = read_font(&args.config, &config)?;

    annotate_zone(
        &args.zone,
        settings,
        &config,
        &catalog,
        font_bytes,
        &args.map,
        &args.out,
    )?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_annotate_all(args: AnnotateAllArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let catalog = load_marks(&args.marks)?;
    let font_bytes = read_font(&args.config, &config)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads {
        pool = pool.num_threads(n);
    }
    let pool = pool.build().context("build rayon thread pool")?;

    let zones: Vec<(&String, &ZoneSettings)> = config.zones.iter().collect();
    let results: Vec<(String, anyhow::Result<()>)> = pool.install(|| {
        zones
            .par_iter()
            .map(|(zone, settings)| {
                let stem = settings.file_stem(zone);
                let map = args.maps_dir.join(format!("{stem}.png"));
                let out = args.out_dir.join(format!("{stem}.png"));
                let res = annotate_zone(
                    zone,
                    settings,
                    &config,
                    &catalog,
                    font_bytes.clone(),
                    &map,
                    &out,
                );
                (zone.to_string(), res)
            })
            .collect()
    });

    let mut failed = 0usize;
    for (zone, res) in &results {
        match res {
            Ok(()) => tracing::info!(zone = %zone, "annotated"),
            Err(e) => {
                failed += 1;
                tracing::error!(zone = %zone, "annotation failed: {e:#}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} zones failed", results.len());
    }
    eprintln!("annotated {} zones into {}", results.len(), args.out_dir.display());
    Ok(())
}

fn cmd_check_spawns(args: CheckSpawnsArgs) -> anyhow::Result<()> {
    let catalog = load_marks(&args.marks)?;
    let report = find_near_duplicate_spawns(&catalog, args.threshold)?;

    let mut total = 0usize;
    for (zone, pairs) in &report {
        for pair in pairs {
            total += 1;
            println!(
                "{zone}: {} [{}] ~ {} [{}] distance {:.3}",
                pair.first,
                pair.first_marks.join(", "),
                pair.second,
                pair.second_marks.join(", "),
                pair.distance
            );
        }
    }
    eprintln!("{total} near-duplicate spawn pairs");
    Ok(())
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let mask_path = match (&args.mask, &args.masks_dir, &args.config, &args.zone) {
        (Some(mask), _, _, _) => mask.clone(),
        (None, Some(dir), Some(config), Some(zone)) => {
            let config = load_config(config)?;
            let expansion = config
                .zone(zone)?
                .expansion
                .as_deref()
                .with_context(|| format!("zone '{zone}' has no expansion"))?;
            let stem = mask_stem_for_expansion(expansion)
                .with_context(|| format!("no mask known for expansion '{expansion}'"))?;
            dir.join(format!("{stem}_mask.png"))
        }
        _ => anyhow::bail!("either --mask or --masks-dir with --config and --zone is required"),
    };

    let map = read_png(&args.map)?;
    let mask = read_png(&mask_path)?;
    let blended = blend_with_mask(&map, &mask)?;
    write_png(&blended, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sort_marks(args: SortMarksArgs) -> anyhow::Result<()> {
    let catalog = load_marks(&args.marks)?;
    let out = match args.out {
        Some(out) => out,
        None => sorted_marks_path(&args.marks)?,
    };
    let json = catalog.sorted().to_json_pretty()?;
    std::fs::write(&out, json + "\n").with_context(|| format!("write marks '{}'", out.display()))?;
    eprintln!("wrote {} marks to {}", catalog.len(), out.display());
    Ok(())
}

/// `dir/marks.json` becomes `dir/new_marks.json`.
fn sorted_marks_path(marks: &Path) -> anyhow::Result<PathBuf> {
    let name = marks
        .file_name()
        .with_context(|| format!("marks path '{}' has no file name", marks.display()))?;
    let mut new_name = std::ffi::OsString::from("new_");
    new_name.push(name);
    Ok(marks.with_file_name(new_name))
}

fn annotate_zone(
    zone: &str,
    settings: &ZoneSettings,
    config: &AnnotateConfig,
    catalog: &MarkCatalog,
    font_bytes: Vec<u8>,
    map: &Path,
    out: &Path,
) -> anyhow::Result<()> {
    let base = Layer::from_image(&read_png(map)?)?;
    let mut font = ParleyFont::from_bytes(font_bytes, config.legend.font_size)?;
    let marks = catalog.zone(zone);
    let render = render_zone(&base, &marks, settings, config, &mut font)
        .with_context(|| format!("render zone '{zone}'"))?;
    write_png(&render.image.to_image()?, out)
}

fn load_config(path: &Path) -> anyhow::Result<AnnotateConfig> {
    AnnotateConfig::from_path(path).with_context(|| format!("load config '{}'", path.display()))
}

fn load_marks(path: &Path) -> anyhow::Result<MarkCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read marks '{}'", path.display()))?;
    MarkCatalog::from_json(&text).with_context(|| format!("parse marks '{}'", path.display()))
}

/// Font paths in the config are relative to the config file.
fn read_font(config_path: &Path, config: &AnnotateConfig) -> anyhow::Result<Vec<u8>> {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let path = base.join(&config.legend.font);
    std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))
}

fn read_png(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

fn write_png(img: &image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}
