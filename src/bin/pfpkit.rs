use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pfpkit::assets::selection::selection_paths;
use pfpkit::{
    Action, Category, Compositor, CustomizerState, DownloadLog, Exporter, FirebaseStorage,
    FirestoreLog, ImageHost, ImgbbHost, LocalDirStore, ObjectStore, PfpConfig, Rgba8,
    list_catalogs, load_catalogs,
};

#[derive(Parser, Debug)]
#[command(name = "pfpkit", version)]
struct Cli {
    /// Local asset mirror (`<dir>/<root>/<category>/<file>`); Firebase storage otherwise.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every category with its asset count and variant tags.
    Catalog,
    /// Print a random compatible selection as JSON.
    Shuffle(ShuffleArgs),
    /// Compose a selection into a PNG.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct ShuffleArgs {
    /// RNG seed; time-based when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Select a trait as `category=file`, applied in order on top of the defaults.
    #[arg(long = "pick", value_parser = parse_pick)]
    picks: Vec<Pick>,

    /// Shuffle before applying picks.
    #[arg(long, default_value_t = false)]
    shuffle: bool,

    /// Fallback background color (`#RRGGBB` or `#RRGGBBAA`).
    #[arg(long)]
    color: Option<Rgba8>,

    /// Render the low-resolution preview instead of the export image.
    #[arg(long, default_value_t = false)]
    preview: bool,

    /// Upload the export to ImgBB (needs `PFP_IMGBB_API_KEY`).
    #[arg(long, default_value_t = false)]
    upload: bool,

    /// Record the selection in Firestore (needs Firebase project settings).
    #[arg(long, default_value_t = false)]
    record: bool,

    /// RNG seed; time-based when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path; defaults to the configured download name.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Debug)]
struct Pick {
    category: Category,
    file: String,
}

fn parse_pick(raw: &str) -> Result<Pick, String> {
    let (category, file) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected category=file, got \"{raw}\""))?;
    let category = category.trim().parse::<Category>().map_err(|e| e.to_string())?;
    let file = file.trim();
    if file.is_empty() {
        return Err(format!("empty file name in \"{raw}\""));
    }
    Ok(Pick {
        category,
        file: file.to_owned(),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = PfpConfig::from_env()?;
    let store = open_store(&cfg, cli.assets.as_deref())?;

    match cli.cmd {
        Command::Catalog => cmd_catalog(&cfg, store.as_ref()),
        Command::Shuffle(args) => cmd_shuffle(&cfg, store.as_ref(), args),
        Command::Compose(args) => cmd_compose(&cfg, store.as_ref(), args),
    }
}

fn open_store(
    cfg: &PfpConfig,
    assets: Option<&std::path::Path>,
) -> anyhow::Result<Box<dyn ObjectStore>> {
    if let Some(dir) = assets {
        return Ok(Box::new(LocalDirStore::new(dir)));
    }
    let bucket = cfg
        .firebase
        .bucket
        .as_deref()
        .context("no --assets dir and PFP_FIREBASE_BUCKET is not set")?;
    Ok(Box::new(FirebaseStorage::new(bucket, cfg.http_timeout_ms)?))
}

fn default_seed() -> u64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos ^ u64::from(std::process::id())
}

fn loaded_state(
    cfg: &PfpConfig,
    store: &dyn ObjectStore,
    seed: Option<u64>,
) -> anyhow::Result<CustomizerState> {
    let mut state = CustomizerState::new(
        cfg.defaults.clone(),
        cfg.fallback_color,
        seed.unwrap_or_else(default_seed),
    );
    load_catalogs(&mut state, store, &cfg.low_res_root)?;
    Ok(state)
}

fn cmd_catalog(cfg: &PfpConfig, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let mut state = CustomizerState::new(cfg.defaults.clone(), cfg.fallback_color, 0);
    for action in list_catalogs(store, &cfg.low_res_root) {
        if let Action::CatalogFailed { category, reason } = &action {
            println!("{category}: listing failed: {reason}");
        }
        state.apply(action)?;
    }

    for (category, cat) in state.catalog().iter() {
        if !cat.loaded {
            continue;
        }
        let mut tags: Vec<String> = cat
            .initial
            .iter()
            .filter_map(|e| e.tag.map(|t| t.to_string()))
            .collect();
        tags.sort();
        tags.dedup();
        if tags.is_empty() {
            println!("{category}: {} assets", cat.initial.len());
        } else {
            println!(
                "{category}: {} assets [{}]",
                cat.initial.len(),
                tags.join(", ")
            );
        }
    }
    Ok(())
}

fn cmd_shuffle(cfg: &PfpConfig, store: &dyn ObjectStore, args: ShuffleArgs) -> anyhow::Result<()> {
    let mut state = loaded_state(cfg, store, args.seed)?;
    state.apply(Action::Shuffle)?;

    let paths = selection_paths(state.selection());
    let json = serde_json::to_string_pretty(&paths).context("serialize selection")?;
    println!("{json}");
    Ok(())
}

fn cmd_compose(cfg: &PfpConfig, store: &dyn ObjectStore, args: ComposeArgs) -> anyhow::Result<()> {
    let mut state = loaded_state(cfg, store, args.seed)?;
    if args.shuffle {
        state.apply(Action::Shuffle)?;
    }
    for Pick { category, file } in args.picks {
        state.apply(Action::Select { category, file })?;
    }
    if let Some(color) = args.color {
        state.apply(Action::SetColor(color))?;
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&cfg.download_name));
    let compositor = Compositor::new(store, cfg.compositor_opts());

    if args.preview {
        let image = compositor.compose_preview(state.selection(), state.fallback_color())?;
        std::fs::write(&out, &image.png)
            .with_context(|| format!("write preview '{}'", out.display()))?;
        eprintln!("wrote {} ({}x{})", out.display(), image.width, image.height);
        return Ok(());
    }

    let host = if args.upload {
        let key = cfg
            .imgbb_api_key
            .as_deref()
            .context("--upload needs PFP_IMGBB_API_KEY")?;
        Some(ImgbbHost::new(key, cfg.http_timeout_ms)?)
    } else {
        None
    };
    let log = if args.record {
        let project = cfg
            .firebase
            .project
            .as_deref()
            .context("--record needs PFP_FIREBASE_PROJECT")?;
        Some(FirestoreLog::new(
            project,
            cfg.firebase.api_key.clone(),
            cfg.http_timeout_ms,
        )?)
    } else {
        None
    };

    let mut exporter = Exporter::new(compositor, &out);
    if let Some(host) = host.as_ref() {
        exporter = exporter.with_host(host as &dyn ImageHost);
    }
    if let Some(log) = log.as_ref() {
        exporter = exporter.with_log(log as &dyn DownloadLog);
    }

    let outcome = exporter.export(&mut state)?;
    eprintln!("wrote {}", outcome.path.display());
    if let Some(url) = &outcome.share_url {
        println!("{url}");
    } else if let Some(err) = &outcome.upload_error {
        eprintln!("upload failed: {err}");
    }
    Ok(())
}
