/// Jukebox - headless music player demo
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use jukebox_core::Playlist;
use jukebox_hud::{parse_track, AppConfig, Session};
use jukebox_playback::PlayOrder;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Headless jukebox driven by a simulated clock", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a list of tracks
    Play(PlayArgs),
    /// Print a shuffled play order
    Order {
        /// Number of tracks
        #[arg(short, long)]
        count: usize,
        /// Shuffle seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 10_000)]
    frames: u64,

    /// Frame length in milliseconds (overrides config)
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Playlist title
    #[arg(long, default_value = "Command Line")]
    title: String,

    /// Start in shuffled order
    #[arg(long)]
    shuffle: bool,

    /// Stop after the last track instead of wrapping around
    #[arg(long)]
    no_loop_playlist: bool,

    /// Repeat each track forever
    #[arg(long)]
    repeat_track: bool,

    /// Playlist JSON file; command line tracks are appended to it
    #[arg(short, long)]
    playlist: Option<PathBuf>,

    /// Tracks as `Title|Artist|handle`, handle optionally `name@seconds`
    #[arg(required_unless_present = "playlist")]
    tracks: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jukebox=info,jukebox_hud=info,jukebox_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args)?,
        Commands::Order { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let order = PlayOrder::shuffled(count, &mut rng);
            let line: Vec<String> = order.as_slice().iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
        }
    }

    Ok(())
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(frame_ms) = args.frame_ms {
        config.hud.frame_ms = frame_ms;
    }
    if args.no_loop_playlist {
        config.engine.loop_playlist = false;
    }
    config.engine.play_on_start = true;
    config.validate()?;

    let tracks = args
        .tracks
        .iter()
        .map(String::as_str)
        .map(parse_track)
        .collect::<jukebox_hud::Result<Vec<_>>>()?;

    let mut playlist = match &args.playlist {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read playlist {}", path.display()))?;
            Playlist::from_json(&json)?
        }
        None => {
            let mut playlist = Playlist::new(args.title);
            playlist.loop_by_default = args.repeat_track;
            playlist.default_volume = config.engine.volume;
            playlist
        }
    };
    for track in tracks {
        playlist.push(track);
    }
    playlist.shuffle_by_default |= args.shuffle;
    playlist.loop_by_default |= args.repeat_track;
    playlist.validate()?;

    tracing::info!(
        title = %playlist.title,
        tracks = playlist.len(),
        "starting playback"
    );

    let mut session = Session::new(&config, Some(&playlist));
    let summary = session.run(args.frames);

    println!(
        "{} frames, {:.1}s simulated, finished {:?}: {}",
        summary.frames,
        summary.simulated.as_secs_f32(),
        summary.state,
        summary.view.status_line()
    );

    Ok(())
}
