use clap::Parser;
use log::{info, warn};
use progress_ring::{
    viewer, CircularProgress, Host, LineCap, ViewerConfig, WidgetCommand, WidgetConfig,
};
use rand::Rng;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

const MOUNT_POINT: &str = "main";

#[derive(Parser, Debug)]
#[command(name = "progress-ring")]
#[command(author, version, about = "Circular progress indicator preview", long_about = None)]
struct Cli {
    /// Edge length of the ring surface in pixels (minimum 100)
    #[arg(short, long, default_value_t = progress_ring::DEFAULT_SIZE)]
    size: u32,

    /// Initial progress, 0 - 100
    #[arg(short, long, default_value_t = 0.0)]
    progress: f64,

    /// Show one decimal digit
    #[arg(long)]
    float: bool,

    /// Make the guide ring the thinner of the two
    #[arg(long)]
    small_guide: bool,

    /// Round ends on the progress arc
    #[arg(long)]
    round: bool,

    /// Sweep clockwise instead of counter-clockwise
    #[arg(long)]
    clockwise: bool,

    #[arg(long)]
    hide_guide: bool,

    #[arg(long)]
    hide_percent: bool,

    #[arg(long)]
    font_color: Option<String>,

    #[arg(long)]
    progress_color: Option<String>,

    #[arg(long)]
    guide_color: Option<String>,

    /// TrueType/OpenType font for the label
    #[arg(long)]
    font: Option<PathBuf>,

    /// Draw the alignment overlay and log every operation
    #[arg(long)]
    diagnostics: bool,

    /// Feed random progress values
    #[arg(long, conflicts_with = "stdin")]
    random: bool,

    /// Read progress values from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Window title
    #[arg(long, default_value = "Progress")]
    title: String,
}

fn setup_logging(diagnostics: bool) {
    let level = if diagnostics {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.diagnostics);

    let font_data = match &cli.font {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    let config = WidgetConfig::builder()
        .size(cli.size)
        .line_cap(if cli.round { LineCap::Round } else { LineCap::Butt })
        .float_mode(cli.float)
        .small_guide(cli.small_guide)
        .counter_clockwise(!cli.clockwise)
        .guide_visible(!cli.hide_guide)
        .percent_sign_visible(!cli.hide_percent)
        .diagnostics(cli.diagnostics)
        .maybe_font_data(font_data)
        .build();

    let mut host = Host::new();
    host.add_mount_point(MOUNT_POINT);
    let mut widget = CircularProgress::new(&mut host, MOUNT_POINT, "progress", config)?;

    if let Some(color) = &cli.font_color {
        widget.set_font_color(color)?;
    }
    if let Some(color) = &cli.progress_color {
        widget.set_progress_color(color)?;
    }
    if let Some(color) = &cli.guide_color {
        widget.set_guide_color(color)?;
    }
    widget.set_progress(cli.progress)?;

    let viewer_config = ViewerConfig::builder().title(cli.title.clone()).build();

    if !cli.random && !cli.stdin {
        return viewer::show(widget, &viewer_config);
    }

    let (sender, receiver) = mpsc::channel();
    if cli.random {
        info!("feeding random progress values");
        thread::spawn(move || feed_random(sender));
    } else {
        info!("reading progress values from stdin");
        thread::spawn(move || feed_stdin(sender));
    }

    viewer::show_with_commands(widget, &viewer_config, receiver)
}

fn feed_random(sender: Sender<WidgetCommand>) {
    let mut rng = rand::rng();
    loop {
        let command = WidgetCommand::SetProgress(rng.random_range(0.0..=100.0));
        if sender.send(command).is_err() {
            break;
        }
        thread::sleep(Duration::from_millis(500));
    }
}

fn feed_stdin(sender: Sender<WidgetCommand>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match line.trim().parse::<f64>() {
            Ok(value) => {
                if sender.send(WidgetCommand::SetProgress(value)).is_err() {
                    break;
                }
            }
            Err(_) => warn!("ignoring non-numeric input '{}'", line.trim()),
        }
    }
}
