use rasterlab::image::GrayPlane;
use rasterlab::pattern::{self, PatternKind};
use rasterlab::{Capabilities, Engine, PixelBuffer, SandboxConfig, Script, Session};

const DEFAULT_PATTERN_SIZE: (u32, u32) = (64, 48);

struct Args {
    grid_size: Option<usize>,
    config: Option<String>,
    script: Option<String>,
    pattern: Option<PatternKind>,
    size: (u32, u32),
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        grid_size: None,
        config: None,
        script: None,
        pattern: None,
        size: DEFAULT_PATTERN_SIZE,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--grid-size" | "-g" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<usize>() {
                        parsed.grid_size = Some(n);
                    }
                    i += 1;
                }
            },
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--script" | "-s" => {
                if i + 1 < args.len() {
                    parsed.script = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--pattern" | "-p" => {
                if i + 1 < args.len() {
                    parsed.pattern = Some(PatternKind::from_selector(&args[i + 1]));
                    i += 1;
                }
            },
            "--size" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 64x48)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            parsed.size = (w, h);
                        }
                    }
                    i += 1;
                }
            },
            "--help" | "-h" => {
                println!("Usage: rasterlab [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --grid-size N, -g N   Side length of the drawing grid (default: 21)");
                println!("  --config FILE, -c FILE  Load settings from a JSON config file");
                println!("  --script FILE, -s FILE  Run a JSON command script");
                println!("  --pattern NAME, -p NAME Load a test image (flat, checker, disc, bars, noise)");
                println!(
                    "  --size WxH            Test image size (default: {}x{})",
                    DEFAULT_PATTERN_SIZE.0, DEFAULT_PATTERN_SIZE.1
                );
                println!("  --help, -h            Show this help message");
                println!();
                println!("Set RUST_LOG=debug to see per-operation details.");
                std::process::exit(0);
            },
            other => log::warn!("ignoring unknown argument {:?}", other),
        }
        i += 1;
    }

    parsed
}

/// One-line description of an image: size, mean gray and share of white pixels
fn summarize(label: &str, buffer: &PixelBuffer) {
    let gray = GrayPlane::from_rgb_mean(buffer);
    let total = gray.data.len().max(1);
    let mean = gray.data.iter().map(|&v| u64::from(v)).sum::<u64>() as f64 / total as f64;
    let white = gray.data.iter().filter(|&&v| v == 255).count();
    println!(
        "{}: {}x{} mean gray {:.1}, {} white pixels ({:.1}%)",
        label,
        buffer.width(),
        buffer.height(),
        mean,
        white,
        white as f64 * 100.0 / total as f64
    );
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    let mut config = match &args.config {
        Some(path) => SandboxConfig::load(path).map_err(|e| format!("{}: {}", path, e))?,
        None => SandboxConfig::default(),
    };
    if let Some(n) = args.grid_size {
        config.grid_size = n;
    }
    config.validate().map_err(|e| e.to_string())?;

    log::info!("grid {}x{}", config.grid_size, config.grid_size);
    let mut session = Session::new(Engine::new(config, Capabilities::default()));

    if let Some(kind) = args.pattern {
        let (w, h) = args.size;
        log::info!("loading {} pattern {}x{}", kind.as_str(), w, h);
        session.load_image(pattern::generate(kind, w, h).map_err(|e| e.to_string())?);
    }

    if let Some(path) = &args.script {
        let script = Script::load(path).map_err(|e| format!("{}: {}", path, e))?;
        log::info!("running {} commands from {}", script.commands.len(), path);
        script.run(&mut session).map_err(|e| e.to_string())?;
    }

    print!("{}", session.grid());
    println!(
        "{} painted cells, tool {}",
        session.grid().painted_count(),
        session.tool().as_str()
    );
    if let Some(pivot) = session.pivot() {
        println!("pivot ({}, {})", pivot.x, pivot.y);
    }
    if let Some(image) = session.image() {
        summarize("image", image);
    }
    if let Some(processed) = session.processed() {
        summarize("processed", processed);
    }

    Ok(())
}
