use std::process::ExitCode;

use metaball_reveal::host::{self, HeroImages, DEFAULT_SNAPSHOT_FRAMES, HERO_SIZE};
use metaball_reveal::{HostError, RevealConfig};

const USAGE: &str = "usage: hero [BASE_IMAGE REVEAL_IMAGE]\n       hero --snapshot OUT.png [FRAMES]";

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Procedural,
    Images { base: String, reveal: String },
    Snapshot { out: String, frames: usize },
}

fn parse(args: &[String]) -> Option<Command> {
    match args {
        [] => Some(Command::Procedural),
        [flag, out] if flag == "--snapshot" => Some(Command::Snapshot {
            out: out.clone(),
            frames: DEFAULT_SNAPSHOT_FRAMES,
        }),
        [flag, out, frames] if flag == "--snapshot" => Some(Command::Snapshot {
            out: out.clone(),
            frames: frames.parse().ok()?,
        }),
        [base, reveal] if !base.starts_with("--") => Some(Command::Images {
            base: base.clone(),
            reveal: reveal.clone(),
        }),
        _ => None,
    }
}

fn run(command: Command) -> Result<(), HostError> {
    let config = RevealConfig::default();
    match command {
        Command::Procedural => {
            let (width, height) = HERO_SIZE;
            host::run_window(HeroImages::procedural(width, height), config)
        }
        Command::Images { base, reveal } => {
            host::run_window(HeroImages::load(base, reveal)?, config)
        }
        Command::Snapshot { out, frames } => host::run_snapshot(out, frames, config),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hero: {}", e);
            ExitCode::FAILURE
        }
    }
}
