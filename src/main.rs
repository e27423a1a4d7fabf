#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    cell_to_string, init_logging, print_own_board, print_shot_map, CliPlayer, Game, Side,
    ShotOutcome, TurnReport, Verdict,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Take on the computer.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch the computer fight itself.
    Auto {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10_000)]
        turn_cap: u32,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { seed } => play(seed),
        Commands::Auto { seed, turn_cap } => auto(seed, turn_cap),
    }
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn play(seed: Option<u64>) -> anyhow::Result<()> {
    const HUMAN: Side = Side::P1;

    println!("Broadside: sink them faster than they sink you.");
    println!("Sinking a ship earns you a replacement of the same size.");
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);
    let mut human = match seed {
        Some(s) => CliPlayer::seeded(s.wrapping_add(1)),
        None => CliPlayer::new(),
    };
    let mut game = Game::new(&mut rng);

    println!("\nPlace your fleet.");
    game.place_fleet_with(HUMAN, &mut human);
    game.place_fleet_auto(HUMAN.opponent(), &mut rng);
    if game.order()[0] == HUMAN {
        println!("You move first.");
    } else {
        println!("The computer moves first.");
    }

    loop {
        let report = if game.active() == HUMAN {
            game.play_turn_with(&mut human)
        } else {
            game.play_auto_turn(&mut rng)
        };
        narrate(&report, HUMAN);

        if let Some(verdict) = game.verdict() {
            println!("\nFinal shot map:");
            print_shot_map(game.attack(HUMAN));
            println!("\nYour waters at the end:");
            print_own_board(game.board(HUMAN));
            match verdict {
                Verdict::Win(side) if side == HUMAN => {
                    println!("\nVictory! The enemy fleet is gone.")
                }
                Verdict::Win(_) => println!("\nDefeat. Your fleet is at the bottom."),
                Verdict::Draw => println!("\nIt's a tie! No one wins this one."),
            }
            println!(
                "Final score {} - {} after {} turns.",
                game.board(HUMAN).score(),
                game.board(HUMAN.opponent()).score(),
                game.turns()
            );
            return Ok(());
        }
    }
}

#[cfg(feature = "std")]
fn narrate(report: &TurnReport, human: Side) {
    let who = if report.side == human {
        "You"
    } else {
        "The computer"
    };
    match report.shot {
        Some((cell, ShotOutcome::Miss)) => {
            println!("{} fired at {}: miss.", who, cell_to_string(cell))
        }
        Some((cell, ShotOutcome::Hit)) => {
            println!("{} fired at {}: hit!", who, cell_to_string(cell))
        }
        Some((cell, ShotOutcome::Sunk(size))) => println!(
            "{} fired at {} and sank a size-{} ship!",
            who,
            cell_to_string(cell),
            size
        ),
        None => println!("{} passed (no shots left).", who),
    }
    for size in &report.placed {
        println!("{} placed a size-{} ship.", who, size);
    }
    for size in &report.deferred {
        println!("{} had no room for a size-{} ship; it waits.", who, size);
    }
}

#[cfg(feature = "std")]
fn auto(seed: Option<u64>, turn_cap: u32) -> anyhow::Result<()> {
    println!("Starting computer vs computer match...");
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);
    let mut game = Game::new(&mut rng);
    game.place_fleet_auto(Side::P1, &mut rng);
    game.place_fleet_auto(Side::P2, &mut rng);
    println!("{} moves first.", game.order()[0]);

    while game.turns() < turn_cap {
        let report = game.play_auto_turn(&mut rng);
        match report.shot {
            Some((cell, outcome)) => println!(
                "{} fires at {}: {:?}",
                report.side,
                cell_to_string(cell),
                outcome
            ),
            None => println!("{} passes", report.side),
        }
        for size in &report.placed {
            println!("{} places a size-{} ship", report.side, size);
        }
        for size in &report.deferred {
            println!("{} defers a size-{} ship", report.side, size);
        }

        if let Some(verdict) = game.verdict() {
            match verdict {
                Verdict::Win(side) => println!("{} wins!", side),
                Verdict::Draw => println!("It's a tie! No one wins."),
            }
            println!(
                "Final score P1: {} - P2: {} after {} turns.",
                game.board(Side::P1).score(),
                game.board(Side::P2).score(),
                game.turns()
            );
            return Ok(());
        }
    }
    anyhow::bail!("no verdict after {} turns", turn_cap)
}
