#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{init_logging, Game, Side, Verdict};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use serde_json::json;

#[cfg(feature = "std")]
const TURN_CAP: u32 = 10_000;

#[derive(serde::Serialize)]
#[cfg(feature = "std")]
struct MatchSummary {
    seed: u64,
    winner: Option<Side>,
    draw: bool,
    turns: u32,
    scores: [u32; 2],
    shots: [usize; 2],
}

#[cfg(feature = "std")]
fn run_match(seed: u64) -> anyhow::Result<MatchSummary> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new(&mut rng);
    game.place_fleet_auto(Side::P1, &mut rng);
    game.place_fleet_auto(Side::P2, &mut rng);
    let verdict = loop {
        if game.turns() >= TURN_CAP {
            anyhow::bail!("seed {}: no verdict after {} turns", seed, TURN_CAP);
        }
        game.play_auto_turn(&mut rng);
        if let Some(verdict) = game.verdict() {
            break verdict;
        }
    };
    let (winner, draw) = match verdict {
        Verdict::Win(side) => (Some(side), false),
        Verdict::Draw => (None, true),
    };
    Ok(MatchSummary {
        seed,
        winner,
        draw,
        turns: game.turns(),
        scores: [
            game.board(Side::P1).score(),
            game.board(Side::P2).score(),
        ],
        shots: [
            game.attack(Side::P1).shots_spent(),
            game.attack(Side::P2).shots_spent(),
        ],
    })
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 3 {
        eprintln!("Usage: {} [games] [base-seed]", args[0]);
        std::process::exit(1);
    }
    let games: u64 = if args.len() > 1 { args[1].parse()? } else { 1 };
    if games == 0 {
        anyhow::bail!("games must be at least 1");
    }
    let base_seed: u64 = if args.len() > 2 {
        args[2].parse()?
    } else {
        rand::random()
    };

    let mut p1_wins = 0u64;
    let mut p2_wins = 0u64;
    let mut draws = 0u64;
    let mut total_turns = 0u64;
    for i in 0..games {
        let summary = run_match(base_seed.wrapping_add(i))?;
        match summary.winner {
            Some(Side::P1) => p1_wins += 1,
            Some(Side::P2) => p2_wins += 1,
            None => draws += 1,
        }
        total_turns += summary.turns as u64;
        println!("{}", serde_json::to_string(&summary)?);
    }

    let aggregate = json!({
        "games": games,
        "base_seed": base_seed,
        "p1_wins": p1_wins,
        "p2_wins": p2_wins,
        "draws": draws,
        "mean_turns": total_turns as f64 / games as f64,
    });
    println!("{}", serde_json::to_string(&aggregate)?);
    Ok(())
}
