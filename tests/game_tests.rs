use std::collections::VecDeque;

use broadside::{
    placement, Attack, Board, Cell, Game, IdAllocator, Player, ShotOutcome, Side, Verdict,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).unwrap()
}

fn cells(points: &[(u8, u8)]) -> Vec<Cell> {
    points.iter().map(|&(r, c)| cell(r, c)).collect()
}

/// Board with its initial queue drained and the given runs committed.
fn board_with(runs: &[&[(u8, u8)]]) -> Board {
    let mut board = Board::new();
    let mut ids = IdAllocator::new();
    while board.pop_pending().is_some() {}
    for run in runs {
        placement::place(&mut board, &mut ids, run.len() as u8, &cells(run)).unwrap();
    }
    board
}

/// Attack whose whole shot budget went into misses on a scratch board.
fn spent_attack() -> Attack {
    let mut scratch = Board::new();
    let mut attack = Attack::new();
    for c in Cell::all() {
        attack.fire(&mut scratch, c).unwrap();
    }
    attack
}

/// Replays canned placements and shots; panics when the script runs dry.
struct ScriptedPlayer {
    placements: VecDeque<Vec<Cell>>,
    shots: VecDeque<Cell>,
}

impl ScriptedPlayer {
    fn new(placements: &[&[(u8, u8)]], shots: &[(u8, u8)]) -> Self {
        ScriptedPlayer {
            placements: placements.iter().map(|run| cells(run)).collect(),
            shots: shots.iter().map(|&(r, c)| cell(r, c)).collect(),
        }
    }
}

impl Player for ScriptedPlayer {
    fn request_placement(&mut self, _board: &Board, _size: u8) -> Vec<Cell> {
        self.placements.pop_front().expect("placement script ran dry")
    }

    fn request_shot(&mut self, _attack: &Attack, _own: &Board) -> Cell {
        self.shots.pop_front().expect("shot script ran dry")
    }
}

#[test]
fn test_fleet_placement_fills_both_boards() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut game = Game::new(&mut rng);
    game.place_fleet_auto(Side::P1, &mut rng);
    game.place_fleet_auto(Side::P2, &mut rng);

    for side in [Side::P1, Side::P2] {
        let board = game.board(side);
        assert_eq!(board.score(), 14);
        assert_eq!(board.ships().count(), 4);
        assert_eq!(board.pending_len(), 0);
        assert_eq!(board.taken().len(), 14);
    }
}

#[test]
fn test_turn_order_alternates_from_the_shuffled_start() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut game = Game::new(&mut rng);
    game.place_fleet_auto(Side::P1, &mut rng);
    game.place_fleet_auto(Side::P2, &mut rng);

    let [first, second] = game.order();
    assert_eq!(first.opponent(), second);
    for expected in [first, second, first, second] {
        assert_eq!(game.active(), expected);
        let report = game.play_auto_turn(&mut rng);
        assert_eq!(report.side, expected);
    }
    assert_eq!(game.turns(), 4);
}

#[test]
fn test_sinking_awards_the_attacker_a_replacement_hull() {
    let p1_board = board_with(&[&[(9, 0), (9, 1)]]);
    let p2_board = board_with(&[&[(0, 0), (0, 1)]]);
    let mut game = Game::from_parts(
        [p1_board, p2_board],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    // P1 hunts down P2's only ship; P2 plinks away at open water
    let mut p1 = ScriptedPlayer::new(&[&[(5, 5), (5, 6)]], &[(0, 0), (0, 1)]);
    let mut p2 = ScriptedPlayer::new(&[], &[(4, 4)]);

    let report = game.play_turn_with(&mut p1);
    assert_eq!(report.shot, Some((cell(0, 0), ShotOutcome::Hit)));
    game.play_turn_with(&mut p2);

    let report = game.play_turn_with(&mut p1);
    assert_eq!(report.shot, Some((cell(0, 1), ShotOutcome::Sunk(2))));
    // the award was drained in the same turn, onto P1's own board
    assert_eq!(report.placed, vec![2]);
    assert_eq!(game.board(Side::P1).score(), 4);
    assert!(game.board(Side::P1).taken().contains(cell(5, 5)));
    // and P2's waters are clear
    assert!(!game.board(Side::P2).has_live_ships());
    assert_eq!(game.verdict(), Some(Verdict::Win(Side::P1)));
}

#[test]
fn test_spent_proposals_are_rerequested() {
    let p1_board = board_with(&[&[(9, 0), (9, 1)]]);
    let p2_board = board_with(&[&[(0, 0), (0, 1)]]);
    let mut game = Game::from_parts(
        [p1_board, p2_board],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    let mut p1 = ScriptedPlayer::new(&[], &[(4, 4), (4, 4), (5, 5)]);
    let mut p2 = ScriptedPlayer::new(&[], &[(7, 7)]);

    let report = game.play_turn_with(&mut p1);
    assert_eq!(report.shot, Some((cell(4, 4), ShotOutcome::Miss)));
    game.play_turn_with(&mut p2);

    // the duplicate (4,4) proposal is swallowed and the script advances
    let report = game.play_turn_with(&mut p1);
    assert_eq!(report.shot, Some((cell(5, 5), ShotOutcome::Miss)));
    assert_eq!(game.attack(Side::P1).shots_spent(), 2);
}

#[test]
fn test_unplaceable_hull_is_deferred_and_retried() {
    let mut rng = SmallRng::seed_from_u64(3);
    // water so shot up only runs of two or three cells survive
    let mut p1_board = Board::new();
    let mut scratch = Attack::new();
    for c in Cell::all() {
        if c.row() == 3 || c.row() == 7 || c.col() == 3 || c.col() == 7 {
            scratch.fire(&mut p1_board, c).unwrap();
        }
    }
    let mut game = Game::from_parts(
        [p1_board, board_with(&[&[(0, 0), (0, 1)]])],
        [Attack::new(), Attack::new()],
        Side::P1,
    );

    game.place_fleet_auto(Side::P1, &mut rng);
    let board = game.board(Side::P1);
    // 2 and 3 fit in the surviving gaps; 4 and 5 wait their turn
    assert_eq!(board.pending().collect::<Vec<_>>(), vec![4, 5]);
    assert_eq!(board.score(), 5);
}

#[test]
fn test_verdict_one_fleet_standing_wins() {
    let game = Game::from_parts(
        [board_with(&[&[(0, 0), (0, 1), (0, 2)]]), board_with(&[])],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Win(Side::P1)));

    let game = Game::from_parts(
        [board_with(&[]), board_with(&[&[(0, 0), (0, 1), (0, 2)]])],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Win(Side::P2)));
}

#[test]
fn test_verdict_no_fleets_standing_is_a_draw() {
    let game = Game::from_parts(
        [board_with(&[]), board_with(&[])],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Draw));
}

#[test]
fn test_verdict_symmetric_exhaustion_compares_scores() {
    let game = Game::from_parts(
        [
            board_with(&[&[(0, 0), (0, 1), (0, 2)]]),
            board_with(&[&[(0, 0), (0, 1)]]),
        ],
        [spent_attack(), spent_attack()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Win(Side::P1)));

    let game = Game::from_parts(
        [
            board_with(&[&[(0, 0), (0, 1)]]),
            board_with(&[&[(5, 5), (5, 6)]]),
        ],
        [spent_attack(), spent_attack()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Draw));
}

#[test]
fn test_verdict_asymmetric_exhaustion_needs_a_score_gap() {
    let game = Game::from_parts(
        [
            board_with(&[&[(0, 0), (0, 1), (0, 2)]]),
            board_with(&[&[(0, 0), (0, 1)]]),
        ],
        [spent_attack(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), Some(Verdict::Win(Side::P1)));

    // equal scores with one budget left: the match keeps going
    let game = Game::from_parts(
        [
            board_with(&[&[(0, 0), (0, 1)]]),
            board_with(&[&[(5, 5), (5, 6)]]),
        ],
        [spent_attack(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), None);
}

#[test]
fn test_verdict_midgame_is_none() {
    let game = Game::from_parts(
        [
            board_with(&[&[(0, 0), (0, 1)]]),
            board_with(&[&[(5, 5), (5, 6)]]),
        ],
        [Attack::new(), Attack::new()],
        Side::P1,
    );
    assert_eq!(game.verdict(), None);
}

#[test]
fn test_auto_match_reaches_a_verdict() {
    let mut rng = SmallRng::seed_from_u64(123);
    let mut game = Game::new(&mut rng);
    game.place_fleet_auto(Side::P1, &mut rng);
    game.place_fleet_auto(Side::P2, &mut rng);

    let verdict = loop {
        game.play_auto_turn(&mut rng);
        if let Some(verdict) = game.verdict() {
            break verdict;
        }
        assert!(game.turns() < 10_000, "match never resolved");
    };
    match verdict {
        Verdict::Win(side) => assert!(!game.board(side.opponent()).has_live_ships()),
        Verdict::Draw => {
            assert!(!game.board(Side::P1).has_live_ships());
            assert!(!game.board(Side::P2).has_live_ships());
        }
    }
}
