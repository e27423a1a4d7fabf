//! Match controller: turn order, the placement drain, and adjudication.

use alloc::vec::Vec;
use core::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::attack::Attack;
use crate::board::{Board, IdAllocator};
use crate::common::{Cell, ShotOutcome};
use crate::placement;
use crate::player::Player;

/// One of the two combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::P1 => write!(f, "P1"),
            Side::P2 => write!(f, "P2"),
        }
    }
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Win(Side),
    Draw,
}

/// What happened during one turn.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    /// The shot taken and its outcome, or `None` when the side was out
    /// of shots and passed.
    pub shot: Option<(Cell, ShotOutcome)>,
    /// Hull sizes berthed during this turn's drain.
    pub placed: Vec<u8>,
    /// Hull sizes that fit nowhere and went back in the queue.
    pub deferred: Vec<u8>,
}

/// A whole match: two boards, two shot records, one id well.
///
/// Construction queues each side's fleet; drain the queues with
/// [`place_fleet_auto`] or [`place_fleet_with`] before playing turns.
/// Sides then alternate in an order fixed by one shuffle at creation.
///
/// [`place_fleet_auto`]: Game::place_fleet_auto
/// [`place_fleet_with`]: Game::place_fleet_with
pub struct Game {
    boards: [Board; 2],
    attacks: [Attack; 2],
    ids: IdAllocator,
    order: [Side; 2],
    turns: u32,
}

impl Game {
    /// Fresh match with a coin-flipped turn order.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut order = [Side::P1, Side::P2];
        order.shuffle(rng);
        log::info!("match starts, {} moves first", order[0]);
        Game {
            boards: [Board::new(), Board::new()],
            attacks: [Attack::new(), Attack::new()],
            ids: IdAllocator::new(),
            order,
            turns: 0,
        }
    }

    /// Assemble a match from prepared components, `first` to move. The id
    /// well resumes past every live ship so ids stay unique.
    pub fn from_parts(boards: [Board; 2], attacks: [Attack; 2], first: Side) -> Self {
        let mut ids = IdAllocator::new();
        for board in &boards {
            for (id, _) in board.ships() {
                ids.resume_past(id);
            }
        }
        Game {
            boards,
            attacks,
            ids,
            order: [first, first.opponent()],
            turns: 0,
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    pub fn attack(&self, side: Side) -> &Attack {
        &self.attacks[side.index()]
    }

    /// Completed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Side to move next.
    pub fn active(&self) -> Side {
        self.order[(self.turns % 2) as usize]
    }

    /// Fixed turn order, first mover first.
    pub fn order(&self) -> [Side; 2] {
        self.order
    }

    /// Drain `side`'s placement queue with random berths.
    pub fn place_fleet_auto<R: Rng>(&mut self, side: Side, rng: &mut R) {
        self.drain_auto(side, rng);
    }

    /// Drain `side`'s placement queue through `player`.
    pub fn place_fleet_with(&mut self, side: Side, player: &mut dyn Player) {
        self.drain_with(side, player);
    }

    /// Play one turn for the active side with the automatic gunner.
    pub fn play_auto_turn<R: Rng>(&mut self, rng: &mut R) -> TurnReport {
        let side = self.active();
        let shot = if self.attacks[side.index()].out_of_shots() {
            log::debug!("{} is out of shots and passes", side);
            None
        } else {
            let cell = self.attacks[side.index()].pick(&self.boards[side.opponent().index()], rng);
            let outcome = self.resolve_shot(side, cell);
            Some((cell, outcome))
        };
        let (placed, deferred) = self.drain_auto(side, rng);
        self.turns += 1;
        TurnReport {
            side,
            shot,
            placed,
            deferred,
        }
    }

    /// Play one turn for the active side, asking `player` for the shot
    /// and for any placements. Proposals are re-requested until valid.
    pub fn play_turn_with(&mut self, player: &mut dyn Player) -> TurnReport {
        let side = self.active();
        let shot = if self.attacks[side.index()].out_of_shots() {
            log::debug!("{} is out of shots and passes", side);
            None
        } else {
            let cell = loop {
                let proposal = player.request_shot(self.attack(side), self.board(side));
                if !self.attacks[side.index()].is_spent_shot(proposal) {
                    break proposal;
                }
                log::debug!("rejected spent shot at {}", proposal);
            };
            let outcome = self.resolve_shot(side, cell);
            Some((cell, outcome))
        };
        let (placed, deferred) = self.drain_with(side, player);
        self.turns += 1;
        TurnReport {
            side,
            shot,
            placed,
            deferred,
        }
    }

    /// Adjudicate the current state.
    ///
    /// Exactly one fleet afloat wins outright; neither afloat is a draw.
    /// With both shot budgets spent the higher score wins and equal
    /// scores draw. With exactly one budget spent the higher score wins
    /// but equal scores leave the match running.
    pub fn verdict(&self) -> Option<Verdict> {
        let alive = [
            self.boards[0].has_live_ships(),
            self.boards[1].has_live_ships(),
        ];
        match alive {
            [true, false] => return Some(Verdict::Win(Side::P1)),
            [false, true] => return Some(Verdict::Win(Side::P2)),
            [false, false] => return Some(Verdict::Draw),
            [true, true] => {}
        }
        let spent = [self.attacks[0].out_of_shots(), self.attacks[1].out_of_shots()];
        if !spent[0] && !spent[1] {
            return None;
        }
        let scores = [self.boards[0].score(), self.boards[1].score()];
        if scores[0] > scores[1] {
            Some(Verdict::Win(Side::P1))
        } else if scores[1] > scores[0] {
            Some(Verdict::Win(Side::P2))
        } else if spent[0] && spent[1] {
            Some(Verdict::Draw)
        } else {
            // One side can still shoot and scores are level: play on.
            None
        }
    }

    fn resolve_shot(&mut self, side: Side, cell: Cell) -> ShotOutcome {
        let outcome = self.attacks[side.index()]
            .fire(&mut self.boards[side.opponent().index()], cell)
            .expect("validated shot was refused");
        if let ShotOutcome::Sunk(size) = outcome {
            // The attacker earns a replacement hull of the same size.
            self.boards[side.index()].enqueue(size);
            log::debug!("{} sank a size-{} ship and earned a replacement", side, size);
        }
        outcome
    }

    /// Pop each queued hull once, oldest first. Unplaceable hulls go back
    /// to the end of the queue for a later drain.
    fn drain_auto<R: Rng>(&mut self, side: Side, rng: &mut R) -> (Vec<u8>, Vec<u8>) {
        let board = &mut self.boards[side.index()];
        let mut placed = Vec::new();
        let mut deferred = Vec::new();
        for _ in 0..board.pending_len() {
            let size = board.pop_pending().expect("queue length just checked");
            match placement::auto_place(board, &mut self.ids, size, rng) {
                Some(_) => placed.push(size),
                None => deferred.push(size),
            }
        }
        (placed, deferred)
    }

    fn drain_with(&mut self, side: Side, player: &mut dyn Player) -> (Vec<u8>, Vec<u8>) {
        let idx = side.index();
        let mut placed = Vec::new();
        let mut deferred = Vec::new();
        for _ in 0..self.boards[idx].pending_len() {
            let size = self.boards[idx]
                .pop_pending()
                .expect("queue length just checked");
            if !placement::is_placeable(&self.boards[idx], size) {
                self.boards[idx].enqueue(size);
                deferred.push(size);
                continue;
            }
            loop {
                let cells = player.request_placement(&self.boards[idx], size);
                match placement::place(&mut self.boards[idx], &mut self.ids, size, &cells) {
                    Ok(_) => break,
                    Err(err) => log::debug!("rejected placement: {}", err),
                }
            }
            placed.push(size);
        }
        (placed, deferred)
    }
}
