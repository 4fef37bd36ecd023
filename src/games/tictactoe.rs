//! 3x3 tic-tac-toe as a `Rules` implementation.
//!
//! Perfect-information game: `filter_state` is the identity copy. State and
//! action both derive serde so they can travel over the line protocol as-is.

use serde::{Deserialize, Serialize};

use crate::game::{Player, Rules};

pub const SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Place `mark` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeAction {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

/// Full game state. `players[0]` plays X, `players[1]` plays O; `next` indexes
/// the player to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    players: Vec<Player>,
    cells: [[Option<Mark>; SIZE]; SIZE],
    next: usize,
}

impl TicTacToeState {
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells[row][col]
    }

    pub fn mark_of(&self, player: &Player) -> Option<Mark> {
        match self.players.iter().position(|p| p == player) {
            Some(0) => Some(Mark::X),
            Some(1) => Some(Mark::O),
            _ => None,
        }
    }

    /// The winning mark, if any line of three is complete.
    pub fn winner(&self) -> Option<Mark> {
        let lines: [[(usize, usize); SIZE]; 8] = [
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            [(0, 0), (1, 1), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ];
        lines.iter().find_map(|line| {
            let first = self.cells[line[0].0][line[0].1]?;
            line[1..]
                .iter()
                .all(|&(r, c)| self.cells[r][c] == Some(first))
                .then_some(first)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_some()))
    }
}

/// Stateless rules bundle; all game data lives in the state value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl Rules for TicTacToe {
    type State = TicTacToeState;
    type Action = TicTacToeAction;

    fn initial_state(&self, players: &[Player]) -> TicTacToeState {
        assert_eq!(players.len(), 2, "tic-tac-toe takes exactly two players");
        TicTacToeState {
            players: players.to_vec(),
            cells: [[None; SIZE]; SIZE],
            next: 0,
        }
    }

    fn current_player(&self, state: &TicTacToeState) -> Player {
        state.players[state.next].clone()
    }

    fn available_actions(&self, player: &Player, state: &TicTacToeState) -> Vec<TicTacToeAction> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        let Some(mark) = state.mark_of(player) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if state.cells[row][col].is_none() {
                    actions.push(TicTacToeAction { row, col, mark });
                }
            }
        }
        actions
    }

    fn transition(&self, state: &TicTacToeState, action: &TicTacToeAction) -> TicTacToeState {
        let mut successor = state.clone();
        successor.cells[action.row][action.col] = Some(action.mark);
        successor.next = (state.next + 1) % state.players.len();
        successor
    }

    fn is_terminal(&self, state: &TicTacToeState) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn filter_state(&self, state: &TicTacToeState, _player: &Player) -> TicTacToeState {
        // Nothing is hidden in tic-tac-toe.
        state.clone()
    }

    fn copy_state(&self, state: &TicTacToeState) -> TicTacToeState {
        state.clone()
    }
}
