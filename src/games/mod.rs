//! Concrete games implementing the rules capability.

pub mod tictactoe;
