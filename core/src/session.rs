use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game from board generation to a terminal status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    play: PlayState,
    status: GameStatus,
}

/// Starts a session on a freshly generated `size`×`size` board.
pub fn new_session(size: Coord, mine_count: CellCount, seed: u64) -> Result<Session> {
    Session::new(GameConfig::square(size, mine_count)?, seed)
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::from_board(RandomBoardGenerator::new(seed).generate(config)))
    }

    /// Session over a fixed layout.
    pub fn from_board(board: Board) -> Self {
        let play = PlayState::new(board.size());
        Self {
            board,
            play,
            status: Default::default(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn play(&self) -> &PlayState {
        &self.play
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cursor(&self) -> Coord2 {
        self.play.cursor()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.play.triggered_mine()
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.play.flagged_count() as isize)
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        if self.play.is_flagged(coords) {
            return CellView::Flagged;
        }
        if !self.play.is_revealed(coords) {
            return CellView::Hidden;
        }
        match self.board[coords] {
            Cell::Empty(count) => CellView::Revealed(count),
            Cell::Mine if self.play.triggered_mine() == Some(coords) => CellView::Exploded,
            Cell::Mine => CellView::Mine,
        }
    }

    /// Jumps the cursor, for shells with pointer input.
    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        if self.is_finished() {
            return Ok(());
        }
        self.play.set_cursor(coords)
    }

    /// Applies one command, returning the new status when it caused a transition.
    pub fn apply_command(&mut self, command: Command) -> Option<GameStatus> {
        if self.is_finished() {
            log::trace!("Ignoring {:?}, game is {:?}", command, self.status);
            return None;
        }
        log::debug!("Applying {:?} at {:?}", command, self.cursor());

        match command {
            Command::Move(step) => {
                self.play.move_cursor(step);
                None
            }
            Command::Reveal => {
                let outcome = self.play.reveal(&self.board, self.play.cursor());
                match outcome {
                    RevealOutcome::HitMine => self.transition(GameStatus::Lost),
                    RevealOutcome::Revealed | RevealOutcome::NoChange
                        if self.play.revealed_count() == self.board.safe_cell_count() =>
                    {
                        self.transition(GameStatus::Won)
                    }
                    RevealOutcome::Revealed | RevealOutcome::NoChange => None,
                }
            }
            Command::ToggleFlag => {
                self.play.toggle_flag(self.play.cursor());
                None
            }
        }
    }

    /// Applies one sample's commands in order, returning the last transition.
    pub fn apply_commands(&mut self, commands: &[Command]) -> Option<GameStatus> {
        commands
            .iter()
            .filter_map(|&command| self.apply_command(command))
            .last()
    }

    fn transition(&mut self, status: GameStatus) -> Option<GameStatus> {
        log::info!("Game {:?} -> {:?}", self.status, status);
        self.status = status;
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        Session::from_board(Board::from_mine_coords(size, mines).unwrap())
    }

    fn reveal_at(session: &mut Session, coords: Coord2) -> Option<GameStatus> {
        session.set_cursor(coords).unwrap();
        session.apply_command(Command::Reveal)
    }

    #[test]
    fn single_corner_mine_floods_to_win() {
        let mut session = session((3, 3), &[(2, 2)]);

        assert_eq!(reveal_at(&mut session, (0, 0)), Some(GameStatus::Won));
        for coords in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(session.play().is_revealed(coords), "{:?} hidden", coords);
        }
        assert!(!session.play().is_revealed((2, 2)));

        assert_eq!(reveal_at(&mut session, (2, 2)), None);
        assert_eq!(session.status(), GameStatus::Won);
        assert!(!session.play().is_revealed((2, 2)));
    }

    #[test]
    fn flood_stops_before_mines_then_loss_reveals_all() {
        let mut session = session((4, 4), &[(2, 2), (3, 3)]);

        assert_eq!(reveal_at(&mut session, (0, 0)), None);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.cell_view((1, 1)), CellView::Revealed(1));
        assert_eq!(session.cell_view((3, 2)), CellView::Hidden);
        assert_eq!(session.cell_view((2, 3)), CellView::Hidden);
        assert_eq!(session.play().revealed_count(), 12);

        assert_eq!(reveal_at(&mut session, (2, 2)), Some(GameStatus::Lost));
        assert_eq!(session.cell_view((2, 2)), CellView::Exploded);
        assert_eq!(session.cell_view((3, 3)), CellView::Mine);
    }

    #[test]
    fn no_mines_wins_on_first_reveal() {
        let mut session = new_session(8, 0, 42).unwrap();

        assert_eq!(session.apply_command(Command::Reveal), Some(GameStatus::Won));
        assert_eq!(session.play().revealed_count(), 64);
    }

    #[test]
    fn win_checked_after_single_cell_reveal() {
        let mut session = session((2, 1), &[(0, 0)]);

        assert_eq!(reveal_at(&mut session, (1, 0)), Some(GameStatus::Won));
        assert!(session.is_finished());
    }

    #[test]
    fn finished_session_ignores_commands() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.apply_command(Command::Reveal), Some(GameStatus::Lost));
        let snapshot = session.clone();

        assert_eq!(session.apply_command(Command::Move((1, 1))), None);
        assert_eq!(session.apply_command(Command::ToggleFlag), None);
        assert_eq!(session.apply_command(Command::Reveal), None);
        assert_eq!(session.set_cursor((2, 2)), Ok(()));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn move_then_reveal_acts_on_new_cursor() {
        let mut session = session((3, 3), &[(0, 0)]);
        let commands = map_buttons(Buttons::A | Buttons::RIGHT | Buttons::DOWN);

        assert_eq!(session.apply_commands(&commands), None);
        assert_eq!(session.cursor(), (1, 1));
        assert_eq!(session.cell_view((1, 1)), CellView::Revealed(1));
        assert_eq!(session.cell_view((0, 0)), CellView::Hidden);
    }

    #[test]
    fn commands_after_loss_in_same_sample_are_ignored() {
        let mut session = session((3, 3), &[(0, 0)]);
        let commands = map_buttons(Buttons::A | Buttons::B);

        assert_eq!(session.apply_commands(&commands), Some(GameStatus::Lost));
        assert!(!session.play().is_flagged((0, 0)));
    }

    #[test]
    fn flag_does_not_change_status() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.apply_command(Command::ToggleFlag), None);
        assert_eq!(session.cell_view((0, 0)), CellView::Flagged);
        assert_eq!(session.mines_left(), 0);
        assert_eq!(session.apply_command(Command::Reveal), None);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn up_left_at_origin_stays_put() {
        let mut session = new_session(16, 40, 1).unwrap();

        session.apply_commands(&map_buttons(Buttons::UP | Buttons::LEFT));

        assert_eq!(session.cursor(), (0, 0));
    }

    #[test]
    fn loss_shows_other_mines_unexploded() {
        let mut session = session((3, 1), &[(0, 0), (2, 0)]);

        assert_eq!(reveal_at(&mut session, (2, 0)), Some(GameStatus::Lost));
        assert_eq!(session.cell_view((2, 0)), CellView::Exploded);
        assert_eq!(session.cell_view((0, 0)), CellView::Mine);
        assert_eq!(session.cell_view((1, 0)), CellView::Hidden);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            new_session(4, 16, 0),
            Err(GameError::InvalidConfiguration(ConfigIssue::TooManyMines {
                mines: 16,
                cells: 16
            }))
        );
        assert_eq!(
            new_session(0, 0, 0),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
    }
}
