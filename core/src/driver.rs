use thiserror::Error;

use crate::*;

/// Supplies one button sample per polling tick.
pub trait InputSource {
    type Error;

    /// Blocks until the next tick. `None` means the player asked to stop.
    fn next_sample(&mut self) -> core::result::Result<Option<Buttons>, Self::Error>;
}

/// Receives the session state once per tick for display.
pub trait FrameSink {
    type Error;

    fn present(&mut self, session: &Session) -> core::result::Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum DriverError<I, F> {
    #[error("input source failed: {0}")]
    Input(I),
    #[error("frame sink failed: {0}")]
    Frame(F),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveOutcome {
    Finished(GameStatus),
    Quit,
}

/// Runs `session` until it reaches a terminal status or the input source stops.
///
/// The final state is always presented before returning.
pub fn drive<I, F>(
    session: &mut Session,
    input: &mut I,
    sink: &mut F,
) -> core::result::Result<DriveOutcome, DriverError<I::Error, F::Error>>
where
    I: InputSource,
    F: FrameSink,
{
    loop {
        sink.present(session).map_err(DriverError::Frame)?;

        if session.is_finished() {
            return Ok(DriveOutcome::Finished(session.status()));
        }

        let Some(buttons) = input.next_sample().map_err(DriverError::Input)? else {
            log::debug!("Input closed, leaving session");
            return Ok(DriveOutcome::Quit);
        };
        if !buttons.is_empty() {
            log::trace!("Sample: {:?}", buttons);
        }
        session.apply_commands(&map_buttons(buttons));
    }
}
