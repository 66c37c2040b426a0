use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The frame clock reached the next world tick.
    Tick,
    /// The screen is stale and the render interval has elapsed.
    Render,
    Input(CrosstermEvent),
}
