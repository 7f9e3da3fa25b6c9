#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidAction,
    ChartUnavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::InvalidAction => "That action is not available right now.",
            ViewError::ChartUnavailable => {
                "Something went wrong while drawing the chart. Please go back and try again."
            }
        }
    }
}
