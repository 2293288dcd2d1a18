/// Rejected list configuration.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("min_row_height must be greater than zero")]
    ZeroMinRowHeight,
    #[error("card_ratio must be a positive, finite number (got {0})")]
    InvalidCardRatio(f32),
}
