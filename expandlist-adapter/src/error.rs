use expandlist::OptionsError;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    List(#[from] OptionsError),
    #[error("fling friction must be finite and positive, got {0}")]
    InvalidFriction(f32),
    #[error("screen density must be finite and positive, got {0}")]
    InvalidDensity(f32),
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("velocity units must be non-zero")]
    ZeroVelocityUnits,
}
