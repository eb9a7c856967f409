//! Error types.
//!
//! Two layers, mirroring the propagation policy of the model:
//!
//! - [`AppError`]: application-boundary failures (bad CLI input, malformed
//!   reference tables, I/O). These abort the whole run with an exit code.
//! - [`ScenarioError`]: failures confined to one scenario's computation.
//!   The batch runner records these against the scenario and carries on.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A failure confined to a single scenario's computation.
///
/// These never abort the batch: the runner records them against the scenario
/// and continues with the remaining scenarios.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A mode tag in the scenario spec is not one of the recognized modes.
    InvalidMode { callsign: String, tag: String },
    /// Strict mode: the override names callsigns absent from the baseline
    /// turnout schema.
    UnknownCallsigns(Vec<String>),
    /// The fastest response time is zero, so the second/first ratio in the
    /// RTC formula is undefined for that area-hour.
    ZeroFirstResponse { oa_code: String, hour: u8 },
    /// The baseline score for a hazard is zero, so a percentage change
    /// cannot be expressed.
    ZeroBaselineScore { hazard: &'static str },
    /// Strict mode: some area-hours had fewer than two ranked appliances.
    UnscoredAreaHours(usize),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::InvalidMode { callsign, tag } => {
                write!(f, "unrecognized mode '{tag}' for appliance {callsign}")
            }
            ScenarioError::UnknownCallsigns(callsigns) => {
                write!(
                    f,
                    "override names callsigns absent from the baseline turnout table: {}",
                    callsigns.join(", ")
                )
            }
            ScenarioError::ZeroFirstResponse { oa_code, hour } => {
                write!(
                    f,
                    "zero first-response time for area {oa_code} hour {hour} (RTC ratio undefined)"
                )
            }
            ScenarioError::ZeroBaselineScore { hazard } => {
                write!(
                    f,
                    "baseline {hazard} score is zero; percentage change is undefined"
                )
            }
            ScenarioError::UnscoredAreaHours(n) => {
                write!(f, "{n} area-hour(s) had fewer than two ranked appliances")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
