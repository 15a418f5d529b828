//! Error taxonomy shared by the production kernel, providers, and engine.

use thiserror::Error;

/// Errors that abort a simulation run.
///
/// Asset-level programming errors (committing an out-of-range or
/// out-of-order timestep) panic instead; see the `# Panics` sections on
/// the asset methods.
#[derive(Error, Debug)]
pub enum SimError {
    /// Malformed constructor input. Raised at construction, never later.
    #[error("invalid configuration for {context}: {message}")]
    InvalidConfiguration { context: String, message: String },

    /// The driving loop called into the kernel out of sequence.
    #[error("precondition violated by {context} at timestep {timestep}: {message}")]
    PreconditionViolation {
        context: String,
        timestep: usize,
        message: String,
    },

    /// A provider could not supply a value for the required timestep.
    #[error("{provider} has no value for timestep {timestep}")]
    DataGap { provider: String, timestep: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SimError {
    pub(crate) fn invalid(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_identify_context_and_timestep() {
        let e = SimError::PreconditionViolation {
            context: "HYDRO idx0".to_string(),
            timestep: 12,
            message: "expected timestep 11".to_string(),
        };
        let s = e.to_string();
        assert!(s.contains("HYDRO idx0"));
        assert!(s.contains("12"));

        let gap = SimError::DataGap {
            provider: "resource 3".to_string(),
            timestep: 8760,
        };
        assert_eq!(gap.to_string(), "resource 3 has no value for timestep 8760");
    }

    #[test]
    fn invalid_helper_builds_configuration_error() {
        let e = SimError::invalid("Production", "n_points must be > 0");
        assert!(matches!(e, SimError::InvalidConfiguration { .. }));
        assert!(e.to_string().contains("n_points must be > 0"));
    }
}
