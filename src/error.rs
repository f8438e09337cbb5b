//! Error taxonomy of the surface host.
//!
//! Only two things can go wrong at this layer. Everything that fails inside
//! the engine boundary is the engine's own business.

use thiserror::Error;

use crate::display::DisplayConfiguration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError
{
        /// The platform cannot provide the requested display configuration.
        ///
        /// Fatal to [`crate::host::SurfaceHost`] construction. The request is
        /// never silently downgraded.
        #[error("display configuration unavailable ({requested}): {reason}")]
        ConfigurationUnavailable
        {
                requested: DisplayConfiguration,
                reason: String,
        },

        /// The platform rejected the immersive/fullscreen chrome flags.
        ///
        /// Cosmetic, so the host logs it and carries on.
        #[error("display chrome preference unsupported: {reason}")]
        ChromePreferenceUnsupported
        {
                reason: String,
        },
}

impl BridgeError
{
        pub fn configuration_unavailable(
                requested: DisplayConfiguration,
                reason: impl Into<String>,
        ) -> Self
        {
                Self::ConfigurationUnavailable {
                        requested,
                        reason: reason.into(),
                }
        }

        pub fn chrome_unsupported(reason: impl Into<String>) -> Self
        {
                Self::ChromePreferenceUnsupported {
                        reason: reason.into(),
                }
        }

        /// Whether the error prevents the surface from being created.
        pub fn is_fatal(&self) -> bool
        {
                matches!(self, Self::ConfigurationUnavailable { .. })
        }
}

#[cfg(test)]
mod tests
{
        use super::*;

        #[test]
        fn configuration_unavailable_is_fatal()
        {
                let err = BridgeError::configuration_unavailable(
                        DisplayConfiguration::default(),
                        "no 16-bit depth buffer",
                );

                assert!(err.is_fatal());
                assert!(err.to_string().contains("no 16-bit depth buffer"));
                assert!(err.to_string().contains("rgb 8/8/8"));
        }

        #[test]
        fn chrome_preference_unsupported_is_not_fatal()
        {
                let err = BridgeError::chrome_unsupported("no monitor");

                assert!(!err.is_fatal());
                assert_eq!(
                        err.to_string(),
                        "display chrome preference unsupported: no monitor"
                );
        }
}
