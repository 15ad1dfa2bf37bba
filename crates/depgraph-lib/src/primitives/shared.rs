/// Macro to generate FromStr and TryFrom<String> implementations for ValueEnum types
///
/// Matching ignores ASCII case and surrounding whitespace so the same
/// spelling works on the command line and in the YAML project file.
#[macro_export]
macro_rules! impl_fromstr_for_value_enum {
    ($enum_type:ty, $error_reason:expr) => {
        impl FromStr for $enum_type {
            type Err = $crate::primitives::ConfigError;

            fn from_str(s: &str) -> Result<Self, $crate::primitives::ConfigError> {
                let trimmed = s.trim();
                for variant in Self::value_variants() {
                    if let Some(possible_value) = variant.to_possible_value() {
                        if possible_value.matches(trimmed, true) {
                            return Ok(*variant);
                        }
                    }
                }

                Err($crate::primitives::ConfigError::ParseError {
                    value: s.to_string(),
                    reason: $error_reason.to_string(),
                })
            }
        }

        impl TryFrom<String> for $enum_type {
            type Error = $crate::primitives::ConfigError;

            fn try_from(value: String) -> Result<Self, $crate::primitives::ConfigError> {
                value.parse()
            }
        }
    };
}

// Re-export for internal use
pub(crate) use impl_fromstr_for_value_enum;
