/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` defines a configuration structure with embedded defaults in
/// a single declaration. It generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde serialization/deserialization with `#[serde(default)]`, so a TOML
///   file only needs the fields it overrides
///
/// # Example
/// ```
/// stargate_bridge::config_struct! {
///     pub struct PollingConfig {
///         interval_ms: u64 = 1_000,
///         enabled: bool = true,
///     }
/// }
///
/// let polling = PollingConfig::default();
/// assert_eq!(polling.interval_ms, 1_000);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
