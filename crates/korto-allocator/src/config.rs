use std::time::Duration;
use typed_builder::TypedBuilder;

/// Number of resolve-then-write cycles a commit may run.
pub const COMMIT_ATTEMPTS: usize = 3;

/// Default upper bound on probes per resolve.
pub const DEFAULT_MAX_PROBES: usize = 64;

/// Tuning knobs for the allocator.
///
/// ```rust
/// use std::time::Duration;
/// use korto_allocator::AllocatorConfig;
///
/// let config = AllocatorConfig::builder()
///     .max_probes(128)
///     .store_timeout(Duration::from_millis(250))
///     .build();
/// assert_eq!(config.commit_attempts, 3);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct AllocatorConfig {
    /// Probes tried per resolve before giving up with `ProbeExhausted`.
    /// Values below 1 are treated as 1.
    #[builder(default = DEFAULT_MAX_PROBES)]
    pub max_probes: usize,
    /// Resolve-then-write cycles before giving up with `CommitFailed`.
    /// Values below 1 are treated as 1.
    #[builder(default = COMMIT_ATTEMPTS)]
    pub commit_attempts: usize,
    /// Deadline applied to every individual store call.
    #[builder(default, setter(strip_option))]
    pub store_timeout: Option<Duration>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
