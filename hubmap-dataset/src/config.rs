//! Registry of the supported resolution variants.

use hubmap_core::{BuilderConfig, Version};

/// Version shared by every variant.
pub const VERSION: Version = Version::new(1, 0, 0);

/// One resolution variant of the training archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HubmapKaggleConfig {
    base: BuilderConfig,
    size: u32,
}

impl HubmapKaggleConfig {
    const fn new(name: &'static str, size: u32, description: &'static str) -> Self {
        Self {
            base: BuilderConfig::new(name, VERSION, description),
            size,
        }
    }

    /// Returns the `{size}x{size}` label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.base.name()
    }

    /// Returns the square crop size in pixels.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the generic configuration descriptor.
    #[must_use]
    pub const fn builder_config(&self) -> &BuilderConfig {
        &self.base
    }
}

static BUILDER_CONFIGS: [HubmapKaggleConfig; 3] = [
    HubmapKaggleConfig::new("256x256", 256, "Training images cropped to 256x256"),
    HubmapKaggleConfig::new("512x512", 512, "Training images cropped to 512x512"),
    HubmapKaggleConfig::new("1024x1024", 1024, "Training images cropped to 1024x1024"),
];

/// Returns the registered variants in declaration order.
///
/// # Examples
/// ```
/// use hubmap_dataset::builder_configs;
///
/// let sizes: Vec<u32> = builder_configs().iter().map(|c| c.size()).collect();
/// assert_eq!(sizes, [256, 512, 1024]);
/// ```
#[must_use]
pub fn builder_configs() -> &'static [HubmapKaggleConfig] {
    &BUILDER_CONFIGS
}

pub(crate) fn find_config(name: &str) -> Option<&'static HubmapKaggleConfig> {
    BUILDER_CONFIGS.iter().find(|config| config.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_descriptions_follow_size() {
        for config in builder_configs() {
            let size = config.size();
            assert_eq!(config.name(), format!("{size}x{size}"));
            assert_eq!(
                config.builder_config().description(),
                format!("Training images cropped to {size}x{size}")
            );
            assert_eq!(config.builder_config().version(), VERSION);
        }
    }

    #[test]
    fn registry_is_a_single_static_table() {
        assert!(std::ptr::eq(builder_configs(), builder_configs()));
    }

    #[test]
    fn find_config_matches_exact_names_only() {
        assert_eq!(find_config("1024x1024").map(HubmapKaggleConfig::size), Some(1024));
        assert!(find_config("1024").is_none());
        assert!(find_config("128x128").is_none());
    }
}
