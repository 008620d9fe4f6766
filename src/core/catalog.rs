//! Size catalog - which icon categories get rendered, and at which edge lengths

use std::fmt;

/// Favicon sizes, ascending; these are also the frames packed into favicon.ico
pub const FAVICON_SIZES: &[u32] = &[16, 32, 48, 64, 128, 192, 256, 512];

/// Apple touch icon sizes (shared by the plain apple-icon set)
pub const APPLE_TOUCH_SIZES: &[u32] = &[57, 60, 72, 76, 83, 114, 120, 144, 152, 167, 180];

pub const MS_TILE_SIZES: &[u32] = &[70, 144, 150, 310];
pub const GENERIC_SIZES: &[u32] = &[16, 32, 96, 192];
pub const ANDROID_CHROME_SIZES: &[u32] = &[36, 48, 72, 96, 144, 192, 512];
pub const WEB_MANIFEST_SIZES: &[u32] = &[192, 512];

/// Frames bundled into the multi-resolution icon
pub const ICO_SIZES: &[u32] = FAVICON_SIZES;

/// File name of the packed icon, in both scratch and output directories
pub const ICO_FILE_NAME: &str = "favicon.ico";

/// Icon category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconCategory {
    Favicon,
    AppleTouch,
    AppleIcon,
    MsTile,
    Generic,
    AndroidChrome,
    WebManifest,
}

impl IconCategory {
    /// All categories in rendering order
    pub const ALL: [IconCategory; 7] = [
        IconCategory::Favicon,
        IconCategory::AppleTouch,
        IconCategory::AppleIcon,
        IconCategory::MsTile,
        IconCategory::Generic,
        IconCategory::AndroidChrome,
        IconCategory::WebManifest,
    ];

    /// Short identifier used in logs and error messages
    pub fn slug(&self) -> &'static str {
        match self {
            IconCategory::Favicon => "favicon",
            IconCategory::AppleTouch => "apple-touch",
            IconCategory::AppleIcon => "apple-icon",
            IconCategory::MsTile => "ms-tile",
            IconCategory::Generic => "generic",
            IconCategory::AndroidChrome => "android-chrome",
            IconCategory::WebManifest => "web-manifest",
        }
    }

    /// File name prefix for generated PNGs
    pub fn prefix(&self) -> &'static str {
        match self {
            IconCategory::Favicon => "favicon",
            IconCategory::AppleTouch => "apple-touch-icon",
            IconCategory::AppleIcon => "apple-icon",
            IconCategory::MsTile => "ms-icon",
            IconCategory::Generic => "icon",
            IconCategory::AndroidChrome => "android-chrome",
            IconCategory::WebManifest => "web-app-manifest",
        }
    }

    /// Edge lengths rendered for this category, in catalog order
    pub fn sizes(&self) -> &'static [u32] {
        match self {
            IconCategory::Favicon => FAVICON_SIZES,
            IconCategory::AppleTouch | IconCategory::AppleIcon => APPLE_TOUCH_SIZES,
            IconCategory::MsTile => MS_TILE_SIZES,
            IconCategory::Generic => GENERIC_SIZES,
            IconCategory::AndroidChrome => ANDROID_CHROME_SIZES,
            IconCategory::WebManifest => WEB_MANIFEST_SIZES,
        }
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One square PNG to render: a category at a single edge length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSpec {
    pub category: IconCategory,
    pub size: u32,
}

impl IconSpec {
    pub fn new(category: IconCategory, size: u32) -> Self {
        Self { category, size }
    }

    /// `{prefix}-{size}x{size}.png`
    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.png", self.category.prefix(), self.size, self.size)
    }
}

impl fmt::Display for IconSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}x{}", self.category, self.size, self.size)
    }
}

/// Every (category, size) pair in catalog order
pub fn all_specs() -> impl Iterator<Item = IconSpec> {
    IconCategory::ALL.into_iter().flat_map(|category| {
        category
            .sizes()
            .iter()
            .map(move |&size| IconSpec::new(category, size))
    })
}

/// Total number of PNGs a full run produces
pub fn total_icons() -> usize {
    IconCategory::ALL.iter().map(|c| c.sizes().len()).sum()
}

/// The favicon PNGs that make up the ICO frames, ascending
pub fn ico_frames() -> impl Iterator<Item = IconSpec> {
    ICO_SIZES
        .iter()
        .map(|&size| IconSpec::new(IconCategory::Favicon, size))
}
