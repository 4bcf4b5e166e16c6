/// File categorization by extension.
///
/// Every supported extension belongs to exactly one [`Category`]; the
/// category decides which folder under the sorting root a file lands in.
///
/// # Examples
///
/// ```
/// use clean_folder::file_category::{Category, CategoryMapper};
///
/// let mapper = CategoryMapper::default();
/// assert_eq!(mapper.extension_to_category("JPG"), Some(Category::Images));
/// assert_eq!(mapper.extension_to_category("mp3"), Some(Category::Audio));
/// assert_eq!(mapper.extension_to_category("rs"), None);
/// ```
use std::collections::HashMap;
use std::path::Path;

/// A named bucket that a file extension maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (JPEG, PNG, JPG, SVG)
    Images,
    /// Video files (AVI, MP4, MOV, MKV)
    Video,
    /// Document files (DOC, DOCX, TXT, PDF, XLSX, PPTX)
    Documents,
    /// Audio files (MP3, OGG, WAV, AMR)
    Audio,
    /// Archive files (ZIP, GZ, TAR), unpacked after the walk
    Archives,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Category::Images,
        Category::Video,
        Category::Documents,
        Category::Audio,
        Category::Archives,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Archives.dir_name(), "archives");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Video => "video",
            Category::Documents => "documents",
            Category::Audio => "audio",
            Category::Archives => "archives",
        }
    }

    /// Extensions belonging to this category, lowercase and without the dot.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &["jpeg", "png", "jpg", "svg"],
            Category::Video => &["avi", "mp4", "mov", "mkv"],
            Category::Documents => &["doc", "docx", "txt", "pdf", "xlsx", "pptx"],
            Category::Audio => &["mp3", "ogg", "wav", "amr"],
            Category::Archives => &["zip", "gz", "tar"],
        }
    }

    /// Looks up a category by its folder name, ignoring case.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| category.dir_name().eq_ignore_ascii_case(name))
    }
}

/// Maps file extensions to categories.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    extension_map: HashMap<String, Category>,
}

impl CategoryMapper {
    /// Creates a new `CategoryMapper` with the standard extension table.
    pub fn new() -> Self {
        let mut mapper = Self {
            extension_map: HashMap::new(),
        };
        for category in Category::ALL {
            for ext in category.extensions() {
                mapper.add_extension_mapping(ext, category);
            }
        }
        mapper
    }

    /// Adds a file extension to category mapping.
    pub fn add_extension_mapping(&mut self, ext: &str, category: Category) {
        self.extension_map.insert(ext.to_lowercase(), category);
    }

    /// Maps a file extension (without the leading dot) to a category.
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        self.extension_map.get(&ext.to_lowercase()).copied()
    }

    /// Determines the category of a file from its final extension.
    ///
    /// Files without an extension, or with one that is not valid UTF-8,
    /// have no category.
    pub fn categorize(&self, path: &Path) -> Option<Category> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extension_to_category(ext))
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Images.dir_name(), "images");
        assert_eq!(Category::Video.dir_name(), "video");
        assert_eq!(Category::Documents.dir_name(), "documents");
        assert_eq!(Category::Audio.dir_name(), "audio");
        assert_eq!(Category::Archives.dir_name(), "archives");
    }

    #[test]
    fn test_extension_sets_are_disjoint() {
        let mut seen = HashSet::new();
        for category in Category::ALL {
            for ext in category.extensions() {
                assert!(seen.insert(*ext), "extension {ext} listed twice");
            }
        }
    }

    #[test]
    fn test_every_extension_maps_back_to_its_category() {
        let mapper = CategoryMapper::default();
        for category in Category::ALL {
            for ext in category.extensions() {
                assert_eq!(mapper.extension_to_category(ext), Some(category));
                assert_eq!(
                    mapper.extension_to_category(&ext.to_uppercase()),
                    Some(category)
                );
            }
        }
    }

    #[test]
    fn test_categorize_uses_final_extension() {
        let mapper = CategoryMapper::default();
        assert_eq!(
            mapper.categorize(Path::new("backup.tar.gz")),
            Some(Category::Archives)
        );
        assert_eq!(
            mapper.categorize(Path::new("Report.PDF")),
            Some(Category::Documents)
        );
        assert_eq!(mapper.categorize(Path::new("main.rs")), None);
        assert_eq!(mapper.categorize(Path::new("Makefile")), None);
        assert_eq!(mapper.categorize(Path::new(".png")), None);
    }

    #[test]
    fn test_from_dir_name_ignores_case() {
        assert_eq!(Category::from_dir_name("Images"), Some(Category::Images));
        assert_eq!(Category::from_dir_name("AUDIO"), Some(Category::Audio));
        assert_eq!(Category::from_dir_name("images.old"), None);
        assert_eq!(Category::from_dir_name("music"), None);
    }
}
