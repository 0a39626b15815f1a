use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::blog_models::{BlogPost, FrontMatter};

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} has no front matter")]
    MissingFrontMatter(PathBuf),
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Blog posts read once from the content directory, newest first.
#[derive(Debug, Default)]
pub struct BlogRepository {
    posts: Vec<BlogPost>,
}

impl BlogRepository {
    pub fn from_posts(mut posts: Vec<BlogPost>) -> Self {
        posts.sort_by(|a, b| {
            b.published_on()
                .cmp(&a.published_on())
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Self { posts }
    }

    /// Loads every `.md`/`.mdx` file directly inside `dir`.
    ///
    /// A missing directory is an empty blog. Posts whose front matter can't be
    /// read are skipped with a warning so one broken file doesn't take the
    /// listing down.
    pub fn load(dir: &Path) -> Result<Self, BlogError> {
        if !dir.is_dir() {
            tracing::warn!("Blog directory {} not found; serving no posts", dir.display());
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(dir).map_err(|source| BlogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut posts = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| BlogError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            let is_post = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| POST_EXTENSIONS.contains(&ext));
            if !is_post || !path.is_file() {
                continue;
            }

            match read_post(&path) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Skipping blog post: {}", e),
            }
        }

        Ok(Self::from_posts(posts))
    }

    pub fn all_posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn posts_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a BlogPost> + 'a {
        self.posts.iter().filter(move |post| post.has_tag(tag))
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn all_slugs(&self) -> Vec<&str> {
        self.posts.iter().map(|post| post.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn read_post(path: &Path) -> Result<BlogPost, BlogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BlogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (yaml, body) =
        split_front_matter(&raw).ok_or_else(|| BlogError::MissingFrontMatter(path.to_path_buf()))?;
    let front_matter: FrontMatter =
        serde_yaml::from_str(yaml).map_err(|source| BlogError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

    let slug = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(BlogPost::from_front_matter(
        slug,
        front_matter,
        body.trim_start().to_string(),
    ))
}

/// Splits `---`-delimited front matter from the body.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = raw.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
