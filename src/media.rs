//! Files written under the media root and the URLs they are served from.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const MEDIA_URL: &str = "/media/";
const EDITOR_UPLOAD_DIR: &str = "tinymce";
const PRODUCT_IMAGE_DIR: &str = "products";
const FALLBACK_FILE_NAME: &str = "upload";
const COLLISION_SUFFIX_LEN: usize = 7;

/// Longest relative path the `waters.image` column holds.
pub const PRODUCT_IMAGE_PATH_MAX: usize = 100;

/// Public URL of a path relative to the media root.
pub fn media_url(relative: &str) -> String {
    format!("{MEDIA_URL}{relative}")
}

/// Keeps only the final component of a client supplied file name.
pub fn clean_file_name(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match last {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        name => name.to_string(),
    }
}

/// Writes a rich-text editor upload to `tinymce/<random id>/<file name>` and
/// returns the relative path.
pub async fn store_editor_upload(root: &Path, file_name: &str, contents: &[u8]) -> AppResult<String> {
    let relative = format!(
        "{EDITOR_UPLOAD_DIR}/{}/{}",
        Uuid::new_v4(),
        clean_file_name(file_name)
    );
    write_file(&root.join(&relative), contents).await?;
    tracing::debug!(path = %relative, bytes = contents.len(), "editor upload stored");
    Ok(relative)
}

/// Writes a product image to `products/<YYYY>/<MM>/<DD>/<file name>`. An
/// existing file of the same name is left alone; the new one gets a random
/// suffix instead. The stem is shortened so the relative path never exceeds
/// [`PRODUCT_IMAGE_PATH_MAX`] characters.
pub async fn store_product_image(
    root: &Path,
    at: DateTime<Utc>,
    file_name: &str,
    contents: &[u8],
) -> AppResult<String> {
    let dir = format!("{PRODUCT_IMAGE_DIR}/{}", at.format("%Y/%m/%d"));
    let budget = PRODUCT_IMAGE_PATH_MAX.saturating_sub(dir.chars().count() + 1);
    let mut name = fit_file_name(&clean_file_name(file_name), budget)?;
    if fs::try_exists(root.join(&dir).join(&name))
        .await
        .map_err(io_error)?
    {
        let suffix = &Uuid::new_v4().simple().to_string()[..COLLISION_SUFFIX_LEN];
        let shorter = fit_file_name(&name, budget.saturating_sub(COLLISION_SUFFIX_LEN + 1))?;
        name = with_suffix(&shorter, suffix);
    }

    let relative = format!("{dir}/{name}");
    write_file(&root.join(&relative), contents).await?;
    tracing::debug!(path = %relative, bytes = contents.len(), "product image stored");
    Ok(relative)
}

/// Removes a stored file, e.g. after the row pointing at it failed to save.
pub async fn discard(root: &Path, relative: &str) {
    if let Err(err) = fs::remove_file(root.join(relative)).await {
        tracing::warn!(path = %relative, error = %err, "failed to remove media file");
    }
}

/// Cuts the stem of `name` so the whole name fits in `budget` characters,
/// keeping the extension.
fn fit_file_name(name: &str, budget: usize) -> AppResult<String> {
    if name.chars().count() <= budget {
        return Ok(name.to_string());
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (name, String::new()),
    };
    let keep = budget
        .checked_sub(ext.chars().count())
        .filter(|keep| *keep > 0)
        .ok_or_else(|| AppError::validation("Image file name is too long."))?;
    Ok(stem.chars().take(keep).chain(ext.chars()).collect())
}

fn with_suffix(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{suffix}.{ext}"),
        _ => format!("{name}_{suffix}"),
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    fs::write(path, contents).await.map_err(io_error)
}

fn io_error(err: std::io::Error) -> AppError {
    AppError::Internal(anyhow::Error::new(err).context("media storage failed"))
}
