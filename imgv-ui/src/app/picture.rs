use std::path::{Path, PathBuf};

use iced::widget::image;
use imgv_core::ImageSize;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// A decoded picture ready to be shown on the selection surface.
#[derive(Debug, Clone)]
pub struct Picture {
    path: PathBuf,
    title: String,
    size: ImageSize,
    filesize: u64,
    handle: image::Handle,
}

impl Picture {
    /// Decodes the image at `path` into RGBA pixels and reads its natural
    /// size. A file whose body cannot be decoded is rejected here rather than
    /// when it is first drawn.
    pub fn read_from_path(path: PathBuf) -> Result<Self> {
        let metadata =
            std::fs::metadata(&path).with_context(|_| error::Metadata { path: path.clone() })?;

        let pixels = ::image::open(&path)
            .with_context(|_| error::Decode { path: path.clone() })?
            .into_rgba8();
        let (width, height) = pixels.dimensions();

        let size = ImageSize::new(f64::from(width), f64::from(height))
            .with_context(|_| error::Size { path: path.clone() })?;

        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(path = %path.display(), %size, "Picture loaded");

        Ok(Self {
            handle: image::Handle::from_rgba(width, height, pixels.into_raw()),
            filesize: metadata.len(),
            path,
            title,
            size,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn filesize(&self) -> u64 {
        self.filesize
    }

    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }
}

mod error {
    use std::path::PathBuf;

    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Failed to get metadata for file: {}", path.display()))]
        Metadata {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Failed to decode image: {}", path.display()))]
        Decode {
            path: PathBuf,
            source: ::image::ImageError,
        },

        #[snafu(display("Image has no usable size: {}", path.display()))]
        Size {
            path: PathBuf,
            source: imgv_core::GeometryError,
        },
    }
}
