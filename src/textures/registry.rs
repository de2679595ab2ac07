//! Texture registry keyed by body identifier

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::raster::{self, RasterError, RasterImage};

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("texture not registered: {0}")]
    NotFound(String),

    #[error("texture {0} has not been uploaded to the renderer")]
    NotUploaded(String),

    #[error("cannot open texture source {}: {source}", locator.display())]
    Open {
        locator: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid texture source {}: {source}", locator.display())]
    Format {
        locator: PathBuf,
        #[source]
        source: RasterError,
    },
}

/// A decoded image plus the renderer handle assigned once it is uploaded.
pub struct TextureEntry {
    pub image: RasterImage,
    pub handle: Option<Handle<Image>>,
}

/// Owns every decoded texture, looked up by identifier.
#[derive(Resource, Default)]
pub struct TextureRegistry {
    entries: HashMap<String, TextureEntry>,
}

impl TextureRegistry {
    /// Decode `locator` and register it as `id`, replacing any previous entry.
    pub fn load(
        &mut self,
        id: impl Into<String>,
        locator: impl AsRef<Path>,
    ) -> Result<(), TextureError> {
        let id = id.into();
        let image = decode_locator(&id, locator.as_ref())?;
        self.entries.insert(id, TextureEntry::new(image));
        Ok(())
    }

    /// Load a whole batch of `(id, locator)` pairs.
    ///
    /// Either every entry is registered or none is: on the first failure the
    /// batch is dropped and the registry is left as it was.
    pub fn load_all<I, K, P>(&mut self, sources: I) -> Result<usize, TextureError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<Path>,
    {
        let mut staged = HashMap::new();
        for (id, locator) in sources {
            let id = id.into();
            let image = decode_locator(&id, locator.as_ref())?;
            staged.insert(id, TextureEntry::new(image));
        }

        let count = staged.len();
        self.entries.extend(staged);
        info!("[TEXTURES] registered {} textures", count);
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Result<&RasterImage, TextureError> {
        self.entries
            .get(id)
            .map(|entry| &entry.image)
            .ok_or_else(|| TextureError::NotFound(id.to_string()))
    }

    /// Renderer handle for `id`. Fails if the id is unknown or not uploaded yet.
    pub fn handle(&self, id: &str) -> Result<Handle<Image>, TextureError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| TextureError::NotFound(id.to_string()))?;
        entry
            .handle
            .clone()
            .ok_or_else(|| TextureError::NotUploaded(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut TextureEntry)> {
        self.entries.iter_mut().map(|(id, entry)| (id.as_str(), entry))
    }
}

impl TextureEntry {
    fn new(image: RasterImage) -> Self {
        Self {
            image,
            handle: None,
        }
    }
}

fn decode_locator(id: &str, locator: &Path) -> Result<RasterImage, TextureError> {
    let file = File::open(locator).map_err(|source| TextureError::Open {
        locator: locator.to_path_buf(),
        source,
    })?;
    let image = raster::decode(BufReader::new(file)).map_err(|source| TextureError::Format {
        locator: locator.to_path_buf(),
        source,
    })?;
    info!(
        "[TEXTURES] decoded {} from {}: {}x{}",
        id,
        locator.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
