// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LRU cache of perspective-corrected images
//!
//! Entries are keyed by the canonical corner quadrilateral together with the
//! identity of the source image. A hit promotes the entry to most recently
//! used; inserting into a full cache evicts the least recently used entry
//! first. Non-convex corner sets are rejected before the cache is consulted.
//!
//! [`PerspectiveCache`] needs `&mut self`. Callers sharing one cache across
//! threads use [`SharedPerspectiveCache`].

use crate::error::{Error, Result};
use crate::quad::{Quad, QuadKey};
use crate::warp::rectify;
use image::{ImageFormat, RgbaImage};
use nalgebra::Point2;
use rustc_hash::FxHashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use xxhash_rust::xxh3::xxh3_64;

pub const DEFAULT_CAPACITY: usize = 20;

/// Decoded source image with a stable identity
#[derive(Debug, Clone)]
pub struct SourceImage {
    id: u64,
    image: Arc<RgbaImage>,
}

impl SourceImage {
    /// Wrap an already decoded image; `id` must change whenever the pixels do
    pub fn new(id: u64, image: RgbaImage) -> Self {
        Self {
            id,
            image: Arc::new(image),
        }
    }

    /// Decode encoded bytes (PNG or JPEG), identified by their xxh3 hash
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let id = xxh3_64(bytes);
        let image = image::load_from_memory(bytes).map_err(Error::Decode)?.to_rgba8();
        Ok(Self::new(id, image))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedImage {
    image: RgbaImage,
}

impl CorrectedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(Error::Encode)?;
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub rejections: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    source: u64,
    quad: QuadKey,
}

#[derive(Debug)]
struct CacheEntry {
    image: Arc<CorrectedImage>,
    last_used: u64,
}

#[derive(Debug)]
pub struct PerspectiveCache {
    capacity: usize,
    /// Fixed output size; derived from the quad when `None`
    target_size: Option<(u32, u32)>,
    clock: u64,
    entries: FxHashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl Default for PerspectiveCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl PerspectiveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            target_size: None,
            clock: 0,
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            stats: CacheStats::default(),
        }
    }

    /// Rectify every selection to `width` x `height` instead of its own size
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = Some((width, height));
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether a corrected image is cached for this selection, without promoting it
    pub fn contains(&self, corners: [Point2<f64>; 4], source: &SourceImage) -> bool {
        let quad = Quad::new(corners);
        quad.is_convex() && self.entries.contains_key(&Self::key(&quad, source))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Corrected image for the region `corners` of `source`
    ///
    /// Fails with [`Error::NonConvex`] when the corners do not form a convex
    /// quadrilateral; the cache is left untouched in that case and whenever the
    /// correction itself fails.
    pub fn get(&mut self, corners: [Point2<f64>; 4], source: &SourceImage) -> Result<Arc<CorrectedImage>> {
        let quad = Quad::new(corners);
        if !quad.is_convex() {
            self.stats.rejections += 1;
            tracing::debug!(?corners, "Rejected non-convex selection");
            return Err(Error::NonConvex);
        }

        let key = Self::key(&quad, source);
        self.clock += 1;
        let now = self.clock;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = now;
            self.stats.hits += 1;
            tracing::trace!(source = source.id, "Perspective cache hit");
            return Ok(Arc::clone(&entry.image));
        }

        self.stats.misses += 1;
        let (width, height) = self.target_size.unwrap_or_else(|| quad.target_size());
        let image = Arc::new(CorrectedImage {
            image: rectify(source.image(), &quad, width, height)?,
        });
        tracing::debug!(source = source.id, width, height, "Perspective cache miss, rectified");

        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }
        self.entries.insert(
            key,
            CacheEntry {
                image: Arc::clone(&image),
                last_used: now,
            },
        );
        Ok(image)
    }

    fn key(quad: &Quad, source: &SourceImage) -> CacheKey {
        CacheKey {
            source: source.id,
            quad: quad.key(),
        }
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key);

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.evictions += 1;
            tracing::debug!(source = key.source, "Evicted least recently used correction");
        }
    }
}

/// [`PerspectiveCache`] behind a mutex, for callers on several threads
///
/// The lock is held across rectification on a miss, so concurrent requests
/// for the same selection compute it once.
#[derive(Debug, Default)]
pub struct SharedPerspectiveCache {
    inner: Mutex<PerspectiveCache>,
}

impl SharedPerspectiveCache {
    pub fn new(cache: PerspectiveCache) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn get(&self, corners: [Point2<f64>; 4], source: &SourceImage) -> Result<Arc<CorrectedImage>> {
        self.lock().get(corners, source)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // Entries are inserted whole; a poisoned cache is still consistent.
    fn lock(&self) -> MutexGuard<'_, PerspectiveCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
