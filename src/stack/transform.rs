/// Deterministic per-photo card transforms
///
/// Every card in the stack gets a small tilt and offset so the pile looks
/// hand-dropped. The values are derived from the photo's path (FNV-1a hash
/// -> mulberry32 generator), so a card keeps its tilt across re-renders,
/// resizes, navigation and even manifest reordering.

use std::collections::HashMap;

use crate::state::data::ImageItem;

/// Discrete tilt set, so the pile gets a real mix of left and right tilt
pub const ROTATION_ANGLES: [i8; 7] = [-3, -2, -1, 0, 1, 2, 3];

/// Offset magnitude range in pixels: [MIN, MIN + SPAN)
const OFFSET_MIN: f32 = 10.0;
const OFFSET_SPAN: f32 = 10.0;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Visual transform for a card resting behind the top of the stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub rotation_degrees: i8,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CardTransform {
    /// Squared-up transform (used for the top card at rest)
    pub const IDENTITY: CardTransform = CardTransform {
        rotation_degrees: 0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

/// 32-bit FNV-1a over the UTF-8 bytes of `key`
pub fn fnv1a_32(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}

/// mulberry32: tiny seeded generator with a 32-bit state
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform value in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform index in [0, upper); `upper` must be non-zero
    pub fn next_index(&mut self, upper: usize) -> usize {
        ((self.next_unit() * upper as f64) as usize).min(upper - 1)
    }

    fn next_sign(&mut self) -> f32 {
        if self.next_unit() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    fn next_offset(&mut self) -> f32 {
        let sign = self.next_sign();
        sign * (OFFSET_MIN + self.next_unit() as f32 * OFFSET_SPAN)
    }
}

/// Compute the transform for `path`. Pure: same key, same result.
pub fn card_transform(path: &str) -> CardTransform {
    let mut rng = Mulberry32::new(fnv1a_32(path));

    let rotation_degrees = ROTATION_ANGLES[rng.next_index(ROTATION_ANGLES.len())];
    let offset_x = rng.next_offset();
    let offset_y = rng.next_offset();

    CardTransform {
        rotation_degrees,
        offset_x,
        offset_y,
    }
}

/// Memoized transforms, built once per manifest
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    transforms: HashMap<String, CardTransform>,
}

impl TransformCache {
    pub fn for_items(items: &[ImageItem]) -> Self {
        let transforms = items
            .iter()
            .map(|item| (item.path.clone(), card_transform(&item.path)))
            .collect();
        Self { transforms }
    }

    /// Cached transform, computing (without storing) keys outside the manifest
    pub fn get(&self, path: &str) -> CardTransform {
        self.transforms
            .get(path)
            .copied()
            .unwrap_or_else(|| card_transform(path))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
