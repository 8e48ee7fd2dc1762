//! Note identifier generation.
//!
//! # Responsibility
//! - Produce opaque note ids that are unique with overwhelming probability.
//! - Prefer the OS random source and degrade to a seeded PRNG.
//!
//! # Invariants
//! - `IdGenerator::next_id` never fails; the fallback source is infallible.
//! - Strong ids are UUID v4 strings; fallback ids are `id-` plus 12
//!   lowercase base-36 characters.

use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::{Builder, Uuid};

const FALLBACK_PREFIX: &str = "id-";
const FALLBACK_LEN: usize = 12;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_SEEDS: AtomicU64 = AtomicU64::new(0);

/// Failure reported by a fallible id source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSourceError(pub String);

impl Display for IdSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "id source unavailable: {}", self.0)
    }
}

impl Error for IdSourceError {}

/// Capability for producing one note id.
pub trait IdSource {
    fn next_id(&mut self) -> Result<String, IdSourceError>;
}

/// UUID v4 ids from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomIdSource;

impl IdSource for OsRandomIdSource {
    fn next_id(&mut self) -> Result<String, IdSourceError> {
        let mut bytes = [0_u8; 16];
        getrandom::getrandom(&mut bytes).map_err(|err| IdSourceError(err.to_string()))?;
        let uuid: Uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(uuid.to_string())
    }
}

/// Seeded PRNG ids. Collision resistant for casual use, not secure.
#[derive(Debug, Clone)]
pub struct FallbackIdSource {
    rng: SmallRng,
}

impl FallbackIdSource {
    /// Seeds from wall-clock nanos, the process id and a per-process counter.
    pub fn from_entropy_hints() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        let pid = u64::from(std::process::id());
        let sequence = FALLBACK_SEEDS.fetch_add(1, Ordering::Relaxed);
        Self::with_seed(nanos ^ pid.rotate_left(32) ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Infallible variant used by [`IdGenerator`].
    pub fn generate(&mut self) -> String {
        let mut id = String::with_capacity(FALLBACK_PREFIX.len() + FALLBACK_LEN);
        id.push_str(FALLBACK_PREFIX);
        for _ in 0..FALLBACK_LEN {
            id.push(char::from(BASE36[self.rng.gen_range(0..BASE36.len())]));
        }
        id
    }
}

impl IdSource for FallbackIdSource {
    fn next_id(&mut self) -> Result<String, IdSourceError> {
        Ok(self.generate())
    }
}

/// Strategy selection: strong source first, fallback on failure.
pub struct IdGenerator {
    strong: Box<dyn IdSource>,
    fallback: FallbackIdSource,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_sources(Box::new(OsRandomIdSource), FallbackIdSource::from_entropy_hints())
    }

    pub fn with_sources(strong: Box<dyn IdSource>, fallback: FallbackIdSource) -> Self {
        Self { strong, fallback }
    }

    /// Returns a fresh id, degrading to the fallback source when needed.
    pub fn next_id(&mut self) -> String {
        match self.strong.next_id() {
            Ok(id) if !id.trim().is_empty() => id,
            Ok(_) => {
                warn!("event=id_generate module=id status=fallback reason=empty_strong_id");
                self.fallback.generate()
            }
            Err(err) => {
                warn!("event=id_generate module=id status=fallback reason={err}");
                self.fallback.generate()
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
