use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{TRENDLINE_PALETTE, TrendlineColor, TrendlineId};

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Source of fresh ids (`trendline-<epoch millis>-<base36 suffix>`) and palette colors.
#[derive(Debug)]
pub(super) struct TrendlineIdGenerator {
    rng: StdRng,
}

impl TrendlineIdGenerator {
    pub(super) fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub(super) fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub(super) fn next_id(&mut self) -> TrendlineId {
        self.id_at(Utc::now().timestamp_millis())
    }

    pub(super) fn id_at(&mut self, epoch_millis: i64) -> TrendlineId {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_ALPHABET[self.rng.gen_range(0..SUFFIX_ALPHABET.len())]))
            .collect();
        TrendlineId::new(format!("trendline-{epoch_millis}-{suffix}"))
    }

    pub(super) fn next_color(&mut self) -> TrendlineColor {
        TrendlineColor::palette(self.rng.gen_range(0..TRENDLINE_PALETTE.len()))
    }
}
