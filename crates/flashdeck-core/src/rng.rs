// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A small linear congruential generator. Seeded by the caller so that
/// native and browser front ends can each pick their own entropy source,
/// and tests can be deterministic.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random number in the range [0, max). Draws that fall in
    /// the incomplete final bucket are rejected, so every value is equally
    /// likely.
    pub fn generate(&mut self, max: u32) -> u32 {
        assert!(max > 0, "range must be non-empty");
        let limit = u32::MAX - u32::MAX % max;
        loop {
            let n = self.next_u32();
            if n < limit {
                return n % max;
            }
        }
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    for i in (1..v.len()).rev() {
        let j = rng.generate(i as u32 + 1) as usize;
        v.swap(i, j);
    }
    v
}

/// Pick up to `k` elements uniformly at random, without replacement.
pub fn sample<T>(v: Vec<T>, k: usize, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    let k = k.min(len);
    // Partial Fisher-Yates: after step i, v[..=i] is the sample so far.
    for i in 0..k {
        let j = i + rng.generate((len - i) as u32) as usize;
        v.swap(i, j);
    }
    v.truncate(k);
    v
}
