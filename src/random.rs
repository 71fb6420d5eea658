/*!

The one random-generation capability of a run. A run is seeded once with `init_random()`;
every stochastic draw in the engine goes through a named stream declared with `define_rng!`,
and each stream is seeded from the base seed and its own name. Streams are created lazily, so
adding a stream does not perturb the draws of the others, and re-seeding with the same base
seed reproduces a run exactly.

*/

use crate::{
    context::Context,
    error::EpidemicError,
    hashing::hash_str,
    log::trace,
    new_trait::New,
    trait_map::TraitMap,
};
use rand::{
    distr::uniform::{SampleRange, SampleUniform},
    prelude::Distribution,
    Rng,
    SeedableRng,
};
use rand_distr::Binomial;
use std::any::Any;

pub trait RngId: Any {
    #![allow(non_upper_case_globals)]
    const new: &'static dyn Fn(u64) -> Self;
    const name: &'static str;
    type RngType: SeedableRng;
    fn rng(&mut self) -> &mut Self::RngType;
}

struct RngPlugin {
    base_seed: u64,
    rng_map: TraitMap,
}

impl RngPlugin {
    fn clear(&mut self) {
        self.rng_map.clear();
    }

    fn get_rng<R: RngId>(&mut self) -> &mut R::RngType {
        let base_seed = self.base_seed;
        self.rng_map
            .get_or_insert_with(|| {
                trace!("creating new RNG {} (base seed={})", R::name, base_seed);
                R::new(base_seed.wrapping_add(hash_str(R::name)))
            })
            .rng()
    }
}

impl New for RngPlugin {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &|| RngPlugin {
        base_seed: 0,
        rng_map: TraitMap::new(),
    };
}

/// Gets a mutable reference to the random number generator associated with the given
/// `RngId`.
// This is a private free function so that it's not leaked to the public API.
fn get_rng<R: RngId>(context: &mut Context) -> &mut R::RngType {
    context.get_data_container_mut::<RngPlugin>().get_rng::<R>()
}

pub trait ContextRandomExt {
    /// Sets the base seed and discards every existing stream so they are re-seeded on next use.
    fn init_random(&mut self, base_seed: u64);

    /// Gets a random sample from the random number generator associated with the given
    /// `RngId` by applying the specified sampler function. If the Rng has not been used
    /// before, one will be created from the base seed given to `init_random` (0 if it was
    /// never called).
    fn sample<R: RngId, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T;

    /// Gets a random sample from the specified distribution using the generator associated
    /// with the given `RngId`.
    fn sample_distr<R: RngId, T>(&mut self, distribution: impl Distribution<T>) -> T
    where
        R::RngType: Rng;

    /// Gets a random sample within the range provided by `range`
    /// using the generator associated with the given `RngId`.
    fn sample_range<R: RngId, S, T>(&mut self, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform;

    /// Gets a random boolean value which is true with probability `p`
    /// using the generator associated with the given `RngId`.
    fn sample_bool<R: RngId>(&mut self, p: f64) -> bool
    where
        R::RngType: Rng;

    /// Draws the number of successes out of `n` independent trials with success probability `p`.
    fn sample_binomial<R: RngId>(&mut self, n: u64, p: f64) -> Result<u64, EpidemicError>
    where
        R::RngType: Rng;

    /// Draws `amount` distinct elements of `items` uniformly without replacement. Asking for
    /// more than `items.len()` returns every element.
    fn sample_without_replacement<R: RngId, T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T>
    where
        R::RngType: Rng;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module");
        let rng_container = self.get_data_container_mut::<RngPlugin>();
        rng_container.base_seed = base_seed;

        // Clear any existing Rngs to ensure they get re-seeded when `get_rng` is called
        rng_container.clear();
    }

    fn sample<R: RngId, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T {
        let rng = get_rng::<R>(self);
        sampler(rng)
    }

    fn sample_distr<R: RngId, T>(&mut self, distribution: impl Distribution<T>) -> T
    where
        R::RngType: Rng,
    {
        let rng = get_rng::<R>(self);
        distribution.sample::<R::RngType>(rng)
    }

    fn sample_range<R: RngId, S, T>(&mut self, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample::<R, T>(|rng| rng.random_range(range))
    }

    fn sample_bool<R: RngId>(&mut self, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample::<R, bool>(|rng| rng.random_bool(p))
    }

    fn sample_binomial<R: RngId>(&mut self, n: u64, p: f64) -> Result<u64, EpidemicError>
    where
        R::RngType: Rng,
    {
        let binomial = Binomial::new(n, p).map_err(|e| {
            EpidemicError::InvalidParameter(format!("binomial({n}, {p}): {e}"))
        })?;
        Ok(self.sample_distr::<R, u64>(binomial))
    }

    fn sample_without_replacement<R: RngId, T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T>
    where
        R::RngType: Rng,
    {
        let amount = amount.min(items.len());
        if amount == 0 {
            return Vec::new();
        }
        let rng = get_rng::<R>(self);
        rand::seq::index::sample(rng, items.len(), amount)
            .into_iter()
            .map(|idx| items[idx].clone())
            .collect()
    }
}

#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        $crate::define_rng!($random_id, $crate::rand::rngs::StdRng);
    };
    ($random_id:ident, $rng_type:ty) => {
        struct $random_id {
            rng: $rng_type,
        }

        impl $crate::random::RngId for $random_id {
            #![allow(non_upper_case_globals)]
            type RngType = $rng_type;
            const name: &'static str = stringify!($random_id);
            const new: &'static dyn Fn(u64) -> Self = &|seed| {
                use $crate::rand::SeedableRng;
                Self {
                    rng: <$rng_type>::seed_from_u64(seed),
                }
            };

            fn rng(&mut self) -> &mut Self::RngType {
                &mut self.rng
            }
        }
    };
}
#[allow(unused_imports)]
pub use define_rng;
