//! Case generators for property-based testing.
//!
//! A generator is a lazy sequence of candidate values of one type,
//! pulled one at a time by the executor that owns it. Finite strategies
//! (edge tables, pools) return `None` forever once exhausted; the random
//! strategy is conceptually infinite and is bounded externally by the
//! executor's case budget.

use crate::param::TestParam;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A source of candidate values of type `T`.
pub trait Generator<T> {
    /// Produce the next candidate, or `None` once exhausted.
    fn next(&mut self) -> Option<T>;
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for &mut G {
    fn next(&mut self) -> Option<T> {
        (**self).next()
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for Box<G> {
    fn next(&mut self) -> Option<T> {
        (**self).next()
    }
}

/// Infinite stream of pseudo-random values.
///
/// The default construction seeds from entropy and samples the canonical
/// distribution for `T`: uniform over the full representable range for
/// integers, uniform in [0, 1) for floats. Custom distributions plug in
/// through [`RandomGenerator::from_source`].
pub struct RandomGenerator<T> {
    source: Box<dyn FnMut() -> T>,
}

impl<T: TestParam> RandomGenerator<T> {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        RandomGenerator {
            source: Box::new(move || T::sample(&mut rng)),
        }
    }
}

impl<T: TestParam> Default for RandomGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RandomGenerator<T> {
    /// Draw values from a caller-supplied source instead of the canonical
    /// distribution.
    pub fn from_source<F>(source: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        RandomGenerator {
            source: Box::new(source),
        }
    }
}

impl<T> Generator<T> for RandomGenerator<T> {
    fn next(&mut self) -> Option<T> {
        Some((self.source)())
    }
}

/// Yields a caller-supplied sequence once, in order, then `None` forever.
///
/// This is the mechanism for hand-picked regression cases.
pub struct PoolGenerator<T> {
    values: Box<dyn Iterator<Item = T>>,
}

impl<T: 'static> PoolGenerator<T> {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        PoolGenerator {
            values: Box::new(values.into_iter()),
        }
    }
}

impl<T> Generator<T> for PoolGenerator<T> {
    fn next(&mut self) -> Option<T> {
        self.values.next()
    }
}

/// Yields the fixed boundary-value table for `T` once, then `None`.
///
/// Edge enumeration is static domain knowledge that random sampling only
/// reaches with vanishing probability; running it back-to-back with a
/// random pass covers both.
pub struct EdgeGenerator<T> {
    pool: PoolGenerator<T>,
}

impl<T: TestParam> EdgeGenerator<T> {
    pub fn new() -> Self {
        EdgeGenerator {
            pool: PoolGenerator::new(T::edge_cases()),
        }
    }
}

impl<T: TestParam> Default for EdgeGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Generator<T> for EdgeGenerator<T> {
    fn next(&mut self) -> Option<T> {
        self.pool.next()
    }
}

/// Chooses which generator the sequential runner instantiates per type.
///
/// Test code can implement this to inject instrumented generators.
pub trait GeneratorStrategy {
    fn build<T: TestParam>(&self) -> Box<dyn Generator<T>>;
}

/// Instantiate [`RandomGenerator`] for every type in the list.
pub struct RandomStrategy;

impl GeneratorStrategy for RandomStrategy {
    fn build<T: TestParam>(&self) -> Box<dyn Generator<T>> {
        Box::new(RandomGenerator::new())
    }
}

/// Instantiate [`EdgeGenerator`] for every type in the list.
pub struct EdgeStrategy;

impl GeneratorStrategy for EdgeStrategy {
    fn build<T: TestParam>(&self) -> Box<dyn Generator<T>> {
        Box::new(EdgeGenerator::new())
    }
}
