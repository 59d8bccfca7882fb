use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::dataset::TextSample;
use crate::error::{NnError, NnResult};
use crate::text::{LabelEncoder, Vocabulary};
use crate::train::example::Example;

/// A lazy, possibly infinite supply of training examples.
///
/// `Ok(Some(_))` yields an example, `Ok(None)` signals exhaustion and `Err`
/// is a producer failure that aborts training.
pub trait ExampleSource {
    fn next_example(&mut self) -> NnResult<Option<Example>>;
}

/// Adapts an infallible iterator; the source is exhausted when the iterator is.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Example>,
{
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        IterSource { iter: iter.into_iter() }
    }
}

impl<I> ExampleSource for IterSource<I>
where
    I: Iterator<Item = Example>,
{
    fn next_example(&mut self) -> NnResult<Option<Example>> {
        Ok(self.iter.next())
    }
}

/// Visits `0..len` forever, in a fresh random order on every pass.
#[derive(Debug, Clone)]
struct ShuffledOrder<R> {
    indices: Vec<usize>,
    cursor: usize,
    rng: R,
}

impl<R: Rng> ShuffledOrder<R> {
    fn new(len: usize, rng: R) -> Self {
        ShuffledOrder { indices: (0..len).collect(), cursor: len, rng }
    }

    fn next(&mut self) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        if self.cursor == self.indices.len() {
            self.indices.shuffle(&mut self.rng);
            self.cursor = 0;
        }
        let index = self.indices[self.cursor];
        self.cursor += 1;
        Some(index)
    }
}

/// Cycles a fixed dataset forever, reshuffling before every pass.
///
/// An empty dataset is exhausted immediately.
#[derive(Debug, Clone)]
pub struct ShuffledCycle<R> {
    examples: Vec<Example>,
    order: ShuffledOrder<R>,
}

impl<R: Rng> ShuffledCycle<R> {
    pub fn new(examples: Vec<Example>, rng: R) -> Self {
        let order = ShuffledOrder::new(examples.len(), rng);
        ShuffledCycle { examples, order }
    }
}

impl<R: Rng> ExampleSource for ShuffledCycle<R> {
    fn next_example(&mut self) -> NnResult<Option<Example>> {
        Ok(self.order.next().map(|i| self.examples[i].clone()))
    }
}

/// Cycles labelled text forever, tensorising each sample as it is drawn.
///
/// A sample whose label the encoder does not know fails the source.
pub struct TextExamples<'a, R> {
    samples: &'a [TextSample],
    vocabulary: &'a Vocabulary,
    labels: &'a LabelEncoder,
    order: ShuffledOrder<R>,
}

impl<'a, R: Rng> TextExamples<'a, R> {
    pub fn new(
        samples: &'a [TextSample],
        vocabulary: &'a Vocabulary,
        labels: &'a LabelEncoder,
        rng: R,
    ) -> Self {
        TextExamples {
            samples,
            vocabulary,
            labels,
            order: ShuffledOrder::new(samples.len(), rng),
        }
    }
}

impl<R: Rng> ExampleSource for TextExamples<'_, R> {
    fn next_example(&mut self) -> NnResult<Option<Example>> {
        let Some(index) = self.order.next() else {
            return Ok(None);
        };
        let sample = &self.samples[index];
        let input = self.vocabulary.tensor(&sample.text);
        let target = self
            .labels
            .one_hot(&sample.label)
            .map_err(|e| NnError::Source(format!("sample {index}: {e}")))?;
        Ok(Some(Example { input, target }))
    }
}
