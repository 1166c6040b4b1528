use crate::circular::SeriesColumn;
use crate::error::SourceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

/// Columnar (SoA) ring-buffer of OHLCV bars, addressed by absolute index.
///
/// Each column is itself a value source, so an aggregator over closes is
/// `FastSma::new(series.field(Field::Close), 20)`.
#[derive(Debug, Clone)]
pub struct BarSeries {
    ts: SeriesColumn<i64>,
    open: SeriesColumn<f64>,
    high: SeriesColumn<f64>,
    low: SeriesColumn<f64>,
    close: SeriesColumn<f64>,
    volume: SeriesColumn<f64>,
}

impl BarSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            ts: SeriesColumn::new(capacity),
            open: SeriesColumn::new(capacity),
            high: SeriesColumn::new(capacity),
            low: SeriesColumn::new(capacity),
            close: SeriesColumn::new(capacity),
            volume: SeriesColumn::new(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.close.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute index the next `push` will receive.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.close.next_index()
    }

    /// Appends a bar and returns its absolute index.
    pub fn push(&mut self, bar: Bar) -> usize {
        self.ts.push(bar.timestamp);
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.volume.push(bar.volume);
        self.close.push(bar.close)
    }

    /// Replaces the last (still-forming) bar and returns the previous one.
    pub fn update_last(&mut self, bar: Bar) -> Option<Bar> {
        let old = self.last();
        self.ts.update_last(bar.timestamp);
        self.open.update_last(bar.open);
        self.high.update_last(bar.high);
        self.low.update_last(bar.low);
        self.close.update_last(bar.close);
        self.volume.update_last(bar.volume);
        old
    }

    pub fn get(&self, index: usize) -> Result<Bar, SourceError> {
        Ok(Bar {
            timestamp: self.ts.get(index)?,
            open: self.open.get(index)?,
            high: self.high.get(index)?,
            low: self.low.get(index)?,
            close: self.close.get(index)?,
            volume: self.volume.get(index)?,
        })
    }

    pub fn last(&self) -> Option<Bar> {
        let i = self.next_index().checked_sub(1)?;
        self.get(i).ok()
    }

    /// The column for `field`, usable directly as a value source.
    pub fn field(&self, field: Field) -> &SeriesColumn<f64> {
        match field {
            Field::Open => &self.open,
            Field::High => &self.high,
            Field::Low => &self.low,
            Field::Close => &self.close,
            Field::Volume => &self.volume,
        }
    }

    pub fn timestamp(&self) -> &SeriesColumn<i64> {
        &self.ts
    }
}
