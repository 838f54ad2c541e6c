//! Parallel row driver using Rayon.
//!
//! The despill pipeline is a pure per-pixel function, so rows are
//! independent: [`RowDriver`] splits the output into rows and hands them to
//! a dedicated worker pool. `run` returns once every row is done.
//!
//! # Example
//!
//! ```rust
//! use despill_core::ImageBuf;
//! use despill_ops::parallel::RowDriver;
//! use despill_ops::{ColorSelect, DespillParameters, DespillSetup, DespillSources};
//!
//! let src = ImageBuf::filled(64, 64, &[0.1, 0.9, 0.1, 1.0]).unwrap();
//! let params = DespillParameters { color: ColorSelect::Green, ..Default::default() };
//! let sources = DespillSources::new(&src);
//! let setup = DespillSetup::new(params, sources.connected()).unwrap();
//!
//! let driver = RowDriver::new(0).unwrap();
//! let out = driver.run(&setup, sources, None).unwrap();
//! assert!(out.pixel(10, 10)[1] < 0.9);
//! ```

use crate::apply::RowKernel;
use crate::{DespillSetup, DespillSources, OpsError, OpsResult};
use despill_core::{ImageBuf, Rect};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Fixed-size worker pool running the despill pipeline row by row.
pub struct RowDriver {
    pool: rayon::ThreadPool,
}

impl RowDriver {
    /// Builds a pool of `threads` workers.
    ///
    /// `0` uses every available core; larger requests are capped at the
    /// available parallelism.
    ///
    /// # Errors
    ///
    /// [`OpsError::ThreadPool`] if the pool cannot be spawned.
    pub fn new(threads: usize) -> OpsResult<Self> {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let threads = if threads == 0 {
            available
        } else {
            threads.min(available)
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("despill-{}", i))
            .build()
            .map_err(|e| OpsError::ThreadPool(e.to_string()))?;
        debug!(threads, "row driver ready");
        Ok(Self { pool })
    }

    /// Number of workers.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Despills `sources` across the pool.
    ///
    /// Same contract as [`process_image`](crate::process_image): pixels
    /// outside `region` are copied unchanged.
    ///
    /// # Errors
    ///
    /// See [`process_image`](crate::process_image).
    pub fn run(
        &self,
        setup: &DespillSetup,
        sources: DespillSources<'_>,
        region: Option<Rect>,
    ) -> OpsResult<ImageBuf> {
        let (kernel, mut output) = RowKernel::prepare(setup, sources, region)?;
        if setup.is_bypass() {
            debug!("bypass, copying source");
            return Ok(output);
        }
        trace!(threads = self.threads(), rows = output.height(), "RowDriver::run");

        let row_len = output.row_len();
        self.pool.install(|| {
            output
                .data_mut()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| kernel.process_row(y as u32, row));
        });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{process_image, ColorSelect, ConnectedInputs, DespillParameters};
    use despill_math::Color3;

    #[test]
    fn test_thread_count() {
        let available = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        assert_eq!(RowDriver::new(0).unwrap().threads(), available);
        assert_eq!(RowDriver::new(1).unwrap().threads(), 1);
        assert_eq!(RowDriver::new(100_000).unwrap().threads(), available);
    }

    #[test]
    fn test_matches_serial() {
        let mut src = ImageBuf::new(37, 23, 4);
        for y in 0..23 {
            for x in 0..37 {
                let px = src.pixel_mut(x, y);
                px[0] = x as f32 / 37.0;
                px[1] = 0.9 - y as f32 / 46.0;
                px[2] = 0.2;
                px[3] = 1.0;
            }
        }
        let params = DespillParameters {
            color: ColorSelect::Pick,
            pick: Color3::new(0.2, 0.8, 0.3),
            output_alpha: true,
            ..Default::default()
        };
        let setup = DespillSetup::new(params, ConnectedInputs::default()).unwrap();
        let region = Some(Rect::new(3, 2, 30, 15));

        let serial = process_image(&setup, DespillSources::new(&src), region).unwrap();
        let parallel = RowDriver::new(4)
            .unwrap()
            .run(&setup, DespillSources::new(&src), region)
            .unwrap();
        assert_eq!(serial, parallel);
    }
}
