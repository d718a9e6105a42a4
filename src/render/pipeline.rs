use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::error::{BlockrayError, BlockrayResult};
use crate::render::composite::accumulate;
use crate::scene::build::Scene;

pub(crate) fn build_thread_pool(threads: Option<usize>) -> BlockrayResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BlockrayError::config(
            "render 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("blockray-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BlockrayError::config(format!("failed to build rayon thread pool: {e}")))
}

/// Traces every pixel of `scene` on `pool`, one row per work item.
///
/// Blocks until the image is complete or `timeout` elapses. On timeout the remaining rows are
/// skipped and the partial buffer is discarded. A panic in any row fails the whole render.
pub(crate) fn trace_image(
    pool: &rayon::ThreadPool,
    scene: Arc<Scene>,
    timeout: Duration,
) -> BlockrayResult<RgbaImage> {
    let canvas = scene.camera.canvas();
    let cancelled = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::sync_channel(1);

    {
        let cancelled = Arc::clone(&cancelled);
        pool.spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                let mut img = RgbaImage::new(canvas.width, canvas.height);
                let row_len = canvas.width as usize * 4;
                img.par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(y, row)| {
                        if cancelled.load(Ordering::Relaxed) {
                            return;
                        }
                        trace_row(&scene, y as u32, row);
                    });
                img
            }));
            // the receiver is gone once the caller timed out
            let _ = tx.send(result);
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(img)) => Ok(img),
        Ok(Err(payload)) => Err(BlockrayError::worker(panic_message(payload.as_ref()))),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            cancelled.store(true, Ordering::Relaxed);
            tracing::warn!(?timeout, "render exceeded its deadline, cancelling");
            Err(BlockrayError::RenderTimeout(timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(BlockrayError::worker(
            "render job ended without producing an image",
        )),
    }
}

fn trace_row(scene: &Scene, y: u32, row: &mut [u8]) {
    for (ray, px) in scene.camera.row(y).iter().zip(row.chunks_exact_mut(4)) {
        let hits = scene.trace(ray);
        px.copy_from_slice(&accumulate(&hits).0);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "render worker panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
