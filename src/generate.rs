//! Batch entry points: one animation per (annotation × text layer × image × template variant).

use std::collections::HashMap;

use rayon::prelude::*;

use crate::encode::apng::{AnimationSpec, FrameDelay};
use crate::encode::sink::ApngSink;
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::render::composite::Layers;
use crate::scene::model::AnnotationLayer;
use crate::scene::request::GenerationRequest;
use crate::template::{RenderEnv, TemplateKind, TemplateParams, generate_frames};

/// Artifacts above this size are reported; banner hosts commonly reject them.
pub const SIZE_WARNING_BYTES: usize = 300 * 1024;

/// Options controlling batch generation.
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Generate variants on a rayon thread pool. Output order is unchanged.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// One encoded animation of a batch.
#[derive(Clone, Debug)]
pub struct GeneratedVariant {
    /// Suggested name fragment, e.g. `border_01`; counters restart for each annotation.
    pub name_fragment: String,
    pub template: TemplateKind,
    /// Border color or icon label of this variant.
    pub variant: &'static str,
    /// Index into the request's annotation list.
    pub annotation_index: usize,
    /// Index into the request's text layer list.
    pub text_index: usize,
    /// Index into the request's image variations.
    pub image_index: usize,
    /// Copied from the annotation; downstream naming uses it.
    pub fixed_product_name: bool,
    /// APNG bytes.
    pub bytes: Vec<u8>,
}

/// Compose and encode a single animation.
#[tracing::instrument(skip(env, layers), fields(kind = ?params.kind()))]
pub fn generate_animation(
    env: &RenderEnv<'_>,
    layers: Layers<'_>,
    params: &TemplateParams,
    frame_count: usize,
    delay: FrameDelay,
    loop_count: u32,
) -> ApngenResult<Vec<u8>> {
    let frames = generate_frames(env, layers, params, frame_count)?;
    let spec = AnimationSpec::new(frames, delay, loop_count);
    let mut sink = ApngSink::new();
    spec.write_to(&mut sink)?;
    sink.into_bytes()
}

struct Job<'r> {
    name_fragment: String,
    annotation_index: usize,
    text_index: usize,
    image_index: usize,
    annotation: &'r AnnotationLayer,
    params: TemplateParams,
    frames: usize,
    loop_count: u32,
}

/// Generate every variant of `req`.
///
/// Iteration order is enabled annotations, then enabled text layers, then image variations,
/// then template requests, then each request's colors/icons; the result keeps that order even
/// when `opts.parallel` is set.
#[tracing::instrument(skip(req, env))]
pub fn generate_batch(
    req: &GenerationRequest,
    env: &RenderEnv<'_>,
    opts: &BatchOpts,
) -> ApngenResult<Vec<GeneratedVariant>> {
    req.validate()?;
    let jobs = plan_jobs(req);
    tracing::debug!(jobs = jobs.len(), "planned batch");

    let run = |job: &Job<'_>| -> ApngenResult<GeneratedVariant> {
        let layers = req.variant_layers(job.annotation_index, job.text_index, job.image_index)?;
        let bytes = generate_animation(
            env,
            layers,
            &job.params,
            job.frames,
            req.frame_delay,
            job.loop_count,
        )?;
        if bytes.len() > SIZE_WARNING_BYTES {
            tracing::warn!(
                name = %job.name_fragment,
                size_kib = bytes.len() / 1024,
                "artifact exceeds 300 KiB"
            );
        }
        Ok(GeneratedVariant {
            name_fragment: job.name_fragment.clone(),
            template: job.params.kind(),
            variant: job.params.variant_label(),
            annotation_index: job.annotation_index,
            text_index: job.text_index,
            image_index: job.image_index,
            fixed_product_name: job.annotation.fixed_product_name,
            bytes,
        })
    };

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| jobs.par_iter().map(run).collect())
    } else {
        jobs.iter().map(run).collect()
    }
}

fn plan_jobs(req: &GenerationRequest) -> Vec<Job<'_>> {
    let mut jobs = Vec::new();
    for (annotation_index, annotation) in req.annotations.iter().enumerate() {
        if !annotation.enabled {
            continue;
        }
        let mut counters: HashMap<TemplateKind, usize> = HashMap::new();
        for (text_index, text) in req.text_layers.iter().enumerate() {
            if !text.enabled {
                continue;
            }
            for image_index in 0..req.images.len() {
                for template in &req.templates {
                    for params in template.variants() {
                        let counter = counters.entry(template.kind()).or_insert(0);
                        *counter += 1;
                        jobs.push(Job {
                            name_fragment: format!("{}_{:02}", template.kind().label(), counter),
                            annotation_index,
                            text_index,
                            image_index,
                            annotation,
                            params,
                            frames: template.frames(),
                            loop_count: template.loop_count(),
                        });
                    }
                }
            }
        }
    }
    jobs
}

fn build_thread_pool(threads: Option<usize>) -> ApngenResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ApngenError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ApngenError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/generate.rs"]
mod tests;
