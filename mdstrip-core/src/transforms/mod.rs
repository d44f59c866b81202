//! Transform pipeline infrastructure
//!
//! Every strip operation is a stage implementing [`Runnable`]. Stages are
//! chained into a [`Transform`] whose type parameters make sure each stage
//! receives what the previous one produced. For text cleaning every stage is
//! `String -> String`, so any subset of stages composes in any order; the
//! order that actually runs is fixed by [`standard::build_pipeline`].
//!
//! Stages cannot fail: each one maps any string to a string.
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(|s: String| s)
//!     .then(StripComments::new())
//!     .then(StripTags::new())
//!     .then(CollapseWhitespace::new());
//!
//! let cleaned = pipeline.run("<b>hi</b>\n\n\n".to_string());
//! ```
//!
//! # Module Organization
//!
//! - [`stages`]: individual strip stages
//! - [`standard`]: pipeline assembly from an [`OptionSet`](crate::mode::OptionSet)
//!   and the static preset pipelines

pub mod stages;
pub mod standard;

use std::fmt;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> O;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`,
/// extended one stage at a time with [`Transform::then`].
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with the
    /// stage's output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input);
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> O {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> O {
        Transform::run(self, input)
    }
}

impl<I, O> fmt::Debug for Transform<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}
