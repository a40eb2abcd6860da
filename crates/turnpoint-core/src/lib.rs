//! turnpoint-core: Freehand curve analysis (sans-IO).
//!
//! Finds the points where a hand-drawn stroke changes direction and
//! places an adaptively sized square region around each one:
//! measure -> turning points -> cluster reduction -> region sizing,
//! plus an optional fixed-step resampling of the stroke for display.
//!
//! This crate has **no I/O dependencies**. It consumes [`Curve`]s built
//! from pointer positions (see [`StrokeBuilder`]) and returns plain
//! data. Rendering and input handling live with the caller.

pub mod cluster;
pub mod curve;
pub mod diagnostics;
pub mod line;
pub mod measure;
pub mod region;
pub mod sample;
pub mod stroke;
pub mod turning;
pub mod types;

pub use curve::Curve;
pub use diagnostics::{AnalysisDiagnostics, Clock, analyze_with_diagnostics};
pub use kurbo;
pub use line::{Line, LineStyle};
pub use measure::{ArcLengthMeasure, CurveMeasurer};
pub use stroke::StrokeBuilder;
pub use types::{Analysis, AnalysisConfig, AnalysisError, Point, Rect};

/// Analyze one completed curve.
///
/// # Pipeline steps
///
/// 1. Measure the arc length of the curve's first contour
/// 2. Walk it in fixed arc-length steps and record turning points
/// 3. Optional cluster reduction of nearby turning points
/// 4. Size a square region around every remaining point
/// 5. Optional fixed-step resampling for display
///
/// Empty and zero-length curves are not errors: they produce an
/// [`Analysis`] with no points.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` fails
/// [`AnalysisConfig::validate`].
///
/// # Examples
///
/// ```
/// use turnpoint_core::{AnalysisConfig, Point, StrokeBuilder, analyze};
///
/// let stroke = StrokeBuilder::from_samples(&[
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 0.0),
///     Point::new(100.0, 100.0),
/// ]);
/// let analysis = analyze(&stroke, &AnalysisConfig::default()).unwrap();
/// assert_eq!(analysis.points.len(), analysis.rects.len());
/// assert_eq!(analysis.points.first(), Some(&Point::new(0.0, 0.0)));
/// ```
pub fn analyze(curve: &Curve, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    let length = CurveMeasurer::new(curve).length();
    let raw_points = turning::find_turning_points(curve, config);

    let points = if config.reduce_clusters {
        cluster::reduce_clusters(&raw_points, length, config)
    } else {
        raw_points.clone()
    };

    let rects = region::size_regions(&points, config);
    let sampled = config
        .sample_line
        .then(|| sample::sample_path(curve, config));

    tracing::debug!(
        length,
        raw_points = raw_points.len(),
        points = points.len(),
        sampled = sampled.is_some(),
        "analyzed curve",
    );

    Ok(Analysis {
        length,
        raw_points,
        points,
        rects,
        sampled,
    })
}
