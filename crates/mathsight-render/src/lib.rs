//! Rendering boundary for scanned formulas.
//!
//! Actual typesetting lives behind the [`Renderer`] trait; this crate only
//! defines the contract and the pipeline step that turns located formulas
//! into previews. Render failures are not surfaced to the caller: a formula
//! that fails to render simply produces no preview.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mathsight_scan::LocatedFormula;

/// Per-formula rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Foreground color, as a CSS color string.
    pub color: String,
    /// Scale factor relative to the editor font size.
    pub scale: f64,
    /// Height limit in pixels. `None` leaves the preview unconstrained.
    pub max_height: Option<f64>,
}

/// Caller-side styling. `line_height` is the editor's line height in
/// pixels, used to cap multi-line previews to the lines they may cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub color: String,
    pub scale: f64,
    pub line_height: f64,
}

impl RenderConfig {
    /// Options for one formula: multi-line previews are capped to the
    /// display lines the locator granted them, single-line previews grow
    /// freely.
    pub fn options_for(&self, formula: &LocatedFormula) -> RenderOptions {
        let lines = formula.display_lines();
        RenderOptions {
            color: self.color.clone(),
            scale: self.scale,
            max_height: (lines > 1).then(|| f64::from(lines) * self.line_height),
        }
    }
}

/// A rendered preview. `data` is the renderer's payload (SVG markup or a
/// data URL), opaque to this crate. Renderers that typeset an error notice
/// instead of failing outright set `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub width: f64,
    pub height: f64,
    pub data: String,
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid formula: {0}")]
    InvalidFormula(String),
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
}

/// An external typesetting service.
pub trait Renderer {
    /// Installs preamble macros shared by subsequent renders, replacing any
    /// previously loaded set.
    fn preload(&mut self, preamble: &str);

    fn render(&mut self, tex: &str, options: &RenderOptions) -> Result<Preview, RenderError>;
}

/// A located formula together with its preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedFormula {
    pub formula: LocatedFormula,
    pub preview: Preview,
}

/// Renders every located formula. Failed renders and previews flagged as
/// errors are dropped; a message at debug level is the only trace.
pub fn render_all(
    renderer: &mut impl Renderer,
    located: Vec<LocatedFormula>,
    config: &RenderConfig,
) -> Vec<RenderedFormula> {
    located
        .into_iter()
        .filter_map(|formula| {
            let options = config.options_for(&formula);
            match renderer.render(&formula.formula.text, &options) {
                Ok(preview) if !preview.error => Some(RenderedFormula { formula, preview }),
                Ok(_) => {
                    log::debug!("renderer flagged an error for {:?}", formula.formula.text);
                    None
                }
                Err(err) => {
                    log::debug!("render failed for {:?}: {err}", formula.formula.text);
                    None
                }
            }
        })
        .collect()
}
