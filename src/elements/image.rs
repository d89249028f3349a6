//! Images scaled into a box.

use crate::errors::{RenderError, ValidationError};
use crate::log::trace;
use crate::normalized::NormalizedBox;
use crate::placement::{GravitySet, ScaleStrategy, fit_image};
use crate::surface::{Canvas, ImageSource};
use crate::types::Color;

use super::{Render, mark};

/// Configuration of an [`ImageElement`]
#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    source: ImageSource,
    strategy: ScaleStrategy,
    area: NormalizedBox,
    gravity: GravitySet,
}

impl ImageConfig {
    /// Stretch `source` over the whole region.
    pub fn new(source: ImageSource) -> Self {
        ImageConfig {
            source,
            strategy: ScaleStrategy::Fill,
            area: NormalizedBox::FULL,
            gravity: GravitySet::NONE,
        }
    }

    pub fn scale(mut self, strategy: ScaleStrategy, area: NormalizedBox) -> Self {
        self.strategy = strategy;
        self.area = area;
        self
    }

    pub fn gravity(mut self, gravity: impl Into<GravitySet>) -> Self {
        self.gravity = gravity.into();
        self
    }

    pub fn build(self) -> Result<ImageElement, ValidationError> {
        match &self.source {
            ImageSource::File(path) if path.as_os_str().is_empty() => {
                return Err(ValidationError::EmptyImagePath);
            }
            _ => {}
        }
        Ok(ImageElement { config: self })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    config: ImageConfig,
}

impl ImageElement {
    pub fn source(&self) -> &ImageSource {
        &self.config.source
    }

    /// The box the image lands in on `canvas`.
    pub fn resolve(&self, canvas: &dyn Canvas) -> Result<NormalizedBox, RenderError> {
        let ImageConfig {
            source,
            strategy,
            area,
            gravity,
        } = &self.config;
        let pulled = gravity.apply(area)?;
        if *strategy == ScaleStrategy::Fill {
            return Ok(pulled);
        }
        let image_ratio = canvas.image_aspect_ratio(source)?;
        Ok(fit_image(*strategy, &pulled, canvas.rect().aspect_ratio(), image_ratio)?)
    }
}

impl Render for ImageElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        let fitted = self.resolve(canvas)?;
        trace!(image = %self.config.source.name(), %fitted, "placing image");

        if !canvas.mode().is_calibration() {
            return canvas.draw_image(&self.config.source, &fitted);
        }

        mark(canvas, &self.config.area, Color::RED)?;
        mark(canvas, &self.config.gravity.apply(&self.config.area)?, Color::GREEN)?;
        canvas.set_color(Color::ORANGE);
        canvas.stroke_rect(&fitted, 1.0, 1.0)?;
        let descending = NormalizedBox::new(fitted.min_x(), fitted.min_y(), fitted.max_x(), fitted.max_y())?;
        let ascending = NormalizedBox::new(fitted.min_x(), fitted.max_y(), fitted.max_x(), fitted.min_y())?;
        canvas.draw_line(&descending, 1.0, 1.0)?;
        canvas.draw_line(&ascending, 1.0, 1.0)
    }
}
